//! `.scl` text parsing.

use serde::Serialize;

use super::degree::ScaleDegree;
use crate::error::FormatError;

/// A parsed tuning definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuningDefinition {
    /// Free-text description line, passed through verbatim.
    pub description: String,
    /// Degree count declared on the second line.
    pub declared_count: usize,
    /// Parsed degrees, root excluded. May be shorter than `declared_count`
    /// when the file ends early.
    pub degrees: Vec<ScaleDegree>,
}

impl TuningDefinition {
    /// Volts-per-octave values with the implicit `0.0` root first.
    pub fn volts(&self) -> Vec<f64> {
        std::iter::once(0.0)
            .chain(self.degrees.iter().map(|d| d.volts))
            .collect()
    }

    /// Whether every declared degree was present.
    pub fn is_complete(&self) -> bool {
        self.degrees.len() == self.declared_count
    }
}

/// Description and declared count only, used to pre-filter batch inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SclHeader {
    pub description: String,
    pub declared_count: usize,
}

/// A non-comment line with its 1-based line number.
struct ContentLine<'a> {
    number: usize,
    text: &'a str,
}

/// Trimmed lines that are neither blank nor `!` comments.
fn content_lines(text: &str) -> impl Iterator<Item = ContentLine<'_>> {
    text.lines().enumerate().filter_map(|(index, line)| {
        let text = line.trim();
        if text.is_empty() || text.starts_with('!') {
            None
        } else {
            Some(ContentLine {
                number: index + 1,
                text,
            })
        }
    })
}

/// First whitespace-delimited token. Content lines are never blank, so
/// this always yields something.
fn first_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or(text)
}

/// How much of the count line must be the integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountRule {
    /// Only the first token; trailing text is ignored.
    FirstToken,
    /// The whole trimmed line.
    WholeLine,
}

fn parse_header<'a>(
    lines: &mut impl Iterator<Item = ContentLine<'a>>,
    rule: CountRule,
) -> Result<SclHeader, FormatError> {
    let description = lines.next().ok_or(FormatError::TooShort)?;
    let count_line = lines.next().ok_or(FormatError::TooShort)?;

    let token = match rule {
        CountRule::FirstToken => first_token(count_line.text),
        CountRule::WholeLine => count_line.text,
    };
    let declared_count = token
        .parse::<usize>()
        .map_err(|_| FormatError::InvalidCount {
            token: token.to_string(),
            line: count_line.number,
        })?;

    Ok(SclHeader {
        description: description.text.to_string(),
        declared_count,
    })
}

/// Parse only the description and declared count, for pre-filtering batch
/// inputs.
///
/// Stricter than [`parse_scl`]: the count line must hold nothing but the
/// integer, so `5 notes` is rejected here even though the full parser
/// accepts it.
pub fn parse_scl_header(text: &str) -> Result<SclHeader, FormatError> {
    parse_header(&mut content_lines(text), CountRule::WholeLine)
}

/// Parse a complete `.scl` definition.
///
/// Reads up to `declared_count` degree lines; a file that ends early yields
/// the degrees collected so far.
pub fn parse_scl(text: &str) -> Result<TuningDefinition, FormatError> {
    let mut lines = content_lines(text);
    let header = parse_header(&mut lines, CountRule::FirstToken)?;

    let degrees = lines
        .take(header.declared_count)
        .map(|line| ScaleDegree::parse(first_token(line.text), line.number))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TuningDefinition {
        description: header.description,
        declared_count: header.declared_count,
        degrees,
    })
}

/// Decode raw file bytes as UTF-8, dropping invalid sequences.
pub fn decode_text(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
