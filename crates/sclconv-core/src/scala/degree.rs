//! Single interval lines and their lexical classification.

use std::fmt;

use serde::Serialize;

use crate::error::FormatError;

/// How a degree token is interpreted.
///
/// The choice is made from the token's shape alone: a `.` means cents, a `/`
/// means a fraction, anything else is a bare ratio. A token such as `1.5` is
/// therefore read as 1.5 cents, never as a ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegreeKind {
    Cents,
    Fraction,
    Ratio,
}

impl DegreeKind {
    /// Classify a token by its lexical shape.
    pub fn classify(token: &str) -> Self {
        if token.contains('.') {
            DegreeKind::Cents
        } else if token.contains('/') {
            DegreeKind::Fraction
        } else {
            DegreeKind::Ratio
        }
    }
}

impl fmt::Display for DegreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DegreeKind::Cents => "cents value",
            DegreeKind::Fraction => "fraction",
            DegreeKind::Ratio => "ratio",
        };
        f.write_str(name)
    }
}

/// One parsed interval line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleDegree {
    /// First whitespace-delimited token of the line.
    pub token: String,
    pub kind: DegreeKind,
    /// Pitch above the root in volts (1 V = 1 octave).
    pub volts: f64,
}

impl ScaleDegree {
    /// Parse a degree token. `line` is only used for error reporting.
    pub fn parse(token: &str, line: usize) -> Result<Self, FormatError> {
        let kind = DegreeKind::classify(token);
        let volts = match kind {
            DegreeKind::Cents => parse_number(token, kind, line)? / 1200.0,
            DegreeKind::Fraction => {
                let mut parts = token.split('/');
                let (num, den) = match (parts.next(), parts.next(), parts.next()) {
                    (Some(num), Some(den), None) => (num, den),
                    _ => {
                        return Err(FormatError::InvalidNumber {
                            token: token.to_string(),
                            kind,
                            line,
                        })
                    }
                };
                let num = parse_number_part(num, token, kind, line)?;
                let den = parse_number_part(den, token, kind, line)?;
                if den == 0.0 {
                    return Err(FormatError::ZeroDenominator {
                        token: token.to_string(),
                        line,
                    });
                }
                log2_ratio(num / den, token, line)?
            }
            DegreeKind::Ratio => log2_ratio(parse_number(token, kind, line)?, token, line)?,
        };

        Ok(Self {
            token: token.to_string(),
            kind,
            volts,
        })
    }
}

fn parse_number(token: &str, kind: DegreeKind, line: usize) -> Result<f64, FormatError> {
    parse_number_part(token, token, kind, line)
}

fn parse_number_part(
    part: &str,
    token: &str,
    kind: DegreeKind,
    line: usize,
) -> Result<f64, FormatError> {
    part.parse::<f64>().map_err(|_| FormatError::InvalidNumber {
        token: token.to_string(),
        kind,
        line,
    })
}

fn log2_ratio(ratio: f64, token: &str, line: usize) -> Result<f64, FormatError> {
    if ratio.is_nan() || ratio <= 0.0 {
        return Err(FormatError::NonPositiveRatio {
            token: token.to_string(),
            line,
        });
    }
    Ok(ratio.log2())
}
