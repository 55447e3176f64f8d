//! Error and warning types for the conversion pipeline.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::scala::DegreeKind;

/// Malformed `.scl` content. Line numbers are 1-based and refer to the
/// original text, comments and blank lines included.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Fewer than two non-comment lines (description and count).
    #[error("file is too short: expected a description line and a degree count")]
    TooShort,

    /// The count line does not start with a non-negative integer.
    #[error("invalid degree count '{token}' on line {line}")]
    InvalidCount { token: String, line: usize },

    /// A degree token could not be parsed as a number.
    #[error("invalid {kind} '{token}' on line {line}")]
    InvalidNumber {
        token: String,
        kind: DegreeKind,
        line: usize,
    },

    /// A fraction with a zero denominator.
    #[error("zero denominator in '{token}' on line {line}")]
    ZeroDenominator { token: String, line: usize },

    /// A fraction or ratio that is zero or negative.
    #[error("ratio '{token}' on line {line} is not positive")]
    NonPositiveRatio { token: String, line: usize },
}

/// Error type for converting a single file.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Malformed input text.
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// A quantized value does not fit a signed 16-bit item.
    #[error("Range error: degree {index} quantizes to {millivolts} mV, outside -32768..=32767")]
    Range { index: usize, millivolts: f64 },

    /// More items than the one-byte size field can hold.
    #[error("Range error: {count} items do not fit the size field (at most {max})")]
    TooManyItems { count: usize, max: usize },

    /// Reading the input or writing the output failed.
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Options rejected before conversion started.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ConvertError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::Format(_) => "SCL_001",
            ConvertError::Range { .. } => "SCL_002",
            ConvertError::Io { .. } => "SCL_003",
            ConvertError::InvalidConfig(_) => "SCL_004",
            ConvertError::TooManyItems { .. } => "SCL_005",
        }
    }

    /// Error category for reports.
    pub fn category(&self) -> &'static str {
        match self {
            ConvertError::Format(_) => "format",
            ConvertError::Range { .. } | ConvertError::TooManyItems { .. } => "range",
            ConvertError::Io { .. } => "io",
            ConvertError::InvalidConfig(_) => "config",
        }
    }
}

/// Non-fatal conditions raised during conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConvertWarning {
    /// The scale had more values than allowed and was cut down.
    SizeTruncated { original: usize, max: usize },
}

impl ConvertWarning {
    /// Stable warning code.
    pub fn code(&self) -> &'static str {
        match self {
            ConvertWarning::SizeTruncated { .. } => "SCL_W001",
        }
    }
}

impl fmt::Display for ConvertWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertWarning::SizeTruncated { original, max } => {
                write!(f, "Scale too large ({}), truncating to {}", original, max)
            }
        }
    }
}
