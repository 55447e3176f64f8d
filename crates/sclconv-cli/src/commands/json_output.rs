//! JSON output types for machine-readable CLI output.
//!
//! Every command accepts `--json`; these are the documents it prints.

use serde::Serialize;

use sclconv_core::batch::BatchReport;
use sclconv_core::convert::ConversionReport;
use sclconv_core::sca::DecodedSca;
use sclconv_core::{ConvertError, ConvertWarning};

/// Error codes for CLI-level failures.
///
/// Conversion failures pass through the library codes (`SCL_XXX`).
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File is not a valid user scale
    pub const INVALID_SCA: &str = "CLI_002";
    /// Batch could not run
    pub const BATCH_ERROR: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "SCL_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&ConvertError> for JsonError {
    fn from(err: &ConvertError) -> Self {
        JsonError::new(err.code(), err.to_string())
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonWarning {
    pub code: String,
    pub message: String,
}

impl From<&ConvertWarning> for JsonWarning {
    fn from(warning: &ConvertWarning) -> Self {
        Self {
            code: warning.code().to_string(),
            message: warning.to_string(),
        }
    }
}

/// JSON output for the `convert` command.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ConversionReport>,
}

impl ConvertOutput {
    pub fn success(report: ConversionReport) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings: report.warnings.iter().map(JsonWarning::from).collect(),
            result: Some(report),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            warnings: Vec::new(),
            result: None,
        }
    }
}

/// JSON output for the `batch` command.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<BatchReport>,
}

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<DecodedSca>,
}
