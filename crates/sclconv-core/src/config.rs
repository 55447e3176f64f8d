//! Format constants and conversion options.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::ConvertError;

/// Default maximum number of values (root included) in a user scale.
pub const DEFAULT_USER_SCALE_SIZE_MAX: u8 = 32;

/// Fixed constants of the `.SCA` user scale format.
///
/// These are baked into the firmware's loader; a single read-only value is
/// threaded through the serializer instead of scattered literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatConfig {
    /// File type tag identifying a user scale file.
    pub file_type: u8,
    /// File header format version.
    pub header_version: u8,
    /// Project/writer version stored after the file header.
    pub writer_version: u32,
    /// Data block mode tag for a voltage scale.
    pub voltage_mode: u8,
}

impl FormatConfig {
    /// The format written by the current firmware.
    pub const DEFAULT: Self = Self {
        file_type: 1,
        header_version: 0,
        writer_version: 33,
        voltage_mode: 1,
    };
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Options for converting one `.scl` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertOptions {
    /// Display name; defaults to the uppercased input file stem.
    pub name: Option<String>,
    /// Maximum number of values (root included) kept in the output.
    pub max_size: u8,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            name: None,
            max_size: DEFAULT_USER_SCALE_SIZE_MAX,
        }
    }
}

impl ConvertOptions {
    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the maximum scale size.
    pub fn with_max_size(mut self, max_size: u8) -> Self {
        self.max_size = max_size;
        self
    }

    /// Check the options before any file is touched.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.max_size == 0 {
            return Err(ConvertError::InvalidConfig(
                "max_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// What a batch does when one file fails to convert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Record the failure and move on to the next file.
    #[default]
    SkipAndContinue,
    /// Stop the batch at the first failure. Files already written stay.
    FailFast,
}

/// Options for converting a directory of `.scl` files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchConfig {
    /// Declared counts must be strictly greater than this.
    pub min_count_exclusive: usize,
    /// Declared counts must be at most this.
    pub max_count_inclusive: usize,
    /// Lowest slot number handed out.
    pub first_slot: u16,
    /// Highest slot number handed out.
    pub last_slot: u16,
    /// Where numbered outputs go; defaults to the input directory.
    pub out_dir: Option<PathBuf>,
    /// Maximum scale size passed to every conversion.
    pub max_size: u8,
    pub failure_policy: FailurePolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            min_count_exclusive: 4,
            max_count_inclusive: usize::from(DEFAULT_USER_SCALE_SIZE_MAX),
            first_slot: 1,
            last_slot: 999,
            out_dir: None,
            max_size: DEFAULT_USER_SCALE_SIZE_MAX,
            failure_policy: FailurePolicy::SkipAndContinue,
        }
    }
}

impl BatchConfig {
    /// Whether a declared degree count passes the batch eligibility filter.
    pub fn is_eligible(&self, declared_count: usize) -> bool {
        declared_count > self.min_count_exclusive && declared_count <= self.max_count_inclusive
    }

    /// Conversion options used for every file in the batch.
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::default().with_max_size(self.max_size)
    }

    /// Check the options before scanning.
    pub fn validate(&self) -> Result<(), ConvertError> {
        self.convert_options().validate()?;
        if self.first_slot == 0 || self.first_slot > self.last_slot || self.last_slot > 999 {
            return Err(ConvertError::InvalidConfig(format!(
                "slot range {}..={} must lie within 1..=999",
                self.first_slot, self.last_slot
            )));
        }
        Ok(())
    }
}
