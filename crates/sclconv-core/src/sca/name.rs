//! Scale name encoding.

use std::path::Path;

use serde::Serialize;

/// Maximum number of characters kept from a display name.
pub const NAME_MAX_CHARS: usize = 8;

/// Width of the name field in the file header.
pub const HEADER_NAME_LEN: usize = 8;

/// Width of the name field in the data block (8 characters + terminator).
pub const DATA_NAME_LEN: usize = 9;

/// A display name truncated to 8 characters and reduced to ASCII.
///
/// Both name fields of a `.SCA` file are encoded from this one value, so
/// they can never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScaName(String);

impl ScaName {
    /// Truncate to the first 8 characters, then drop anything non-ASCII.
    pub fn new(display: &str) -> Self {
        Self(
            display
                .chars()
                .take(NAME_MAX_CHARS)
                .filter(char::is_ascii)
                .collect(),
        )
    }

    /// Default name for an input file: its stem, uppercased.
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_uppercase())
            .unwrap_or_default();
        Self::new(&stem)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Header copy: null-padded to 8 bytes.
    pub fn header_bytes(&self) -> [u8; HEADER_NAME_LEN] {
        self.padded()
    }

    /// Data block copy: null-padded to 9 bytes, always null-terminated.
    pub fn data_bytes(&self) -> [u8; DATA_NAME_LEN] {
        self.padded()
    }

    fn padded<const N: usize>(&self) -> [u8; N] {
        let mut buf = [0u8; N];
        let bytes = self.0.as_bytes();
        let copy_len = bytes.len().min(NAME_MAX_CHARS).min(N);
        buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
        buf
    }

    /// Recover a name from a null-padded field.
    pub fn from_field(field: &[u8]) -> Self {
        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        Self::new(&String::from_utf8_lossy(&field[..end]))
    }
}

impl std::fmt::Display for ScaName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
