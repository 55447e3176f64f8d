//! `.SCA` file writer - wraps a data block with the file header and hash.

use byteorder::{ByteOrder, LittleEndian};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::data::{ScaleData, DATA_BLOCK_PREFIX_LEN};
use super::name::HEADER_NAME_LEN;
use crate::config::FormatConfig;

/// File header: type tag, header version and 8-byte name.
pub const FILE_HEADER_LEN: usize = 1 + 1 + HEADER_NAME_LEN;

/// File header plus the 4-byte writer version.
pub const DATA_BLOCK_OFFSET: usize = FILE_HEADER_LEN + 4;

/// Trailing FNV-1a hash.
pub const CHECKSUM_LEN: usize = 4;

/// Total file length for a scale of `size` items.
pub const fn encoded_file_len(size: usize) -> usize {
    DATA_BLOCK_OFFSET + DATA_BLOCK_PREFIX_LEN + size * 2 + CHECKSUM_LEN
}

/// A complete user scale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaFile {
    /// File type tag.
    pub file_type: u8,
    /// File header version.
    pub header_version: u8,
    /// Writer/project version.
    pub writer_version: u32,
    pub data: ScaleData,
}

impl ScaFile {
    /// Wrap a data block using the format constants.
    pub fn new(data: ScaleData, config: &FormatConfig) -> Self {
        Self {
            file_type: config.file_type,
            header_version: config.header_version,
            writer_version: config.writer_version,
            data,
        }
    }

    /// Encoded length in bytes.
    pub fn encoded_len(&self) -> usize {
        encoded_file_len(usize::from(self.data.size()))
    }

    /// Checksum stored at the end of the file.
    pub fn checksum(&self) -> u32 {
        self.data.checksum()
    }

    /// Encode the complete file.
    pub fn to_bytes(&self) -> Vec<u8> {
        let data_block = self.data.to_bytes();
        let mut buffer = vec![0u8; DATA_BLOCK_OFFSET + data_block.len() + CHECKSUM_LEN];

        // File header (10 bytes)
        buffer[0] = self.file_type;
        buffer[1] = self.header_version;
        buffer[2..FILE_HEADER_LEN].copy_from_slice(&self.data.name.header_bytes());

        // Versioned writer header (4 bytes)
        LittleEndian::write_u32(
            &mut buffer[FILE_HEADER_LEN..DATA_BLOCK_OFFSET],
            self.writer_version,
        );

        let checksum_offset = DATA_BLOCK_OFFSET + data_block.len();
        buffer[DATA_BLOCK_OFFSET..checksum_offset].copy_from_slice(&data_block);

        // Hash over the data block only
        LittleEndian::write_u32(
            &mut buffer[checksum_offset..],
            crate::checksum::fnv1a_32(&data_block),
        );

        buffer
    }

    /// Write the encoded file to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }
}

/// Write bytes to `path` in one step.
///
/// The bytes go to a temporary file in the destination directory which is
/// then renamed over `path`, so readers never observe a partial file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
