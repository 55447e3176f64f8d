//! `.SCA` decoding and validation.

use byteorder::{LittleEndian, ReadBytesExt};
use serde::Serialize;
use std::io::{Cursor, Read};
use thiserror::Error;

use super::data::ScaleData;
use super::name::{ScaName, DATA_NAME_LEN, HEADER_NAME_LEN};
use super::writer::{encoded_file_len, ScaFile};
use crate::checksum::fnv1a_32;
use crate::config::FormatConfig;

/// Errors found while decoding a `.SCA` byte stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaDecodeError {
    /// Not even an empty scale fits.
    #[error("file too small: {0} bytes")]
    FileTooSmall(usize),

    #[error("not a user scale file (file type {0})")]
    WrongFileType(u8),

    #[error("unsupported header version {0}")]
    UnsupportedHeaderVersion(u8),

    /// The size byte disagrees with the file length.
    #[error("size byte {size} implies {expected} bytes, file has {actual}")]
    LengthMismatch {
        size: u8,
        expected: usize,
        actual: usize,
    },

    #[error("checksum mismatch: stored 0x{stored:08X}, computed 0x{computed:08X}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    /// The header and data block carry different names.
    #[error("name mismatch: header '{header}', data block '{data}'")]
    NameMismatch { header: String, data: String },
}

/// Decoded view of a `.SCA` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedSca {
    pub file_type: u8,
    pub header_version: u8,
    pub header_name: ScaName,
    pub writer_version: u32,
    pub data_name: ScaName,
    pub mode: u8,
    pub size: u8,
    pub items: Vec<i16>,
    pub checksum: u32,
}

impl DecodedSca {
    /// Items converted back to volts.
    pub fn volts(&self) -> Vec<f64> {
        self.items.iter().map(|&mv| f64::from(mv) / 1000.0).collect()
    }

    /// Rebuild the in-memory file.
    pub fn to_file(&self) -> ScaFile {
        ScaFile {
            file_type: self.file_type,
            header_version: self.header_version,
            writer_version: self.writer_version,
            data: ScaleData {
                name: self.data_name.clone(),
                mode: self.mode,
                items: self.items.clone(),
            },
        }
    }
}

/// Decode and validate a `.SCA` byte stream.
///
/// Checks the file type and header version against `config`, the size byte
/// against the file length, the stored checksum, and that both name fields
/// agree.
pub fn decode(bytes: &[u8], config: &FormatConfig) -> Result<DecodedSca, ScaDecodeError> {
    let min_len = encoded_file_len(0);
    if bytes.len() < min_len {
        return Err(ScaDecodeError::FileTooSmall(bytes.len()));
    }

    // Lengths were checked above, so reads below cannot run out of data
    let mut cursor = Cursor::new(bytes);
    let truncated = |_: std::io::Error| ScaDecodeError::FileTooSmall(bytes.len());

    let file_type = cursor.read_u8().map_err(truncated)?;
    if file_type != config.file_type {
        return Err(ScaDecodeError::WrongFileType(file_type));
    }
    let header_version = cursor.read_u8().map_err(truncated)?;
    if header_version != config.header_version {
        return Err(ScaDecodeError::UnsupportedHeaderVersion(header_version));
    }

    let mut header_name = [0u8; HEADER_NAME_LEN];
    cursor.read_exact(&mut header_name).map_err(truncated)?;
    let writer_version = cursor.read_u32::<LittleEndian>().map_err(truncated)?;

    let data_start = cursor.position() as usize;
    let mut data_name = [0u8; DATA_NAME_LEN];
    cursor.read_exact(&mut data_name).map_err(truncated)?;
    let mode = cursor.read_u8().map_err(truncated)?;
    let size = cursor.read_u8().map_err(truncated)?;

    let expected = encoded_file_len(usize::from(size));
    if bytes.len() != expected {
        return Err(ScaDecodeError::LengthMismatch {
            size,
            expected,
            actual: bytes.len(),
        });
    }

    let mut items = vec![0i16; usize::from(size)];
    cursor
        .read_i16_into::<LittleEndian>(&mut items)
        .map_err(truncated)?;

    let data_end = cursor.position() as usize;
    let checksum = cursor.read_u32::<LittleEndian>().map_err(truncated)?;
    let computed = fnv1a_32(&bytes[data_start..data_end]);
    if checksum != computed {
        return Err(ScaDecodeError::ChecksumMismatch {
            stored: checksum,
            computed,
        });
    }

    let header_name = ScaName::from_field(&header_name);
    let data_name = ScaName::from_field(&data_name);
    if header_name != data_name {
        return Err(ScaDecodeError::NameMismatch {
            header: header_name.to_string(),
            data: data_name.to_string(),
        });
    }

    Ok(DecodedSca {
        file_type,
        header_version,
        header_name,
        writer_version,
        data_name,
        mode,
        size,
        items,
        checksum,
    })
}
