//! User scale data block - the checksummed part of a `.SCA` file.

use byteorder::{ByteOrder, LittleEndian};
use std::io::{self, Write};

use super::name::{ScaName, DATA_NAME_LEN};
use crate::checksum::fnv1a_32;
use crate::error::ConvertError;

/// Bytes before the items: name, mode and size.
pub const DATA_BLOCK_PREFIX_LEN: usize = DATA_NAME_LEN + 1 + 1;

/// Most items the one-byte size field can describe.
pub const MAX_ITEMS: usize = u8::MAX as usize;

/// Data block of a voltage user scale.
///
/// Built through [`ScaleData::new`], which guarantees the item count fits
/// the size byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleData {
    pub(super) name: ScaName,
    /// Scale mode tag (voltage).
    pub(super) mode: u8,
    /// Millivolt items, root first. At most [`MAX_ITEMS`] entries.
    pub(super) items: Vec<i16>,
}

impl ScaleData {
    pub fn new(name: ScaName, mode: u8, items: Vec<i16>) -> Result<Self, ConvertError> {
        if items.len() > MAX_ITEMS {
            return Err(ConvertError::TooManyItems {
                count: items.len(),
                max: MAX_ITEMS,
            });
        }
        Ok(Self { name, mode, items })
    }

    pub fn name(&self) -> &ScaName {
        &self.name
    }

    pub fn items(&self) -> &[i16] {
        &self.items
    }

    /// Number of items as stored in the size byte.
    pub fn size(&self) -> u8 {
        debug_assert!(self.items.len() <= MAX_ITEMS);
        self.items.len() as u8
    }

    /// Encoded length in bytes.
    pub fn encoded_len(&self) -> usize {
        DATA_BLOCK_PREFIX_LEN + usize::from(self.size()) * 2
    }

    /// Encode the data block.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = vec![0u8; self.encoded_len()];

        // Name (9 bytes, null-terminated)
        buffer[..DATA_NAME_LEN].copy_from_slice(&self.name.data_bytes());
        buffer[DATA_NAME_LEN] = self.mode;
        buffer[DATA_NAME_LEN + 1] = self.size();

        // Items (size * 2 bytes, little endian i16)
        LittleEndian::write_i16_into(&self.items, &mut buffer[DATA_BLOCK_PREFIX_LEN..]);

        buffer
    }

    /// Write the encoded data block to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }

    /// FNV-1a hash of the encoded block.
    pub fn checksum(&self) -> u32 {
        fnv1a_32(&self.to_bytes())
    }
}
