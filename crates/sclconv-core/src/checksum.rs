//! FNV-1a 32-bit hashing for user scale data blocks.
//!
//! The firmware verifies every loaded data block against this hash, so the
//! parameters below must never change.

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// Incremental FNV-1a 32-bit hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fnv1a32 {
    state: u32,
}

impl Default for Fnv1a32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Fnv1a32 {
    /// Create a hasher at the offset basis.
    pub const fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }

    /// Feed bytes into the hash.
    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u32::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    /// Current hash value.
    pub const fn finish(&self) -> u32 {
        self.state
    }
}

/// Hash a byte sequence with FNV-1a 32-bit.
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hasher = Fnv1a32::new();
    hasher.update(bytes);
    hasher.finish()
}
