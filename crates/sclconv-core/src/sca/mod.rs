//! `.SCA` user scale format: quantization, writer and decoder.
//!
//! # Layout
//!
//! All multi-byte fields are little endian.
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 1 | file type tag |
//! | 1 | 1 | header version |
//! | 2 | 8 | name, null-padded |
//! | 10 | 4 | writer version (u32) |
//! | 14 | 9 | name, null-padded and terminated |
//! | 23 | 1 | mode tag (voltage) |
//! | 24 | 1 | size |
//! | 25 | size * 2 | items (i16 millivolts) |
//! | 25 + size * 2 | 4 | FNV-1a over bytes 14..25 + size * 2 |
//!
//! Bytes 14 onward up to the hash form the data block.

mod data;
mod name;
mod quantize;
mod reader;
mod writer;

pub use data::*;
pub use name::*;
pub use quantize::*;
pub use reader::*;
pub use writer::*;
