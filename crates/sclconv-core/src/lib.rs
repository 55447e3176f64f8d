//! sclconv core - Scala tuning to sequencer user scale conversion
//!
//! This crate converts Scala `.scl` tuning definitions into the fixed-layout
//! binary user scale files (`.SCA`) loaded by the sequencer firmware.
//!
//! # Pipeline
//!
//! ```text
//! .scl text -> scala::parse_scl -> volts (root = 0.0)
//!           -> sca::quantize_volts -> millivolt items (i16)
//!           -> sca::ScaleData (checksummed data block)
//!           -> sca::ScaFile (file header + data block + FNV-1a hash)
//! ```
//!
//! All operations are deterministic: the same input text, name and options
//! always produce byte-identical output.
//!
//! # Example
//!
//! ```
//! use sclconv_core::convert::convert_text;
//! use sclconv_core::{ConvertOptions, FormatConfig};
//!
//! let scl = "! fifths.scl\nJust fifths\n2\n3/2\n2/1\n";
//! let options = ConvertOptions::default().with_name("fifths");
//! let built = convert_text(scl, &options, &FormatConfig::DEFAULT).unwrap();
//!
//! assert_eq!(built.file.data.items(), vec![0, 584, 1000]);
//! assert_eq!(built.bytes.len(), 10 + 4 + 9 + 1 + 1 + 3 * 2 + 4);
//! ```
//!
//! # Module Structure
//!
//! - [`checksum`]: FNV-1a 32-bit hashing
//! - [`scala`]: `.scl` text parsing
//! - [`sca`]: quantization, binary layout, writing and decoding
//! - [`convert`]: single-file conversion pipeline
//! - [`batch`]: directory conversion with numbered output slots

pub mod batch;
pub mod checksum;
pub mod config;
pub mod convert;
pub mod error;
pub mod sca;
pub mod scala;

pub use checksum::fnv1a_32;
pub use config::{BatchConfig, ConvertOptions, FailurePolicy, FormatConfig};
pub use error::{ConvertError, ConvertWarning, FormatError};
