//! Scala tuning file (`.scl`) parsing.
//!
//! # Format
//!
//! ```text
//! ! meantone.scl          <- comment lines start with '!'
//! !
//! Quarter-comma meantone  <- description (first non-comment line)
//!  12                     <- degree count (first token)
//!  76.04900               <- cents       (token contains '.')
//!  5/4                    <- fraction    (token contains '/')
//!  2                      <- bare ratio
//! ```
//!
//! Every degree is converted to volts-per-octave: `cents / 1200` or
//! `log2(ratio)`. The root (`0.0`) is implicit.

mod degree;
mod parser;


pub use degree::*;
pub use parser::*;
