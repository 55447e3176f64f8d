//! CLI command implementations

pub mod batch;
pub mod convert;
pub mod inspect;
pub mod json_output;
