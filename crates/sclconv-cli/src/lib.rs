//! sclconv CLI library.
//!
//! Command implementations for converting Scala tunings to user scale files,
//! batch-converting directories and inspecting written files.

pub mod commands;
