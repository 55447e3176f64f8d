//! Batch conversion of a directory of `.scl` files into numbered slots.
//!
//! Each eligible input goes through the single-file pipeline and lands in
//! the lowest free `NNN.SCA` slot of the output directory. Occupied slots are
//! read once from the directory listing at the start of the batch.
//!
//! Per file the batch moves through
//! `Unread -> HeaderChecked -> {Skipped | Written | Failed}`; see
//! [`BatchOutcome`]. Files already written are never rolled back.

mod scan;
mod slots;


pub use scan::*;
pub use slots::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::config::{BatchConfig, FailurePolicy, FormatConfig};
use crate::convert::{convert_file, ConversionReport};
use crate::error::ConvertError;
use crate::scala::{decode_text, parse_scl_header};

/// Errors that prevent a batch from running at all.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Failed to list directory {}: {source}", .path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    InvalidConfig(#[from] ConvertError),
}

/// Why an input was left alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Description or count could not be read.
    UnreadableHeader { message: String },
    /// Declared count outside the eligible range.
    CountOutOfRange { count: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnreadableHeader { message } => write!(f, "unreadable header: {}", message),
            SkipReason::CountOutOfRange { count } => {
                write!(f, "declared count {} is out of range", count)
            }
        }
    }
}

/// Final state of one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchOutcome {
    Written {
        source: String,
        slot: u16,
        destination: String,
        report: ConversionReport,
    },
    Skipped {
        source: String,
        #[serde(flatten)]
        reason: SkipReason,
    },
    Failed {
        source: String,
        slot: u16,
        destination: String,
        code: String,
        category: String,
        message: String,
    },
}

impl BatchOutcome {
    /// Input file name.
    pub fn source(&self) -> &str {
        match self {
            BatchOutcome::Written { source, .. }
            | BatchOutcome::Skipped { source, .. }
            | BatchOutcome::Failed { source, .. } => source,
        }
    }
}

/// Why a batch ended before every input was visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BatchStop {
    /// Every slot in range is occupied.
    SlotsExhausted { pending: String },
    /// A file failed under [`FailurePolicy::FailFast`].
    FailFast { source: String },
}

/// Everything a batch did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// `.scl` files found.
    pub scanned: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    /// First free slot when the batch started.
    pub first_free_slot: Option<u16>,
    /// Occupied slots when the batch ended.
    pub occupied_slots: Vec<u16>,
    pub outcomes: Vec<BatchOutcome>,
    pub stopped: Option<BatchStop>,
}

impl BatchReport {
    fn new(input_dir: &Path, output_dir: &Path, scanned: usize) -> Self {
        Self {
            input_dir: input_dir.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            scanned,
            converted: 0,
            skipped: 0,
            failed: 0,
            first_free_slot: None,
            occupied_slots: Vec::new(),
            outcomes: Vec::new(),
            stopped: None,
        }
    }

    fn push(&mut self, outcome: BatchOutcome) {
        match outcome {
            BatchOutcome::Written { .. } => self.converted += 1,
            BatchOutcome::Skipped { .. } => self.skipped += 1,
            BatchOutcome::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }
}

/// Read just enough of a file to decide eligibility.
fn check_header(path: &Path, config: &BatchConfig) -> Result<(), SkipReason> {
    let raw = fs::read(path).map_err(|e| SkipReason::UnreadableHeader {
        message: e.to_string(),
    })?;
    let header = parse_scl_header(&decode_text(&raw)).map_err(|e| {
        SkipReason::UnreadableHeader {
            message: e.to_string(),
        }
    })?;

    if config.is_eligible(header.declared_count) {
        Ok(())
    } else {
        Err(SkipReason::CountOutOfRange {
            count: header.declared_count,
        })
    }
}

/// Convert every eligible `.scl` file in `input_dir`.
///
/// Inputs are visited in file name order. Ineligible or unreadable headers
/// are skipped; conversion failures are recorded and, unless the policy is
/// fail-fast, the batch continues. A slot is only consumed by a successful
/// write.
pub fn run_batch(
    input_dir: &Path,
    config: &BatchConfig,
    format: &FormatConfig,
) -> Result<BatchReport, BatchError> {
    config.validate()?;
    let output_dir = config.out_dir.as_deref().unwrap_or(input_dir);

    let input_listing = list_dir(input_dir).map_err(|source| BatchError::ListDir {
        path: input_dir.to_path_buf(),
        source,
    })?;
    let output_listing = if output_dir == input_dir {
        input_listing.clone()
    } else {
        list_dir(output_dir).map_err(|source| BatchError::ListDir {
            path: output_dir.to_path_buf(),
            source,
        })?
    };

    // Any entry with a slot name occupies it, whether file, link or directory
    let mut slots =
        SlotAllocator::from_filenames(config.first_slot, config.last_slot, &output_listing.entries);
    let inputs = scl_inputs(&input_listing.files);
    let options = config.convert_options();

    let mut report = BatchReport::new(input_dir, output_dir, inputs.len());
    report.first_free_slot = slots.next_free();

    for source in inputs {
        let input_path = input_dir.join(&source);

        if let Err(reason) = check_header(&input_path, config) {
            report.push(BatchOutcome::Skipped { source, reason });
            continue;
        }

        let Some(slot) = slots.next_free() else {
            report.stopped = Some(BatchStop::SlotsExhausted { pending: source });
            break;
        };
        let destination = slot_filename(slot);
        let output_path = output_dir.join(&destination);

        match convert_file(&input_path, &output_path, &options, format) {
            Ok(conversion) => {
                slots.commit(slot);
                report.push(BatchOutcome::Written {
                    source,
                    slot,
                    destination,
                    report: conversion,
                });
            }
            Err(err) => {
                let fail_fast = config.failure_policy == FailurePolicy::FailFast;
                report.push(BatchOutcome::Failed {
                    source: source.clone(),
                    slot,
                    destination,
                    code: err.code().to_string(),
                    category: err.category().to_string(),
                    message: err.to_string(),
                });
                if fail_fast {
                    report.stopped = Some(BatchStop::FailFast { source });
                    break;
                }
            }
        }
    }

    report.occupied_slots = slots.occupied().collect();
    Ok(report)
}
