//! Batch conversion command
//!
//! Converts every eligible `.scl` file in a directory into numbered
//! `NNN.SCA` slots.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use sclconv_core::batch::{run_batch, BatchOutcome, BatchReport, BatchStop};
use sclconv_core::{BatchConfig, FailurePolicy, FormatConfig};

use super::json_output::{error_codes, BatchOutput, JsonError};

/// Run batch conversion
///
/// # Arguments
/// * `dir` - Directory to scan for `.scl` files
/// * `out_dir` - Directory for numbered outputs (default: `dir`)
/// * `max_size` - Maximum scale size, root included
/// * `fail_fast` - Stop at the first failed conversion
/// * `report_path` - Optional path for a JSON report of every outcome
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 when nothing failed, 1 otherwise
pub fn run(
    dir: &str,
    out_dir: Option<&str>,
    max_size: u8,
    fail_fast: bool,
    report_path: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let config = BatchConfig {
        out_dir: out_dir.map(PathBuf::from),
        max_size,
        failure_policy: if fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::SkipAndContinue
        },
        ..Default::default()
    };

    if !json_output {
        println!("{} {} for .scl files...", "Scanning".cyan().bold(), dir);
    }

    let report = match run_batch(Path::new(dir), &config, &FormatConfig::DEFAULT) {
        Ok(report) => report,
        Err(err) if json_output => {
            let output = BatchOutput {
                success: false,
                errors: vec![JsonError::new(error_codes::BATCH_ERROR, err.to_string()).with_file(dir)],
                result: None,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(ExitCode::from(1));
        }
        Err(err) => return Err(err).with_context(|| format!("Batch conversion of {} failed", dir)),
    };

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        fs::write(path, json).with_context(|| format!("Failed to write report: {}", path))?;
    }

    let success = report.failed == 0 && report.stopped.is_none();

    if json_output {
        let output = BatchOutput {
            success,
            errors: Vec::new(),
            result: Some(report),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&report);
        if let Some(path) = report_path {
            println!("Report: {}", path);
        }
    }

    if success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn print_report(report: &BatchReport) {
    println!("Found {} .scl files", report.scanned);

    for outcome in &report.outcomes {
        match outcome {
            BatchOutcome::Written {
                source,
                destination,
                report,
                ..
            } => {
                println!("  {} -> {}", source, destination);
                for warning in &report.warnings {
                    println!("    {} {}", "WARN".yellow().bold(), warning);
                }
            }
            BatchOutcome::Skipped { source, reason } => {
                println!("  {} {} ({})", "SKIP".dimmed(), source.dimmed(), reason);
            }
            BatchOutcome::Failed {
                source,
                destination,
                code,
                message,
                ..
            } => {
                println!(
                    "  {} {} -> {} [{}] {}",
                    "FAIL".red().bold(),
                    source,
                    destination,
                    code,
                    message
                );
            }
        }
    }

    match &report.stopped {
        Some(BatchStop::SlotsExhausted { pending }) => println!(
            "{} No free output slot left; stopped before {}",
            "WARN".yellow().bold(),
            pending
        ),
        Some(BatchStop::FailFast { source }) => println!(
            "{} Stopped after {} failed",
            "WARN".yellow().bold(),
            source
        ),
        None => {}
    }

    println!(
        "{} Converted {} file(s), skipped {}, failed {}.",
        "Done.".green().bold(),
        report.converted,
        report.skipped,
        report.failed
    );
}
