//! Convert command implementation
//!
//! Converts a single `.scl` file to a `.SCA` user scale file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use sclconv_core::convert::{convert_file, ConversionReport};
use sclconv_core::{ConvertOptions, FormatConfig};

use super::json_output::{ConvertOutput, JsonError};

/// Run the convert command
///
/// # Arguments
/// * `input` - Path to the `.scl` file
/// * `output` - Path of the `.SCA` file to write
/// * `name` - Internal name (max 8 chars), defaults to the uppercased file stem
/// * `max_size` - Maximum scale size, root included
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    input: &str,
    output: &str,
    name: Option<&str>,
    max_size: u8,
    json_output: bool,
) -> Result<ExitCode> {
    let mut options = ConvertOptions::default().with_max_size(max_size);
    if let Some(name) = name {
        options = options.with_name(name);
    }

    if json_output {
        run_json(input, output, &options)
    } else {
        run_human(input, output, &options)
    }
}

fn run_human(input: &str, output: &str, options: &ConvertOptions) -> Result<ExitCode> {
    println!("{} {}", "Converting:".cyan().bold(), input);

    let report = convert_file(
        Path::new(input),
        Path::new(output),
        options,
        &FormatConfig::DEFAULT,
    )
    .with_context(|| format!("Failed to convert {}", input))?;

    print_report(&report);
    Ok(ExitCode::SUCCESS)
}

fn run_json(input: &str, output: &str, options: &ConvertOptions) -> Result<ExitCode> {
    let result = convert_file(
        Path::new(input),
        Path::new(output),
        options,
        &FormatConfig::DEFAULT,
    );

    let (document, code) = match result {
        Ok(report) => (ConvertOutput::success(report), ExitCode::SUCCESS),
        Err(err) => (
            ConvertOutput::failure(vec![JsonError::from(&err).with_file(input)]),
            ExitCode::from(1),
        ),
    };

    let json = serde_json::to_string_pretty(&document).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(code)
}

fn print_report(report: &ConversionReport) {
    println!(
        "  Parsed '{}': {} notes",
        report.description, report.parsed_values
    );
    if report.parsed_values < report.declared_count + 1 {
        println!(
            "  {} file declares {} degrees but only {} were present",
            "WARN".yellow().bold(),
            report.declared_count,
            report.parsed_values - 1
        );
    }
    for warning in &report.warnings {
        println!("  {} {}", "WARN".yellow().bold(), warning);
    }
    println!(
        "{} Created {} ({} bytes)",
        "SUCCESS".green().bold(),
        report.output.display(),
        report.byte_len
    );
    println!(
        "  {}: {}  {}: {}  {}: 0x{:08X}",
        "name".dimmed(),
        report.name,
        "size".dimmed(),
        report.size,
        "checksum".dimmed(),
        report.checksum
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_convert_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("fifths.scl");
        let output = dir.path().join("fifths.SCA");
        fs::write(&input, "Fifths\n2\n3/2\n2/1\n").unwrap();

        let code = run(
            input.to_str().unwrap(),
            output.to_str().unwrap(),
            Some("FIFTHS"),
            32,
            false,
        )
        .unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(fs::read(&output).unwrap().len(), 29 + 3 * 2);
    }

    #[test]
    fn test_convert_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.scl");
        fs::write(&input, "Bad\nmany\n").unwrap();

        let err = run(
            input.to_str().unwrap(),
            dir.path().join("bad.SCA").to_str().unwrap(),
            None,
            32,
            false,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("invalid degree count 'many'"));
    }

    #[test]
    fn test_convert_json_failure_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let code = run(
            dir.path().join("missing.scl").to_str().unwrap(),
            dir.path().join("out.SCA").to_str().unwrap(),
            None,
            32,
            true,
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
