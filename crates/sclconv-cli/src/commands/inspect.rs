//! Inspect command implementation
//!
//! Decodes a `.SCA` user scale file, verifies its checksum and prints the
//! stored values.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use sclconv_core::sca::{decode, DecodedSca};
use sclconv_core::FormatConfig;

use super::json_output::{error_codes, InspectOutput, JsonError};

/// Run the inspect command
///
/// # Arguments
/// * `path` - Path to the `.SCA` file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 valid file, 1 invalid or unreadable file
pub fn run(path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(path)
    } else {
        run_human(path)
    }
}

fn run_human(path: &str) -> Result<ExitCode> {
    println!("{} {}", "Inspecting:".cyan().bold(), path);

    let bytes = fs::read(path).with_context(|| format!("Failed to read file: {}", path))?;

    match decode(&bytes, &FormatConfig::DEFAULT) {
        Ok(decoded) => {
            print_scale(&decoded, bytes.len());
            println!("{} Checksum verified", "SUCCESS".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{} {}", "INVALID".red().bold(), err);
            Ok(ExitCode::from(1))
        }
    }
}

fn run_json(path: &str) -> Result<ExitCode> {
    let output = match fs::read(path) {
        Err(err) => InspectOutput {
            success: false,
            errors: vec![JsonError::new(error_codes::FILE_READ, err.to_string()).with_file(path)],
            result: None,
        },
        Ok(bytes) => match decode(&bytes, &FormatConfig::DEFAULT) {
            Ok(decoded) => InspectOutput {
                success: true,
                errors: Vec::new(),
                result: Some(decoded),
            },
            Err(err) => InspectOutput {
                success: false,
                errors: vec![
                    JsonError::new(error_codes::INVALID_SCA, err.to_string()).with_file(path)
                ],
                result: None,
            },
        },
    };

    let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
    println!("{}", json);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn print_scale(decoded: &DecodedSca, byte_len: usize) {
    println!("  {}: {}", "Name".dimmed(), decoded.data_name);
    println!(
        "  {}: type {}, header v{}, writer v{}, mode {}",
        "Format".dimmed(),
        decoded.file_type,
        decoded.header_version,
        decoded.writer_version,
        decoded.mode
    );
    println!(
        "  {}: {} ({} bytes)",
        "Size".dimmed(),
        decoded.size,
        byte_len
    );
    println!("  {}: 0x{:08X}", "Checksum".dimmed(), decoded.checksum);

    for (index, (mv, volts)) in decoded.items.iter().zip(decoded.volts()).enumerate() {
        println!("  {:>3}  {:>6} mV  {:>8.3} V", index, mv, volts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sclconv_core::convert::convert_file;
    use sclconv_core::ConvertOptions;

    #[test]
    fn test_inspect_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("fifths.scl");
        let output = dir.path().join("001.SCA");
        fs::write(&input, "Fifths\n2\n3/2\n2/1\n").unwrap();
        convert_file(
            &input,
            &output,
            &ConvertOptions::default(),
            &FormatConfig::DEFAULT,
        )
        .unwrap();

        assert_eq!(
            run(output.to_str().unwrap(), false).unwrap(),
            ExitCode::SUCCESS
        );
        assert_eq!(
            run(output.to_str().unwrap(), true).unwrap(),
            ExitCode::SUCCESS
        );
    }

    #[test]
    fn test_inspect_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("002.SCA");
        fs::write(&path, [1u8, 0, 0, 0]).unwrap();

        assert_eq!(run(path.to_str().unwrap(), false).unwrap(), ExitCode::from(1));
        assert_eq!(run(path.to_str().unwrap(), true).unwrap(), ExitCode::from(1));
    }

    #[test]
    fn test_inspect_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.SCA");

        assert!(run(path.to_str().unwrap(), false).is_err());
        assert_eq!(run(path.to_str().unwrap(), true).unwrap(), ExitCode::from(1));
    }
}
