//! Single-file conversion: `.scl` text in, `.SCA` bytes out.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{ConvertOptions, FormatConfig};
use crate::error::{ConvertError, ConvertWarning};
use crate::sca::{quantize_volts, write_atomic, ScaFile, ScaName, ScaleData};
use crate::scala::{decode_text, parse_scl, TuningDefinition};

/// Result of converting text held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltScale {
    pub definition: TuningDefinition,
    pub file: ScaFile,
    /// Encoded file, ready to be written.
    pub bytes: Vec<u8>,
    pub warnings: Vec<ConvertWarning>,
}

/// Summary of one converted file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub description: String,
    pub name: ScaName,
    /// Count declared in the `.scl` header.
    pub declared_count: usize,
    /// Values parsed, root included.
    pub parsed_values: usize,
    /// Items written to the size byte.
    pub size: u8,
    /// Output length in bytes.
    pub byte_len: usize,
    pub checksum: u32,
    pub warnings: Vec<ConvertWarning>,
}

/// Build a scale file from an already parsed definition.
pub fn build_scale(
    definition: &TuningDefinition,
    name: ScaName,
    max_size: u8,
    config: &FormatConfig,
) -> Result<(ScaFile, Vec<ConvertWarning>), ConvertError> {
    let quantized = quantize_volts(&definition.volts(), max_size)?;
    let data = ScaleData::new(name, config.voltage_mode, quantized.items)?;
    Ok((ScaFile::new(data, config), quantized.warning.into_iter().collect()))
}

/// Convert `.scl` text. Uses `options.name`, or an empty name when unset.
pub fn convert_text(
    text: &str,
    options: &ConvertOptions,
    config: &FormatConfig,
) -> Result<BuiltScale, ConvertError> {
    let name = ScaName::new(options.name.as_deref().unwrap_or_default());
    convert_text_named(text, name, options, config)
}

fn convert_text_named(
    text: &str,
    name: ScaName,
    options: &ConvertOptions,
    config: &FormatConfig,
) -> Result<BuiltScale, ConvertError> {
    options.validate()?;
    let definition = parse_scl(text)?;
    let (file, warnings) = build_scale(&definition, name, options.max_size, config)?;
    let bytes = file.to_bytes();

    Ok(BuiltScale {
        definition,
        file,
        bytes,
        warnings,
    })
}

/// Convert one `.scl` file to a `.SCA` file.
///
/// The output is produced entirely in memory and written in one atomic step;
/// nothing is written when any stage fails.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
    config: &FormatConfig,
) -> Result<ConversionReport, ConvertError> {
    let raw = fs::read(input).map_err(|e| ConvertError::io(input, e))?;
    let text = decode_text(&raw);

    let name = match &options.name {
        Some(name) => ScaName::new(name),
        None => ScaName::from_path(input),
    };

    let built = convert_text_named(&text, name, options, config)?;
    write_atomic(output, &built.bytes).map_err(|e| ConvertError::io(output, e))?;

    Ok(ConversionReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        description: built.definition.description.clone(),
        name: built.file.data.name().clone(),
        declared_count: built.definition.declared_count,
        parsed_values: built.definition.degrees.len() + 1,
        size: built.file.data.size(),
        byte_len: built.bytes.len(),
        checksum: built.file.checksum(),
        warnings: built.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sca::decode;
    use pretty_assertions::assert_eq;

    const PYTHAGOREAN: &str = "\
! pyth_5.scl
Pythagorean pentatonic
5
9/8
81/64
3/2
27/16
2/1
";

    #[test]
    fn test_convert_text_items() {
        let options = ConvertOptions::default().with_name("PYTH");
        let built = convert_text(PYTHAGOREAN, &options, &FormatConfig::DEFAULT).unwrap();

        assert_eq!(built.definition.description, "Pythagorean pentatonic");
        assert_eq!(built.file.data.items(), vec![0, 169, 339, 584, 754, 1000]);
        assert!(built.warnings.is_empty());
        assert_eq!(built.bytes.len(), 29 + 6 * 2);
    }

    #[test]
    fn test_truncation_produces_warning() {
        let mut text = String::from("Forty steps\n40\n");
        for i in 1..=40 {
            text.push_str(&format!("{}.0\n", i * 30));
        }

        let built = convert_text(&text, &ConvertOptions::default(), &FormatConfig::DEFAULT)
            .unwrap();

        assert_eq!(built.file.data.size(), 32);
        assert_eq!(built.file.data.items()[31], 775);
        assert_eq!(
            built.warnings,
            vec![ConvertWarning::SizeTruncated {
                original: 41,
                max: 32
            }]
        );
    }

    #[test]
    fn test_range_error_aborts() {
        let text = "Too wide\n1\n40000.0\n";
        let err = convert_text(text, &ConvertOptions::default(), &FormatConfig::DEFAULT)
            .unwrap_err();
        assert!(matches!(err, ConvertError::Range { index: 1, .. }));
    }

    #[test]
    fn test_convert_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pyth_5.scl");
        let output = dir.path().join("out.SCA");
        fs::write(&input, PYTHAGOREAN).unwrap();

        let report = convert_file(
            &input,
            &output,
            &ConvertOptions::default(),
            &FormatConfig::DEFAULT,
        )
        .unwrap();

        assert_eq!(report.name.as_str(), "PYTH_5");
        assert_eq!(report.declared_count, 5);
        assert_eq!(report.parsed_values, 6);
        assert_eq!(report.size, 6);

        let bytes = fs::read(&output).unwrap();
        assert_eq!(bytes.len(), report.byte_len);
        let decoded = decode(&bytes, &FormatConfig::DEFAULT).unwrap();
        assert_eq!(decoded.checksum, report.checksum);
        assert_eq!(decoded.header_name.as_str(), "PYTH_5");
    }

    #[test]
    fn test_failed_conversion_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.scl");
        let output = dir.path().join("out.SCA");
        fs::write(&input, "Bad\n2\n3/0\n2/1\n").unwrap();

        let err = convert_file(
            &input,
            &output,
            &ConvertOptions::default(),
            &FormatConfig::DEFAULT,
        )
        .unwrap_err();

        assert_eq!(err.code(), "SCL_001");
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(
            &dir.path().join("missing.scl"),
            &dir.path().join("out.SCA"),
            &ConvertOptions::default(),
            &FormatConfig::DEFAULT,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }
}
