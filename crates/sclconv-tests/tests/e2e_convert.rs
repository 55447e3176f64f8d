//! End-to-end tests for single-file conversion.
//!
//! Tests covering:
//! - Cents, fraction and ratio degrees through to millivolt items
//! - Exact byte layout of the written file
//! - Checksum round trip through the decoder
//! - Size truncation and range errors
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sclconv-tests --test e2e_convert
//! ```

use pretty_assertions::assert_eq;

use sclconv_core::checksum::fnv1a_32;
use sclconv_core::convert::{convert_file, convert_text};
use sclconv_core::sca::{decode, encoded_file_len, DATA_BLOCK_OFFSET};
use sclconv_core::{ConvertError, ConvertOptions, ConvertWarning, FormatConfig};
use sclconv_tests::{equal_steps, ScaleDir, EDO_12, JUST_MAJOR};

// ============================================================================
// Degree conversion
// ============================================================================

#[test]
fn edo_12_items() {
    let options = ConvertOptions::default().with_name("12EDO");
    let built = convert_text(EDO_12, &options, &FormatConfig::DEFAULT).unwrap();

    assert_eq!(built.definition.description, "12-tone equal temperament");
    assert_eq!(
        built.file.data.items(),
        vec![0, 83, 166, 250, 333, 416, 500, 583, 666, 750, 833, 916, 1000]
    );
}

#[test]
fn just_major_items() {
    let built = convert_text(JUST_MAJOR, &ConvertOptions::default(), &FormatConfig::DEFAULT)
        .unwrap();

    assert_eq!(
        built.file.data.items(),
        vec![0, 169, 321, 415, 584, 736, 906, 1000]
    );
}

#[test]
fn mixed_notation_in_one_file() {
    let text = "Mixed\n3\n700.0\n3/2\n2\n";
    let built = convert_text(text, &ConvertOptions::default(), &FormatConfig::DEFAULT).unwrap();
    assert_eq!(built.file.data.items(), vec![0, 583, 584, 1000]);
}

// ============================================================================
// Byte layout
// ============================================================================

#[test]
fn written_file_layout() {
    let dir = ScaleDir::new();
    let input = dir.write("just.scl", JUST_MAJOR);
    let output = dir.path().join("JUST.SCA");

    let report = convert_file(
        &input,
        &output,
        &ConvertOptions::default().with_name("verylongname"),
        &FormatConfig::DEFAULT,
    )
    .unwrap();

    let bytes = dir.read("JUST.SCA");
    assert_eq!(bytes.len(), encoded_file_len(8));
    assert_eq!(bytes.len(), 10 + 4 + 9 + 1 + 1 + 8 * 2 + 4);
    assert_eq!(report.byte_len, bytes.len());

    // File header
    assert_eq!(bytes[0], 1);
    assert_eq!(bytes[1], 0);
    assert_eq!(&bytes[2..10], b"verylong");
    assert_eq!(&bytes[10..14], &33u32.to_le_bytes());

    // Data block
    assert_eq!(&bytes[14..23], b"verylong\0");
    assert_eq!(bytes[23], 1);
    assert_eq!(bytes[24], 8);
    assert_eq!(&bytes[25..27], &0i16.to_le_bytes());
    assert_eq!(&bytes[27..29], &169i16.to_le_bytes());
    assert_eq!(&bytes[39..41], &1000i16.to_le_bytes());
}

#[test]
fn checksum_round_trip() {
    let dir = ScaleDir::new();
    let input = dir.write("edo.scl", EDO_12);
    let output = dir.path().join("EDO.SCA");

    let report = convert_file(
        &input,
        &output,
        &ConvertOptions::default(),
        &FormatConfig::DEFAULT,
    )
    .unwrap();

    let bytes = dir.read("EDO.SCA");
    let checksum_offset = bytes.len() - 4;
    let stored = u32::from_le_bytes(bytes[checksum_offset..].try_into().unwrap());

    assert_eq!(stored, fnv1a_32(&bytes[DATA_BLOCK_OFFSET..checksum_offset]));
    assert_eq!(stored, report.checksum);

    let decoded = decode(&bytes, &FormatConfig::DEFAULT).unwrap();
    assert_eq!(decoded.header_name.as_str(), "EDO");
    assert_eq!(decoded.items.len(), 13);
}

#[test]
fn conversion_is_deterministic() {
    let options = ConvertOptions::default().with_name("EDO");
    let first = convert_text(EDO_12, &options, &FormatConfig::DEFAULT).unwrap();
    let second = convert_text(EDO_12, &options, &FormatConfig::DEFAULT).unwrap();
    assert_eq!(first.bytes, second.bytes);
}

// ============================================================================
// Size and range limits
// ============================================================================

#[test]
fn forty_degrees_truncated_to_32() {
    let text = equal_steps("Quarter tones", 40, 50.0);
    let built = convert_text(&text, &ConvertOptions::default(), &FormatConfig::DEFAULT).unwrap();

    assert_eq!(built.file.data.size(), 32);
    assert_eq!(built.bytes[24], 32);
    assert_eq!(built.bytes.len(), encoded_file_len(32));
    assert_eq!(built.file.data.items()[31], 1291);
    assert_eq!(
        built.warnings,
        vec![ConvertWarning::SizeTruncated {
            original: 41,
            max: 32
        }]
    );
}

#[test]
fn custom_max_size() {
    let options = ConvertOptions::default().with_max_size(4);
    let built = convert_text(EDO_12, &options, &FormatConfig::DEFAULT).unwrap();
    assert_eq!(built.file.data.items(), vec![0, 83, 166, 250]);
    assert_eq!(built.warnings.len(), 1);
}

#[test]
fn out_of_range_degree_is_rejected() {
    let dir = ScaleDir::new();
    let input = dir.write("wide.scl", "Wide\n2\n1200.0\n40000.0\n");
    let output = dir.path().join("WIDE.SCA");

    let err = convert_file(
        &input,
        &output,
        &ConvertOptions::default(),
        &FormatConfig::DEFAULT,
    )
    .unwrap_err();

    match err {
        ConvertError::Range { index, .. } => assert_eq!(index, 2),
        other => panic!("expected Range error, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn format_errors_name_the_line() {
    let err = convert_text(
        "! c\nDesc\n2\n100.0\n7/0\n",
        &ConvertOptions::default(),
        &FormatConfig::DEFAULT,
    )
    .unwrap_err();
    assert_eq!(err.code(), "SCL_001");
    assert!(err.to_string().contains("line 5"), "{}", err);
}
