//! Round-trip and determinism tests for the generation engine.

use std::sync::Arc;

use arrow::array::{Array, Int64Array, StringArray, UInt64Array};

use crate::config::{DecoderOptions, GeneratorOptions, SignStyle};
use crate::decoder::Decoder;
use crate::encoding::TextEncoding;
use crate::error::FixrecError;
use crate::schema::{FieldSpec, Schema};
use crate::types::FieldValue;

use super::Generator;

fn roundtrip_schema() -> Arc<Schema> {
    Arc::new(
        Schema::build(vec![
            FieldSpec::integer(10).with_bounds(0, 10),
            FieldSpec::unsigned(6).with_bounds(0, 10),
            FieldSpec::string(4),
        ])
        .unwrap(),
    )
}

#[test]
fn test_seeded_generation_is_deterministic() {
    let generator = Generator::new(roundtrip_schema(), GeneratorOptions::default()).unwrap();
    let a = generator.generate(50, Some(1234)).unwrap();
    let b = generator.generate(50, Some(1234)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 50 * 20);

    let c = generator.generate(50, Some(4321)).unwrap();
    assert_ne!(a, c);
}

#[test]
fn test_generate_zero_rows() {
    let generator = Generator::new(roundtrip_schema(), GeneratorOptions::default()).unwrap();
    assert!(generator.generate(0, Some(7)).unwrap().is_empty());
}

#[test]
fn test_generated_block_roundtrips_exactly() {
    let schema = roundtrip_schema();
    let generator = Generator::new(schema.clone(), GeneratorOptions::default()).unwrap();
    let rows = generator.sample_rows(25, Some(99));
    let block = generator.encode_rows(&rows).unwrap();

    let decoder = Decoder::new(schema, DecoderOptions::default());
    let batch = decoder.decode(&block).unwrap();
    assert_eq!(batch.num_rows(), 25);
    assert!(batch.diagnostics().is_empty());

    let ints = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
    let uints = batch.column(1).as_any().downcast_ref::<UInt64Array>().unwrap();
    let strs = batch.column(2).as_any().downcast_ref::<StringArray>().unwrap();
    for (row, values) in rows.iter().enumerate() {
        assert_eq!(values[0], FieldValue::Int(ints.value(row)), "row {}", row);
        assert_eq!(values[1], FieldValue::Uint(uints.value(row)), "row {}", row);
        assert_eq!(
            values[2],
            FieldValue::Str(strs.value(row).to_string()),
            "row {}",
            row
        );
    }
}

#[test]
fn test_bounded_fields_stay_within_bounds() {
    // Strict decoding of generated data proves every sampled value honors
    // the declared bounds.
    let schema = roundtrip_schema();
    let generator = Generator::new(schema.clone(), GeneratorOptions::default()).unwrap();
    let decoder = Decoder::new(schema, DecoderOptions::default());
    for seed in 0..5 {
        let block = generator.generate(40, Some(seed)).unwrap();
        let batch = decoder.decode(&block).unwrap();
        assert_eq!(batch.num_rows(), 40);
    }
}

#[test]
fn test_roundtrip_through_every_codepage() {
    let schema = roundtrip_schema();
    for encoding in [
        TextEncoding::Ascii,
        TextEncoding::Utf8,
        TextEncoding::Latin1,
        TextEncoding::Cp037,
        TextEncoding::Cp500,
    ] {
        let generator = Generator::new(
            schema.clone(),
            GeneratorOptions {
                encoding,
                ..GeneratorOptions::default()
            },
        )
        .unwrap();
        let decoder = Decoder::new(
            schema.clone(),
            DecoderOptions {
                encoding,
                ..DecoderOptions::default()
            },
        );

        let rows = generator.sample_rows(10, Some(42));
        let block = generator.encode_rows(&rows).unwrap();
        let batch = decoder.decode(&block).unwrap();

        let ints = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
        for (row, values) in rows.iter().enumerate() {
            assert_eq!(values[0], FieldValue::Int(ints.value(row)), "{}", encoding);
        }
    }
}

#[test]
fn test_ebcdic_block_is_not_ascii() {
    let generator = Generator::new(
        roundtrip_schema(),
        GeneratorOptions {
            encoding: TextEncoding::Cp500,
            ..GeneratorOptions::default()
        },
    )
    .unwrap();
    let block = generator.generate(5, Some(8)).unwrap();
    // EBCDIC digits live at 0xF0-0xF9; no byte of a digit-bearing record is
    // an ASCII digit.
    assert!(block.iter().all(|b| !b.is_ascii_digit()));
}

#[test]
fn test_encode_rows_exact_bytes() {
    let schema = Arc::new(
        Schema::build(vec![FieldSpec::unsigned(6), FieldSpec::string(4)]).unwrap(),
    );
    let generator = Generator::new(schema, GeneratorOptions::default()).unwrap();
    let block = generator
        .encode_rows(&[vec![
            FieldValue::Uint(42),
            FieldValue::Str("AB".to_string()),
        ]])
        .unwrap();
    assert_eq!(block, b"000042AB  ");
}

#[test]
fn test_trailing_zone_sign_style() {
    let schema = Arc::new(Schema::build(vec![FieldSpec::integer(4)]).unwrap());
    let options = GeneratorOptions {
        sign_style: SignStyle::TrailingZone,
        ..GeneratorOptions::default()
    };
    let generator = Generator::new(schema.clone(), options).unwrap();

    let block = generator
        .encode_rows(&[vec![FieldValue::Int(-7)], vec![FieldValue::Int(42)]])
        .unwrap();
    assert_eq!(block, b"007J042A");

    let decoder = Decoder::new(schema, DecoderOptions::default());
    let batch = decoder.decode(&block).unwrap();
    let ints = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(ints.value(0), -7);
    assert_eq!(ints.value(1), 42);
}

#[test]
fn test_trailing_zone_rejects_one_byte_signed_field() {
    let schema = Arc::new(Schema::build(vec![FieldSpec::integer(1)]).unwrap());
    let options = GeneratorOptions {
        sign_style: SignStyle::TrailingZone,
        ..GeneratorOptions::default()
    };
    let err = Generator::new(schema, options).unwrap_err();
    assert!(matches!(err, FixrecError::Schema { field: 0, .. }));
}

#[test]
fn test_encode_rows_type_mismatch() {
    let schema = Arc::new(Schema::build(vec![FieldSpec::unsigned(4)]).unwrap());
    let generator = Generator::new(schema, GeneratorOptions::default()).unwrap();
    let err = generator
        .encode_rows(&[vec![FieldValue::Str("oops".to_string())]])
        .unwrap_err();
    assert!(matches!(err, FixrecError::FieldEncode { row: 0, field: 0, .. }));
}

#[test]
fn test_encode_rows_value_too_wide() {
    let schema = Arc::new(Schema::build(vec![FieldSpec::unsigned(3)]).unwrap());
    let generator = Generator::new(schema, GeneratorOptions::default()).unwrap();
    let err = generator
        .encode_rows(&[vec![FieldValue::Uint(1000)]])
        .unwrap_err();
    assert!(matches!(err, FixrecError::FieldEncode { .. }));

    let schema = Arc::new(Schema::build(vec![FieldSpec::string(3)]).unwrap());
    let generator = Generator::new(schema, GeneratorOptions::default()).unwrap();
    let err = generator
        .encode_rows(&[vec![FieldValue::Str("TOO WIDE".to_string())]])
        .unwrap_err();
    assert!(matches!(err, FixrecError::FieldEncode { .. }));
}
