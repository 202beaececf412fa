//! Lifecycle tests for the tool adapters, mirroring how the host framework
//! drives them: options arrive as a JSON dictionary, the tool is configured
//! and initialized, then executed per block.

use arrow::array::{Array, Int64Array, StringArray, UInt64Array};
use serde_json::json;

use crate::encoding::TextEncoding;
use crate::error::FixrecError;

use super::{GeneratorTool, ReaderTool, ToolOptions};

fn reader_options() -> ToolOptions {
    ToolOptions::from_json(json!({
        "ds_schema": [
            {"utype": "int", "length": 10},
            {"utype": "str", "length": 4},
            {"utype": "uint", "length": 6},
        ],
        "encoding": "cp500",
    }))
    .unwrap()
}

#[test]
fn test_reader_lifecycle_on_legacy_block() {
    // The fixture block of the legacy feed, encoded in CP500 EBCDIC.
    let text = concat!(
        "012345678AABCD012345",
        "012345678BABC 012345",
        "012345678CABCD012345",
    );
    let block = TextEncoding::Cp500.encode(text).unwrap();

    let reader = ReaderTool::new("reader", reader_options()).unwrap();
    reader.initialize();
    let batch = reader.execute(&block).unwrap();

    assert_eq!(batch.num_rows(), 3);
    assert_eq!(batch.num_columns(), 3);
    let ints = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
    let strs = batch.column(1).as_any().downcast_ref::<StringArray>().unwrap();
    let uints = batch.column(2).as_any().downcast_ref::<UInt64Array>().unwrap();
    assert_eq!(ints.value(0), 12345678);
    assert_eq!(strs.value(1), "ABC ");
    assert_eq!(uints.value(2), 12345);
}

#[test]
fn test_generator_feeds_reader() {
    // Generated chunks decode cleanly through a reader bound to the same
    // layout and codepage.
    let options = ToolOptions::from_json(json!({
        "ds_schema": [
            {"utype": "int", "length": 10, "min_val": 0, "max_val": 10},
            {"utype": "uint", "length": 6, "min_val": 0, "max_val": 10},
            {"utype": "str", "length": 4},
        ],
        "encoding": "cp500",
        "num_rows": 10,
        "seed": 5,
    }))
    .unwrap();

    let generator = GeneratorTool::new("generator", options.clone()).unwrap();
    generator.initialize();
    let chunk = generator.execute().unwrap();
    assert_eq!(chunk.len(), 10 * 20);

    let reader = ReaderTool::new("reader", options).unwrap();
    reader.initialize();
    let batch = reader.execute(&chunk).unwrap();
    assert_eq!(batch.num_rows(), 10);
    assert_eq!(batch.num_columns(), 3);
    assert!(batch.diagnostics().is_empty());
}

#[test]
fn test_unknown_options_pass_through() {
    let options = ToolOptions::from_json(json!({
        "ds_schema": [{"utype": "str", "length": 2}],
        "job_id": "run-17",
        "object_store": {"bucket": "fixtures"},
    }))
    .unwrap();

    let reader = ReaderTool::new("reader", options).unwrap();
    assert_eq!(reader.unrecognized().len(), 2);
    assert_eq!(reader.unrecognized()["job_id"], json!("run-17"));
    assert_eq!(
        reader.unrecognized()["object_store"],
        json!({"bucket": "fixtures"})
    );
}

#[test]
fn test_configure_rejects_bad_schema() {
    let options = ToolOptions::from_json(json!({
        "ds_schema": [{"utype": "uint", "length": 0}],
    }))
    .unwrap();
    let err = ReaderTool::new("reader", options).unwrap_err();
    assert!(matches!(err, FixrecError::Schema { field: 0, .. }));
}

#[test]
fn test_execute_propagates_decode_errors() {
    let reader = ReaderTool::new("reader", reader_options()).unwrap();
    // 19 bytes: one short of a whole record.
    let err = reader.execute(&[0x40; 19]).unwrap_err();
    assert!(matches!(err, FixrecError::MalformedBlock { len: 19, record_width: 20 }));
}

#[test]
fn test_lenient_bounds_ride_on_the_batch() {
    let options = ToolOptions::from_json(json!({
        "ds_schema": [{"utype": "uint", "length": 6, "min_val": 0, "max_val": 10}],
        "strict_bounds": false,
    }))
    .unwrap();
    let reader = ReaderTool::new("reader", options).unwrap();
    let batch = reader.execute(b"012345").unwrap();
    assert_eq!(batch.num_rows(), 1);
    assert_eq!(batch.diagnostics().len(), 1);
    assert_eq!(batch.diagnostics()[0].value, 12345);
}

#[test]
fn test_execute_empty_block() {
    let reader = ReaderTool::new("reader", reader_options()).unwrap();
    let batch = reader.execute(&[]).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 3);
}
