#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use mattree::tree::{Compression, JsonDocument, LoadOptions, Matrix, MatrixData, Scalar, ValueNode};

fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn load_fixture(name: &str) -> ValueNode {
	JsonDocument::open(fixture_path(name))
		.expect("fixture opens")
		.load(&LoadOptions::default())
		.expect("fixture loads")
}

#[test]
fn sensor_fixture_decodes_field_for_field() {
	let tree = load_fixture("sensor.json");
	let ValueNode::Struct(root) = tree else {
		panic!("root should be a struct");
	};

	let names: Vec<&str> = root.names().collect();
	assert_eq!(names, vec!["name", "readings", "calibrated"]);
	assert_eq!(root.get("name"), Some(&ValueNode::Text("sensor-1".into())));
	assert_eq!(
		root.get("readings"),
		Some(&ValueNode::Matrix(Matrix {
			rows: 2,
			cols: 3,
			data: MatrixData::F64(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
		}))
	);
	assert_eq!(root.get("calibrated"), Some(&ValueNode::Scalar(Scalar::Bool(true))));
}

#[test]
fn catalog_cell_mixes_scalar_and_nested_struct() {
	let tree = load_fixture("catalog.json");
	let ValueNode::Struct(root) = tree else {
		panic!("root should be a struct");
	};

	let Some(ValueNode::Cell(cell)) = root.get("samples") else {
		panic!("samples should be a cell grid");
	};
	assert_eq!((cell.rows, cell.cols), (1, 2));
	assert_eq!(cell.at(0, 0), Some(&ValueNode::Scalar(Scalar::I32(42))));
	let Some(ValueNode::Struct(nested)) = cell.at(0, 1) else {
		panic!("cell (0,1) should be a struct");
	};
	assert_eq!(nested.get("x"), Some(&ValueNode::Scalar(Scalar::F32(1.5))));
}

#[test]
fn catalog_handles_empty_matrix_and_unknown_field() {
	let tree = load_fixture("catalog.json");
	let ValueNode::Struct(root) = tree else {
		panic!("root should be a struct");
	};

	let Some(ValueNode::Matrix(offsets)) = root.get("offsets") else {
		panic!("offsets should be a matrix");
	};
	assert_eq!((offsets.rows, offsets.cols), (0, 4));
	assert_eq!(offsets.data, MatrixData::I16(Vec::new()));

	assert_eq!(root.get("spare"), Some(&ValueNode::Unsupported { index: 6 }));
	assert_eq!(root.get("serial"), Some(&ValueNode::Scalar(Scalar::I64(-123_456_789))));
}

#[test]
fn zstd_compressed_documents_load_identically() {
	let raw = std::fs::read(fixture_path("sensor.json")).expect("fixture reads");
	let compressed = zstd::stream::encode_all(raw.as_slice(), 0).expect("encode succeeds");

	let plain = JsonDocument::from_bytes(raw).expect("raw parses");
	let packed = JsonDocument::from_bytes(compressed).expect("compressed parses");
	assert_eq!(plain.compression, Compression::None);
	assert_eq!(packed.compression, Compression::Zstd);

	let options = LoadOptions::default();
	assert_eq!(packed.load(&options).expect("loads"), plain.load(&options).expect("loads"));
}
