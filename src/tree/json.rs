use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value as Json;

use crate::tree::compression::{Compression, decode_bytes};
use crate::tree::kind::ElemKind;
use crate::tree::load::{LoadOptions, load_tree};
use crate::tree::mem::{MemNode, MemSource};
use crate::tree::value::{MatrixData, Scalar, ValueNode};
use crate::tree::{Result, TreeError};

/// A JSON-backed source document loaded into memory.
///
/// The document convention: a JSON object is a struct with fields in
/// document order; objects carrying a `"$kind"` key describe cell grids,
/// matrices, tagged scalars, or unknown nodes; strings, booleans, and
/// numbers map to text, `bool`, `int64`/`uint64`, and `double` leaves;
/// `null` maps to an unknown node. Matrix and cell `data` arrays are in
/// column-major order. Input may be a raw or zstd-compressed stream.
#[derive(Debug)]
pub struct JsonDocument {
	/// Compression detected on the raw input.
	pub compression: Compression,
	source: MemSource,
}

impl JsonDocument {
	/// Open a document from a file path.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::from_bytes(fs::read(path)?)
	}

	/// Parse a document from raw (possibly compressed) bytes.
	pub fn from_bytes(raw: Vec<u8>) -> Result<Self> {
		let (compression, bytes) = decode_bytes(raw)?;
		let doc: Json = serde_json::from_slice(&bytes)?;
		let root = build_root(&doc)?;
		Ok(Self {
			compression,
			source: MemSource::new(root),
		})
	}

	/// The in-memory source backing this document.
	pub fn source(&self) -> &MemSource {
		&self.source
	}

	/// Load the document's value tree.
	pub fn load(&self, options: &LoadOptions) -> Result<ValueNode> {
		load_tree(&self.source, &self.source.root(), options)
	}
}

fn build_root(doc: &Json) -> Result<MemNode> {
	match doc {
		Json::Object(map) if !map.contains_key("$kind") => build_struct(map, "$"),
		_ => Err(invalid("$", "document root must be a struct object")),
	}
}

fn build_struct(map: &serde_json::Map<String, Json>, at: &str) -> Result<MemNode> {
	let mut fields = Vec::with_capacity(map.len());
	for (name, value) in map {
		if name.starts_with('$') {
			return Err(invalid(at, format!("field name {name:?} is reserved")));
		}
		let child_at = format!("{at}.{name}");
		fields.push((name.clone(), Arc::new(build_node(value, &child_at)?)));
	}
	Ok(MemNode::Struct(fields))
}

fn build_node(value: &Json, at: &str) -> Result<MemNode> {
	match value {
		Json::Object(map) => match map.get("$kind") {
			Some(kind) => build_tagged(map, kind, at),
			None => build_struct(map, at),
		},
		Json::String(text) => Ok(MemNode::Text(text.clone())),
		Json::Bool(v) => Ok(MemNode::Scalar {
			tag: "bool".to_owned(),
			value: Scalar::Bool(*v),
		}),
		Json::Number(n) => {
			if let Some(v) = n.as_i64() {
				Ok(MemNode::Scalar {
					tag: "int64".to_owned(),
					value: Scalar::I64(v),
				})
			} else if let Some(v) = n.as_u64() {
				Ok(MemNode::Scalar {
					tag: "uint64".to_owned(),
					value: Scalar::U64(v),
				})
			} else {
				Ok(MemNode::Scalar {
					tag: "double".to_owned(),
					value: Scalar::F64(n.as_f64().unwrap_or(f64::NAN)),
				})
			}
		}
		Json::Null => Ok(MemNode::Alien),
		Json::Array(_) => Err(invalid(at, "bare arrays are not valid; use a $kind cell or matrix object")),
	}
}

fn build_tagged(map: &serde_json::Map<String, Json>, kind: &Json, at: &str) -> Result<MemNode> {
	let Some(kind) = kind.as_str() else {
		return Err(invalid(at, "$kind must be a string"));
	};
	match kind {
		"cell" => build_cell(map, at),
		"matrix" => build_matrix(map, at),
		"scalar" => {
			let tag = require_str(map, "tag", at)?;
			let value = map.get("value").ok_or_else(|| invalid(at, "scalar is missing \"value\""))?;
			Ok(MemNode::Scalar {
				tag: tag.to_owned(),
				value: scalar_from_json(ElemKind::from_tag(tag), value, at)?,
			})
		}
		"unknown" => Ok(MemNode::Alien),
		other => Err(invalid(at, format!("unknown $kind {other:?}"))),
	}
}

fn build_cell(map: &serde_json::Map<String, Json>, at: &str) -> Result<MemNode> {
	let rows = require_usize(map, "rows", at)?;
	let cols = require_usize(map, "cols", at)?;
	let data = require_array(map, "data", at)?;
	let count = rows.checked_mul(cols).ok_or_else(|| invalid(at, "rows*cols overflows"))?;
	if data.len() != count {
		return Err(invalid(at, format!("cell data holds {} elements, expected {count}", data.len())));
	}

	let mut cells = Vec::with_capacity(count);
	for (index, item) in data.iter().enumerate() {
		let child_at = format!("{at}[{},{}]", index % rows.max(1), index / rows.max(1));
		cells.push(Arc::new(build_node(item, &child_at)?));
	}
	Ok(MemNode::Cell { rows, cols, data: cells })
}

fn build_matrix(map: &serde_json::Map<String, Json>, at: &str) -> Result<MemNode> {
	let tag = require_str(map, "tag", at)?;
	let rows = require_usize(map, "rows", at)?;
	let cols = require_usize(map, "cols", at)?;
	let data = require_array(map, "data", at)?;
	let count = rows.checked_mul(cols).ok_or_else(|| invalid(at, "rows*cols overflows"))?;
	if data.len() != count {
		return Err(invalid(at, format!("matrix data holds {} elements, expected {count}", data.len())));
	}

	let kind = ElemKind::from_tag(tag);
	let mut out = MatrixData::empty(kind);
	for (index, item) in data.iter().enumerate() {
		let elem_at = format!("{at}.data[{index}]");
		push_elem(&mut out, kind, item, &elem_at)?;
	}
	Ok(MemNode::Matrix {
		tag: tag.to_owned(),
		rows,
		cols,
		data: out,
	})
}

fn push_elem(out: &mut MatrixData, kind: ElemKind, item: &Json, at: &str) -> Result<()> {
	let scalar = scalar_from_json(kind, item, at)?;
	match (out, scalar) {
		(MatrixData::Bool(v), Scalar::Bool(e)) => v.push(e),
		(MatrixData::U8(v), Scalar::U8(e)) => v.push(e),
		(MatrixData::U16(v), Scalar::U16(e)) => v.push(e),
		(MatrixData::U32(v), Scalar::U32(e)) => v.push(e),
		(MatrixData::U64(v), Scalar::U64(e)) => v.push(e),
		(MatrixData::I8(v), Scalar::I8(e)) => v.push(e),
		(MatrixData::I16(v), Scalar::I16(e)) => v.push(e),
		(MatrixData::I32(v), Scalar::I32(e)) => v.push(e),
		(MatrixData::I64(v), Scalar::I64(e)) => v.push(e),
		(MatrixData::F32(v), Scalar::F32(e)) => v.push(e),
		(MatrixData::F64(v), Scalar::F64(e)) => v.push(e),
		_ => return Err(invalid(at, "element kind mismatch")),
	}
	Ok(())
}

fn scalar_from_json(kind: ElemKind, value: &Json, at: &str) -> Result<Scalar> {
	let out = match kind {
		ElemKind::Bool => Scalar::Bool(value.as_bool().ok_or_else(|| invalid(at, "expected a boolean"))?),
		ElemKind::U8 => Scalar::U8(int_elem(value, at)?),
		ElemKind::U16 => Scalar::U16(int_elem(value, at)?),
		ElemKind::U32 => Scalar::U32(int_elem(value, at)?),
		ElemKind::U64 => Scalar::U64(value.as_u64().ok_or_else(|| invalid(at, "expected an unsigned integer"))?),
		ElemKind::I8 => Scalar::I8(int_elem(value, at)?),
		ElemKind::I16 => Scalar::I16(int_elem(value, at)?),
		ElemKind::I32 => Scalar::I32(int_elem(value, at)?),
		ElemKind::I64 => Scalar::I64(value.as_i64().ok_or_else(|| invalid(at, "expected an integer"))?),
		ElemKind::F32 => Scalar::F32(value.as_f64().ok_or_else(|| invalid(at, "expected a number"))? as f32),
		ElemKind::F64 => Scalar::F64(value.as_f64().ok_or_else(|| invalid(at, "expected a number"))?),
	};
	Ok(out)
}

fn int_elem<T: TryFrom<i64>>(value: &Json, at: &str) -> Result<T> {
	let raw = value.as_i64().ok_or_else(|| invalid(at, "expected an integer"))?;
	T::try_from(raw).map_err(|_| invalid(at, format!("integer {raw} out of range")))
}

fn require_str<'a>(map: &'a serde_json::Map<String, Json>, key: &str, at: &str) -> Result<&'a str> {
	map.get(key)
		.and_then(Json::as_str)
		.ok_or_else(|| invalid(at, format!("missing string field {key:?}")))
}

fn require_usize(map: &serde_json::Map<String, Json>, key: &str, at: &str) -> Result<usize> {
	let raw = map
		.get(key)
		.and_then(Json::as_u64)
		.ok_or_else(|| invalid(at, format!("missing non-negative integer field {key:?}")))?;
	usize::try_from(raw).map_err(|_| invalid(at, format!("{key} value {raw} out of range")))
}

fn require_array<'a>(map: &'a serde_json::Map<String, Json>, key: &str, at: &str) -> Result<&'a Vec<Json>> {
	match map.get(key) {
		Some(Json::Array(items)) => Ok(items),
		_ => Err(invalid(at, format!("missing array field {key:?}"))),
	}
}

fn invalid(at: &str, reason: impl Into<String>) -> TreeError {
	TreeError::InvalidDocument {
		at: at.to_owned(),
		reason: reason.into(),
	}
}
