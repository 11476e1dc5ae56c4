use mattree::tree::{MatrixData, Scalar, ValueNode};

/// Output truncation and formatting limits for printed value trees.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single struct.
	pub max_fields_per_struct: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for matrices and cell grids.
	pub max_items: usize,
	/// Maximum recursive print depth for nested structs/cells.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_struct: 80,
			max_string_len: 200,
			max_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one loaded value tree.
pub fn print_value(value: &ValueNode, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		ValueNode::Unsupported { index } => println!("{pad}unsupported(#{index})"),
		ValueNode::Scalar(scalar) => println!("{pad}{}", render_scalar(scalar)),
		ValueNode::Text(text) => println!("{pad}\"{}\"", truncate(text, options.max_string_len)),
		ValueNode::Matrix(matrix) => {
			println!(
				"{pad}{} {}x{} [{}]",
				matrix.data.kind().tag(),
				matrix.rows,
				matrix.cols,
				render_items(&matrix.data, options.max_items)
			);
		}
		ValueNode::Struct(item) => {
			if depth >= options.max_print_depth {
				println!("{pad}struct {{ ... }}");
				return;
			}
			println!("{pad}struct {{");
			for field in item.fields.iter().take(options.max_fields_per_struct) {
				print!("{pad}  {} = ", field.name);
				if matches!(field.value, ValueNode::Struct(_) | ValueNode::Cell(_)) {
					println!();
					print_value(&field.value, indent + 4, depth + 1, options);
				} else {
					print_value(&field.value, 0, depth + 1, options);
				}
			}
			if item.fields.len() > options.max_fields_per_struct {
				println!("{pad}  ... {} more fields", item.fields.len() - options.max_fields_per_struct);
			}
			println!("{pad}}}");
		}
		ValueNode::Cell(cell) => {
			if depth >= options.max_print_depth {
				println!("{pad}cell {}x{} {{ ... }}", cell.rows, cell.cols);
				return;
			}
			println!("{pad}cell {}x{} [", cell.rows, cell.cols);
			for item in cell.data.iter().take(options.max_items) {
				print_value(item, indent + 2, depth + 1, options);
			}
			if cell.data.len() > options.max_items {
				println!("{pad}  ... {} more", cell.data.len() - options.max_items);
			}
			println!("{pad}]");
		}
	}
}

/// Render a value tree as JSON in the source-document convention, so that
/// `show --json` output is itself a loadable document.
pub fn value_to_json(value: &ValueNode) -> serde_json::Value {
	match value {
		ValueNode::Unsupported { .. } => serde_json::json!({ "$kind": "unknown" }),
		ValueNode::Scalar(scalar) => match scalar {
			// Plain JSON keeps its kind on reload for exactly these three.
			Scalar::Bool(v) => serde_json::Value::from(*v),
			Scalar::I64(v) => serde_json::Value::from(*v),
			Scalar::F64(v) => serde_json::Value::from(*v),
			other => serde_json::json!({
				"$kind": "scalar",
				"tag": other.kind().tag(),
				"value": scalar_json(other),
			}),
		},
		ValueNode::Text(text) => serde_json::Value::from(text.to_string()),
		ValueNode::Matrix(matrix) => serde_json::json!({
			"$kind": "matrix",
			"tag": matrix.data.kind().tag(),
			"rows": matrix.rows,
			"cols": matrix.cols,
			"data": matrix_json(&matrix.data),
		}),
		ValueNode::Struct(item) => {
			let mut map = serde_json::Map::with_capacity(item.fields.len());
			for field in &item.fields {
				map.insert(field.name.to_string(), value_to_json(&field.value));
			}
			serde_json::Value::Object(map)
		}
		ValueNode::Cell(cell) => serde_json::json!({
			"$kind": "cell",
			"rows": cell.rows,
			"cols": cell.cols,
			"data": cell.data.iter().map(value_to_json).collect::<Vec<_>>(),
		}),
	}
}

fn scalar_json(scalar: &Scalar) -> serde_json::Value {
	match scalar {
		Scalar::Bool(v) => serde_json::Value::from(*v),
		Scalar::U8(v) => serde_json::Value::from(*v),
		Scalar::U16(v) => serde_json::Value::from(*v),
		Scalar::U32(v) => serde_json::Value::from(*v),
		Scalar::U64(v) => serde_json::Value::from(*v),
		Scalar::I8(v) => serde_json::Value::from(*v),
		Scalar::I16(v) => serde_json::Value::from(*v),
		Scalar::I32(v) => serde_json::Value::from(*v),
		Scalar::I64(v) => serde_json::Value::from(*v),
		Scalar::F32(v) => serde_json::Value::from(f64::from(*v)),
		Scalar::F64(v) => serde_json::Value::from(*v),
	}
}

fn matrix_json(data: &MatrixData) -> serde_json::Value {
	match data {
		MatrixData::Bool(v) => serde_json::Value::from(v.clone()),
		MatrixData::U8(v) => serde_json::Value::from(v.clone()),
		MatrixData::U16(v) => serde_json::Value::from(v.clone()),
		MatrixData::U32(v) => serde_json::Value::from(v.clone()),
		MatrixData::U64(v) => serde_json::Value::from(v.clone()),
		MatrixData::I8(v) => serde_json::Value::from(v.clone()),
		MatrixData::I16(v) => serde_json::Value::from(v.clone()),
		MatrixData::I32(v) => serde_json::Value::from(v.clone()),
		MatrixData::I64(v) => serde_json::Value::from(v.clone()),
		MatrixData::F32(v) => serde_json::Value::from(v.iter().map(|e| f64::from(*e)).collect::<Vec<_>>()),
		MatrixData::F64(v) => serde_json::Value::from(v.clone()),
	}
}

fn render_scalar(scalar: &Scalar) -> String {
	match scalar {
		Scalar::Bool(v) => v.to_string(),
		Scalar::U8(v) => v.to_string(),
		Scalar::U16(v) => v.to_string(),
		Scalar::U32(v) => v.to_string(),
		Scalar::U64(v) => v.to_string(),
		Scalar::I8(v) => v.to_string(),
		Scalar::I16(v) => v.to_string(),
		Scalar::I32(v) => v.to_string(),
		Scalar::I64(v) => v.to_string(),
		Scalar::F32(v) => v.to_string(),
		Scalar::F64(v) => v.to_string(),
	}
}

fn render_items(data: &MatrixData, max_items: usize) -> String {
	let mut parts: Vec<String> = match data {
		MatrixData::Bool(v) => v.iter().take(max_items).map(|e| e.to_string()).collect(),
		MatrixData::U8(v) => v.iter().take(max_items).map(|e| e.to_string()).collect(),
		MatrixData::U16(v) => v.iter().take(max_items).map(|e| e.to_string()).collect(),
		MatrixData::U32(v) => v.iter().take(max_items).map(|e| e.to_string()).collect(),
		MatrixData::U64(v) => v.iter().take(max_items).map(|e| e.to_string()).collect(),
		MatrixData::I8(v) => v.iter().take(max_items).map(|e| e.to_string()).collect(),
		MatrixData::I16(v) => v.iter().take(max_items).map(|e| e.to_string()).collect(),
		MatrixData::I32(v) => v.iter().take(max_items).map(|e| e.to_string()).collect(),
		MatrixData::I64(v) => v.iter().take(max_items).map(|e| e.to_string()).collect(),
		MatrixData::F32(v) => v.iter().take(max_items).map(|e| e.to_string()).collect(),
		MatrixData::F64(v) => v.iter().take(max_items).map(|e| e.to_string()).collect(),
	};
	if data.len() > max_items {
		parts.push(format!("... {} more", data.len() - max_items));
	}
	parts.join(" ")
}

fn truncate(text: &str, max_len: usize) -> String {
	text.chars().take(max_len).collect()
}
