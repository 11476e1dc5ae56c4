use std::sync::Arc;

use crate::tree::kind::ElemKind;
use crate::tree::source::{Location, Source, SourceError};
use crate::tree::value::{Matrix, MatrixData, Scalar, ValueNode};

/// One node of an in-memory source tree.
#[derive(Debug, Clone)]
pub enum MemNode {
	/// Struct with fields in enumeration order.
	Struct(Vec<(String, Arc<MemNode>)>),
	/// Cell grid with column-major flat data, `data.len() == rows * cols`.
	Cell {
		/// Row count.
		rows: usize,
		/// Column count.
		cols: usize,
		/// Column-major cell contents.
		data: Vec<Arc<MemNode>>,
	},
	/// String leaf.
	Text(String),
	/// Scalar leaf with its element-type tag.
	Scalar {
		/// Element-type tag as the source reports it.
		tag: String,
		/// Stored value.
		value: Scalar,
	},
	/// Matrix leaf with its element-type tag and column-major data.
	Matrix {
		/// Element-type tag as the source reports it.
		tag: String,
		/// Row count.
		rows: usize,
		/// Column count.
		cols: usize,
		/// Column-major element storage.
		data: MatrixData,
	},
	/// Node that answers no shape predicate.
	Alien,
	/// Scalar-classified node whose reads always fail.
	Fail {
		/// Reason reported on every read.
		reason: String,
	},
}

/// Synthetic in-memory [`Source`] over an owned node tree.
///
/// Backs the JSON document reader and lets tests hand-build sources,
/// including ones that fail or present unrecognized nodes.
#[derive(Debug, Clone)]
pub struct MemSource {
	root: Arc<MemNode>,
}

impl MemSource {
	/// Create a source over `root`.
	pub fn new(root: MemNode) -> Self {
		Self { root: Arc::new(root) }
	}

	/// Handle to the root node.
	pub fn root(&self) -> Arc<MemNode> {
		self.root.clone()
	}

	/// Encode a value tree into an equivalent source.
	///
	/// Loading the result back reproduces the input tree, except that
	/// [`ValueNode::Unsupported`] encodes to a node the loader will again
	/// classify as unrecognized (its stored index becomes positional).
	pub fn from_value(root: &ValueNode) -> Self {
		Self::new(encode_node(root))
	}
}

fn encode_node(value: &ValueNode) -> MemNode {
	match value {
		ValueNode::Unsupported { .. } => MemNode::Alien,
		ValueNode::Scalar(scalar) => MemNode::Scalar {
			tag: scalar.kind().tag().to_owned(),
			value: scalar.clone(),
		},
		ValueNode::Text(text) => MemNode::Text(text.to_string()),
		ValueNode::Matrix(Matrix { rows, cols, data }) => MemNode::Matrix {
			tag: data.kind().tag().to_owned(),
			rows: *rows,
			cols: *cols,
			data: data.clone(),
		},
		ValueNode::Struct(item) => MemNode::Struct(
			item.fields
				.iter()
				.map(|field| (field.name.to_string(), Arc::new(encode_node(&field.value))))
				.collect(),
		),
		ValueNode::Cell(cell) => MemNode::Cell {
			rows: cell.rows,
			cols: cell.cols,
			data: cell.data.iter().map(|item| Arc::new(encode_node(item))).collect(),
		},
	}
}

impl MemSource {
	fn child(&self, node: &Arc<MemNode>, at: Location<'_>) -> Result<Arc<MemNode>, SourceError> {
		match (&**node, at) {
			(MemNode::Struct(fields), Location::Field(name)) => fields
				.iter()
				.find(|(field, _)| field == name)
				.map(|(_, child)| child.clone())
				.ok_or_else(|| SourceError::new(format!("no field named {name:?}"))),
			(MemNode::Cell { rows, cols, data }, Location::Cell { row, col }) => {
				if row >= *rows || col >= *cols {
					return Err(SourceError::new(format!("cell {at} out of bounds for {rows}x{cols} grid")));
				}
				data.get(col * rows + row)
					.cloned()
					.ok_or_else(|| SourceError::new(format!("cell {at} missing from grid data")))
			}
			_ => Err(SourceError::new(format!("no element at {at}"))),
		}
	}
}

impl Source for MemSource {
	type Node = Arc<MemNode>;

	fn field_names(&self, node: &Self::Node) -> Result<Vec<String>, SourceError> {
		match &**node {
			MemNode::Struct(fields) => Ok(fields.iter().map(|(name, _)| name.clone()).collect()),
			_ => Err(SourceError::new("handle is not a struct node")),
		}
	}

	fn dimensions(&self, node: &Self::Node) -> Result<(usize, usize), SourceError> {
		match &**node {
			MemNode::Cell { rows, cols, .. } => Ok((*rows, *cols)),
			_ => Err(SourceError::new("handle is not a cell-grid node")),
		}
	}

	fn leaf_dimensions(&self, node: &Self::Node, at: Location<'_>) -> Result<(usize, usize), SourceError> {
		match &*self.child(node, at)? {
			MemNode::Matrix { rows, cols, .. } => Ok((*rows, *cols)),
			_ => Err(SourceError::new(format!("{at} is not a matrix leaf"))),
		}
	}

	fn is_struct(&self, node: &Self::Node, at: Location<'_>) -> Result<bool, SourceError> {
		Ok(matches!(&*self.child(node, at)?, MemNode::Struct(_)))
	}

	fn is_cell(&self, node: &Self::Node, at: Location<'_>) -> Result<bool, SourceError> {
		Ok(matches!(&*self.child(node, at)?, MemNode::Cell { .. }))
	}

	fn is_string(&self, node: &Self::Node, at: Location<'_>) -> Result<bool, SourceError> {
		Ok(matches!(&*self.child(node, at)?, MemNode::Text(_)))
	}

	fn is_scalar(&self, node: &Self::Node, at: Location<'_>) -> Result<bool, SourceError> {
		Ok(matches!(&*self.child(node, at)?, MemNode::Scalar { .. } | MemNode::Fail { .. }))
	}

	fn is_matrix(&self, node: &Self::Node, at: Location<'_>) -> Result<bool, SourceError> {
		Ok(matches!(&*self.child(node, at)?, MemNode::Matrix { .. }))
	}

	fn element_tag(&self, node: &Self::Node, at: Location<'_>) -> Result<String, SourceError> {
		match &*self.child(node, at)? {
			MemNode::Scalar { tag, .. } | MemNode::Matrix { tag, .. } => Ok(tag.clone()),
			MemNode::Fail { .. } => Ok("double".to_owned()),
			_ => Err(SourceError::new(format!("{at} has no element type"))),
		}
	}

	fn read_scalar(&self, node: &Self::Node, at: Location<'_>, kind: ElemKind) -> Result<Scalar, SourceError> {
		match &*self.child(node, at)? {
			MemNode::Scalar { value, .. } => convert_scalar(value, kind),
			MemNode::Fail { reason } => Err(SourceError::new(reason.clone())),
			_ => Err(SourceError::new(format!("{at} is not a scalar leaf"))),
		}
	}

	fn read_matrix(&self, node: &Self::Node, at: Location<'_>, kind: ElemKind, count: usize) -> Result<MatrixData, SourceError> {
		match &*self.child(node, at)? {
			MemNode::Matrix { data, .. } => {
				if data.len() != count {
					return Err(SourceError::new(format!("matrix at {at} holds {} elements, read asked for {count}", data.len())));
				}
				convert_matrix(data, kind)
			}
			MemNode::Fail { reason } => Err(SourceError::new(reason.clone())),
			_ => Err(SourceError::new(format!("{at} is not a matrix leaf"))),
		}
	}

	fn read_string(&self, node: &Self::Node, at: Location<'_>) -> Result<String, SourceError> {
		match &*self.child(node, at)? {
			MemNode::Text(text) => Ok(text.clone()),
			_ => Err(SourceError::new(format!("{at} is not a string leaf"))),
		}
	}

	fn open_struct(&self, node: &Self::Node, at: Location<'_>) -> Result<Self::Node, SourceError> {
		let child = self.child(node, at)?;
		match &*child {
			MemNode::Struct(_) => Ok(child),
			_ => Err(SourceError::new(format!("{at} is not a struct node"))),
		}
	}

	fn open_cell(&self, node: &Self::Node, at: Location<'_>) -> Result<Self::Node, SourceError> {
		let child = self.child(node, at)?;
		match &*child {
			MemNode::Cell { .. } => Ok(child),
			_ => Err(SourceError::new(format!("{at} is not a cell-grid node"))),
		}
	}
}

fn convert_scalar(value: &Scalar, kind: ElemKind) -> Result<Scalar, SourceError> {
	if value.kind() == kind {
		return Ok(value.clone());
	}
	// Logicals are stored as bool but read back as unsigned bytes.
	if let (Scalar::Bool(v), ElemKind::U8) = (value, kind) {
		return Ok(Scalar::U8(u8::from(*v)));
	}
	Err(SourceError::new(format!("cannot read {} element as {}", value.kind().tag(), kind.tag())))
}

fn convert_matrix(data: &MatrixData, kind: ElemKind) -> Result<MatrixData, SourceError> {
	if data.kind() == kind {
		return Ok(data.clone());
	}
	if let (MatrixData::Bool(v), ElemKind::U8) = (data, kind) {
		return Ok(MatrixData::U8(v.iter().map(|b| u8::from(*b)).collect()));
	}
	Err(SourceError::new(format!("cannot read {} elements as {}", data.kind().tag(), kind.tag())))
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::{MemNode, MemSource};
	use crate::tree::source::{Location, Source};
	use crate::tree::value::{FieldNode, Scalar, StructNode, ValueNode};

	fn sample() -> MemSource {
		MemSource::new(MemNode::Struct(vec![
			("greeting".to_owned(), Arc::new(MemNode::Text("hi".to_owned()))),
			(
				"count".to_owned(),
				Arc::new(MemNode::Scalar {
					tag: "uint16".to_owned(),
					value: Scalar::U16(9),
				}),
			),
		]))
	}

	#[test]
	fn field_lookup_and_predicates() {
		let source = sample();
		let root = source.root();
		assert_eq!(source.field_names(&root).unwrap(), vec!["greeting", "count"]);
		assert!(source.is_string(&root, Location::Field("greeting")).unwrap());
		assert!(source.is_scalar(&root, Location::Field("count")).unwrap());
		assert!(!source.is_struct(&root, Location::Field("count")).unwrap());
		assert!(source.field_names(&source.child(&root, Location::Field("greeting")).unwrap()).is_err());
	}

	#[test]
	fn missing_field_reports_name() {
		let source = sample();
		let err = source.read_string(&source.root(), Location::Field("absent")).unwrap_err();
		assert!(err.reason.contains("absent"));
	}

	#[test]
	fn bool_scalars_read_back_as_bytes() {
		let source = MemSource::new(MemNode::Struct(vec![(
			"flag".to_owned(),
			Arc::new(MemNode::Scalar {
				tag: "bool".to_owned(),
				value: Scalar::Bool(true),
			}),
		)]));
		let raw = source
			.read_scalar(&source.root(), Location::Field("flag"), crate::tree::ElemKind::U8)
			.unwrap();
		assert_eq!(raw, Scalar::U8(1));
	}

	#[test]
	fn from_value_preserves_field_order() {
		let tree = ValueNode::Struct(StructNode {
			fields: vec![
				FieldNode {
					name: "z".into(),
					value: ValueNode::Text("last-first".into()),
				},
				FieldNode {
					name: "a".into(),
					value: ValueNode::Scalar(Scalar::I8(-3)),
				},
			],
		});
		let source = MemSource::from_value(&tree);
		assert_eq!(source.field_names(&source.root()).unwrap(), vec!["z", "a"]);
	}
}
