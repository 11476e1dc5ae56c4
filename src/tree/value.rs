use crate::tree::kind::ElemKind;

/// One scalar leaf value, tagged by element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	/// Logical value.
	Bool(bool),
	/// Unsigned 8-bit integer.
	U8(u8),
	/// Unsigned 16-bit integer.
	U16(u16),
	/// Unsigned 32-bit integer.
	U32(u32),
	/// Unsigned 64-bit integer.
	U64(u64),
	/// Signed 8-bit integer.
	I8(i8),
	/// Signed 16-bit integer.
	I16(i16),
	/// Signed 32-bit integer.
	I32(i32),
	/// Signed 64-bit integer.
	I64(i64),
	/// 32-bit float.
	F32(f32),
	/// 64-bit float.
	F64(f64),
}

impl Scalar {
	/// Element kind of this scalar.
	pub fn kind(&self) -> ElemKind {
		match self {
			Self::Bool(_) => ElemKind::Bool,
			Self::U8(_) => ElemKind::U8,
			Self::U16(_) => ElemKind::U16,
			Self::U32(_) => ElemKind::U32,
			Self::U64(_) => ElemKind::U64,
			Self::I8(_) => ElemKind::I8,
			Self::I16(_) => ElemKind::I16,
			Self::I32(_) => ElemKind::I32,
			Self::I64(_) => ElemKind::I64,
			Self::F32(_) => ElemKind::F32,
			Self::F64(_) => ElemKind::F64,
		}
	}
}

/// Flat element storage for one matrix, column-major
/// (`index = col * rows + row`).
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixData {
	/// Logical elements.
	Bool(Vec<bool>),
	/// Unsigned 8-bit elements.
	U8(Vec<u8>),
	/// Unsigned 16-bit elements.
	U16(Vec<u16>),
	/// Unsigned 32-bit elements.
	U32(Vec<u32>),
	/// Unsigned 64-bit elements.
	U64(Vec<u64>),
	/// Signed 8-bit elements.
	I8(Vec<i8>),
	/// Signed 16-bit elements.
	I16(Vec<i16>),
	/// Signed 32-bit elements.
	I32(Vec<i32>),
	/// Signed 64-bit elements.
	I64(Vec<i64>),
	/// 32-bit float elements.
	F32(Vec<f32>),
	/// 64-bit float elements.
	F64(Vec<f64>),
}

impl MatrixData {
	/// Element kind of this storage.
	pub fn kind(&self) -> ElemKind {
		match self {
			Self::Bool(_) => ElemKind::Bool,
			Self::U8(_) => ElemKind::U8,
			Self::U16(_) => ElemKind::U16,
			Self::U32(_) => ElemKind::U32,
			Self::U64(_) => ElemKind::U64,
			Self::I8(_) => ElemKind::I8,
			Self::I16(_) => ElemKind::I16,
			Self::I32(_) => ElemKind::I32,
			Self::I64(_) => ElemKind::I64,
			Self::F32(_) => ElemKind::F32,
			Self::F64(_) => ElemKind::F64,
		}
	}

	/// Number of stored elements.
	pub fn len(&self) -> usize {
		match self {
			Self::Bool(v) => v.len(),
			Self::U8(v) => v.len(),
			Self::U16(v) => v.len(),
			Self::U32(v) => v.len(),
			Self::U64(v) => v.len(),
			Self::I8(v) => v.len(),
			Self::I16(v) => v.len(),
			Self::I32(v) => v.len(),
			Self::I64(v) => v.len(),
			Self::F32(v) => v.len(),
			Self::F64(v) => v.len(),
		}
	}

	/// Whether no elements are stored.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Empty storage of the given kind.
	pub fn empty(kind: ElemKind) -> Self {
		match kind {
			ElemKind::Bool => Self::Bool(Vec::new()),
			ElemKind::U8 => Self::U8(Vec::new()),
			ElemKind::U16 => Self::U16(Vec::new()),
			ElemKind::U32 => Self::U32(Vec::new()),
			ElemKind::U64 => Self::U64(Vec::new()),
			ElemKind::I8 => Self::I8(Vec::new()),
			ElemKind::I16 => Self::I16(Vec::new()),
			ElemKind::I32 => Self::I32(Vec::new()),
			ElemKind::I64 => Self::I64(Vec::new()),
			ElemKind::F32 => Self::F32(Vec::new()),
			ElemKind::F64 => Self::F64(Vec::new()),
		}
	}
}

/// Dense 2-D matrix of one element kind.
///
/// `data.len() == rows * cols`; a `0×n` or `n×0` matrix is a valid empty
/// container.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
	/// Row count.
	pub rows: usize,
	/// Column count.
	pub cols: usize,
	/// Column-major flat element storage.
	pub data: MatrixData,
}

impl Matrix {
	/// Flat index of `(row, col)` in column-major storage.
	pub fn index_of(&self, row: usize, col: usize) -> usize {
		col * self.rows + row
	}
}

/// One named field of a struct node.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
	/// Field name, owned by the struct.
	pub name: Box<str>,
	/// Field value.
	pub value: ValueNode,
}

/// Ordered, uniquely named collection of heterogeneous fields.
///
/// Field order is the source's enumeration order and is semantically
/// meaningful.
#[derive(Debug, Clone, PartialEq)]
pub struct StructNode {
	/// Fields in source enumeration order.
	pub fields: Vec<FieldNode>,
}

impl StructNode {
	/// Look up a field value by name.
	pub fn get(&self, name: &str) -> Option<&ValueNode> {
		self.fields.iter().find(|field| &*field.name == name).map(|field| &field.value)
	}

	/// Field names in enumeration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|field| &*field.name)
	}
}

/// Dense 2-D grid of independently typed, unnamed elements.
#[derive(Debug, Clone, PartialEq)]
pub struct CellNode {
	/// Row count.
	pub rows: usize,
	/// Column count.
	pub cols: usize,
	/// Column-major flat element storage, `data.len() == rows * cols`.
	pub data: Vec<ValueNode>,
}

impl CellNode {
	/// Flat index of `(row, col)` in column-major storage.
	pub fn index_of(&self, row: usize, col: usize) -> usize {
		col * self.rows + row
	}

	/// Element at `(row, col)`, if in bounds.
	pub fn at(&self, row: usize, col: usize) -> Option<&ValueNode> {
		if row >= self.rows || col >= self.cols {
			return None;
		}
		self.data.get(self.index_of(row, col))
	}
}

/// The universal output type all loaders populate.
///
/// A `ValueNode` tree is a strict tree: every parent owns its children
/// outright and no node is shared or revisited.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
	/// Placeholder for a source element no shape predicate recognized,
	/// carrying the element's flat/positional index for diagnostics.
	Unsupported {
		/// Field position or cell flat index in the enclosing container.
		index: usize,
	},
	/// Scalar leaf.
	Scalar(Scalar),
	/// String leaf.
	Text(Box<str>),
	/// Dense 2-D matrix leaf.
	Matrix(Matrix),
	/// Nested struct.
	Struct(StructNode),
	/// Nested cell grid.
	Cell(CellNode),
}

impl ValueNode {
	/// Stable lowercase label for the variant.
	pub fn label(&self) -> &'static str {
		match self {
			Self::Unsupported { .. } => "unsupported",
			Self::Scalar(_) => "scalar",
			Self::Text(_) => "text",
			Self::Matrix(_) => "matrix",
			Self::Struct(_) => "struct",
			Self::Cell(_) => "cell",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{CellNode, Matrix, MatrixData, Scalar, ValueNode};

	#[test]
	fn cell_indexing_is_column_major() {
		let cell = CellNode {
			rows: 2,
			cols: 3,
			data: (0..6).map(|i| ValueNode::Scalar(Scalar::I32(i))).collect(),
		};
		assert_eq!(cell.index_of(1, 0), 1);
		assert_eq!(cell.index_of(0, 1), 2);
		assert_eq!(cell.at(1, 2), Some(&ValueNode::Scalar(Scalar::I32(5))));
		assert_eq!(cell.at(2, 0), None);
	}

	#[test]
	fn matrix_indexing_is_column_major() {
		let matrix = Matrix {
			rows: 2,
			cols: 3,
			data: MatrixData::F64(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
		};
		assert_eq!(matrix.index_of(0, 2), 4);
		assert_eq!(matrix.index_of(1, 1), 3);
	}
}
