use std::fmt;

use crate::tree::kind::ElemKind;
use crate::tree::value::{MatrixData, Scalar};

/// Failure reported by a [`Source`] implementation.
///
/// The loader wraps every source failure into
/// [`TreeError::DecodeFailed`](crate::tree::TreeError::DecodeFailed) together
/// with the path of the failing element.
#[derive(Debug, Clone)]
pub struct SourceError {
	/// Source-defined failure description.
	pub reason: String,
}

impl SourceError {
	/// Create a source error from a reason string.
	pub fn new(reason: impl Into<String>) -> Self {
		Self { reason: reason.into() }
	}
}

impl fmt::Display for SourceError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.reason)
	}
}

impl std::error::Error for SourceError {}

/// Position of one element inside a struct or cell-grid node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'a> {
	/// Struct field addressed by name.
	Field(&'a str),
	/// Grid cell addressed by zero-based row and column.
	Cell {
		/// Zero-based row.
		row: usize,
		/// Zero-based column.
		col: usize,
	},
}

impl fmt::Display for Location<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Field(name) => f.write_str(name),
			Self::Cell { row, col } => write!(f, "[{row},{col}]"),
		}
	}
}

/// Shape classification of one source location, in dispatch precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
	/// Nested struct.
	Struct,
	/// Nested cell grid.
	Cell,
	/// String leaf.
	Text,
	/// Scalar leaf.
	Scalar,
	/// Matrix leaf.
	Matrix,
	/// No shape predicate held.
	Unrecognized,
}

/// Abstract reader over one self-describing hierarchical container.
///
/// A `Node` is an opaque handle to one struct or cell-grid node; locations
/// inside it are addressed by field name or cell coordinates. Every
/// operation may fail with a [`SourceError`]; the loader never swallows one.
pub trait Source {
	/// Opaque handle to one struct or cell-grid node.
	type Node;

	/// Field names of a struct node, in source enumeration order.
	fn field_names(&self, node: &Self::Node) -> Result<Vec<String>, SourceError>;

	/// `(rows, cols)` of a cell-grid node.
	fn dimensions(&self, node: &Self::Node) -> Result<(usize, usize), SourceError>;

	/// `(rows, cols)` of the matrix leaf at `at`.
	fn leaf_dimensions(&self, node: &Self::Node, at: Location<'_>) -> Result<(usize, usize), SourceError>;

	/// Whether the element at `at` is a nested struct.
	fn is_struct(&self, node: &Self::Node, at: Location<'_>) -> Result<bool, SourceError>;

	/// Whether the element at `at` is a nested cell grid.
	fn is_cell(&self, node: &Self::Node, at: Location<'_>) -> Result<bool, SourceError>;

	/// Whether the element at `at` is a string leaf.
	fn is_string(&self, node: &Self::Node, at: Location<'_>) -> Result<bool, SourceError>;

	/// Whether the element at `at` is a scalar leaf.
	fn is_scalar(&self, node: &Self::Node, at: Location<'_>) -> Result<bool, SourceError>;

	/// Whether the element at `at` is a matrix leaf.
	fn is_matrix(&self, node: &Self::Node, at: Location<'_>) -> Result<bool, SourceError>;

	/// Element-type tag of the scalar/matrix leaf at `at`.
	fn element_tag(&self, node: &Self::Node, at: Location<'_>) -> Result<String, SourceError>;

	/// Read the scalar at `at` as `kind`.
	fn read_scalar(&self, node: &Self::Node, at: Location<'_>, kind: ElemKind) -> Result<Scalar, SourceError>;

	/// Read `count` matrix elements at `at` as `kind`, in column-major order.
	fn read_matrix(&self, node: &Self::Node, at: Location<'_>, kind: ElemKind, count: usize) -> Result<MatrixData, SourceError>;

	/// Read the string leaf at `at`.
	fn read_string(&self, node: &Self::Node, at: Location<'_>) -> Result<String, SourceError>;

	/// Open the nested struct at `at`.
	fn open_struct(&self, node: &Self::Node, at: Location<'_>) -> Result<Self::Node, SourceError>;

	/// Open the nested cell grid at `at`.
	fn open_cell(&self, node: &Self::Node, at: Location<'_>) -> Result<Self::Node, SourceError>;
}

/// Classify `at` by querying the five shape predicates in fixed precedence:
/// struct, cell, string, scalar, matrix. The first predicate that holds wins;
/// if none hold the location is [`NodeClass::Unrecognized`].
pub fn classify<S: Source + ?Sized>(source: &S, node: &S::Node, at: Location<'_>) -> Result<NodeClass, SourceError> {
	if source.is_struct(node, at)? {
		return Ok(NodeClass::Struct);
	}
	if source.is_cell(node, at)? {
		return Ok(NodeClass::Cell);
	}
	if source.is_string(node, at)? {
		return Ok(NodeClass::Text);
	}
	if source.is_scalar(node, at)? {
		return Ok(NodeClass::Scalar);
	}
	if source.is_matrix(node, at)? {
		return Ok(NodeClass::Matrix);
	}
	Ok(NodeClass::Unrecognized)
}
