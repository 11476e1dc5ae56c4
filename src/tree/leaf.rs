use crate::tree::kind::ElemKind;
use crate::tree::source::{Location, Source, SourceError};
use crate::tree::value::{Matrix, MatrixData, Scalar, ValueNode};
use crate::tree::{Result, TreeError};

/// Read one scalar of `kind` at `at` and wrap it in a [`ValueNode`].
///
/// Logical scalars are read as unsigned bytes and normalized with
/// "any non-zero is true".
pub(crate) fn decode_scalar<S: Source + ?Sized>(source: &S, node: &S::Node, at: Location<'_>, kind: ElemKind, path: &str) -> Result<ValueNode> {
	let value = match kind {
		ElemKind::Bool => {
			let raw = wrap(source.read_scalar(node, at, ElemKind::U8), path)?;
			match raw {
				Scalar::U8(v) => Scalar::Bool(v != 0),
				other => return Err(kind_mismatch(path, ElemKind::U8, other.kind())),
			}
		}
		_ => {
			let value = wrap(source.read_scalar(node, at, kind), path)?;
			if value.kind() != kind {
				return Err(kind_mismatch(path, kind, value.kind()));
			}
			value
		}
	};
	Ok(ValueNode::Scalar(value))
}

/// Read one dense matrix of `kind` at `at` and wrap it in a [`ValueNode`].
///
/// Dimensions are queried first; `0×n` and `n×0` shapes yield an empty
/// matrix. The full element block is read in one call.
pub(crate) fn decode_matrix<S: Source + ?Sized>(
	source: &S,
	node: &S::Node,
	at: Location<'_>,
	kind: ElemKind,
	max_elems: usize,
	path: &str,
) -> Result<ValueNode> {
	let (rows, cols) = wrap(source.leaf_dimensions(node, at), path)?;
	let count = checked_elems(rows, cols, max_elems, path)?;

	if count == 0 {
		return Ok(ValueNode::Matrix(Matrix {
			rows,
			cols,
			data: MatrixData::empty(kind),
		}));
	}

	let read_kind = if kind == ElemKind::Bool { ElemKind::U8 } else { kind };
	let data = wrap(source.read_matrix(node, at, read_kind, count), path)?;
	if data.len() != count {
		return Err(TreeError::DecodeFailed {
			location: path.to_owned(),
			reason: format!("matrix read returned {} elements, expected {count}", data.len()),
		});
	}

	let data = if kind == ElemKind::Bool {
		match data {
			MatrixData::U8(raw) => MatrixData::Bool(raw.into_iter().map(|v| v != 0).collect()),
			other => return Err(kind_mismatch(path, ElemKind::U8, other.kind())),
		}
	} else {
		if data.kind() != kind {
			return Err(kind_mismatch(path, kind, data.kind()));
		}
		data
	};

	Ok(ValueNode::Matrix(Matrix { rows, cols, data }))
}

/// Validate `rows * cols` against `max_elems` without overflow.
pub(crate) fn checked_elems(rows: usize, cols: usize, max_elems: usize, path: &str) -> Result<usize> {
	let count = rows.checked_mul(cols).ok_or(TreeError::GridTooLarge {
		location: path.to_owned(),
		elems: usize::MAX,
		max: max_elems,
	})?;
	if count > max_elems {
		return Err(TreeError::GridTooLarge {
			location: path.to_owned(),
			elems: count,
			max: max_elems,
		});
	}
	Ok(count)
}

/// Wrap a source failure with the path of the failing element.
pub(crate) fn wrap<T>(result: std::result::Result<T, SourceError>, path: &str) -> Result<T> {
	result.map_err(|err| TreeError::DecodeFailed {
		location: path.to_owned(),
		reason: err.reason,
	})
}

fn kind_mismatch(path: &str, want: ElemKind, got: ElemKind) -> TreeError {
	TreeError::DecodeFailed {
		location: path.to_owned(),
		reason: format!("source returned {} for a {} read", got.tag(), want.tag()),
	}
}
