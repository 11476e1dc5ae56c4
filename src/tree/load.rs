use std::collections::HashSet;

use crate::tree::kind::ElemKind;
use crate::tree::leaf::{checked_elems, decode_matrix, decode_scalar, wrap};
use crate::tree::source::{Location, NodeClass, Source, classify};
use crate::tree::value::{CellNode, FieldNode, Scalar, StructNode, ValueNode};
use crate::tree::{Result, TreeError};

/// Runtime limits and behavior switches for tree loading.
#[derive(Debug, Clone)]
pub struct LoadOptions {
	/// Maximum recursive struct/cell nesting depth.
	pub max_depth: u32,
	/// Maximum element count for any one matrix or cell grid.
	pub max_elems: usize,
	/// Emit the legacy `double`-valued index placeholder for unrecognized
	/// elements instead of [`ValueNode::Unsupported`].
	pub legacy_index_placeholder: bool,
}

impl Default for LoadOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			max_elems: 1 << 24,
			legacy_index_placeholder: false,
		}
	}
}

/// Load the full value tree rooted at a struct node.
///
/// The tree is built bottom-up in one depth-first traversal and returned
/// fully formed; no partial tree is observable on failure, and the returned
/// tree holds no link back to the source.
pub fn load_tree<S: Source + ?Sized>(source: &S, root: &S::Node, options: &LoadOptions) -> Result<ValueNode> {
	Ok(ValueNode::Struct(load_struct_impl(source, root, options, 0, "")?))
}

fn load_struct_impl<S: Source + ?Sized>(source: &S, node: &S::Node, opt: &LoadOptions, depth: u32, path: &str) -> Result<StructNode> {
	if depth >= opt.max_depth {
		return Err(TreeError::DepthExceeded { max_depth: opt.max_depth });
	}

	let names = wrap(source.field_names(node), path)?;

	// The source format guarantees unique names; a duplicate means the
	// handle is inconsistent, not that we should deduplicate.
	let mut seen = HashSet::with_capacity(names.len());
	for name in &names {
		if !seen.insert(name.as_str()) {
			return Err(TreeError::DuplicateField {
				location: if path.is_empty() { "<root>".to_owned() } else { path.to_owned() },
				name: name.clone(),
			});
		}
	}

	let mut fields = Vec::with_capacity(names.len());
	for (index, name) in names.iter().enumerate() {
		let at = Location::Field(name);
		let child = child_path(path, at);
		let value = load_element(source, node, at, index, opt, depth, &child)?;
		fields.push(FieldNode {
			name: name.clone().into_boxed_str(),
			value,
		});
	}

	Ok(StructNode { fields })
}

fn load_cell_impl<S: Source + ?Sized>(source: &S, node: &S::Node, opt: &LoadOptions, depth: u32, path: &str) -> Result<CellNode> {
	if depth >= opt.max_depth {
		return Err(TreeError::DepthExceeded { max_depth: opt.max_depth });
	}

	let (rows, cols) = wrap(source.dimensions(node), path)?;
	let count = checked_elems(rows, cols, opt.max_elems, path)?;

	let mut data = Vec::with_capacity(count);
	for index in 0..count {
		// Column-major storage order: index = col * rows + row.
		let row = index % rows;
		let col = index / rows;
		let at = Location::Cell { row, col };
		let child = child_path(path, at);
		data.push(load_element(source, node, at, index, opt, depth, &child)?);
	}

	Ok(CellNode { rows, cols, data })
}

fn load_element<S: Source + ?Sized>(
	source: &S,
	node: &S::Node,
	at: Location<'_>,
	index: usize,
	opt: &LoadOptions,
	depth: u32,
	path: &str,
) -> Result<ValueNode> {
	match wrap(classify(source, node, at), path)? {
		NodeClass::Struct => {
			let nested = wrap(source.open_struct(node, at), path)?;
			Ok(ValueNode::Struct(load_struct_impl(source, &nested, opt, depth + 1, path)?))
		}
		NodeClass::Cell => {
			let nested = wrap(source.open_cell(node, at), path)?;
			Ok(ValueNode::Cell(load_cell_impl(source, &nested, opt, depth + 1, path)?))
		}
		NodeClass::Text => Ok(ValueNode::Text(wrap(source.read_string(node, at), path)?.into_boxed_str())),
		NodeClass::Scalar => {
			let tag = wrap(source.element_tag(node, at), path)?;
			decode_scalar(source, node, at, ElemKind::from_tag(&tag), path)
		}
		NodeClass::Matrix => {
			let tag = wrap(source.element_tag(node, at), path)?;
			decode_matrix(source, node, at, ElemKind::from_tag(&tag), opt.max_elems, path)
		}
		NodeClass::Unrecognized => {
			if opt.legacy_index_placeholder {
				Ok(ValueNode::Scalar(Scalar::F64(index as f64)))
			} else {
				Ok(ValueNode::Unsupported { index })
			}
		}
	}
}

fn child_path(path: &str, at: Location<'_>) -> String {
	match at {
		Location::Field(name) if path.is_empty() => name.to_owned(),
		Location::Field(name) => format!("{path}.{name}"),
		Location::Cell { row, col } => format!("{path}[{row},{col}]"),
	}
}
