//! Load self-describing struct/cell/matrix sources into an owned value tree.
//!
//! The [`tree`] module walks an abstract [`tree::Source`] — an ordered,
//! hierarchically typed container of structs, cell grids, and typed
//! scalar/matrix/string leaves — and materializes an isomorphic
//! [`tree::ValueNode`] tree with no remaining link to the source.

/// Source abstraction, value model, and tree loading.
pub mod tree;
