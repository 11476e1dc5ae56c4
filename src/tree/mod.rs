mod compression;
mod error;
mod json;
mod kind;
mod leaf;
mod load;
mod mem;
mod source;
mod value;

/// Compression detection result and decoding entry point.
pub use compression::{Compression, ZSTD_MAGIC, decode_bytes};
/// Error and result aliases.
pub use error::{Result, TreeError};
/// JSON-backed source documents.
pub use json::JsonDocument;
/// Element-kind enum and tag resolution.
pub use kind::ElemKind;
/// Tree loading entry point and options.
pub use load::{LoadOptions, load_tree};
/// In-memory source implementation.
pub use mem::{MemNode, MemSource};
/// Source capability, locations, and classification.
pub use source::{Location, NodeClass, Source, SourceError, classify};
/// Value tree model types.
pub use value::{CellNode, FieldNode, Matrix, MatrixData, Scalar, StructNode, ValueNode};
