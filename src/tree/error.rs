use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, TreeError>;

/// Errors produced while opening source documents and loading value trees.
#[derive(Debug, Error)]
pub enum TreeError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Source document was not valid JSON.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
	/// Source query or read failed during tree loading.
	#[error("decode failed at {location}: {reason}")]
	DecodeFailed {
		/// Path of the failing element from the root struct.
		location: String,
		/// Source-reported reason.
		reason: String,
	},
	/// Struct field names were not unique.
	#[error("duplicate field name {name:?} in struct at {location}")]
	DuplicateField {
		/// Path of the enclosing struct.
		location: String,
		/// Offending field name.
		name: String,
	},
	/// Loader recursion depth exceeded configured limit.
	#[error("load depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Matrix or cell-grid element count exceeded configured limit.
	#[error("grid too large at {location}: elems={elems}, max={max}")]
	GridTooLarge {
		/// Path of the offending matrix or grid.
		location: String,
		/// Requested element count.
		elems: usize,
		/// Maximum permitted element count.
		max: usize,
	},
	/// Source document node did not match the expected document shape.
	#[error("invalid source document at {at}: {reason}")]
	InvalidDocument {
		/// Path inside the document.
		at: String,
		/// Shape problem description.
		reason: String,
	},
}
