/// One of the eleven recognized element kinds for scalar and matrix leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElemKind {
	/// Logical value.
	Bool,
	/// Unsigned 8-bit integer.
	U8,
	/// Unsigned 16-bit integer.
	U16,
	/// Unsigned 32-bit integer.
	U32,
	/// Unsigned 64-bit integer.
	U64,
	/// Signed 8-bit integer.
	I8,
	/// Signed 16-bit integer.
	I16,
	/// Signed 32-bit integer.
	I32,
	/// Signed 64-bit integer.
	I64,
	/// 32-bit float.
	F32,
	/// 64-bit float.
	F64,
}

impl ElemKind {
	/// Resolve a source element-type tag. Exact case-sensitive match;
	/// any unrecognized tag resolves to [`ElemKind::F64`].
	pub fn from_tag(tag: &str) -> Self {
		match tag {
			"bool" => Self::Bool,
			"uint8" => Self::U8,
			"uint16" => Self::U16,
			"uint32" => Self::U32,
			"uint64" => Self::U64,
			"int8" => Self::I8,
			"int16" => Self::I16,
			"int32" => Self::I32,
			"int64" => Self::I64,
			"single" => Self::F32,
			_ => Self::F64,
		}
	}

	/// Canonical tag for this kind.
	pub fn tag(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::U8 => "uint8",
			Self::U16 => "uint16",
			Self::U32 => "uint32",
			Self::U64 => "uint64",
			Self::I8 => "int8",
			Self::I16 => "int16",
			Self::I32 => "int32",
			Self::I64 => "int64",
			Self::F32 => "single",
			Self::F64 => "double",
		}
	}

	/// Storage width in bits. Logicals report 8.
	pub fn bit_width(self) -> u32 {
		match self {
			Self::Bool | Self::U8 | Self::I8 => 8,
			Self::U16 | Self::I16 => 16,
			Self::U32 | Self::I32 | Self::F32 => 32,
			Self::U64 | Self::I64 | Self::F64 => 64,
		}
	}

	/// Whether this kind is a signed integer.
	pub fn is_signed(self) -> bool {
		matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
	}

	/// Whether this kind is a float.
	pub fn is_float(self) -> bool {
		matches!(self, Self::F32 | Self::F64)
	}
}

#[cfg(test)]
mod tests {
	use super::ElemKind;

	#[test]
	fn all_recognized_tags_resolve() {
		let table = [
			("bool", ElemKind::Bool),
			("uint8", ElemKind::U8),
			("uint16", ElemKind::U16),
			("uint32", ElemKind::U32),
			("uint64", ElemKind::U64),
			("int8", ElemKind::I8),
			("int16", ElemKind::I16),
			("int32", ElemKind::I32),
			("int64", ElemKind::I64),
			("single", ElemKind::F32),
			("double", ElemKind::F64),
		];
		for (tag, kind) in table {
			assert_eq!(ElemKind::from_tag(tag), kind);
			assert_eq!(kind.tag(), tag);
		}
	}

	#[test]
	fn unrecognized_tags_default_to_double() {
		assert_eq!(ElemKind::from_tag("complex128"), ElemKind::F64);
		assert_eq!(ElemKind::from_tag(""), ElemKind::F64);
		assert_eq!(ElemKind::from_tag("Bool"), ElemKind::F64);
		assert_eq!(ElemKind::from_tag("UINT8"), ElemKind::F64);
	}

	#[test]
	fn width_and_signedness_match_kind() {
		assert_eq!(ElemKind::U16.bit_width(), 16);
		assert_eq!(ElemKind::I64.bit_width(), 64);
		assert!(ElemKind::I8.is_signed());
		assert!(!ElemKind::U8.is_signed());
		assert!(ElemKind::F32.is_float());
		assert!(!ElemKind::Bool.is_float());
	}
}
