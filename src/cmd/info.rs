use std::path::PathBuf;

use mattree::tree::{JsonDocument, LoadOptions, ValueNode};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Tallies over one loaded value tree.
#[derive(Debug, Default, serde::Serialize)]
pub struct TreeStats {
	pub structs: usize,
	pub cells: usize,
	pub matrices: usize,
	pub scalars: usize,
	pub strings: usize,
	pub unsupported: usize,
	pub max_depth: u32,
}

impl TreeStats {
	/// Walk a value tree and count nodes per variant.
	pub fn collect(value: &ValueNode) -> Self {
		let mut stats = Self::default();
		visit(value, 0, &mut stats);
		stats
	}
}

fn visit(value: &ValueNode, depth: u32, stats: &mut TreeStats) {
	stats.max_depth = stats.max_depth.max(depth);
	match value {
		ValueNode::Unsupported { .. } => stats.unsupported += 1,
		ValueNode::Scalar(_) => stats.scalars += 1,
		ValueNode::Text(_) => stats.strings += 1,
		ValueNode::Matrix(_) => stats.matrices += 1,
		ValueNode::Struct(item) => {
			stats.structs += 1;
			for field in &item.fields {
				visit(&field.value, depth + 1, stats);
			}
		}
		ValueNode::Cell(cell) => {
			stats.cells += 1;
			for item in &cell.data {
				visit(item, depth + 1, stats);
			}
		}
	}
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: String,
	root_fields: usize,
	stats: TreeStats,
}

/// Load a source document and print summary statistics.
pub fn run(args: Args) -> mattree::tree::Result<()> {
	let doc = JsonDocument::open(&args.file)?;
	let value = doc.load(&LoadOptions::default())?;
	let root_fields = match &value {
		ValueNode::Struct(item) => item.fields.len(),
		_ => 0,
	};
	let stats = TreeStats::collect(&value);

	if args.json {
		let payload = InfoJson {
			path: args.file.display().to_string(),
			compression: doc.compression.as_str().to_owned(),
			root_fields,
			stats,
		};
		println!("{}", serde_json::to_string_pretty(&payload)?);
		return Ok(());
	}

	println!("path: {}", args.file.display());
	println!("compression: {}", doc.compression.as_str());
	println!("root_fields: {root_fields}");
	println!("structs: {}", stats.structs);
	println!("cells: {}", stats.cells);
	println!("matrices: {}", stats.matrices);
	println!("scalars: {}", stats.scalars);
	println!("strings: {}", stats.strings);
	println!("unsupported: {}", stats.unsupported);
	println!("max_depth: {}", stats.max_depth);

	Ok(())
}
