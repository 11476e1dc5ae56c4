use std::path::PathBuf;

use mattree::tree::{JsonDocument, LoadOptions};

use crate::cmd::print::{PrintOptions, print_value, value_to_json};

#[derive(clap::Args)]
pub struct Args {
	pub file: PathBuf,
	#[arg(long)]
	pub json: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long = "max-elems")]
	pub max_elems: Option<usize>,
	#[arg(long = "legacy-placeholder")]
	pub legacy_placeholder: bool,
	#[arg(long = "max-print-depth")]
	pub max_print_depth: Option<u32>,
	#[arg(long = "max-items")]
	pub max_items: Option<usize>,
}

/// Load a source document and print its full value tree.
pub fn run(args: Args) -> mattree::tree::Result<()> {
	let doc = JsonDocument::open(&args.file)?;

	let mut options = LoadOptions::default();
	if let Some(max_depth) = args.max_depth {
		options.max_depth = max_depth;
	}
	if let Some(max_elems) = args.max_elems {
		options.max_elems = max_elems;
	}
	options.legacy_index_placeholder = args.legacy_placeholder;

	let value = doc.load(&options)?;

	if args.json {
		println!("{}", serde_json::to_string_pretty(&value_to_json(&value))?);
		return Ok(());
	}

	let mut print_options = PrintOptions::default();
	if let Some(max_print_depth) = args.max_print_depth {
		print_options.max_print_depth = max_print_depth;
	}
	if let Some(max_items) = args.max_items {
		print_options.max_items = max_items;
	}

	println!("path: {}", args.file.display());
	println!("compression: {}", doc.compression.as_str());
	println!("tree:");
	print_value(&value, 0, 0, print_options);

	Ok(())
}
