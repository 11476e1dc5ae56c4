use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::OnceLock;

static MATTREE_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

pub(crate) fn run_mattree(args: &[&str]) -> Output {
	Command::new(mattree_bin()).args(args).output().expect("mattree command executes")
}

pub(crate) fn run_mattree_json(args: &[&str]) -> serde_json::Value {
	let output = run_mattree(args);
	assert!(
		output.status.success(),
		"mattree command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn mattree_bin() -> &'static PathBuf {
	MATTREE_BIN.get_or_init(resolve_mattree_bin)
}

fn resolve_mattree_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_mattree") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| manifest_dir.join("target"));

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "mattree.exe" } else { "mattree" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "mattree"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build mattree binary at {}", bin.display());

	bin
}
