#![allow(missing_docs)]

use std::sync::Arc;

use mattree::tree::{LoadOptions, MemNode, MemSource, Scalar, TreeError, ValueNode, load_tree};

#[test]
fn leaf_failure_aborts_the_whole_load_with_its_path() {
	let inner = MemNode::Struct(vec![
		("ok".to_owned(), Arc::new(MemNode::Text("fine".to_owned()))),
		(
			"bad".to_owned(),
			Arc::new(MemNode::Fail {
				reason: "simulated read failure".to_owned(),
			}),
		),
	]);
	let source = MemSource::new(MemNode::Struct(vec![("outer".to_owned(), Arc::new(inner))]));

	let err = load_tree(&source, &source.root(), &LoadOptions::default()).unwrap_err();
	match err {
		TreeError::DecodeFailed { location, reason } => {
			assert_eq!(location, "outer.bad");
			assert_eq!(reason, "simulated read failure");
		}
		other => panic!("expected DecodeFailed, got {other:?}"),
	}
}

#[test]
fn cell_failure_reports_row_and_column() {
	let grid = MemNode::Cell {
		rows: 2,
		cols: 1,
		data: vec![
			Arc::new(MemNode::Scalar {
				tag: "int32".to_owned(),
				value: Scalar::I32(1),
			}),
			Arc::new(MemNode::Fail {
				reason: "truncated".to_owned(),
			}),
		],
	};
	let source = MemSource::new(MemNode::Struct(vec![("grid".to_owned(), Arc::new(grid))]));

	let err = load_tree(&source, &source.root(), &LoadOptions::default()).unwrap_err();
	match err {
		TreeError::DecodeFailed { location, .. } => assert_eq!(location, "grid[1,0]"),
		other => panic!("expected DecodeFailed, got {other:?}"),
	}
}

#[test]
fn depth_limit_stops_adversarial_nesting() {
	// Build max_depth+1 nested structs.
	let mut node = MemNode::Struct(vec![(
		"leaf".to_owned(),
		Arc::new(MemNode::Scalar {
			tag: "uint8".to_owned(),
			value: Scalar::U8(1),
		}),
	)]);
	for _ in 0..8 {
		node = MemNode::Struct(vec![("deeper".to_owned(), Arc::new(node))]);
	}
	let source = MemSource::new(node);

	let shallow = LoadOptions {
		max_depth: 4,
		..LoadOptions::default()
	};
	let err = load_tree(&source, &source.root(), &shallow).unwrap_err();
	assert!(matches!(err, TreeError::DepthExceeded { max_depth: 4 }));

	let deep = LoadOptions {
		max_depth: 16,
		..LoadOptions::default()
	};
	load_tree(&source, &source.root(), &deep).expect("within the limit loads fine");
}

#[test]
fn oversized_grid_is_rejected() {
	let grid = MemNode::Cell {
		rows: 100,
		cols: 100,
		data: Vec::new(),
	};
	let source = MemSource::new(MemNode::Struct(vec![("grid".to_owned(), Arc::new(grid))]));

	let tight = LoadOptions {
		max_elems: 64,
		..LoadOptions::default()
	};
	let err = load_tree(&source, &source.root(), &tight).unwrap_err();
	match err {
		TreeError::GridTooLarge { elems, max, .. } => {
			assert_eq!(elems, 10_000);
			assert_eq!(max, 64);
		}
		other => panic!("expected GridTooLarge, got {other:?}"),
	}
}

#[test]
fn unrecognized_elements_become_unsupported_with_index() {
	let source = MemSource::new(MemNode::Struct(vec![
		("known".to_owned(), Arc::new(MemNode::Text("t".to_owned()))),
		("mystery".to_owned(), Arc::new(MemNode::Alien)),
	]));

	let tree = load_tree(&source, &source.root(), &LoadOptions::default()).expect("load succeeds");
	let ValueNode::Struct(root) = tree else {
		panic!("root should be a struct");
	};
	assert_eq!(root.get("mystery"), Some(&ValueNode::Unsupported { index: 1 }));
}

#[test]
fn legacy_placeholder_reproduces_the_numeric_fallback() {
	let source = MemSource::new(MemNode::Struct(vec![
		("known".to_owned(), Arc::new(MemNode::Text("t".to_owned()))),
		("mystery".to_owned(), Arc::new(MemNode::Alien)),
	]));

	let legacy = LoadOptions {
		legacy_index_placeholder: true,
		..LoadOptions::default()
	};
	let tree = load_tree(&source, &source.root(), &legacy).expect("load succeeds");
	let ValueNode::Struct(root) = tree else {
		panic!("root should be a struct");
	};
	assert_eq!(root.get("mystery"), Some(&ValueNode::Scalar(Scalar::F64(1.0))));
}
