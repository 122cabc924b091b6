use super::*;
use crate::filter::{EvaluationError, FileFilter, SizeRange};
use crate::name::FileName;
use crate::provider::{HierarchyProvider, LocalFileProvider, MemoryHierarchy, NodeId};
use crate::scheme::SchemeRegistry;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

struct Sample {
    tree: MemoryHierarchy,
    b: NodeId,
}

// root -> [a (file), b (folder) -> [c (file)]]
fn sample() -> Sample {
    let root = SchemeRegistry::global().parse_name("ram:///root").unwrap();
    let mut tree = MemoryHierarchy::new(root);
    let root = tree.root();
    tree.add_file(root, "a", 10).unwrap();
    let b = tree.add_folder(root, "b").unwrap();
    tree.add_file(b, "c", 20).unwrap();
    Sample { tree, b }
}

fn paths(names: &[FileName]) -> Vec<&str> {
    names.iter().map(|name| name.path()).collect()
}

#[test]
fn files_only_with_descent_visits_nested_files() {
    let Sample { tree, .. } = sample();
    let found = select(&tree, &tree.root(), &FileFilter::files_only(), &DescendPolicy::Always)
        .unwrap();
    assert_eq!(paths(&found), vec!["/root/a", "/root/b/c"]);
}

#[test]
fn never_descend_stops_below_the_root() {
    let Sample { tree, .. } = sample();
    let found = select(&tree, &tree.root(), &FileFilter::files_only(), &DescendPolicy::Never)
        .unwrap();
    assert_eq!(paths(&found), vec!["/root/a"]);
    // root and nothing else was listed
    assert_eq!(tree.listings(), 1);
}

#[test]
fn listing_failure_fails_the_whole_traversal() {
    let Sample { mut tree, b } = sample();
    tree.fail_listing(b, "remote hung up");
    let err = select(&tree, &tree.root(), &FileFilter::files_only(), &DescendPolicy::Always)
        .expect_err("listing b fails");
    assert_eq!(err.code(), TraversalErrorCode::ListFailed);
    assert_eq!(err.name().map(FileName::path), Some("/root/b"));
    assert!(err.to_string().contains("remote hung up"));
}

#[test]
fn include_and_descend_are_independent() {
    let Sample { tree, .. } = sample();
    // folders included but never entered beyond the root
    let found = select(&tree, &tree.root(), &FileFilter::folders_only(), &DescendPolicy::Never)
        .unwrap();
    assert_eq!(paths(&found), vec!["/root", "/root/b"]);

    // nothing at the root matches by name but the walk still reaches c
    let found = select(&tree, &tree.root(), &FileFilter::wildcard("c"), &DescendPolicy::Always)
        .unwrap();
    assert_eq!(paths(&found), vec!["/root/b/c"]);
}

#[test]
fn depth_predicate_sees_distance_from_root() {
    let Sample { tree, .. } = sample();
    let found = select(&tree, &tree.root(), &FileFilter::depth(1, 1), &DescendPolicy::Always)
        .unwrap();
    assert_eq!(paths(&found), vec!["/root/a", "/root/b"]);

    let found = traverse(&tree, &tree.root(), &SELECT_SELF, TraversalOptions::default()).unwrap();
    assert_eq!(paths(&found), vec!["/root"]);
    let found = traverse(&tree, &tree.root(), &SELECT_CHILDREN, TraversalOptions::default())
        .unwrap();
    assert_eq!(paths(&found), vec!["/root/a", "/root/b"]);
    let found = traverse(&tree, &tree.root(), &EXCLUDE_SELF, TraversalOptions::default()).unwrap();
    assert_eq!(paths(&found), vec!["/root/a", "/root/b", "/root/b/c"]);
}

#[test]
fn max_depth_policy_limits_descent() {
    let Sample { tree, .. } = sample();
    let found = select(&tree, &tree.root(), &FileFilter::accept_all(), &DescendPolicy::MaxDepth(1))
        .unwrap();
    assert_eq!(paths(&found), vec!["/root", "/root/a", "/root/b"]);

    let found = select(
        &tree,
        &tree.root(),
        &FileFilter::accept_all(),
        &DescendPolicy::Filter(FileFilter::wildcard("ro*")),
    )
    .unwrap();
    assert_eq!(paths(&found), vec!["/root", "/root/a", "/root/b"]);
}

#[test]
fn post_order_lists_folders_after_descendants() {
    let Sample { tree, .. } = sample();
    let options = TraversalOptions {
        order: TraversalOrder::PostOrder,
        max_results: None,
    };
    let found = traverse(&tree, &tree.root(), &SELECT_ALL, options).unwrap();
    assert_eq!(paths(&found), vec!["/root/a", "/root/b/c", "/root/b", "/root"]);
}

#[test]
fn max_results_stops_early() {
    let Sample { tree, .. } = sample();
    let options = TraversalOptions {
        order: TraversalOrder::PreOrder,
        max_results: Some(2),
    };
    let found = traverse(&tree, &tree.root(), &SELECT_FILES, options).unwrap();
    assert_eq!(paths(&found), vec!["/root/a", "/root/b/c"]);

    let listed = tree.listings();
    let options = TraversalOptions {
        max_results: Some(1),
        ..options
    };
    let found = traverse(&tree, &tree.root(), &SELECT_ALL, options).unwrap();
    assert_eq!(paths(&found), vec!["/root"]);
    assert_eq!(tree.listings(), listed);
}

#[test]
fn attributes_are_queried_only_when_needed() {
    let Sample { tree, .. } = sample();
    select(&tree, &tree.root(), &FileFilter::files_only(), &DescendPolicy::Always).unwrap();
    assert_eq!(tree.attribute_queries(), 0);

    let filter = FileFilter::and(vec![
        FileFilter::files_only(),
        FileFilter::size(SizeRange::at_least(15)),
    ]);
    let found = select(&tree, &tree.root(), &filter, &DescendPolicy::Always).unwrap();
    assert_eq!(paths(&found), vec!["/root/b/c"]);
    assert_eq!(tree.attribute_queries(), 2);
}

#[test]
fn evaluation_failures_abort_with_the_failing_name() {
    let Sample { mut tree, b } = sample();
    tree.fail_attributes(b, "stat timed out");
    let err = select(&tree, &tree.root(), &FileFilter::hidden(false), &DescendPolicy::Always)
        .expect_err("attribute failure");
    assert_eq!(err.code(), TraversalErrorCode::EvaluationFailed);
    assert_eq!(err.name().map(FileName::path), Some("/root/b"));
}

#[test]
fn inverted_selector_keeps_descent() {
    let Sample { tree, .. } = sample();
    let selector = InvertIncludeSelector::new(SELECT_FOLDERS);
    let found = traverse(&tree, &tree.root(), &selector, TraversalOptions::default()).unwrap();
    assert_eq!(paths(&found), vec!["/root/a", "/root/b/c"]);
}

#[test]
fn custom_selector_errors_are_reported() {
    let Sample { tree, .. } = sample();
    let selector = FilterSelector::new(
        FileFilter::custom("flaky", |candidate| {
            if candidate.depth() > 1 {
                Err(EvaluationError::predicate_failed("too deep"))
            } else {
                Ok(true)
            }
        }),
        DescendPolicy::Always,
    );
    let err = traverse(&tree, &tree.root(), &selector, TraversalOptions::default())
        .expect_err("custom failure");
    assert_eq!(err.code(), TraversalErrorCode::EvaluationFailed);
}

#[test]
fn find_files_resolves_the_start_name() {
    let Sample { tree, .. } = sample();
    let start = SchemeRegistry::global().parse_name("ram:/root/b").unwrap();
    let found = find_files(&tree, &start, &SELECT_ALL, TraversalOptions::default()).unwrap();
    assert_eq!(paths(&found), vec!["/root/b", "/root/b/c"]);

    let missing = SchemeRegistry::global().parse_name("ram:/root/zzz").unwrap();
    let err = find_files(&tree, &missing, &SELECT_ALL, TraversalOptions::default())
        .expect_err("unknown name");
    assert_eq!(err.code(), TraversalErrorCode::ResolveFailed);
}

#[test]
fn boxed_selectors_can_be_mixed() {
    let Sample { tree, .. } = sample();
    let selectors: Vec<Box<dyn FileSelector>> = vec![
        Box::new(SELECT_SELF_AND_CHILDREN),
        Box::new(FilterSelector::new(FileFilter::files_only(), DescendPolicy::Always)),
    ];
    let counts: Vec<usize> = selectors
        .iter()
        .map(|selector| {
            traverse(&tree, &tree.root(), selector, TraversalOptions::default())
                .unwrap()
                .len()
        })
        .collect();
    assert_eq!(counts, vec![3, 2]);
}

fn uniq_path(label: &str) -> PathBuf {
    let ts = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::from_secs(0))
        .as_nanos();
    env::temp_dir().join(format!("vfs-select-walk-{label}-{ts}"))
}

#[test]
fn walks_the_local_disk() {
    let base = uniq_path("disk");
    fs::create_dir_all(base.join("src/nested")).unwrap();
    fs::write(base.join("src/lib.rs"), b"pub fn x() {}").unwrap();
    fs::write(base.join("src/nested/mod.rs"), b"").unwrap();
    fs::write(base.join("README.md"), b"# x").unwrap();

    let provider = LocalFileProvider::new();
    let root = provider.node_for_path(&base).unwrap();
    let found = select(&provider, &root, &FileFilter::wildcard("*.rs"), &DescendPolicy::Always)
        .unwrap();
    let names: Vec<&str> = found.iter().map(|name| name.base_name()).collect();
    assert_eq!(names, vec!["lib.rs", "mod.rs"]);

    let start = provider.name(&root);
    let found = find_files(
        &provider,
        &start,
        &FilterSelector::new(FileFilter::empty(true), DescendPolicy::Always),
        TraversalOptions::default(),
    )
    .unwrap();
    let names: Vec<&str> = found.iter().map(|name| name.base_name()).collect();
    assert_eq!(names, vec!["mod.rs"]);

    let _ = fs::remove_dir_all(&base);
}
