use std::path::{Path, PathBuf};

use dirtrace_core::{
    Classification, Node, NodeKey, TreeBuilder, TreePrinter, WarningKind,
};

/// Classifier for test fixtures: anything with an extension is a file.
fn classify_by_extension(path: &Path) -> Classification {
    if path.extension().is_some() {
        Classification::File
    } else {
        Classification::Directory
    }
}

fn build_lines(base: &str, root_name: &str, paths: &[&str]) -> Vec<String> {
    let paths: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
    let outcome = TreeBuilder::new(base, root_name).build(paths, classify_by_extension);
    assert!(!outcome.has_warnings(), "unexpected warnings: {:?}", outcome.warnings);
    TreePrinter::new().render(&outcome.tree).unwrap()
}

#[test]
fn test_round_trip_example() {
    let paths = vec![
        PathBuf::from("/proj/a"),
        PathBuf::from("/proj/a/b.txt"),
        PathBuf::from("/proj/a/c"),
    ];
    let outcome = TreeBuilder::new("/proj", "proj").build(paths, classify_by_extension);
    let tree = outcome.tree;

    let root = tree.root().unwrap();
    assert_eq!(root.children, vec![NodeKey::from("a")]);

    let a = tree.get(&NodeKey::from("a")).unwrap();
    assert!(a.is_dir());
    // Directory before file, then case-insensitive name order.
    assert_eq!(a.children, vec![NodeKey::from("a/c"), NodeKey::from("a/b.txt")]);
}

#[test]
fn test_render_round_trip_example() {
    let lines = build_lines("/proj", "proj", &["/proj/a", "/proj/a/b.txt", "/proj/a/c"]);
    assert_eq!(lines, vec!["proj", "+-- a/", "|   +-- c/", "|   +-- b.txt"]);
}

#[test]
fn test_render_is_permutation_invariant() {
    let paths = [
        "/proj/src",
        "/proj/src/app",
        "/proj/src/app/router.tsx",
        "/proj/src/app/routes",
        "/proj/src/app/routes/not-found.tsx",
        "/proj/assets",
        "/proj/README.md",
    ];

    let reference = build_lines("/proj", "proj", &paths);

    // A handful of deterministic permutations, including fully reversed
    // (every child delivered before its parent).
    let mut reversed: Vec<&str> = paths.to_vec();
    reversed.reverse();
    let mut interleaved: Vec<&str> = Vec::new();
    for (i, p) in paths.iter().enumerate() {
        if i % 2 == 0 {
            interleaved.push(p);
        } else {
            interleaved.insert(0, p);
        }
    }

    for permutation in [reversed, interleaved] {
        assert_eq!(build_lines("/proj", "proj", &permutation), reference);
    }
}

#[test]
fn test_empty_input_renders_root_only() {
    let outcome = TreeBuilder::new("/proj", "proj").build(Vec::new(), classify_by_extension);
    assert!(outcome.tree.root().unwrap().children.is_empty());

    let lines = TreePrinter::new().render(&outcome.tree).unwrap();
    assert_eq!(lines, vec!["proj"]);
}

#[test]
fn test_missing_parent_is_reported_not_silent() {
    // "a/hidden" was filtered upstream, so its file has no parent to land on.
    let paths = vec![
        PathBuf::from("/proj/a"),
        PathBuf::from("/proj/a/hidden/file.txt"),
    ];
    let outcome = TreeBuilder::new("/proj", "proj").build(paths, classify_by_extension);

    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].kind, WarningKind::Orphaned);
    assert_eq!(outcome.warnings[0].path, PathBuf::from("/proj/a/hidden/file.txt"));

    // The surviving portion still builds and renders.
    let lines = TreePrinter::new().render(&outcome.tree).unwrap();
    assert_eq!(lines, vec!["proj", "+-- a/"]);
}

#[test]
fn test_duplicate_path_is_reported_once() {
    let paths = vec![
        PathBuf::from("/proj/a.txt"),
        PathBuf::from("/proj/a.txt"),
    ];
    let outcome = TreeBuilder::new("/proj", "proj").build(paths, classify_by_extension);

    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].kind, WarningKind::Duplicate);
    assert_eq!(outcome.tree.root().unwrap().child_count(), 1);
}

#[test]
fn test_unclassifiable_entry_skipped_with_warning() {
    let paths = vec![
        PathBuf::from("/proj/ok.txt"),
        PathBuf::from("/proj/weird"),
    ];
    let outcome = TreeBuilder::new("/proj", "proj").build(paths, |p| {
        if p.ends_with("weird") {
            Classification::Unknown
        } else {
            Classification::File
        }
    });

    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(outcome.warnings[0].kind, WarningKind::Unclassifiable);
    let lines = TreePrinter::new().render(&outcome.tree).unwrap();
    assert_eq!(lines, vec!["proj", "+-- ok.txt"]);
}

#[test]
fn test_deeply_nested_tree_renders_without_recursion() {
    // A chain far deeper than any comfortable call stack would allow if the
    // builder or printer recursed per level.
    let depth = 2_000;
    let mut paths = Vec::with_capacity(depth);
    let mut current = PathBuf::from("/proj");
    for i in 0..depth {
        current = current.join(format!("d{i}"));
        paths.push(current.clone());
    }
    paths.push(current.join("leaf.txt"));

    let outcome = TreeBuilder::new("/proj", "proj").build(paths, classify_by_extension);
    assert!(!outcome.has_warnings());

    let lines = TreePrinter::new().render(&outcome.tree).unwrap();
    assert_eq!(lines.len(), depth + 2);
    assert_eq!(lines[0], "proj");
    assert!(lines[depth + 1].ends_with("+-- leaf.txt"));
    assert!(lines[depth + 1].starts_with(&"|   ".repeat(depth)));
}

#[test]
fn test_manual_insertion_matches_builder() {
    // Hand-assembled tree equals the one the builder produces from paths.
    let mut manual = dirtrace_core::Tree::new("proj");
    manual
        .insert_child(
            &NodeKey::root(),
            Node::new_directory(NodeKey::from("a"), "a", Some(NodeKey::root())),
        )
        .unwrap();
    manual
        .insert_child(
            &NodeKey::from("a"),
            Node::new_file(NodeKey::from("a/b.txt"), "b.txt", NodeKey::from("a")),
        )
        .unwrap();

    let built = TreeBuilder::new("/proj", "proj")
        .build(
            vec![PathBuf::from("/proj/a"), PathBuf::from("/proj/a/b.txt")],
            classify_by_extension,
        )
        .tree;

    let printer = TreePrinter::new();
    assert_eq!(
        printer.render(&manual).unwrap(),
        printer.render(&built).unwrap()
    );
}
