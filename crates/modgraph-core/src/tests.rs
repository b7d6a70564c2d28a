//! Unit tests for modgraph-core module

use crate::test_utils::{create_repo_with_structure, file_node};
use crate::*;
use std::path::{Path, PathBuf};

fn patterns(list: &[&str]) -> PatternSet {
    PatternSet::new(list).unwrap()
}

fn group<'h, 'g>(node: &'h HierarchyNode<'g>, name: &str) -> Option<&'h HierarchyNode<'g>> {
    node.child_groups.iter().find(|g| g.segment_name == name)
}

#[test]
fn test_graph_dedups_files_and_edges() {
    let mut graph = DependencyGraph::new();
    let a = graph.add_file(file_node("./a.ts"));
    let b = graph.add_file(file_node("./b.ts"));
    let again = graph.add_file(file_node("./a.ts"));

    assert_eq!(a, again);
    assert_eq!(graph.file_count(), 2);

    assert!(graph.add_import(a, b));
    assert!(!graph.add_import(a, b));
    assert_eq!(graph.edge_count(), 1);

    let edges: Vec<Edge> = graph.edges().into_iter().collect();
    assert_eq!(edges, vec![Edge::new("./a.ts", "./b.ts")]);
}

#[test]
fn test_graph_lookup_by_path() {
    let mut graph = DependencyGraph::new();
    let a = graph.add_file(file_node("./a.ts"));
    let b = graph.add_file(file_node("./lib/b.ts"));
    graph.add_import(a, b);

    assert_eq!(graph.id_of(Path::new("/project/a.ts")), Some(a));
    assert_eq!(graph.id_of(Path::new("/project/lib/c.ts")), None);
    assert_eq!(graph.file(b).map(|f| f.short_path.as_str()), Some("./lib/b.ts"));
    assert_eq!(
        graph.short_paths().into_iter().collect::<Vec<_>>(),
        vec!["./a.ts", "./lib/b.ts"]
    );
}

#[test]
fn test_file_node_symbol_mutation() {
    let mut graph = DependencyGraph::new();
    let id = graph.add_file(file_node("./a.ts"));

    if let Some(node) = graph.file_mut(id) {
        node.exported_symbols
            .push(crate::test_utils::symbol("run", SymbolKind::Function));
    }

    let node = graph.file(id).unwrap();
    assert_eq!(node.symbols_of_kind(SymbolKind::Function).count(), 1);
    assert_eq!(node.symbols_of_kind(SymbolKind::Variable).count(), 0);
}

#[test]
fn test_hierarchy_merges_same_directory() {
    let nodes = vec![file_node("./a/x.ts"), file_node("./a/y.ts")];
    let root = build_hierarchy(&nodes, &PathFilter::allow_all());

    assert_eq!(root.full_path, ".");
    assert!(root.children.is_empty());
    assert_eq!(root.child_groups.len(), 1);

    let a = &root.child_groups[0];
    assert_eq!(a.segment_name, "a");
    assert_eq!(a.full_path, "./a");
    let names: Vec<&str> = a.children.iter().map(|n| n.short_path.as_str()).collect();
    assert_eq!(names, vec!["./a/x.ts", "./a/y.ts"]);
}

#[test]
fn test_hierarchy_nests_and_attaches_top_level_files() {
    let nodes = vec![
        file_node("./src/utils/strings.ts"),
        file_node("./index.ts"),
        file_node("./src/main.ts"),
        file_node("./src/utils/numbers.ts"),
    ];
    let root = build_hierarchy(&nodes, &PathFilter::allow_all());

    let top: Vec<&str> = root.children.iter().map(|n| n.short_path.as_str()).collect();
    assert_eq!(top, vec!["./index.ts"]);

    let src = group(&root, "src").unwrap();
    assert_eq!(src.children.len(), 1);
    let utils = group(src, "utils").unwrap();
    assert_eq!(utils.full_path, "./src/utils");
    let files: Vec<&str> = utils.children.iter().map(|n| n.short_path.as_str()).collect();
    assert_eq!(files, vec!["./src/utils/numbers.ts", "./src/utils/strings.ts"]);

    assert_eq!(root.descendants().len(), 4);
    assert_eq!(src.descendants().len(), 3);
}

#[test]
fn test_hierarchy_omits_filtered_nodes() {
    let nodes = vec![file_node("./components/a.tsx"), file_node("./lib/b.ts")];
    let filter = PathFilter::new(patterns(&["components"]), PatternSet::default());
    let root = build_hierarchy(&nodes, &filter);

    assert!(group(&root, "lib").is_none());
    assert_eq!(group(&root, "components").unwrap().children.len(), 1);
}

#[test]
fn test_hierarchy_degenerate_detection() {
    let nodes = vec![file_node("./a/b/c.ts")];
    let root = build_hierarchy(&nodes, &PathFilter::allow_all());
    let a = group(&root, "a").unwrap();
    assert!(a.is_degenerate());
    assert!(!group(a, "b").unwrap().is_degenerate());
}

#[test]
fn test_aggregate_rewrites_into_collapsed_group() {
    let edges = vec![
        Edge::new("./app/main.ts", "./a/b/c.ts"),
        Edge::new("./a/b/d/e.ts", "./app/main.ts"),
    ];
    let rules = CollapseRules::new(patterns(&["^\\./a/b"]), PatternSet::default());
    let out = aggregate_edges(&edges, &rules, &PathFilter::allow_all());

    assert_eq!(
        out,
        vec![Edge::new("./a/b", "./app/main.ts"), Edge::new("./app/main.ts", "./a/b")]
    );
}

#[test]
fn test_aggregate_points_at_group_for_unanchored_pattern() {
    let edges = vec![Edge::new("./main.ts", "./a/b/x.ts"), Edge::new("./a/b/y.ts", "./main.ts")];
    let rules = CollapseRules::new(patterns(&["a/b"]), PatternSet::default());
    let out = aggregate_edges(&edges, &rules, &PathFilter::allow_all());

    assert_eq!(
        out,
        vec![Edge::new("./a/b", "./main.ts"), Edge::new("./main.ts", "./a/b")]
    );
}

#[test]
fn test_aggregate_swallows_nested_files_for_end_anchored_pattern() {
    let edges = vec![Edge::new("./main.ts", "./lib/http/x.ts")];
    let rules = CollapseRules::new(patterns(&["^\\./lib$"]), PatternSet::default());
    let out = aggregate_edges(&edges, &rules, &PathFilter::allow_all());

    assert_eq!(out, vec![Edge::new("./main.ts", "./lib")]);
}

#[test]
fn test_aggregate_keeps_sibling_prefix_groups_apart() {
    let edges = vec![Edge::new("./main.ts", "./ab/x.ts"), Edge::new("./main.ts", "./a/y.ts")];
    let rules = CollapseRules::new(patterns(&["^\\./a"]), PatternSet::default());
    let out = aggregate_edges(&edges, &rules, &PathFilter::allow_all());

    // `./ab` matches the pattern text as well, but it is a separate group
    assert_eq!(
        out,
        vec![Edge::new("./main.ts", "./a"), Edge::new("./main.ts", "./ab")]
    );
}

#[test]
fn test_aggregate_dedups_after_rewrite() {
    let edges = vec![
        Edge::new("./vendor/x/one.ts", "./shared.ts"),
        Edge::new("./vendor/x/two.ts", "./shared.ts"),
        Edge::new("./vendor/x/one.ts", "./vendor/x/two.ts"),
    ];
    let rules = CollapseRules::new(patterns(&["^\\./vendor/[a-z]+"]), PatternSet::default());
    let out = aggregate_edges(&edges, &rules, &PathFilter::allow_all());

    assert_eq!(out, vec![Edge::new("./vendor/x", "./shared.ts")]);
}

#[test]
fn test_aggregate_drops_self_edges() {
    let edges = vec![Edge::new("./a.ts", "./a.ts"), Edge::new("./a.ts", "./b.ts")];
    let out = aggregate_edges(&edges, &CollapseRules::none(), &PathFilter::allow_all());
    assert_eq!(out, vec![Edge::new("./a.ts", "./b.ts")]);
}

#[test]
fn test_aggregate_filters_hidden_endpoints_and_sorts() {
    let edges = vec![
        Edge::new("./z.ts", "./a.ts"),
        Edge::new("./a.ts", "./test/a.test.ts"),
        Edge::new("./a.ts", "./m.ts"),
    ];
    let filter = PathFilter::new(PatternSet::default(), patterns(&["\\.test\\."]));
    let out = aggregate_edges(&edges, &CollapseRules::none(), &filter);

    assert_eq!(out, vec![Edge::new("./a.ts", "./m.ts"), Edge::new("./z.ts", "./a.ts")]);
}

#[test]
fn test_language_detection() {
    let test_cases = vec![
        ("main.ts", Language::TypeScript),
        ("types.d.ts", Language::TypeScript),
        ("esm.mts", Language::TypeScript),
        ("App.tsx", Language::Tsx),
        ("app.js", Language::JavaScript),
        ("App.jsx", Language::JavaScript),
        ("config.cjs", Language::JavaScript),
        ("package.json", Language::Other),
    ];

    for (filename, expected) in test_cases {
        let path = PathBuf::from(filename);
        let detected = Language::from_path(&path);
        assert_eq!(detected, expected, "Failed for {}", filename);
    }
}

#[test]
fn test_file_node_serialization() {
    let mut node = file_node("./src/a.ts");
    node.exported_symbols
        .push(crate::test_utils::symbol("a", SymbolKind::Variable));

    let json = serde_json::to_string(&node).unwrap();
    let deserialized: FileNode = serde_json::from_str(&json).unwrap();

    assert_eq!(node, deserialized);
}

#[test]
fn test_detect_project_from_subdirectory() {
    let temp_dir = create_repo_with_structure(&[
        ("package.json", "{}"),
        ("tsconfig.json", "{}"),
        ("src/deep/file.ts", ""),
    ]);
    let start = temp_dir.path().join("src/deep");

    assert_eq!(detect_project(&start), Some(temp_dir.path().to_path_buf()));
}

#[test]
fn test_detect_project_finds_nearest() {
    let temp_dir = create_repo_with_structure(&[
        ("tsconfig.json", "{}"),
        ("packages/web/package.json", "{}"),
        ("packages/web/src/index.ts", ""),
    ]);
    let start = temp_dir.path().join("packages/web/src");

    assert_eq!(detect_project(&start), Some(temp_dir.path().join("packages/web")));
}
