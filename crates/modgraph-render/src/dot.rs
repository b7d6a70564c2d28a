//! Graphviz DOT rendering of the folder hierarchy and import edges.
//!
//! Files become record nodes, directories become nested `subgraph cluster_N`
//! blocks, and collapsed directories become a single record named after the
//! directory. Edges are printed last, after collapse rewriting and filtering.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use modgraph_core::{
    CollapseRules, DependencyGraph, Edge, FileNode, HierarchyNode, PathFilter, SymbolKind,
    aggregate_edges, build_hierarchy,
};

const HEADER: &str = "digraph g {
  graph[splines=polyline];
  node[shape=record];
  edge[color=\"#00000033\"];
";

/// Toggles controlling the shape of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Nest files in directory clusters. When off, every file is a top-level record.
    pub groups: bool,
    /// List exported symbols inside each record.
    pub symbols: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            groups: true,
            symbols: false,
        }
    }
}

pub struct DotRenderer<'a> {
    options: RenderOptions,
    rules: &'a CollapseRules,
    filter: &'a PathFilter,
}

impl<'a> DotRenderer<'a> {
    pub fn new(options: RenderOptions, rules: &'a CollapseRules, filter: &'a PathFilter) -> Self {
        Self {
            options,
            rules,
            filter,
        }
    }

    /// Render a whole graph according to the configured options.
    pub fn render(&self, graph: &DependencyGraph) -> String {
        let edges = graph.edges();
        if self.options.groups {
            let root = build_hierarchy(graph.files(), self.filter);
            self.render_hierarchy(&root, &edges)
        } else {
            self.render_flat(graph.files(), &edges)
        }
    }

    /// Render an already built hierarchy. The root itself is not a cluster.
    pub fn render_hierarchy(&self, root: &HierarchyNode<'_>, edges: &BTreeSet<Edge>) -> String {
        let mut session = RenderSession::new(self);
        session.group_contents(root, 1);
        session.finish(edges)
    }

    /// Render every visible file as a top-level record, sorted by short path.
    pub fn render_flat<'g, I>(&self, files: I, edges: &BTreeSet<Edge>) -> String
    where
        I: IntoIterator<Item = &'g FileNode>,
    {
        let mut visible: Vec<&FileNode> = files
            .into_iter()
            .filter(|f| self.filter.is_visible(&f.short_path))
            .collect();
        visible.sort_by(|a, b| a.short_path.cmp(&b.short_path));

        let mut session = RenderSession::new(self);
        let mut collapsed: BTreeMap<String, Vec<&FileNode>> = BTreeMap::new();
        for file in visible {
            let target = self.rules.rewrite(&file.short_path);
            if target == file.short_path {
                session.file_record(file, 1);
            } else {
                collapsed.entry(target).or_default().push(file);
            }
        }
        for (full_path, files) in &collapsed {
            session.collapsed_record(full_path, files, 1);
        }
        session.finish(edges)
    }
}

/// State for one render call. The cluster counter starts at zero every time.
struct RenderSession<'r, 'a> {
    renderer: &'r DotRenderer<'a>,
    output: String,
    next_cluster: usize,
}

impl<'r, 'a> RenderSession<'r, 'a> {
    fn new(renderer: &'r DotRenderer<'a>) -> Self {
        Self {
            renderer,
            output: String::from(HEADER),
            next_cluster: 0,
        }
    }

    fn group_contents(&mut self, group: &HierarchyNode<'_>, indent: usize) {
        for file in &group.children {
            self.file_record(file, indent);
        }
        for child in &group.child_groups {
            self.child_group(child, indent);
        }
    }

    fn child_group(&mut self, group: &HierarchyNode<'_>, indent: usize) {
        let mut group = group;
        loop {
            if self.renderer.rules.collapses(&group.full_path) {
                let files = group.descendants();
                self.collapsed_record(&group.full_path, &files, indent);
                return;
            }
            // A cluster wrapping only another cluster is skipped
            if !group.is_degenerate() {
                break;
            }
            match group.child_groups.first() {
                Some(only) => group = only,
                None => break,
            }
        }

        let id = self.next_cluster;
        self.next_cluster += 1;

        write_indent(&mut self.output, indent);
        let _ = writeln!(self.output, "subgraph cluster_{id} {{");
        write_indent(&mut self.output, indent + 1);
        let _ = writeln!(self.output, "label=\"{}\"", escape_quoted(&group.full_path));
        self.group_contents(group, indent + 1);
        write_indent(&mut self.output, indent);
        self.output.push_str("}\n");
    }

    fn file_record(&mut self, file: &FileNode, indent: usize) {
        let mut label = escape_record(&file.short_path);
        if self.renderer.options.symbols {
            for kind in SymbolKind::ALL {
                let field: String = file
                    .symbols_of_kind(kind)
                    .map(|s| format!("{}\\l", escape_record(&s.name)))
                    .collect();
                if !field.is_empty() {
                    label.push('|');
                    label.push_str(&field);
                }
            }
        }
        self.record(&file.short_path, &label, indent);
    }

    /// One node standing for `files`, labelled with the group path and, when
    /// symbols are shown, each file followed by its `+ symbol` lines.
    fn collapsed_record(&mut self, full_path: &str, files: &[&FileNode], indent: usize) {
        let mut label = escape_record(full_path);
        if self.renderer.options.symbols {
            let lines: Vec<String> = files
                .iter()
                .map(|file| {
                    let mut line = escape_record(&file.short_path);
                    for kind in SymbolKind::ALL {
                        for symbol in file.symbols_of_kind(kind) {
                            line.push_str("\\l+ ");
                            line.push_str(&escape_record(&symbol.name));
                        }
                    }
                    line
                })
                .collect();
            label = format!("{label}\\l|{}\\l", lines.join("\\l"));
        }
        self.record(full_path, &label, indent);
    }

    fn record(&mut self, id: &str, label: &str, indent: usize) {
        write_indent(&mut self.output, indent);
        let _ = writeln!(self.output, "\"{}\" [label=\"{{{}}}\"]", escape_quoted(id), label);
    }

    fn finish(mut self, edges: &BTreeSet<Edge>) -> String {
        let drawn = aggregate_edges(edges, self.renderer.rules, self.renderer.filter);
        tracing::debug!("Rendering {} of {} edges", drawn.len(), edges.len());

        self.output.push('\n');
        for edge in &drawn {
            write_indent(&mut self.output, 1);
            let _ = writeln!(
                self.output,
                "\"{}\" -> \"{}\"",
                escape_quoted(&edge.from),
                escape_quoted(&edge.to)
            );
        }
        self.output.push_str("}\n");
        self.output
    }
}

/// Escape a double-quoted DOT string.
fn escape_quoted(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape text placed inside a record label, where braces, `|` and angle
/// brackets are field syntax.
fn escape_record(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '{' | '}' | '|' | '<' | '>' => {
                out.push('\\');
                out.push(c);
            }
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}
