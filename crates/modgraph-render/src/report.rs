//! Markdown listing of every exported symbol, grouped by file

use std::fmt::Write;

use modgraph_core::{DependencyGraph, FileNode, PathFilter};

/// One `##` section per visible file that exports something, in short-path
/// order, with a `###` heading, the doc comment and the body-elided
/// declaration for each symbol.
pub fn render_symbol_report(graph: &DependencyGraph, filter: &PathFilter) -> String {
    let mut files: Vec<&FileNode> = graph
        .files()
        .filter(|f| !f.exported_symbols.is_empty() && filter.is_visible(&f.short_path))
        .collect();
    files.sort_by(|a, b| a.short_path.cmp(&b.short_path));

    let mut output = String::new();
    for file in files {
        let _ = writeln!(output, "## {}\n", file.short_path);
        for symbol in &file.exported_symbols {
            let _ = writeln!(output, "### {}\n", symbol.name);
            if let Some(doc) = &symbol.documentation {
                let _ = writeln!(output, "{doc}\n");
            }
            let _ = writeln!(output, "```ts\n{}\n```\n", symbol.rendered_signature);
        }
    }
    output
}
