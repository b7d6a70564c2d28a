//! Statement walking shared by the TypeScript and JavaScript grammars
//!
//! Both grammars agree on the shape of `import_statement` and
//! `export_statement`, so only the list of exportable declaration kinds
//! differs between the two extractors.

use modgraph_core::{Symbol, SymbolKind};
use tree_sitter::{Node, Tree};

/// Declaration node kinds that produce a symbol, paired with its kind.
pub type DeclarationKinds = &'static [(&'static str, SymbolKind)];

/// Module specifiers of every top-level import or re-export, in source order.
pub fn top_level_imports(tree: &Tree, source: &str) -> Vec<String> {
    let root = tree.root_node();
    let mut cursor = root.walk();
    root.named_children(&mut cursor)
        .filter_map(|stmt| statement_specifier(stmt, source))
        .collect()
}

fn statement_specifier(stmt: Node, source: &str) -> Option<String> {
    match stmt.kind() {
        "import_statement" => {
            let source_node = stmt
                .child_by_field_name("source")
                .or_else(|| require_clause_source(stmt))?;
            string_value(source_node, source)
        }
        "export_statement" => string_value(stmt.child_by_field_name("source")?, source),
        _ => None,
    }
}

/// `import x = require("y")`
fn require_clause_source(stmt: Node) -> Option<Node> {
    let clause = first_child_of_kind(stmt, "import_require_clause")?;
    clause
        .child_by_field_name("source")
        .or_else(|| first_child_of_kind(clause, "string"))
}

fn string_value(node: Node, source: &str) -> Option<String> {
    let value = text(node, source)?.trim_matches(|c| c == '"' || c == '\'' || c == '`');
    (!value.is_empty()).then(|| value.to_string())
}

/// Every symbol declared by a top-level `export` statement, in source order.
pub fn exported_symbols(tree: &Tree, source: &str, kinds: DeclarationKinds) -> Vec<Symbol> {
    let root = tree.root_node();
    let mut cursor = root.walk();
    let mut symbols = Vec::new();

    for stmt in root.named_children(&mut cursor) {
        if stmt.kind() != "export_statement" {
            continue;
        }
        let documentation = doc_comment(stmt, source);
        let first = symbols.len();
        collect_export(stmt, source, kinds, &mut symbols);
        for symbol in &mut symbols[first..] {
            symbol.documentation = documentation.clone();
        }
    }

    symbols
}

fn collect_export(stmt: Node, source: &str, kinds: DeclarationKinds, out: &mut Vec<Symbol>) {
    let is_default = has_token(stmt, "default");

    if let Some(decl) = stmt.child_by_field_name("declaration") {
        collect_declaration(stmt, decl, is_default, source, kinds, out);
    } else if is_default {
        if let Some(value) = stmt.child_by_field_name("value") {
            out.push(default_value(stmt, value, source));
        }
    }
}

fn collect_declaration(
    stmt: Node,
    decl: Node,
    is_default: bool,
    source: &str,
    kinds: DeclarationKinds,
    out: &mut Vec<Symbol>,
) {
    match decl.kind() {
        // `export declare ...` wraps the real declaration
        "ambient_declaration" => {
            if let Some(inner) = decl.named_child(0) {
                collect_declaration(stmt, inner, is_default, source, kinds, out);
            }
        }
        "lexical_declaration" | "variable_declaration" => {
            out.extend(variable_symbols(decl, source));
        }
        other => {
            let Some(kind) = kinds.iter().find(|(k, _)| *k == other).map(|(_, kind)| *kind) else {
                tracing::trace!("Skipping export of {}", other);
                return;
            };
            let name = decl
                .child_by_field_name("name")
                .and_then(|n| text(n, source))
                .or(is_default.then_some("default"));
            if let Some(name) = name {
                out.push(Symbol {
                    name: name.to_string(),
                    kind,
                    rendered_signature: render_declaration(stmt, decl, kind, source),
                    documentation: None,
                });
            }
        }
    }
}

/// One symbol per declarator: `export const a: T = 1, b = 2` yields `a` and `b`.
fn variable_symbols(decl: Node, source: &str) -> Vec<Symbol> {
    let keyword = decl.child(0).and_then(|k| text(k, source)).unwrap_or("const");
    let mut cursor = decl.walk();
    decl.named_children(&mut cursor)
        .filter(|d| d.kind() == "variable_declarator")
        .filter_map(|d| {
            let name_node = d.child_by_field_name("name")?;
            // Destructuring patterns have no single name
            if name_node.kind() != "identifier" {
                return None;
            }
            let name = text(name_node, source)?;
            let annotation = d
                .child_by_field_name("type")
                .and_then(|t| text(t, source))
                .map(collapse_whitespace)
                .unwrap_or_default();
            Some(Symbol {
                name: name.to_string(),
                kind: SymbolKind::Variable,
                rendered_signature: format!("export {keyword} {name}{annotation}"),
                documentation: None,
            })
        })
        .collect()
}

/// `export default <expression>`
fn default_value(stmt: Node, value: Node, source: &str) -> Symbol {
    let kind = match value.kind() {
        "function_expression" | "function" | "generator_function" | "arrow_function" => {
            SymbolKind::Function
        }
        "class" => SymbolKind::TypeLike,
        _ => SymbolKind::Variable,
    };
    let name = value
        .child_by_field_name("name")
        .and_then(|n| text(n, source))
        .unwrap_or("default");
    Symbol {
        name: name.to_string(),
        kind,
        rendered_signature: render_declaration(stmt, value, kind, source),
        documentation: None,
    }
}

/// The statement text with function bodies replaced by `;` and class-like
/// bodies by `{ ... }`.
fn render_declaration(stmt: Node, decl: Node, kind: SymbolKind, source: &str) -> String {
    let start = stmt.start_byte();
    match decl.child_by_field_name("body") {
        Some(body) => {
            let head = collapse_whitespace(source.get(start..body.start_byte()).unwrap_or_default());
            if kind == SymbolKind::Function {
                format!("{head};")
            } else {
                format!("{head} {{ ... }}")
            }
        }
        None => collapse_whitespace(source.get(start..stmt.end_byte()).unwrap_or_default()),
    }
}

/// Text of the `/** */` block directly above `stmt`, markers stripped.
fn doc_comment(stmt: Node, source: &str) -> Option<String> {
    let prev = stmt.prev_sibling()?;
    if prev.kind() != "comment" || prev.end_position().row + 1 < stmt.start_position().row {
        return None;
    }
    let body = text(prev, source)?.strip_prefix("/**")?.strip_suffix("*/")?;
    let lines: Vec<&str> = body
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').unwrap_or(line).trim()
        })
        .filter(|line| !line.is_empty())
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn text<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    node.utf8_text(source.as_bytes()).ok()
}

fn has_token(node: Node, kind: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == kind);
    found
}

fn first_child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}
