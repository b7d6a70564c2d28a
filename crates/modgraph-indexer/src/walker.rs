//! Depth-first, cycle-safe graph construction from one entry file
//!
//! All traversal state lives in a `BuildContext` owned by a single `walk`
//! call, so two builds never observe each other.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use modgraph_core::{DependencyGraph, FileId, FileNode, normalize_path, short_path};

use crate::error::IndexError;
use crate::languages::get_extractor;
use crate::parser::SourceParser;
use crate::resolver::{ModuleResolver, Resolution};
use crate::tsconfig::ResolutionConfig;

/// Output of one traversal.
#[derive(Debug)]
pub struct BuildResult {
    pub graph: DependencyGraph,
    /// Every non-fatal problem met on the way, in discovery order.
    pub diagnostics: Vec<IndexError>,
}

#[derive(Default)]
struct BuildContext {
    visited: HashSet<PathBuf>,
    graph: DependencyGraph,
    diagnostics: Vec<IndexError>,
}

impl BuildContext {
    fn report(&mut self, error: IndexError) {
        tracing::warn!("{}", error);
        self.diagnostics.push(error);
    }
}

pub struct GraphWalker<'a, R: ModuleResolver> {
    resolver: &'a R,
    config: &'a ResolutionConfig,
    parser: SourceParser,
    symbols: bool,
}

impl<'a, R: ModuleResolver> GraphWalker<'a, R> {
    pub fn new(resolver: &'a R, config: &'a ResolutionConfig) -> Self {
        Self {
            resolver,
            config,
            parser: SourceParser::new(),
            symbols: false,
        }
    }

    /// Also record each file's exported symbols, from the same parse that
    /// yields its imports.
    pub fn with_symbols(mut self, symbols: bool) -> Self {
        self.symbols = symbols;
        self
    }

    /// Visit `entry` and everything it transitively imports.
    ///
    /// A relative `entry` is taken relative to the working directory.
    pub fn walk(&mut self, entry: &Path) -> BuildResult {
        let cwd = std::env::current_dir().unwrap_or_else(|_| self.config.root.clone());
        let entry = normalize_path(entry, &cwd);
        tracing::debug!("Walking from {}", entry.display());

        let mut ctx = BuildContext::default();
        self.visit(&entry, &mut ctx);

        tracing::info!(
            "Graph built: {} files, {} imports, {} diagnostics",
            ctx.graph.file_count(),
            ctx.graph.edge_count(),
            ctx.diagnostics.len()
        );
        BuildResult {
            graph: ctx.graph,
            diagnostics: ctx.diagnostics,
        }
    }

    /// Returns the node for `path`, or None when the file could not be read.
    fn visit(&mut self, path: &Path, ctx: &mut BuildContext) -> Option<FileId> {
        if !ctx.visited.insert(path.to_path_buf()) {
            return ctx.graph.id_of(path);
        }

        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(source) => {
                ctx.report(IndexError::UnreadableFile {
                    path: path.to_path_buf(),
                    source,
                });
                return None;
            }
        };

        let node = FileNode::new(path.to_path_buf(), short_path(path, &self.config.root));
        let id = ctx.graph.add_file(node);

        let (file_type, tree) = match self.parser.parse(path, &source) {
            Ok(parsed) => parsed,
            Err(e) => {
                ctx.report(e);
                return Some(id);
            }
        };
        let extractor = get_extractor(file_type);

        // Best effort: a tree with syntax errors still holds the
        // declarations tree-sitter recovered
        if self.symbols {
            let symbols = extractor.exports(&tree, &source);
            if let Some(node) = ctx.graph.file_mut(id) {
                node.exported_symbols = symbols;
            }
        }

        if tree.root_node().has_error() {
            // Keep the file as a leaf
            ctx.report(IndexError::MalformedSource {
                path: path.to_path_buf(),
            });
            return Some(id);
        }
        let specifiers = extractor.imports(&tree, &source);

        for specifier in specifiers {
            let target = match self.resolver.resolve(&specifier, path) {
                Resolution::Resolved(target) => target,
                Resolution::Unresolved => {
                    ctx.report(IndexError::UnresolvedImport {
                        specifier,
                        from: path.to_path_buf(),
                    });
                    continue;
                }
            };

            if self.config.is_in_package_dir(&target) {
                tracing::debug!("Skipping package import {} from {}", specifier, path.display());
                continue;
            }

            if let Some(target_id) = self.visit(&target, ctx) {
                ctx.graph.add_import(id, target_id);
            }
        }

        Some(id)
    }
}
