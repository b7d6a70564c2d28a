//! Test utilities for Modgraph

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::model::{FileNode, Symbol, SymbolKind};

/// Create a repository with a specific file structure
pub fn create_repo_with_structure(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for (path, content) in structure {
        let full_path = root.join(path);

        // Create parent directories if needed
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&full_path, content).unwrap();
    }

    temp_dir
}

/// Canonical root of a temporary repository, matching what the walker records.
pub fn canonical_root(dir: &TempDir) -> PathBuf {
    fs::canonicalize(dir.path()).unwrap()
}

/// A file node rooted at `/project` with the given short path.
pub fn file_node(short_path: &str) -> FileNode {
    let relative = short_path.trim_start_matches("./");
    FileNode::new(Path::new("/project").join(relative), short_path.to_string())
}

/// A symbol with a trivial signature.
pub fn symbol(name: &str, kind: SymbolKind) -> Symbol {
    let keyword = match kind {
        SymbolKind::Variable => "const",
        SymbolKind::Function => "function",
        SymbolKind::TypeLike => "type",
    };
    Symbol {
        name: name.to_string(),
        kind,
        rendered_signature: format!("export {keyword} {name}"),
        documentation: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_repo_with_structure() {
        let temp_dir = create_repo_with_structure(&[("src/a.ts", "export {}"), ("b.ts", "")]);
        let root = temp_dir.path();

        assert!(root.join("src/a.ts").exists());
        assert!(root.join("b.ts").exists());
    }

    #[test]
    fn test_file_node_paths() {
        let node = file_node("./src/a.ts");
        assert_eq!(node.path, PathBuf::from("/project/src/a.ts"));
        assert_eq!(node.short_path, "./src/a.ts");
    }
}
