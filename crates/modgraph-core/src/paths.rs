//! Path normalization and short-path display

use std::path::{Component, Path, PathBuf};

use path_clean::PathClean;

/// Make `path` absolute against `cwd` and canonicalize it.
///
/// Falls back to lexical cleaning when the path does not exist on disk.
pub fn normalize_path(path: &Path, cwd: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    std::fs::canonicalize(&absolute).unwrap_or_else(|_| absolute.clean())
}

/// Rewrite an absolute path relative to `root` for display, e.g. `./src/index.ts`.
///
/// Paths outside `root` keep their absolute form.
pub fn short_path(path: &Path, root: &Path) -> String {
    let Ok(relative) = path.strip_prefix(root) else {
        return to_slash(path);
    };
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        format!("./{}", parts.join("/"))
    }
}

/// Path segments of a short path without the leading `.` segment.
pub fn segments(short: &str) -> Vec<&str> {
    short
        .split('/')
        .enumerate()
        .filter(|&(idx, part)| !part.is_empty() && !(idx == 0 && part == "."))
        .map(|(_, part)| part)
        .collect()
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
