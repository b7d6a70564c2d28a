//! Project root detection

use std::path::{Path, PathBuf};

/// Manifests that mark a project directory, in lookup priority.
const PROJECT_MARKERS: [&str; 3] = ["tsconfig.json", "jsconfig.json", "package.json"];

/// Walk up from `start` to the nearest directory holding a project manifest.
pub fn detect_project(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| PROJECT_MARKERS.iter().any(|marker| dir.join(marker).is_file()))
        .map(Path::to_path_buf)
}
