//! Repository root detection.
//!
//! Walks upward from a starting directory until a directory satisfies the
//! "is this a repo root" predicate. The walk is a pure function of the
//! predicate so callers can test it against synthetic directory layouts.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Version-control marker that identifies a repository root.
pub const VCS_MARKER: &str = ".git";

/// Walk upward from `start` (inclusive) and return the first directory for
/// which `is_root` holds.
pub fn find_repo_root<F>(start: &Path, is_root: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    start
        .ancestors()
        .find(|dir| is_root(dir))
        .map(Path::to_path_buf)
}

/// Returns `true` if `dir` contains a `.git` directory or file (worktrees and
/// submodules use a `.git` file).
pub fn has_vcs_marker(dir: &Path) -> bool {
    dir.join(VCS_MARKER).symlink_metadata().is_ok()
}

/// Resolve the project root for `cwd`.
///
/// The working directory is canonicalized when possible, then walked upward
/// looking for a VCS marker. Without one, the working directory itself is the
/// project root.
pub fn resolve_project_root(cwd: &Path) -> PathBuf {
    let start = std::fs::canonicalize(cwd).unwrap_or_else(|_| cwd.to_path_buf());
    match find_repo_root(&start, has_vcs_marker) {
        Some(root) => {
            debug!(root = %root.display(), "Found repository root");
            root
        }
        None => {
            debug!(cwd = %start.display(), "No repository marker found, using working directory");
            start
        }
    }
}
