//! Scope enumeration and resolution.
//!
//! Steering files live in two fixed directories:
//!
//! - Global: `$RUDDER_HOME/steering/*.md`
//! - Project: `<repo_root>/.rudder/steering/*.md`
//!
//! Both are scanned non-recursively. Global files come first, then project
//! files, each sorted byte-lexicographically by filename, so later files
//! (and project files in particular) sit closer to the end of the prompt.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory under the rudder home holding global steering files.
pub const GLOBAL_STEERING_DIR: &str = "steering";

/// Directory under the project root holding project steering files.
pub const PROJECT_STEERING_DIR: &str = ".rudder/steering";

/// Only files with exactly this extension are steering files.
pub const STEERING_EXTENSION: &str = "md";

/// Origin of a steering file. Global sorts before project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringScope {
    Global,
    Project,
}

impl SteeringScope {
    pub fn as_str(self) -> &'static str {
        match self {
            SteeringScope::Global => "global",
            SteeringScope::Project => "project",
        }
    }
}

impl fmt::Display for SteeringScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A steering file discovered on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    pub scope: SteeringScope,
    /// Absolute path to the file on disk.
    pub path: PathBuf,
    /// Bare filename, used in injected headers.
    pub file_name: String,
    /// Location relative to the scope root, used in CLI output.
    pub display_path: String,
}

impl CandidateFile {
    pub fn new(scope: SteeringScope, path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let display_path = match scope {
            SteeringScope::Global => format!("$RUDDER_HOME/{GLOBAL_STEERING_DIR}/{file_name}"),
            SteeringScope::Project => format!("{PROJECT_STEERING_DIR}/{file_name}"),
        };
        Self {
            scope,
            path,
            file_name,
            display_path,
        }
    }
}

/// What the enumerator found when it looked at a scope directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum DirState {
    Missing,
    Present,
    Unreadable(String),
}

impl DirState {
    pub fn label(&self) -> &str {
        match self {
            DirState::Missing => "missing",
            DirState::Present => "present",
            DirState::Unreadable(_) => "unreadable",
        }
    }
}

/// Result of enumerating one scope directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeListing {
    pub state: DirState,
    pub files: Vec<CandidateFile>,
}

/// List the steering files directly inside `dir`, sorted by filename.
///
/// A missing directory is normal and yields an empty listing. Subdirectories,
/// symlinks and files without the `.md` extension are ignored.
pub fn list_candidates(dir: &Path, scope: SteeringScope) -> ScopeListing {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), %scope, "Steering directory not present");
            return ScopeListing {
                state: DirState::Missing,
                files: Vec::new(),
            };
        }
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Failed to read steering directory");
            return ScopeListing {
                state: DirState::Unreadable(e.to_string()),
                files: Vec::new(),
            };
        }
    };

    let mut found: Vec<(OsString, PathBuf)> = Vec::new();
    for entry in read_dir {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Failed to read steering directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != STEERING_EXTENSION) {
            continue;
        }
        // file_type() does not follow symlinks.
        match entry.file_type() {
            Ok(ft) if ft.is_file() => {}
            Ok(_) => continue,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Failed to stat steering file");
                continue;
            }
        }
        found.push((entry.file_name(), path));
    }

    // OsString ordering is byte-wise on Unix.
    found.sort_by(|a, b| a.0.cmp(&b.0));

    let files: Vec<CandidateFile> = found
        .into_iter()
        .map(|(_, path)| CandidateFile::new(scope, path))
        .collect();
    debug!(dir = %dir.display(), %scope, count = files.len(), "Enumerated steering files");

    ScopeListing {
        state: DirState::Present,
        files,
    }
}

/// The two scope directories for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeRoots {
    pub global_dir: PathBuf,
    pub project_dir: PathBuf,
}

impl ScopeRoots {
    /// Standard directories under the rudder home and the project root.
    pub fn from_locations(home: &Path, repo_root: &Path) -> Self {
        Self {
            global_dir: home.join(GLOBAL_STEERING_DIR),
            project_dir: repo_root.join(PROJECT_STEERING_DIR),
        }
    }
}

/// All candidates for a run, in load order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discovery {
    pub roots: ScopeRoots,
    pub global_state: DirState,
    pub project_state: DirState,
    /// Global files first, then project files.
    pub files: Vec<CandidateFile>,
}

/// Enumerate both scopes and concatenate them in precedence order.
pub fn resolve(roots: &ScopeRoots) -> Discovery {
    let global = list_candidates(&roots.global_dir, SteeringScope::Global);
    let project = list_candidates(&roots.project_dir, SteeringScope::Project);

    let mut files = Vec::with_capacity(global.files.len() + project.files.len());
    files.extend(global.files);
    files.extend(project.files);

    Discovery {
        roots: roots.clone(),
        global_state: global.state,
        project_state: project.state,
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(files: &[CandidateFile]) -> Vec<&str> {
        files.iter().map(|f| f.file_name.as_str()).collect()
    }

    #[test]
    fn missing_directory_is_empty_not_error() {
        let listing = list_candidates(Path::new("/nonexistent/steering"), SteeringScope::Global);
        assert_eq!(listing.state, DirState::Missing);
        assert!(listing.files.is_empty());
    }

    #[test]
    fn unreadable_directory_is_empty_not_error() {
        let tmp = tempfile::tempdir().unwrap();
        let not_a_dir = tmp.path().join("steering");
        fs::write(&not_a_dir, "a file where the directory should be").unwrap();

        let listing = list_candidates(&not_a_dir, SteeringScope::Global);
        assert!(matches!(listing.state, DirState::Unreadable(ref msg) if !msg.is_empty()));
        assert_eq!(listing.state.label(), "unreadable");
        assert!(listing.files.is_empty());
    }

    #[test]
    fn lists_only_md_files_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("b.md"), "b").unwrap();
        fs::write(dir.join("a.md"), "a").unwrap();
        fs::write(dir.join("B.md"), "upper").unwrap();
        fs::write(dir.join("notes.txt"), "skip").unwrap();
        fs::write(dir.join("README.MD"), "skip, wrong case").unwrap();
        fs::write(dir.join("md"), "skip, no extension").unwrap();

        let listing = list_candidates(dir, SteeringScope::Project);
        assert_eq!(listing.state, DirState::Present);
        // Byte order: uppercase sorts before lowercase.
        assert_eq!(names(&listing.files), vec!["B.md", "a.md", "b.md"]);
    }

    #[test]
    fn does_not_recurse() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("nested.md");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("inner.md"), "inner").unwrap();
        fs::write(tmp.path().join("top.md"), "top").unwrap();

        let listing = list_candidates(tmp.path(), SteeringScope::Global);
        assert_eq!(names(&listing.files), vec!["top.md"]);
    }

    #[cfg(unix)]
    #[test]
    fn ignores_symlinks() {
        let tmp = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("secret.md"), "secret").unwrap();
        std::os::unix::fs::symlink(outside.path().join("secret.md"), tmp.path().join("link.md"))
            .unwrap();
        fs::write(tmp.path().join("real.md"), "real").unwrap();

        let listing = list_candidates(tmp.path(), SteeringScope::Project);
        assert_eq!(names(&listing.files), vec!["real.md"]);
    }

    #[test]
    fn display_paths_per_scope() {
        let global = CandidateFile::new(SteeringScope::Global, PathBuf::from("/h/steering/a.md"));
        let project =
            CandidateFile::new(SteeringScope::Project, PathBuf::from("/r/.rudder/steering/b.md"));
        assert_eq!(global.display_path, "$RUDDER_HOME/steering/a.md");
        assert_eq!(project.display_path, ".rudder/steering/b.md");
        assert_eq!(project.file_name, "b.md");
    }

    #[test]
    fn resolve_orders_global_before_project() {
        let home = tempfile::tempdir().unwrap();
        let repo = tempfile::tempdir().unwrap();
        let roots = ScopeRoots::from_locations(home.path(), repo.path());
        fs::create_dir_all(&roots.global_dir).unwrap();
        fs::create_dir_all(&roots.project_dir).unwrap();

        fs::write(roots.global_dir.join("b.md"), "global b").unwrap();
        fs::write(roots.global_dir.join("a.md"), "global a").unwrap();
        fs::write(roots.project_dir.join("02.md"), "proj 02").unwrap();
        fs::write(roots.project_dir.join("01.md"), "proj 01").unwrap();

        let discovery = resolve(&roots);
        let display: Vec<&str> = discovery
            .files
            .iter()
            .map(|f| f.display_path.as_str())
            .collect();
        assert_eq!(
            display,
            vec![
                "$RUDDER_HOME/steering/a.md",
                "$RUDDER_HOME/steering/b.md",
                ".rudder/steering/01.md",
                ".rudder/steering/02.md",
            ]
        );
        assert_eq!(discovery.global_state, DirState::Present);
        assert_eq!(discovery.project_state, DirState::Present);
    }

    #[test]
    fn resolve_with_one_scope_missing() {
        let home = tempfile::tempdir().unwrap();
        let repo = tempfile::tempdir().unwrap();
        let roots = ScopeRoots::from_locations(home.path(), repo.path());
        fs::create_dir_all(&roots.project_dir).unwrap();
        fs::write(roots.project_dir.join("only.md"), "x").unwrap();

        let discovery = resolve(&roots);
        assert_eq!(discovery.global_state, DirState::Missing);
        assert_eq!(names(&discovery.files), vec!["only.md"]);
        assert_eq!(discovery.files[0].scope, SteeringScope::Project);
    }
}
