//! External instruction blocks that bracket steering content.
//!
//! The instruction chain handed to the agent is layered (later layers have
//! final override power):
//!
//! 1. **Leading block**: `~/.rudder/AGENTS.md` (user-wide instructions)
//! 2. **Steering content**: composed by `rudder-steering`
//! 3. **Trailing block**: `AGENTS.md` at the project root
//!
//! Each file is optional. Missing, unreadable or blank files yield an empty
//! block and are silently skipped.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Well-known instruction file name, used in both the home and project root.
pub const AGENTS_FILE: &str = "AGENTS.md";

/// Where the two instruction blocks are read from.
#[derive(Debug, Clone, Default)]
pub struct InstructionPaths {
    /// User-wide instructions (e.g., ~/.rudder/AGENTS.md). `None` disables the block.
    pub global_file: Option<PathBuf>,

    /// Project instructions (e.g., <repo_root>/AGENTS.md). `None` disables the block.
    pub project_file: Option<PathBuf>,
}

impl InstructionPaths {
    /// Standard locations under the rudder home and the project root.
    pub fn standard(home: &Path, repo_root: &Path) -> Self {
        Self {
            global_file: Some(home.join(AGENTS_FILE)),
            project_file: Some(repo_root.join(AGENTS_FILE)),
        }
    }
}

/// The leading and trailing blocks of the instruction chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionBlocks {
    /// Broadest-scope instructions, placed before steering content.
    pub leading: String,

    /// Most-specific instructions, placed after steering content.
    pub trailing: String,

    /// Which files contributed a block (for diagnostics)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loaded_files: Vec<String>,
}

impl InstructionBlocks {
    /// Load both blocks from the configured paths.
    pub fn load(paths: &InstructionPaths) -> Self {
        let mut loaded_files = Vec::new();

        let leading = paths
            .global_file
            .as_deref()
            .and_then(|path| Self::try_load_block(path, &mut loaded_files))
            .unwrap_or_default();

        let trailing = paths
            .project_file
            .as_deref()
            .and_then(|path| Self::try_load_block(path, &mut loaded_files))
            .unwrap_or_default();

        debug!(
            files_loaded = loaded_files.len(),
            leading_len = leading.len(),
            trailing_len = trailing.len(),
            "Instruction blocks loaded"
        );

        Self {
            leading,
            trailing,
            loaded_files,
        }
    }

    /// Try to load a single block, returning its trimmed content.
    fn try_load_block(path: &Path, loaded_files: &mut Vec<String>) -> Option<String> {
        let content = Self::read_file_safe(path)?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return None;
        }
        debug!(file = %path.display(), "Loaded instruction file");
        loaded_files.push(path.display().to_string());
        Some(trimmed.to_string())
    }

    /// Safely read a file, returning None on any error.
    fn read_file_safe(path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Failed to read instruction file");
                None
            }
        }
    }

    /// Whether neither block has content.
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }

    /// Get a diagnostic summary of loaded blocks.
    pub fn diagnostic_summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str(&format!("Leading block: {} bytes\n", self.leading.len()));
        summary.push_str(&format!("Trailing block: {} bytes\n", self.trailing.len()));
        summary.push_str(&format!("Files Loaded: {}\n", self.loaded_files.len()));
        for f in &self.loaded_files {
            summary.push_str(&format!("  - {f}\n"));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_with_no_paths_is_empty() {
        let blocks = InstructionBlocks::load(&InstructionPaths::default());
        assert!(blocks.is_empty());
        assert!(blocks.loaded_files.is_empty());
    }

    #[test]
    fn load_global_and_project() {
        let home = tempfile::tempdir().unwrap();
        let repo = tempfile::tempdir().unwrap();
        fs::write(home.path().join(AGENTS_FILE), "Be concise.\n").unwrap();
        fs::write(repo.path().join(AGENTS_FILE), "\nUse cargo nextest.\n\n").unwrap();

        let blocks = InstructionBlocks::load(&InstructionPaths::standard(home.path(), repo.path()));

        assert_eq!(blocks.leading, "Be concise.");
        assert_eq!(blocks.trailing, "Use cargo nextest.");
        assert_eq!(blocks.loaded_files.len(), 2);
        assert!(blocks.loaded_files[0].contains(&home.path().display().to_string()));
    }

    #[test]
    fn blank_file_yields_empty_block() {
        let home = tempfile::tempdir().unwrap();
        fs::write(home.path().join(AGENTS_FILE), "  \n\t\n").unwrap();

        let blocks = InstructionBlocks::load(&InstructionPaths {
            global_file: Some(home.path().join(AGENTS_FILE)),
            project_file: None,
        });
        assert!(blocks.leading.is_empty());
        assert!(blocks.loaded_files.is_empty());
    }

    #[test]
    fn missing_files_silently_skipped() {
        let blocks = InstructionBlocks::load(&InstructionPaths::standard(
            Path::new("/nonexistent/home"),
            Path::new("/nonexistent/repo"),
        ));
        assert!(blocks.is_empty());
    }

    #[test]
    fn diagnostic_summary_lists_files() {
        let repo = tempfile::tempdir().unwrap();
        fs::write(repo.path().join(AGENTS_FILE), "project rules").unwrap();

        let blocks = InstructionBlocks::load(&InstructionPaths {
            global_file: None,
            project_file: Some(repo.path().join(AGENTS_FILE)),
        });
        let summary = blocks.diagnostic_summary();
        assert!(summary.contains("Trailing block: 13 bytes"));
        assert!(summary.contains("Files Loaded: 1"));
    }
}
