//! Steering file aggregation for Rudder.
//!
//! Steering files are durable, user-authored guidance documents that are
//! injected into the agent's instructions at startup. The pipeline is a single
//! synchronous pass:
//!
//! 1. **Resolve**: enumerate the global and project steering directories
//! 2. **Allocate**: read each file in order against a byte budget
//! 3. **Compose**: wrap admitted content with headers, note omissions
//! 4. **Merge**: place the result between the external instruction blocks
//!
//! Every per-file problem degrades to an omission; nothing here can fail the
//! run as a whole.

pub mod budget;
pub mod compose;
pub mod encoding;
pub mod manifest;
pub mod merge;
pub mod report;
pub mod scope;

pub use budget::{BudgetAllocator, FsReader, SourceBytes, SourceReader};
pub use compose::compose;
pub use manifest::{AdmittedEntry, FileOutcome, FileStatus, OmissionReason, OmissionRecord, RunManifest};
pub use merge::{merge, InstructionChain};
pub use scope::{resolve, CandidateFile, DirState, Discovery, ScopeRoots, SteeringScope};

use rudder_config::SteeringConfig;
use rudder_core::InstructionBlocks;
use serde::Serialize;
use tracing::debug;

/// Result of one steering run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SteeringOutcome {
    pub enabled: bool,
    pub max_bytes: usize,
    pub discovery: Discovery,
    /// `None` when steering is disabled (the allocator never ran).
    pub manifest: Option<RunManifest>,
    /// The composed document; empty when disabled or nothing was admitted.
    pub composed: String,
}

impl SteeringOutcome {
    /// Merge the composed document between the external instruction blocks.
    pub fn instruction_chain(&self, blocks: &InstructionBlocks) -> InstructionChain {
        merge(
            blocks.leading.as_str(),
            self.composed.as_str(),
            blocks.trailing.as_str(),
        )
    }
}

/// Run the pipeline against the real filesystem.
pub fn load_steering(config: &SteeringConfig, roots: &ScopeRoots) -> SteeringOutcome {
    load_steering_with(config, roots, FsReader)
}

/// Run the pipeline reading file contents through `reader`.
pub fn load_steering_with<R: SourceReader>(
    config: &SteeringConfig,
    roots: &ScopeRoots,
    reader: R,
) -> SteeringOutcome {
    let discovery = resolve(roots);

    if !config.enabled {
        debug!(discovered = discovery.files.len(), "Steering disabled, skipping allocation");
        return SteeringOutcome {
            enabled: false,
            max_bytes: config.max_bytes,
            discovery,
            manifest: None,
            composed: String::new(),
        };
    }

    let manifest = BudgetAllocator::with_reader(config.max_bytes, reader).allocate(&discovery.files);
    let composed = compose(&manifest);

    SteeringOutcome {
        enabled: true,
        max_bytes: config.max_bytes,
        discovery,
        manifest: Some(manifest),
        composed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup() -> (tempfile::TempDir, tempfile::TempDir, ScopeRoots) {
        let home = tempfile::tempdir().unwrap();
        let repo = tempfile::tempdir().unwrap();
        let roots = ScopeRoots::from_locations(home.path(), repo.path());
        fs::create_dir_all(&roots.global_dir).unwrap();
        fs::create_dir_all(&roots.project_dir).unwrap();
        (home, repo, roots)
    }

    #[test]
    fn project_files_follow_global_files() {
        let (_home, _repo, roots) = setup();
        fs::write(roots.global_dir.join("00.md"), "rule: global").unwrap();
        fs::write(roots.project_dir.join("00.md"), "rule: project").unwrap();

        let outcome = load_steering(&SteeringConfig::default(), &roots);
        let global_idx = outcome.composed.find("rule: global").unwrap();
        let project_idx = outcome.composed.find("rule: project").unwrap();
        assert!(global_idx < project_idx);
    }

    #[test]
    fn disabled_reads_nothing_and_composes_nothing() {
        let (_home, _repo, roots) = setup();
        fs::write(roots.project_dir.join("01.md"), "hello").unwrap();

        let config = SteeringConfig {
            enabled: false,
            ..SteeringConfig::default()
        };
        let outcome = load_steering(&config, &roots);
        assert!(!outcome.enabled);
        assert!(outcome.manifest.is_none());
        assert!(outcome.composed.is_empty());
        assert_eq!(outcome.discovery.files.len(), 1);

        let blocks = InstructionBlocks {
            leading: "LEAD".into(),
            trailing: "TRAIL".into(),
            loaded_files: vec![],
        };
        assert_eq!(outcome.instruction_chain(&blocks).text, "LEAD\n\nTRAIL");
    }

    #[test]
    fn enabled_chain_places_steering_between_blocks() {
        let (_home, _repo, roots) = setup();
        fs::write(roots.global_dir.join("style.md"), "Prefer small diffs.").unwrap();

        let outcome = load_steering(&SteeringConfig::default(), &roots);
        let blocks = InstructionBlocks {
            leading: "LEAD".into(),
            trailing: "TRAIL".into(),
            loaded_files: vec![],
        };
        assert_eq!(
            outcome.instruction_chain(&blocks).text,
            "LEAD\n\n[steering:global/style.md]\nPrefer small diffs.\n\nTRAIL"
        );
    }

    #[test]
    fn no_steering_directories_yields_empty_document() {
        let home = tempfile::tempdir().unwrap();
        let repo = tempfile::tempdir().unwrap();
        let roots = ScopeRoots::from_locations(home.path(), repo.path());

        let outcome = load_steering(&SteeringConfig::default(), &roots);
        assert!(outcome.enabled);
        assert_eq!(outcome.discovery.global_state, DirState::Missing);
        assert!(outcome.composed.is_empty());
        assert_eq!(outcome.manifest.unwrap().outcomes.len(), 0);
    }
}
