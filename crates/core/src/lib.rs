//! # Rudder Core
//!
//! Domain plumbing shared by the Rudder crates: the error type, repository
//! root detection, and the external instruction blocks that bracket steering
//! content in the final instruction chain.
//!
//! The steering pipeline itself lives in `rudder-steering`; this crate only
//! supplies what that pipeline treats as already-solved inputs.

pub mod error;
pub mod instructions;
pub mod repo;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use instructions::{InstructionBlocks, InstructionPaths};
pub use repo::{find_repo_root, has_vcs_marker, resolve_project_root};
