//! Render a run manifest into the text block injected into the prompt.
//!
//! ```text
//! [steering:global/00-style.md]
//! Prefer small commits.
//!
//! [steering:project/10-testing.md truncated]
//! Run the integration su
//!
//! [steering omitted: project/20-extra.md (budget-exhausted)]
//! ```

use crate::manifest::{OmissionRecord, RunManifest};
use crate::scope::SteeringScope;

/// Separates wrapped entries (and the omission note) in the composed document.
pub const ENTRY_SEPARATOR: &str = "\n\n";

/// Header line for one admitted entry.
pub fn header_line(scope: SteeringScope, file_name: &str, truncated: bool) -> String {
    if truncated {
        format!("[steering:{scope}/{file_name} truncated]")
    } else {
        format!("[steering:{scope}/{file_name}]")
    }
}

/// Compose admitted entries, in manifest order, followed by the omission note
/// when any file was omitted.
pub fn compose(manifest: &RunManifest) -> String {
    let mut parts: Vec<String> = manifest
        .entries
        .iter()
        .map(|entry| format!("{}\n{}", entry.header(), entry.content))
        .collect();

    if let Some(note) = omission_note(&manifest.omissions) {
        parts.push(note);
    }

    parts.join(ENTRY_SEPARATOR)
}

/// Single summary line naming each omitted file and its reason.
pub fn omission_note(omissions: &[OmissionRecord]) -> Option<String> {
    if omissions.is_empty() {
        return None;
    }
    let listed: Vec<String> = omissions
        .iter()
        .map(|o| format!("{}/{} ({})", o.scope, o.file_name, o.reason))
        .collect();
    Some(format!("[steering omitted: {}]", listed.join(", ")))
}
