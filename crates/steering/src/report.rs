//! Plain-text and JSON renderings of a steering run for the CLI.

use crate::manifest::{FileStatus, OmissionReason};
use crate::scope::DirState;
use crate::SteeringOutcome;
use std::fmt::Write as _;
use std::path::Path;

/// One line per discovered file, in load order, with its status.
pub fn render_listing(outcome: &SteeringOutcome) -> String {
    let mut out = String::new();
    if outcome.discovery.files.is_empty() {
        out.push_str("No steering files found.\n");
        return out;
    }

    match &outcome.manifest {
        Some(manifest) => {
            for (i, o) in manifest.outcomes.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:>3}. {:<8} {:<40} {}",
                    i + 1,
                    o.scope,
                    o.display_path,
                    o.status.label()
                );
            }
        }
        None => {
            for (i, f) in outcome.discovery.files.iter().enumerate() {
                let _ = writeln!(out, "{:>3}. {:<8} {:<40} disabled", i + 1, f.scope, f.display_path);
            }
        }
    }
    out
}

/// Diagnostic explaining discovery decisions, the budget and every omission
/// or truncation.
pub fn render_explanation(outcome: &SteeringOutcome) -> String {
    let mut out = String::new();
    let d = &outcome.discovery;

    out.push_str("Steering directories:\n");
    let _ = writeln!(out, "  global:  {}", dir_line(&d.roots.global_dir, &d.global_state));
    let _ = writeln!(out, "  project: {}", dir_line(&d.roots.project_dir, &d.project_state));
    let _ = writeln!(out, "Enabled:    {}", if outcome.enabled { "yes" } else { "no" });
    let _ = writeln!(out, "Budget:     {} bytes", outcome.max_bytes);
    let _ = writeln!(out, "Discovered: {} file(s)", d.files.len());

    let Some(manifest) = &outcome.manifest else {
        out.push_str("\nSteering is disabled; no files were read.\n");
        return out;
    };

    let _ = writeln!(
        out,
        "Used:       {} of {} bytes ({} admitted, {} truncated, {} omitted, {} skipped)",
        manifest.bytes_used,
        manifest.budget,
        manifest.entries.len(),
        manifest.truncated_count(),
        manifest.omissions.len(),
        manifest.skipped_count()
    );

    if manifest.outcomes.is_empty() {
        return out;
    }

    out.push_str("\nDecisions:\n");
    for o in &manifest.outcomes {
        let detail = match &o.status {
            FileStatus::Admitted {
                bytes,
                truncated: false,
            } => format!("included whole ({bytes} bytes)"),
            FileStatus::Admitted {
                bytes,
                truncated: true,
            } => format!("included truncated ({bytes} bytes kept)"),
            FileStatus::Omitted { reason } => match reason {
                OmissionReason::BudgetExhausted => {
                    "omitted: budget exhausted before this file".to_string()
                }
                OmissionReason::NonUtf8 => "omitted: not valid UTF-8".to_string(),
                OmissionReason::ReadError(msg) => format!("omitted: read error ({msg})"),
            },
            FileStatus::SkippedEmpty => "skipped: empty or whitespace-only".to_string(),
        };
        let _ = writeln!(out, "  [{}] {}: {}", o.scope, o.display_path, detail);
    }
    out
}

/// JSON rendering of the whole outcome.
pub fn to_json(outcome: &SteeringOutcome) -> rudder_core::Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

fn dir_line(dir: &Path, state: &DirState) -> String {
    match state {
        DirState::Unreadable(msg) => format!("{} (unreadable: {msg})", dir.display()),
        other => format!("{} ({})", dir.display(), other.label()),
    }
}
