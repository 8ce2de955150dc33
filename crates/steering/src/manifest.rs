//! Per-run bookkeeping: what happened to each steering file.

use crate::compose;
use crate::scope::{CandidateFile, SteeringScope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Why a discovered file produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "detail", rename_all = "kebab-case")]
pub enum OmissionReason {
    /// The budget was spent before this file could be admitted.
    BudgetExhausted,
    /// The file is not valid UTF-8.
    NonUtf8,
    /// The file could not be read; carries the I/O error message.
    ReadError(String),
}

impl OmissionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            OmissionReason::BudgetExhausted => "budget-exhausted",
            OmissionReason::NonUtf8 => "non-utf8",
            OmissionReason::ReadError(_) => "read-error",
        }
    }
}

impl fmt::Display for OmissionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file whose content (whole or truncated) made it into the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmittedEntry {
    pub scope: SteeringScope,
    pub file_name: String,
    /// Content actually included.
    pub content: String,
    pub truncated: bool,
    /// Size of the file on disk.
    pub original_len: usize,
}

impl AdmittedEntry {
    /// Header line emitted above the content.
    pub fn header(&self) -> String {
        compose::header_line(self.scope, &self.file_name, self.truncated)
    }

    /// Bytes charged against the budget: header, newline, content.
    pub fn wrapped_len(&self) -> usize {
        self.header().len() + 1 + self.content.len()
    }
}

/// A file that produced no output, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmissionRecord {
    pub scope: SteeringScope,
    pub file_name: String,
    #[serde(flatten)]
    pub reason: OmissionReason,
}

/// Exactly one per candidate file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Admitted { bytes: usize, truncated: bool },
    Omitted {
        #[serde(flatten)]
        reason: OmissionReason,
    },
    SkippedEmpty,
}

impl FileStatus {
    /// Short human label used by listings.
    pub fn label(&self) -> String {
        match self {
            FileStatus::Admitted {
                truncated: false, ..
            } => "included".into(),
            FileStatus::Admitted {
                truncated: true, ..
            } => "included (truncated)".into(),
            FileStatus::Omitted { reason } => format!("omitted: {reason}"),
            FileStatus::SkippedEmpty => "skipped: empty".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    pub scope: SteeringScope,
    pub file_name: String,
    pub display_path: String,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn new(file: &CandidateFile, status: FileStatus) -> Self {
        Self {
            scope: file.scope,
            file_name: file.file_name.clone(),
            display_path: file.display_path.clone(),
            path: file.path.clone(),
            status,
        }
    }
}

/// Everything the allocator decided during one run, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Configured byte budget.
    pub budget: usize,
    /// Sum of wrapped lengths of all admitted entries.
    pub bytes_used: usize,
    pub entries: Vec<AdmittedEntry>,
    pub omissions: Vec<OmissionRecord>,
    /// One outcome per candidate, including silently skipped files.
    pub outcomes: Vec<FileOutcome>,
}

impl RunManifest {
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            ..Self::default()
        }
    }

    pub fn truncated_count(&self) -> usize {
        self.entries.iter().filter(|e| e.truncated).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == FileStatus::SkippedEmpty)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(truncated: bool, content: &str) -> AdmittedEntry {
        AdmittedEntry {
            scope: SteeringScope::Global,
            file_name: "a.md".into(),
            content: content.into(),
            truncated,
            original_len: 40,
        }
    }

    #[test]
    fn wrapped_len_counts_header_newline_and_content() {
        let e = entry(false, "hello");
        assert_eq!(e.header(), "[steering:global/a.md]");
        assert_eq!(e.wrapped_len(), e.header().len() + 1 + 5);
    }

    #[test]
    fn truncated_header_is_longer() {
        assert!(entry(true, "").wrapped_len() > entry(false, "").wrapped_len());
    }

    #[test]
    fn reason_tags() {
        assert_eq!(OmissionReason::BudgetExhausted.as_str(), "budget-exhausted");
        assert_eq!(OmissionReason::NonUtf8.to_string(), "non-utf8");
        assert_eq!(
            OmissionReason::ReadError("permission denied".into()).as_str(),
            "read-error"
        );
    }

    #[test]
    fn status_labels() {
        assert_eq!(
            FileStatus::Admitted {
                bytes: 3,
                truncated: true
            }
            .label(),
            "included (truncated)"
        );
        assert_eq!(
            FileStatus::Omitted {
                reason: OmissionReason::NonUtf8
            }
            .label(),
            "omitted: non-utf8"
        );
        assert_eq!(FileStatus::SkippedEmpty.label(), "skipped: empty");
    }

    #[test]
    fn omission_record_serializes_flat() {
        let record = OmissionRecord {
            scope: SteeringScope::Project,
            file_name: "b.md".into(),
            reason: OmissionReason::ReadError("gone".into()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["scope"], "project");
        assert_eq!(json["reason"], "read-error");
        assert_eq!(json["detail"], "gone");
    }

    #[test]
    fn outcome_status_serializes_flat() {
        let file = CandidateFile::new(SteeringScope::Global, PathBuf::from("/h/steering/a.md"));

        let admitted = FileOutcome::new(
            &file,
            FileStatus::Admitted {
                bytes: 9,
                truncated: false,
            },
        );
        let json = serde_json::to_value(&admitted).unwrap();
        assert_eq!(json["status"], "admitted");
        assert_eq!(json["bytes"], 9);
        assert_eq!(json["truncated"], false);
        assert_eq!(json["display_path"], "$RUDDER_HOME/steering/a.md");

        let omitted = FileOutcome::new(
            &file,
            FileStatus::Omitted {
                reason: OmissionReason::ReadError("denied".into()),
            },
        );
        let json = serde_json::to_value(&omitted).unwrap();
        assert_eq!(json["status"], "omitted");
        assert_eq!(json["reason"], "read-error");
        assert_eq!(json["detail"], "denied");

        let skipped = FileOutcome::new(&file, FileStatus::SkippedEmpty);
        assert_eq!(serde_json::to_value(&skipped).unwrap()["status"], "skipped_empty");
    }

    #[test]
    fn non_utf8_reason_serializes_with_tag() {
        let json = serde_json::to_value(OmissionReason::NonUtf8).unwrap();
        assert_eq!(json["reason"], "non-utf8");
    }
}
