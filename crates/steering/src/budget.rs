//! Byte-budget allocation across steering files.
//!
//! Candidates are processed strictly in discovery order against a single
//! running `remaining` counter. Each file is admitted whole, admitted
//! truncated, or omitted; once the budget is spent no further files are read,
//! even ones small enough to fit on their own.

use crate::compose::header_line;
use crate::encoding;
use crate::manifest::{AdmittedEntry, FileOutcome, FileStatus, OmissionReason, OmissionRecord, RunManifest};
use crate::scope::CandidateFile;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Bytes read from a candidate, plus the file's full size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBytes {
    pub bytes: Vec<u8>,
    /// Size of the whole file, which may exceed `bytes.len()`.
    pub total_len: usize,
}

impl SourceBytes {
    /// Whole-file bytes.
    pub fn complete(bytes: Vec<u8>) -> Self {
        let total_len = bytes.len();
        Self { bytes, total_len }
    }

    /// True when the read stopped before the end of the file.
    pub fn is_partial(&self) -> bool {
        self.bytes.len() < self.total_len
    }
}

/// Reads at most `limit` bytes of a candidate. The filesystem implementation
/// is [`FsReader`].
pub trait SourceReader {
    fn read(&self, path: &Path, limit: usize) -> std::io::Result<SourceBytes>;
}

/// Reads files through a single `File::take` bounded by the limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read(&self, path: &Path, limit: usize) -> std::io::Result<SourceBytes> {
        let file = std::fs::File::open(path)?;
        let file_len = usize::try_from(file.metadata()?.len()).unwrap_or(usize::MAX);
        let mut bytes = Vec::with_capacity(file_len.min(limit));
        let _ = file
            .take(u64::try_from(limit).unwrap_or(u64::MAX))
            .read_to_end(&mut bytes)?;
        // The file may have grown since the metadata call.
        let total_len = file_len.max(bytes.len());
        Ok(SourceBytes { bytes, total_len })
    }
}

enum Decision {
    Admit(AdmittedEntry),
    Omit(OmissionReason),
    SkipEmpty,
}

/// Allocates one run's byte budget. Create a fresh allocator per run.
pub struct BudgetAllocator<R = FsReader> {
    budget: usize,
    reader: R,
}

impl BudgetAllocator<FsReader> {
    /// Allocator that reads from the real filesystem.
    pub fn new(budget: usize) -> Self {
        Self::with_reader(budget, FsReader)
    }
}

impl<R: SourceReader> BudgetAllocator<R> {
    pub fn with_reader(budget: usize, reader: R) -> Self {
        Self { budget, reader }
    }

    /// Walk `candidates` in order and decide each file's fate.
    pub fn allocate(&self, candidates: &[CandidateFile]) -> RunManifest {
        let mut manifest = RunManifest::new(self.budget);
        let mut remaining = self.budget;

        for file in candidates {
            let status = match self.decide(file, &mut remaining) {
                Decision::Admit(entry) => {
                    let status = FileStatus::Admitted {
                        bytes: entry.content.len(),
                        truncated: entry.truncated,
                    };
                    manifest.bytes_used += entry.wrapped_len();
                    manifest.entries.push(entry);
                    status
                }
                Decision::Omit(reason) => {
                    manifest.omissions.push(OmissionRecord {
                        scope: file.scope,
                        file_name: file.file_name.clone(),
                        reason: reason.clone(),
                    });
                    FileStatus::Omitted { reason }
                }
                Decision::SkipEmpty => FileStatus::SkippedEmpty,
            };
            debug!(
                file = %file.display_path,
                status = %status.label(),
                remaining,
                "Steering allocation decision"
            );
            manifest.outcomes.push(FileOutcome::new(file, status));
        }

        debug!(
            budget = self.budget,
            bytes_used = manifest.bytes_used,
            admitted = manifest.entries.len(),
            omitted = manifest.omissions.len(),
            truncated = manifest.truncated_count(),
            "Steering allocation complete"
        );
        manifest
    }

    fn decide(&self, file: &CandidateFile, remaining: &mut usize) -> Decision {
        if *remaining == 0 {
            return Decision::Omit(OmissionReason::BudgetExhausted);
        }

        // Nothing past `remaining` bytes can ever be admitted.
        let source = match self.reader.read(&file.path, *remaining) {
            Ok(source) => source,
            Err(e) => {
                warn!(file = %file.path.display(), error = %e, "Failed to read steering file");
                return Decision::Omit(OmissionReason::ReadError(e.to_string()));
            }
        };
        let original_len = source.total_len;
        let partial = source.is_partial();

        let text = match encoding::validate_prefix(source.bytes, partial) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %file.path.display(), error = %e, "Skipping non-UTF-8 steering file");
                return Decision::Omit(OmissionReason::NonUtf8);
            }
        };

        if !partial && encoding::is_blank(&text) {
            return Decision::SkipEmpty;
        }

        let whole_len = header_line(file.scope, &file.file_name, false).len() + 1 + text.len();
        if !partial && whole_len <= *remaining {
            *remaining -= whole_len;
            return Decision::Admit(AdmittedEntry {
                scope: file.scope,
                file_name: file.file_name.clone(),
                content: text,
                truncated: false,
                original_len,
            });
        }

        // Whatever happens next, this file ends the budget.
        let header_len = header_line(file.scope, &file.file_name, true).len() + 1;
        let room = remaining.checked_sub(header_len);
        *remaining = 0;

        match room {
            Some(room) => Decision::Admit(AdmittedEntry {
                scope: file.scope,
                file_name: file.file_name.clone(),
                content: encoding::safe_prefix(&text, room).to_string(),
                truncated: true,
                original_len,
            }),
            None => Decision::Omit(OmissionReason::BudgetExhausted),
        }
    }
}
