use crate::error::{DocTextError, ErrorKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of processing one input filename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The input did not exist; nothing was written.
    Skipped { filename: String, path: PathBuf },
    Extracted {
        filename: String,
        output_path: PathBuf,
        paragraph_count: usize,
        bytes_written: u64,
    },
    Failed {
        filename: String,
        path: PathBuf,
        kind: ErrorKind,
        message: String,
    },
}

impl FileOutcome {
    pub fn failed(filename: &str, path: PathBuf, error: &DocTextError) -> Self {
        FileOutcome::Failed {
            filename: filename.to_string(),
            path,
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            FileOutcome::Skipped { filename, .. }
            | FileOutcome::Extracted { filename, .. }
            | FileOutcome::Failed { filename, .. } => filename,
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, FileOutcome::Extracted { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}
