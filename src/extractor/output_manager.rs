use crate::error::{DocTextError, Result};
use crate::extractor::FileOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const REPORT_FILENAME: &str = "extraction_report.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub base_directory: PathBuf,
    pub output_directory: PathBuf,
    pub extraction_time: DateTime<Utc>,
    pub outcomes: Vec<FileOutcome>,
    pub summary: ExtractionSummary,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub extracted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_paragraphs: usize,
    pub total_bytes_written: u64,
    pub extraction_duration: Duration,
}

impl ExtractionSummary {
    pub fn from_outcomes(outcomes: &[FileOutcome], duration: Duration) -> Self {
        let mut summary = Self {
            extraction_duration: duration,
            ..Self::default()
        };

        for outcome in outcomes {
            match outcome {
                FileOutcome::Extracted {
                    paragraph_count,
                    bytes_written,
                    ..
                } => {
                    summary.extracted += 1;
                    summary.total_paragraphs += paragraph_count;
                    summary.total_bytes_written += bytes_written;
                }
                FileOutcome::Skipped { .. } => summary.skipped += 1,
                FileOutcome::Failed { .. } => summary.failed += 1,
            }
        }

        summary
    }
}

impl ExtractionReport {
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}

/// Owns the output directory: creation, artifact naming and writing.
pub struct OutputManager {
    output_directory: PathBuf,
    text_extension: String,
}

impl OutputManager {
    pub fn new<P: Into<PathBuf>>(output_directory: P) -> Self {
        Self {
            output_directory: output_directory.into(),
            text_extension: "txt".to_string(),
        }
    }

    pub fn with_text_extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.text_extension = extension.into();
        self
    }

    /// Create the output directory. Succeeds if it already exists.
    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.output_directory).map_err(DocTextError::Io)?;
        tracing::debug!(dir = %self.output_directory.display(), "output directory ready");
        Ok(())
    }

    pub fn get_output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// `<output dir>/<stem of filename>.<text extension>`
    pub fn output_path_for(&self, filename: &str) -> Result<PathBuf> {
        let stem = Path::new(filename)
            .file_stem()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DocTextError::InvalidPath {
                path: filename.to_string(),
            })?;

        let mut name = stem.to_os_string();
        name.push(".");
        name.push(&self.text_extension);
        Ok(self.output_directory.join(name))
    }

    /// Write each paragraph followed by a newline, replacing any existing file.
    pub fn write_paragraphs(&self, dest: &Path, paragraphs: &[String]) -> Result<u64> {
        let file = fs::File::create(dest).map_err(DocTextError::Io)?;
        let mut writer = BufWriter::new(file);
        let mut total_bytes = 0u64;

        for paragraph in paragraphs {
            writer.write_all(paragraph.as_bytes())?;
            writer.write_all(b"\n")?;
            total_bytes += paragraph.len() as u64 + 1;
        }

        writer.flush().map_err(DocTextError::Io)?;
        Ok(total_bytes)
    }

    pub fn create_extraction_report(
        &self,
        base_directory: &Path,
        outcomes: Vec<FileOutcome>,
        duration: Duration,
    ) -> ExtractionReport {
        let summary = ExtractionSummary::from_outcomes(&outcomes, duration);

        ExtractionReport {
            base_directory: base_directory.to_path_buf(),
            output_directory: self.output_directory.clone(),
            extraction_time: Utc::now(),
            outcomes,
            summary,
        }
    }

    pub fn save_report_json(&self, report: &ExtractionReport) -> Result<PathBuf> {
        let report_path = self.output_directory.join(REPORT_FILENAME);
        let json_content =
            serde_json::to_string_pretty(report).map_err(|e| DocTextError::Config {
                message: format!("Failed to serialize report to JSON: {}", e),
            })?;

        fs::write(&report_path, json_content).map_err(DocTextError::Io)?;
        Ok(report_path)
    }
}
