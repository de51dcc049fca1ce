use crate::config::{Config, FailurePolicy};
use crate::error::Result;
use crate::extractor::{ExtractionReport, FileOutcome, OutputManager};
use crate::reader::DocumentReader;
use crate::ui::GracefulShutdown;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Snapshot handed to the progress callback when a file starts and when it finishes.
#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub current_file: Option<String>,
    /// Set only in the callback that follows a finished file.
    pub last_outcome: Option<FileOutcome>,
    pub start_time: Instant,
}

impl ExtractionProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            current_file: None,
            last_outcome: None,
            start_time: Instant::now(),
        }
    }

    pub fn start_file(&mut self, filename: &str) {
        self.current_file = Some(filename.to_string());
        self.last_outcome = None;
    }

    pub fn finish_file(&mut self, outcome: FileOutcome) {
        self.files_processed += 1;
        self.last_outcome = Some(outcome);
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// One extraction run over an ordered list of input filenames.
pub struct ExtractionJob {
    base_directory: PathBuf,
    input_filenames: Vec<String>,
    output: OutputManager,
    failure_policy: FailurePolicy,
    write_report: bool,
    shutdown: Option<GracefulShutdown>,
}

impl ExtractionJob {
    pub fn new<P: Into<PathBuf>>(base_directory: P, output_subdirectory: &str) -> Self {
        let base_directory = base_directory.into();
        let output = OutputManager::new(base_directory.join(output_subdirectory));

        Self {
            base_directory,
            input_filenames: Vec::new(),
            output,
            failure_policy: FailurePolicy::Continue,
            write_report: false,
            shutdown: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.job.base_directory, &config.job.output_subdirectory)
            .with_input_filenames(config.job.input_filenames.clone())
            .with_text_extension(&config.output.text_extension)
            .with_failure_policy(config.output.on_read_failure)
            .with_report(config.output.write_report)
    }

    pub fn with_input_filenames(mut self, filenames: Vec<String>) -> Self {
        self.input_filenames = filenames;
        self
    }

    pub fn with_text_extension(mut self, extension: &str) -> Self {
        self.output = self.output.with_text_extension(extension);
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_report(mut self, write_report: bool) -> Self {
        self.write_report = write_report;
        self
    }

    pub fn with_shutdown(mut self, shutdown: GracefulShutdown) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    pub fn input_filenames(&self) -> &[String] {
        &self.input_filenames
    }

    pub fn output_directory(&self) -> &Path {
        self.output.get_output_directory()
    }

    pub fn input_path(&self, filename: &str) -> PathBuf {
        self.base_directory.join(filename)
    }

    pub fn output_path(&self, filename: &str) -> Result<PathBuf> {
        self.output.output_path_for(filename)
    }

    pub fn run<R: DocumentReader>(&self, reader: &R) -> Result<ExtractionReport> {
        self.run_with_progress(reader, None)
    }

    pub fn run_with_progress<R: DocumentReader>(
        &self,
        reader: &R,
        progress_callback: Option<&dyn Fn(&ExtractionProgress)>,
    ) -> Result<ExtractionReport> {
        let mut progress = ExtractionProgress::new(self.input_filenames.len());
        let mut outcomes = Vec::with_capacity(self.input_filenames.len());

        self.output.initialize()?;

        for filename in &self.input_filenames {
            if let Some(ref shutdown) = self.shutdown {
                shutdown.check_shutdown()?;
            }

            progress.start_file(filename);
            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            let outcome = self.process_file(reader, filename)?;
            progress.finish_file(outcome.clone());
            outcomes.push(outcome);
            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        let report =
            self.output
                .create_extraction_report(&self.base_directory, outcomes, progress.elapsed());

        if self.write_report {
            let path = self.output.save_report_json(&report)?;
            tracing::info!(path = %path.display(), "wrote extraction report");
        }

        tracing::info!(
            extracted = report.summary.extracted,
            skipped = report.summary.skipped,
            failed = report.summary.failed,
            "extraction finished"
        );
        Ok(report)
    }

    fn process_file<R: DocumentReader>(&self, reader: &R, filename: &str) -> Result<FileOutcome> {
        let input_path = self.input_path(filename);

        if !input_path.exists() {
            tracing::warn!(path = %input_path.display(), "input file not found, skipping");
            return Ok(FileOutcome::Skipped {
                filename: filename.to_string(),
                path: input_path,
            });
        }

        match self.extract_one(reader, filename, &input_path) {
            Ok(outcome) => Ok(outcome),
            Err(e) => match self.failure_policy {
                FailurePolicy::Abort => Err(e),
                FailurePolicy::Continue => {
                    tracing::warn!(path = %input_path.display(), error = %e, "extraction failed");
                    Ok(FileOutcome::failed(filename, input_path, &e))
                }
            },
        }
    }

    fn extract_one<R: DocumentReader>(
        &self,
        reader: &R,
        filename: &str,
        input_path: &Path,
    ) -> Result<FileOutcome> {
        let paragraphs = reader.read_paragraphs(input_path)?;
        let output_path = self.output.output_path_for(filename)?;
        let bytes_written = self.output.write_paragraphs(&output_path, &paragraphs)?;

        tracing::debug!(
            input = %input_path.display(),
            output = %output_path.display(),
            paragraphs = paragraphs.len(),
            "extracted document"
        );

        Ok(FileOutcome::Extracted {
            filename: filename.to_string(),
            output_path,
            paragraph_count: paragraphs.len(),
            bytes_written,
        })
    }
}
