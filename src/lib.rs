pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod reader;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, FailurePolicy, JobConfig, OutputConfig};
pub use error::{DocTextError, ErrorKind, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    ExtractionJob, ExtractionProgress, ExtractionReport, ExtractionSummary, FileOutcome,
    OutputManager,
};
pub use reader::{DocumentReader, DocxReader};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface for DocText functionality
pub struct DocText {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl DocText {
    /// Create a new DocText instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let shutdown = GracefulShutdown::new()?;
        Ok(Self::with_shutdown(config, output_mode, verbose, quiet, shutdown))
    }

    /// Create a DocText instance without registering a Ctrl+C handler
    pub fn new_without_signals(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Self {
        Self::with_shutdown(
            config,
            output_mode,
            verbose,
            quiet,
            GracefulShutdown::new_for_test(),
        )
    }

    fn with_shutdown(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
        shutdown: GracefulShutdown,
    ) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        // Progress bars would interleave with the per-file lines of the other modes
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        }
    }

    /// Create DocText instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet)
    }

    /// Build the extraction job described by the configuration
    pub fn job(&self) -> ExtractionJob {
        ExtractionJob::from_config(&self.config).with_shutdown(self.shutdown.clone())
    }

    /// Run the configured job with the .docx reader
    pub fn extract_text(&self) -> Result<ExtractionReport> {
        self.extract_text_with(&DocxReader::new())
    }

    /// Run the configured job with any document reader
    pub fn extract_text_with<R: DocumentReader>(&self, reader: &R) -> Result<ExtractionReport> {
        let job = self.job();
        self.output_formatter.info(&format!(
            "Extracting {} documents into {}",
            job.input_filenames().len(),
            job.output_directory().display()
        ));

        let file_progress = self
            .progress_manager
            .create_file_progress(job.input_filenames().len() as u64);
        // Outcomes are printed as each file finishes, before the next one starts
        let progress_callback = |progress: &ExtractionProgress| {
            ui::progress::update_file_progress(&file_progress, progress);
            if let Some(outcome) = &progress.last_outcome {
                file_progress.suspend(|| self.output_formatter.print_outcome(outcome));
            }
        };

        let result = job.run_with_progress(reader, Some(&progress_callback));

        match result {
            Ok(report) => {
                ui::progress::finish_progress_with_summary(
                    &file_progress,
                    &format!("Extracted {} documents", report.summary.extracted),
                    report.summary.extraction_duration,
                );
                Ok(report)
            }
            Err(e) => {
                file_progress.abandon();
                Err(e)
            }
        }
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(DocTextError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Check if shutdown has been requested
    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    /// Request graceful shutdown
    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &DocTextError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Convenience function to extract a list of documents with minimal setup
pub fn extract_docs_simple(
    base_directory: &Path,
    filenames: &[&str],
) -> Result<ExtractionReport> {
    let mut config = Config::default();
    config.job.base_directory = base_directory.to_path_buf();
    config.job.input_filenames = filenames.iter().map(|f| f.to_string()).collect();
    config.validate()?;

    ExtractionJob::from_config(&config).run(&DocxReader::new())
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_docx;
    use tempfile::TempDir;

    fn config_for(dir: &Path, files: &[&str]) -> Config {
        let mut config = Config::default();
        config.job.base_directory = dir.to_path_buf();
        config.job.input_filenames = files.iter().map(|f| f.to_string()).collect();
        config
    }

    #[test]
    fn test_doctext_extracts_configured_files() {
        let temp_dir = TempDir::new().unwrap();
        write_docx(&temp_dir.path().join("a.docx"), &["Hello", "", "World"]);

        let doctext = DocText::new_without_signals(
            config_for(temp_dir.path(), &["a.docx", "b.docx"]),
            OutputMode::Plain,
            0,
            true,
        );
        let report = doctext.extract_text().unwrap();

        assert_eq!(report.summary.extracted, 1);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(
            std::fs::read_to_string(temp_dir.path().join("extracted/a.txt")).unwrap(),
            "Hello\n\nWorld\n"
        );
    }

    #[test]
    fn test_shutdown_handling() {
        let temp_dir = TempDir::new().unwrap();
        let doctext = DocText::new_without_signals(
            config_for(temp_dir.path(), &["a.docx"]),
            OutputMode::Plain,
            0,
            true,
        );

        assert!(doctext.is_running());
        doctext.request_shutdown();
        assert!(!doctext.is_running());
        assert!(matches!(doctext.extract_text(), Err(DocTextError::Cancelled)));
    }

    #[test]
    fn test_extract_docs_simple() {
        let temp_dir = TempDir::new().unwrap();
        write_docx(&temp_dir.path().join("memo.docx"), &["Line"]);

        let report = extract_docs_simple(temp_dir.path(), &["memo.docx"]).unwrap();
        assert!(report.outcomes[0].is_extracted());

        assert!(matches!(
            extract_docs_simple(temp_dir.path(), &[]),
            Err(DocTextError::NoInputFiles)
        ));
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        DocText::generate_sample_config(&config_path).unwrap();

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[job]"));
        assert!(content.contains("[output]"));
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
