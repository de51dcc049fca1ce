use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "doctext")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract paragraph text from Word documents into plain-text files")]
#[command(
    long_about = "DocText reads each listed .docx document from a base directory and writes \
                  its paragraphs, one per line, to a .txt file of the same name inside an \
                  output subdirectory. Missing documents are reported and skipped."
)]
#[command(after_help = "EXAMPLES:\n  \
    doctext report.docx minutes.docx\n  \
    doctext --base-dir ~/contracts a.docx b.docx --output-subdir text\n  \
    doctext --config doctext.toml --fail-fast\n  \
    doctext --generate-config --config doctext.toml")]
pub struct Cli {
    /// Document filenames, relative to the base directory
    pub files: Vec<String>,

    /// Directory containing the input documents
    #[arg(short, long, env = "DOCTEXT_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Output subdirectory name (created inside the base directory)
    #[arg(short, long)]
    pub output_subdir: Option<String>,

    /// Extension for the written text files
    #[arg(long, help = "Extension of output files (default: txt)")]
    pub extension: Option<String>,

    /// Stop at the first document that cannot be read
    #[arg(long, help = "Abort the run on the first unreadable document")]
    pub fail_fast: bool,

    /// Write extraction_report.json into the output directory
    #[arg(long)]
    pub write_report: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only failures are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show what would be extracted without writing anything")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let files = if self.files.is_empty() {
            None
        } else {
            Some(self.files.clone())
        };

        CliOverrides::new()
            .with_input_filenames(files)
            .with_base_directory(self.base_dir.clone())
            .with_output_subdirectory(self.output_subdir.clone())
            .with_text_extension(self.extension.clone())
            .with_fail_fast(self.fail_fast)
            .with_write_report(self.write_report)
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose > 0 && !self.quiet
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Default tracing filter for this verbosity; `RUST_LOG` takes precedence.
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity_level() {
            0 => "doctext=warn",
            1 => "doctext=info",
            _ => "doctext=debug",
        }
    }
}
