use crate::error::{DocTextError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub job: JobConfig,
    pub output: OutputConfig,
}

/// What to extract and where from.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JobConfig {
    pub base_directory: PathBuf,
    pub output_subdirectory: String,
    pub input_filenames: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub text_extension: String,
    pub on_read_failure: FailurePolicy,
    pub write_report: bool,
}

/// How the job reacts when a document that exists cannot be read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure and keep processing the remaining files.
    #[default]
    Continue,
    /// Stop the whole run at the first failure.
    Abort,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from("."),
            output_subdirectory: "extracted".to_string(),
            input_filenames: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            text_extension: "txt".to_string(),
            on_read_failure: FailurePolicy::Continue,
            write_report: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DocTextError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| DocTextError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| DocTextError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["doctext.toml", "doctext.config.toml", ".doctext.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref files) = cli_args.input_filenames {
            if !files.is_empty() {
                self.job.input_filenames = files.clone();
            }
        }

        if let Some(ref base_dir) = cli_args.base_directory {
            self.job.base_directory = base_dir.clone();
        }

        if let Some(ref subdir) = cli_args.output_subdirectory {
            self.job.output_subdirectory = subdir.clone();
        }

        if let Some(ref extension) = cli_args.text_extension {
            self.output.text_extension = extension.trim_start_matches('.').to_string();
        }

        if cli_args.fail_fast {
            self.output.on_read_failure = FailurePolicy::Abort;
        }

        if cli_args.write_report {
            self.output.write_report = true;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| DocTextError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| DocTextError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.job.input_filenames.is_empty() {
            return Err(DocTextError::NoInputFiles);
        }

        if let Some(empty) = self.job.input_filenames.iter().position(|f| f.trim().is_empty()) {
            return Err(DocTextError::Config {
                message: format!("Input filename #{} is empty", empty + 1),
            });
        }

        // Output directory must stay a direct child of the base directory
        let subdir = Path::new(&self.job.output_subdirectory);
        let mut components = subdir.components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_normal {
            return Err(DocTextError::Config {
                message: format!(
                    "Output subdirectory must be a single directory name: '{}'",
                    self.job.output_subdirectory
                ),
            });
        }

        let ext = &self.output.text_extension;
        if ext.is_empty() || ext.contains('.') || ext.contains('/') || ext.contains('\\') {
            return Err(DocTextError::Config {
                message: format!("Invalid text extension: '{}'", ext),
            });
        }

        self.validate_output_names()
    }

    /// Outputs are named after the input's file stem, so two inputs with the
    /// same stem would write the same file.
    fn validate_output_names(&self) -> Result<()> {
        let mut seen = HashMap::new();

        for filename in &self.job.input_filenames {
            let stem = Path::new(filename)
                .file_stem()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| DocTextError::InvalidPath {
                    path: filename.clone(),
                })?;

            if let Some(previous) = seen.insert(stem, filename) {
                return Err(DocTextError::Config {
                    message: format!(
                        "Inputs '{}' and '{}' would both be written to {}.{}",
                        previous,
                        filename,
                        stem.to_string_lossy(),
                        self.output.text_extension
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let mut sample_config = Self::default();
        sample_config.job.input_filenames =
            vec!["report.docx".to_string(), "notes.docx".to_string()];
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub input_filenames: Option<Vec<String>>,
    pub base_directory: Option<PathBuf>,
    pub output_subdirectory: Option<String>,
    pub text_extension: Option<String>,
    pub fail_fast: bool,
    pub write_report: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_filenames(mut self, files: Option<Vec<String>>) -> Self {
        self.input_filenames = files;
        self
    }

    pub fn with_base_directory(mut self, base_dir: Option<PathBuf>) -> Self {
        self.base_directory = base_dir;
        self
    }

    pub fn with_output_subdirectory(mut self, subdir: Option<String>) -> Self {
        self.output_subdirectory = subdir;
        self
    }

    pub fn with_text_extension(mut self, extension: Option<String>) -> Self {
        self.text_extension = extension;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_write_report(mut self, write_report: bool) -> Self {
        self.write_report = write_report;
        self
    }
}
