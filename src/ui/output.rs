use crate::error::{DocTextError, UserFriendlyError};
use crate::extractor::{ExtractionReport, FileOutcome};
use crate::ui::progress::format_duration;
use console::{style, Emoji, Term};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

/// The console line for one outcome, without decoration.
pub fn outcome_line(outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Skipped { path, .. } => format!("File not found: {}", path.display()),
        FileOutcome::Extracted { filename, .. } => format!("Extracted: {}", filename),
        FileOutcome::Failed {
            filename, message, ..
        } => format!("Failed: {} ({})", filename, message),
    }
}

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    // Core messaging methods
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("{}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &DocTextError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    /// One line per outcome, printed as each file finishes.
    pub fn print_outcome(&self, outcome: &FileOutcome) {
        if self.quiet && !outcome.is_failed() {
            return;
        }

        let line = outcome_line(outcome);
        match (self.mode, outcome) {
            (OutputMode::Json, _) => self.print_json_object(&serde_json::json!({
                "type": "outcome",
                "outcome": outcome
            })),
            (OutputMode::Plain, FileOutcome::Failed { .. }) => eprintln!("{}", line),
            (OutputMode::Plain, _) => println!("{}", line),
            (OutputMode::Human, FileOutcome::Extracted { .. }) => {
                self.print_human_message(MessageType::Success, &line)
            }
            (OutputMode::Human, FileOutcome::Skipped { .. }) => {
                self.print_human_message(MessageType::Warning, &line)
            }
            (OutputMode::Human, FileOutcome::Failed { .. }) => {
                self.print_human_message(MessageType::Error, &line)
            }
        }
    }

    /// Closing summary. Per-file lines have already gone out through `print_outcome`.
    pub fn print_extraction_report(&self, report: &ExtractionReport) {
        match self.mode {
            OutputMode::Human => {
                if !self.quiet {
                    self.print_human_summary(report);
                }
            }
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "report",
                "report": report
            })),
            OutputMode::Plain => {
                if self.should_show_message(1) {
                    self.print_plain_summary(report);
                }
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!();
                if self.use_colors {
                    println!("{} {}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
                println!();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => {
                println!("=== {} ===", title);
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("─".repeat(60)).dim());
                } else {
                    println!("{}", "-".repeat(60));
                }
            }
            OutputMode::Plain => {
                println!("{}", "-".repeat(60));
            }
            OutputMode::Json => {}
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (&CHECKMARK, style(message).green()),
                MessageType::Error => (&CROSS, style(message).red().bold()),
                MessageType::Warning => (&WARNING, style(message).yellow()),
                MessageType::Info => (&INFO, style(message).cyan()),
            };

            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, styled),
                _ => println!("{}{}", emoji, styled),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_summary(&self, report: &ExtractionReport) {
        let summary = &report.summary;
        println!();
        self.print_separator();

        let headline = if summary.failed == 0 {
            "Text extraction completed!"
        } else {
            "Text extraction completed with failures"
        };
        if self.use_colors {
            let styled = if summary.failed == 0 {
                style(headline).green().bold()
            } else {
                style(headline).yellow().bold()
            };
            println!("{}", styled);
        } else {
            println!("{}", headline);
        }

        println!();
        println!("  Extracted:       {}", self.highlight(summary.extracted));
        println!("  Not found:       {}", self.highlight(summary.skipped));
        if summary.failed > 0 {
            println!("  Failed:          {}", self.highlight(summary.failed));
        }
        println!("  Paragraphs:      {}", self.highlight(summary.total_paragraphs));
        println!(
            "  Output:          {}",
            report.output_directory.display()
        );
        println!(
            "  Time taken:      {}",
            self.highlight(format_duration(summary.extraction_duration))
        );

        self.print_separator();
    }

    fn print_plain_summary(&self, report: &ExtractionReport) {
        let summary = &report.summary;
        println!("COMPLETED: Text extraction");
        println!("Extracted: {} files", summary.extracted);
        println!("Not found: {} files", summary.skipped);
        println!("Failed: {} files", summary.failed);
        println!("Paragraphs: {}", summary.total_paragraphs);
        println!("Bytes written: {}", summary.total_bytes_written);
        println!("Duration: {:?}", summary.extraction_duration);
    }

    fn highlight<T: std::fmt::Display>(&self, value: T) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::path::PathBuf;

    #[test]
    fn test_formatter_creation() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 1, false);
        assert_eq!(formatter.mode(), OutputMode::Plain);
        assert_eq!(formatter.verbose_level, 1);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(!formatter.should_show_message(0));
    }

    #[test]
    fn test_outcome_lines() {
        let skipped = FileOutcome::Skipped {
            filename: "b.docx".to_string(),
            path: PathBuf::from("/tmp/test/b.docx"),
        };
        assert_eq!(outcome_line(&skipped), "File not found: /tmp/test/b.docx");

        let extracted = FileOutcome::Extracted {
            filename: "a.docx".to_string(),
            output_path: PathBuf::from("/tmp/test/extracted/a.txt"),
            paragraph_count: 3,
            bytes_written: 13,
        };
        assert_eq!(outcome_line(&extracted), "Extracted: a.docx");

        let failed = FileOutcome::Failed {
            filename: "c.docx".to_string(),
            path: PathBuf::from("/tmp/test/c.docx"),
            kind: ErrorKind::UnreadableDocument,
            message: "invalid Zip archive".to_string(),
        };
        assert_eq!(outcome_line(&failed), "Failed: c.docx (invalid Zip archive)");
    }

    #[test]
    fn test_should_show_message() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 1, false);
        assert!(formatter.should_show_message(0));
        assert!(formatter.should_show_message(1));
        assert!(!formatter.should_show_message(2));
    }
}
