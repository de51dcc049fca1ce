use anyhow::Context;
use clap::Parser;
use doctext::{
    Cli, DocText, DocTextError, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    let exit_code = run(&cli);
    process::exit(exit_code);
}

fn init_logging(cli: &Cli) {
    // Log lines go to stderr so stdout stays clean for --output-format json
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn run(cli: &Cli) -> i32 {
    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(cli);
    }

    let doctext = match DocText::from_cli(cli) {
        Ok(doctext) => doctext,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    if cli.dry_run {
        return handle_dry_run(&doctext);
    }

    match doctext.extract_text() {
        Ok(report) => {
            doctext.output_formatter().print_extraction_report(&report);

            if report.has_failures() {
                2 // Completed, but some documents could not be extracted
            } else {
                0
            }
        }
        Err(e) => {
            doctext.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &DocTextError) -> i32 {
    match error {
        DocTextError::Cancelled => 130, // Interrupted (SIGINT)
        DocTextError::UnreadableDocument { .. }
        | DocTextError::MissingDocumentPart { .. }
        | DocTextError::MalformedXml { .. } => 3,
        DocTextError::Io(_) => 4,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "doctext.toml".to_string());

    let result = DocText::generate_sample_config(&config_path)
        .with_context(|| format!("writing {}", config_path));

    match result {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  doctext --config {}", config_path);
            println!("\nEdit [job] input_filenames to list the documents to extract.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {:#}", e);
            if let Some(suggestion) = e
                .downcast_ref::<DocTextError>()
                .and_then(|inner| inner.suggestion())
            {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(doctext: &DocText) -> i32 {
    let formatter = doctext.output_formatter();
    let job = doctext.job();
    let config = doctext.config();

    formatter.print_header("DRY RUN - no files will be written");

    println!("  Base directory:   {}", config.job.base_directory.display());
    println!("  Output directory: {}", job.output_directory().display());
    println!("  On read failure:  {:?}", config.output.on_read_failure);
    formatter.print_separator();

    let mut invalid = false;
    for filename in job.input_filenames() {
        let input_path = job.input_path(filename);
        match job.output_path(filename) {
            Ok(output_path) if input_path.exists() => {
                println!("  {} -> {}", input_path.display(), output_path.display());
            }
            Ok(_) => println!("  File not found: {}", input_path.display()),
            Err(e) => {
                formatter.error(&e.user_message());
                invalid = true;
            }
        }
    }

    formatter.print_separator();
    if invalid {
        return 1;
    }
    formatter.success("Dry run completed successfully");
    0
}

fn print_startup_error(error: &DocTextError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
