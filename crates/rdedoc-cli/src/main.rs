//! rdedoc CLI - Command-line interface for RDE schema documentation
//!
//! This is the main entry point for the rdedoc CLI application, providing
//! commands for dereferencing metadata schemas and building their
//! documentation site.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Initialize logging
    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the application
    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli), fields(command = ?cli.command))]
fn run(cli: Cli) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    // Load configuration
    let config = {
        let _config_timer = Timer::new("config_loading");
        tracing::info!("Loading configuration");
        Config::load_with_file(cli.config.as_deref())?
    };

    // Create output writer
    let mut output = OutputWriter::new(cli.output, cli.use_color(), cli.quiet, config.output.progress);

    tracing::info!(
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Build(args) => handlers::handle_build(args, &config, &mut output),
        Commands::Dereference(args) => handlers::handle_dereference(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    // Create logging configuration from CLI args and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    // Apply environment overrides
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    // Initialize the logging system
    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        // Test verbose flag
        let cli = Cli::parse_from(["rdedoc", "-vv", "build", "--source-dir", "standard"]);
        assert_eq!(cli.verbosity_level(), 2);

        // Test quiet flag
        let cli = Cli::parse_from(["rdedoc", "--quiet", "dereference", "--source-dir", "standard"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("rdedoc.yaml");
        std::fs::write(&config, "output:\n  progress: false\n").unwrap();
        let config = config.display().to_string();

        let cli = Cli::parse_from([
            "rdedoc", "--quiet", "--config", config.as_str(), "build", "--source-dir", "/nonexistent/standard",
        ]);
        assert_eq!(run(cli).unwrap_err().exit_code(), 2);

        let cli = Cli::parse_from([
            "rdedoc", "--quiet", "--config", "/nonexistent/rdedoc.yaml", "dereference", "-s", ".",
        ]);
        assert_eq!(run(cli).unwrap_err().exit_code(), 8);
    }
}
