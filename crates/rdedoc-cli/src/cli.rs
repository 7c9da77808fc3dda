//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// rdedoc - Dereference RDE metadata schemas and build their documentation
///
/// Loads a tree of JSON Schema fragments and YAML vocabularies, expands every
/// `$ref` into a self-contained document, and drives the markdown generator
/// and static site builder that publish it.
#[derive(Parser, Debug)]
#[command(
    name = "rdedoc",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "RDEDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the schemas and build the documentation site
    Build(BuildArgs),

    /// Load and resolve the schemas without building documentation
    Dereference(DereferenceArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Root of the metadata standard (contains `schema/` and `docs/`)
    #[arg(short, long, value_name = "DIR")]
    pub source_dir: PathBuf,

    /// Keep the temporary working directory after the build
    #[arg(long)]
    pub keep_temp: bool,

    /// Stop after post-processing the markdown
    #[arg(long)]
    pub skip_site: bool,
}

/// Arguments for the dereference command
#[derive(Parser, Debug)]
pub struct DereferenceArgs {
    /// Root of the metadata standard (contains `schema/`)
    #[arg(short, long, value_name = "DIR")]
    pub source_dir: PathBuf,

    /// Write titled documents here instead of printing them
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli {
            verbose: 2,
            quiet: false,
            config: None,
            output: OutputFormat::Human,
            no_color: false,
            command: Commands::Build(BuildArgs {
                source_dir: PathBuf::from("metadata-standard"),
                keep_temp: false,
                skip_site: false,
            }),
        };
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli {
            verbose: 2,
            quiet: true,
            ..cli
        };
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_build_args() {
        let cli = Cli::try_parse_from([
            "rdedoc",
            "-vv",
            "build",
            "--source-dir",
            "standard",
            "--keep-temp",
        ])
        .unwrap();

        assert_eq!(cli.verbosity_level(), 2);
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.source_dir, PathBuf::from("standard"));
                assert!(args.keep_temp);
                assert!(!args.skip_site);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_dereference_args() {
        let cli = Cli::try_parse_from([
            "rdedoc",
            "dereference",
            "-s",
            "standard",
            "--out-dir",
            "out",
            "-o",
            "json-pretty",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::JsonPretty);
        match cli.command {
            Commands::Dereference(args) => {
                assert_eq!(args.out_dir, Some(PathBuf::from("out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_source_dir_required() {
        assert!(Cli::try_parse_from(["rdedoc", "build"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["rdedoc", "-q", "-v", "build", "-s", "x"]).is_err());
    }

    #[test]
    fn test_completions_shell() {
        let cli = Cli::try_parse_from(["rdedoc", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions(CompletionsArgs {
                shell: clap_complete::Shell::Zsh
            })
        ));
    }
}
