//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod build;
mod completions;
mod dereference;
mod utils;

pub use build::handle_build;
pub use completions::handle_completions;
pub use dereference::handle_dereference;
