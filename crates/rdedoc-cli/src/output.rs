//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), with specialized
//! rendering for build reports and progress indicators per pipeline stage.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use rdedoc_schemas::loader::CacheStats;
use rdedoc_schemas::BuildReport;
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, trace};

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the summary of a documentation build
    fn format_build_report(&self, report: &BuildReport) -> Result<String>;

    /// Format cache statistics
    fn format_cache_stats(&self, stats: &CacheStats) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_build_report(&self, report: &BuildReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_build_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_cache_stats(&self, stats: &CacheStats) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_cache_stats_human(stats)),
            _ => self.format(stats),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress && !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");

        if self.format == OutputFormat::Human || !formatted.ends_with('\n') {
            self.writeln(&formatted)
        } else {
            self.write(&formatted)
        }
    }

    /// Write a build report with specialized formatting
    pub fn build_report(&mut self, report: &BuildReport) -> Result<()> {
        let formatted = self.format.format_build_report(report)?;
        if self.format == OutputFormat::Human && self.quiet {
            return Ok(());
        }
        self.writeln(formatted.trim_end())
    }

    /// Write cache statistics with specialized formatting
    pub fn cache_stats(&mut self, stats: &CacheStats) -> Result<()> {
        let formatted = self.format.format_cache_stats(stats)?;
        if self.format == OutputFormat::Human && self.quiet {
            return Ok(());
        }
        self.writeln(formatted.trim_end())
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Helper function to create a spinner style
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Format a build report for human reading
fn format_build_report_human(report: &BuildReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("  Schemas loaded:      {}\n", report.schemas_loaded));
    output.push_str(&format!("  References resolved: {}\n", report.references_resolved));
    output.push_str(&format!("  Resolved schema:     {}\n", report.persisted.display()));

    match &report.markdown_report {
        Some(markdown) => {
            output.push_str(&format!("  Markdown:            {}\n", report.markdown.display()));
            output.push_str(&format!(
                "    relabelled {} table rows and {} headings{}\n",
                markdown.table_rows,
                markdown.headings,
                if markdown.stamped { ", publication date added" } else { "" }
            ));
        }
        None => output.push_str("  Markdown:            not generated\n"),
    }

    let site = match report.site_built {
        Some(true) => "built",
        Some(false) => "builder failed",
        None => "skipped",
    };
    output.push_str(&format!("  Site:                {}\n", site));

    if let Some(theme) = &report.theme {
        output.push_str(&format!("  Theme:               {}\n", theme.display()));
    }

    output
}

/// Format cache statistics for human reading
fn format_cache_stats_human(stats: &CacheStats) -> String {
    format!(
        "  Fragments:    {}\n  Titled:       {}\n  Vocabularies: {}\n  From YAML:    {}\n",
        stats.total_entries, stats.titled, stats.vocabularies, stats.yaml_sources
    )
}
