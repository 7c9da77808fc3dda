//! Post-processing of the generated schema markdown
//!
//! The documentation generator renders raw property names (`study_doi`) and
//! its own wording for a few fixed phrases. This pass rewrites that output
//! line by line: property labels become title-cased phrases with a few
//! words forced to fixed spellings, the schema description gets a
//! publication date, and the option tables get breathing room.
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use crate::documentation::error::{PublishError, PublishResult};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Default description line that receives the publication date
pub const DEFAULT_DESCRIPTION_MARKER: &str = "Metadata Schema for Curated ICPSR Studies";

/// Generator wording for closed objects
pub const ADDITIONAL_PROPERTIES_LINE: &str =
    r#"**Additional properties**: [[Not allowed]](# "Additional Properties not allowed.")"#;

/// Replacement wording for closed objects
pub const ADDITIONAL_PROPERTIES_REPLACEMENT: &str = "**Additional Properties**: Not Allowed";

const HEADING_ANCHOR_END: &str = "</a>";

static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_REGEX.get_or_init(|| Regex::new(r"[[:alpha:]]+").expect("word pattern is valid"))
}

/// Where a label appears, which selects the override table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelContext {
    /// Property rows in the summary tables
    Table,
    /// Property section headings
    Heading,
}

/// Whole-word spelling overrides applied after title-casing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub table: HashMap<String, String>,
    pub heading: HashMap<String, String>,
}

impl Default for LabelStyle {
    fn default() -> Self {
        let common = [("To", "to"), ("Of", "of"), ("Id", "ID"), ("Sda", "SDA")];

        let mut table: HashMap<String, String> = common
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut heading = table.clone();

        table.insert("Doi".to_string(), "DOI".to_string());
        heading.insert("Doi".to_string(), "Digital Object Identifier (DOI)".to_string());

        Self { table, heading }
    }
}

impl LabelStyle {
    /// Turn a raw property label into display text
    pub fn relabel(&self, raw: &str, context: LabelContext) -> String {
        let titled = title_case(&raw.replace('_', " "));
        let overrides = match context {
            LabelContext::Table => &self.table,
            LabelContext::Heading => &self.heading,
        };

        word_regex()
            .replace_all(&titled, |caps: &regex::Captures<'_>| {
                let word = &caps[0];
                overrides.get(word).cloned().unwrap_or_else(|| word.to_string())
            })
            .into_owned()
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_alphabetic = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(c);
            previous_alphabetic = false;
        }
    }

    result
}

/// Summary of one post-processing pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkdownReport {
    pub stamped: bool,
    pub table_rows: usize,
    pub headings: usize,
    pub option_tables: usize,
    pub additional_properties: usize,
}

/// Line-oriented rewriter for generated markdown
#[derive(Debug, Clone)]
pub struct MarkdownPostProcessor {
    description_marker: String,
    labels: LabelStyle,
    publication_date: NaiveDate,
}

impl MarkdownPostProcessor {
    /// Create a processor stamping the given publication date
    pub fn new(publication_date: NaiveDate) -> Self {
        Self {
            description_marker: DEFAULT_DESCRIPTION_MARKER.to_string(),
            labels: LabelStyle::default(),
            publication_date,
        }
    }

    /// Create a processor stamping today's local date
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn with_description_marker(mut self, marker: impl Into<String>) -> Self {
        self.description_marker = marker.into();
        self
    }

    pub fn with_labels(mut self, labels: LabelStyle) -> Self {
        self.labels = labels;
        self
    }

    /// Publication date as rendered in the description line
    pub fn formatted_date(&self) -> String {
        self.publication_date.format("%B %d, %Y").to_string()
    }

    /// Rewrite a markdown document
    pub fn process(&self, text: &str) -> (String, MarkdownReport) {
        let mut report = MarkdownReport::default();
        let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();

        if let Some(line) = lines
            .iter_mut()
            .find(|line| line.strip_suffix('\n').is_some_and(|l| l.ends_with(&self.description_marker)))
        {
            let body = line.trim_end_matches('\n');
            *line = format!("{} as of {}.\n", body, self.formatted_date());
            report.stamped = true;
        } else {
            warn!(marker = %self.description_marker, "Description line not found, publication date not added");
        }

        let mut output = String::with_capacity(text.len());
        for line in &lines {
            if line.contains("(O)") || line.contains("(R)") {
                output.push_str(&self.relabel_table_row(line));
                report.table_rows += 1;
            } else if line.contains(HEADING_ANCHOR_END) && line.contains('#') {
                output.push_str(&self.relabel_heading(line));
                report.headings += 1;
            } else if line.contains("*Option*") && line.contains("*Description*") {
                output.push('\n');
                output.push_str(line);
                report.option_tables += 1;
            } else if line.contains(ADDITIONAL_PROPERTIES_LINE) {
                output.push_str(ADDITIONAL_PROPERTIES_REPLACEMENT);
                output.push('\n');
                report.additional_properties += 1;
            } else {
                output.push_str(line);
            }
        }

        debug!(?report, "Markdown post-processed");
        (output, report)
    }

    /// Rewrite a markdown file in place
    pub fn process_file(&self, path: &Path) -> PublishResult<MarkdownReport> {
        let text =
            std::fs::read_to_string(path).map_err(|e| PublishError::io_error(path.to_path_buf(), e))?;
        let (processed, report) = self.process(&text);
        std::fs::write(path, processed).map_err(|e| PublishError::io_error(path.to_path_buf(), e))?;
        Ok(report)
    }

    /// Relabel the text before the first `]`
    fn relabel_table_row(&self, line: &str) -> String {
        match line.split_once(']') {
            Some((label, rest)) => {
                format!("{}]{}", self.labels.relabel(label, LabelContext::Table), rest)
            }
            None => self.labels.relabel(line, LabelContext::Table),
        }
    }

    /// Relabel the text following the first `</a>`
    fn relabel_heading(&self, line: &str) -> String {
        let mut parts: Vec<String> = line.split(HEADING_ANCHOR_END).map(str::to_string).collect();
        if let Some(title) = parts.get_mut(1) {
            *title = self.labels.relabel(title, LabelContext::Heading);
        }
        parts.join(HEADING_ANCHOR_END)
    }
}
