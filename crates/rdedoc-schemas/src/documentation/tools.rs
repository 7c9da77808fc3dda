//! External tool invocations
//!
//! The markdown fragments and the HTML site are produced by third-party
//! programs. Each call is described as an [`Invocation`] and executed through
//! a [`CommandRunner`], so the build can be driven without those programs
//! installed.
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Default documentation fragment generator
pub const DEFAULT_GENERATOR_PROGRAM: &str = "generate-schema-doc";

/// Default static site builder
pub const DEFAULT_SITE_BUILDER_PROGRAM: &str = "mkdocs";

/// A program, its arguments and the directory to run it in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.display().to_string())
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How a finished tool exited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutcome {
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Executes tool invocations
pub trait CommandRunner {
    /// Run the invocation to completion.
    ///
    /// An `Err` means the program could not be started at all.
    fn run(&self, invocation: &Invocation) -> std::io::Result<ToolOutcome>;
}

/// Runs invocations as child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<ToolOutcome> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        let output = command.output()?;
        Ok(ToolOutcome {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run a tool, logging failures instead of propagating them.
///
/// Returns `true` when the tool started and exited successfully.
pub fn run_tool(runner: &dyn CommandRunner, invocation: &Invocation) -> bool {
    debug!(command = %invocation, "Running external tool");

    match runner.run(invocation) {
        Ok(outcome) if outcome.success => {
            if !outcome.stdout.is_empty() {
                debug!(program = %invocation.program, stdout = %outcome.stdout.trim_end());
            }
            true
        }
        Ok(outcome) => {
            warn!(
                command = %invocation,
                code = ?outcome.code,
                stderr = %outcome.stderr.trim_end(),
                "External tool exited unsuccessfully"
            );
            false
        }
        Err(e) => {
            warn!(command = %invocation, error = %e, "Failed to start external tool");
            false
        }
    }
}

/// Invocation rendering a persisted schema into markdown
pub fn generator_invocation(
    program: &str,
    template: &Path,
    schema: &Path,
    markdown: &Path,
) -> Invocation {
    Invocation::new(program)
        .arg("--config")
        .arg(format!("custom_template_path={}", template.display()))
        .arg("--config")
        .arg("show_toc=false")
        .arg("--config")
        .arg("show_breadcrumbs=false")
        .path_arg(schema)
        .path_arg(markdown)
}

/// Invocation building the HTML site inside `docs_dir`.
///
/// The configuration file is passed explicitly only when it does not sit in
/// `docs_dir`, where the builder looks for it by default.
pub fn site_builder_invocation(program: &str, docs_dir: &Path, site_config: &Path) -> Invocation {
    let mut invocation = Invocation::new(program).arg("build").arg("--verbose");
    if site_config.parent() != Some(docs_dir) {
        invocation = invocation.arg("-f").path_arg(site_config);
    }
    invocation.current_dir(docs_dir)
}
