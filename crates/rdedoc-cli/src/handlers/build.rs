//! Build command handler

use crate::cli::BuildArgs;
use crate::config::Config;
use crate::error::Result;
use crate::handlers::utils::require_source_dir;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use rdedoc_schemas::documentation::CommandRunner;
use rdedoc_schemas::{DocGenerator, SystemRunner};
use tracing::info;

/// Handle the build command
pub fn handle_build(args: BuildArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    run_build(args, config, output, &SystemRunner)
}

fn run_build(
    args: BuildArgs,
    config: &Config,
    output: &mut OutputWriter,
    runner: &dyn CommandRunner,
) -> Result<()> {
    let source_dir = require_source_dir(&args.source_dir)?;
    output.info(&format!("Building documentation for {}", source_dir.display()))?;

    let mut generator_config = config.generator_config();
    generator_config.skip_site = args.skip_site;
    generator_config.keep_work_dir = args.keep_temp;
    let generator = DocGenerator::with_config(generator_config, runner);

    let timer = Timer::with_details("build", &source_dir.display().to_string());
    let spinner = output.spinner("Starting build");
    let result = timer.span().in_scope(|| {
        generator.build_with_progress(&source_dir, |stage| {
            info!(stage = %stage, "Build stage started");
            if let Some(pb) = &spinner {
                pb.set_message(stage.to_string());
            }
        })
    });
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    drop(timer);
    let report = result?;

    if !report.generator_succeeded {
        output.warning("Markdown generator did not complete; see the log for details")?;
    }
    if report.site_built == Some(false) {
        output.warning("Site builder did not complete; see the log for details")?;
    }

    output.success("✓ Documentation build finished")?;
    output.section("Build Summary")?;
    output.build_report(&report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::error::Error;
    use rdedoc_schemas::documentation::{Invocation, ToolOutcome};
    use std::cell::RefCell;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    #[derive(Default)]
    struct NoopRunner {
        programs: RefCell<Vec<String>>,
    }

    impl CommandRunner for NoopRunner {
        fn run(&self, invocation: &Invocation) -> std::io::Result<ToolOutcome> {
            self.programs.borrow_mut().push(invocation.program.clone());
            Ok(ToolOutcome {
                code: Some(1),
                success: false,
                ..Default::default()
            })
        }
    }

    fn args(source_dir: &Path) -> BuildArgs {
        BuildArgs {
            source_dir: source_dir.to_path_buf(),
            keep_temp: false,
            skip_site: true,
        }
    }

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(std::io::sink()))
    }

    #[test]
    fn test_missing_source_dir() {
        let runner = NoopRunner::default();
        let err = run_build(
            args(&PathBuf::from("/nonexistent/standard")),
            &Config::default(),
            &mut quiet_output(),
            &runner,
        )
        .unwrap_err();

        assert!(matches!(err, Error::SourceNotFound { .. }));
        assert!(runner.programs.borrow().is_empty());
    }

    #[test]
    fn test_build_with_failing_tools_still_succeeds() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("schema")).unwrap();
        fs::write(
            dir.path().join("schema/study.json"),
            r#"{"$schema": "s", "$id": "https://example.org/study", "title": "Study"}"#,
        )
        .unwrap();

        let runner = NoopRunner::default();
        run_build(args(dir.path()), &Config::default(), &mut quiet_output(), &runner).unwrap();

        assert_eq!(*runner.programs.borrow(), ["generate-schema-doc"]);
        assert!(!dir.path().join("temp").exists());
    }

    #[test]
    fn test_untitled_schema_fails_build() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("schema")).unwrap();
        fs::write(
            dir.path().join("schema/address.json"),
            r#"{"$schema": "s", "$id": "https://example.org/address"}"#,
        )
        .unwrap();

        let runner = NoopRunner::default();
        let err = run_build(args(dir.path()), &Config::default(), &mut quiet_output(), &runner)
            .unwrap_err();
        assert_eq!(err.exit_code(), 6);
    }
}
