//! Documentation build pipeline
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use crate::documentation::error::{BuildError, PublishError, PublishResult};
use crate::documentation::markdown::{LabelStyle, MarkdownPostProcessor, MarkdownReport, DEFAULT_DESCRIPTION_MARKER};
use crate::documentation::persist::{persist_cache, rewrite_without_nested_identifiers, DEFAULT_SCHEMA_STEM};
use crate::documentation::site::{copy_theme, DocsLayout, ResolvedLayout, SiteConfig};
use crate::documentation::tools::{
    generator_invocation, run_tool, site_builder_invocation, CommandRunner,
    DEFAULT_GENERATOR_PROGRAM, DEFAULT_SITE_BUILDER_PROGRAM,
};
use crate::loader::{LoaderConfig, SchemaLoader};
use crate::workspace::WorkDir;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Documentation generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub loader: LoaderConfig,
    pub layout: DocsLayout,
    /// File stem of persisted schemas; the markdown takes the persisted file's name
    pub schema_stem: String,
    pub description_marker: String,
    pub labels: LabelStyle,
    /// Date stamped into the description line; today when unset
    pub publication_date: Option<NaiveDate>,
    pub site: SiteConfig,
    /// Write `site` to the layout's config path before building
    pub write_site_config: bool,
    pub generator_program: String,
    pub site_builder_program: String,
    /// Stop after post-processing the markdown
    pub skip_site: bool,
    /// Leave the working directory behind
    pub keep_work_dir: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            loader: LoaderConfig::default(),
            layout: DocsLayout::default(),
            schema_stem: DEFAULT_SCHEMA_STEM.to_string(),
            description_marker: DEFAULT_DESCRIPTION_MARKER.to_string(),
            labels: LabelStyle::default(),
            publication_date: None,
            site: SiteConfig::default(),
            write_site_config: true,
            generator_program: DEFAULT_GENERATOR_PROGRAM.to_string(),
            site_builder_program: DEFAULT_SITE_BUILDER_PROGRAM.to_string(),
            skip_site: false,
            keep_work_dir: false,
        }
    }
}

/// Pipeline stages, reported as they start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Loading,
    Persisting,
    GeneratingMarkdown,
    PostProcessing,
    BuildingSite,
    CopyingTheme,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Loading => "Loading and resolving schemas",
            Self::Persisting => "Writing resolved schema",
            Self::GeneratingMarkdown => "Generating markdown",
            Self::PostProcessing => "Post-processing markdown",
            Self::BuildingSite => "Building site",
            Self::CopyingTheme => "Copying theme stylesheet",
        };
        f.write_str(label)
    }
}

/// What a build produced
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub schemas_loaded: usize,
    pub references_resolved: usize,
    pub persisted: PathBuf,
    pub identifiers_removed: usize,
    pub markdown: PathBuf,
    pub generator_succeeded: bool,
    pub markdown_report: Option<MarkdownReport>,
    pub site_built: Option<bool>,
    pub theme: Option<PathBuf>,
}

/// Runs the whole documentation build for one source tree
pub struct DocGenerator<'a> {
    config: GeneratorConfig,
    runner: &'a dyn CommandRunner,
}

impl<'a> DocGenerator<'a> {
    /// Create a generator with default configuration
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self::with_config(GeneratorConfig::default(), runner)
    }

    /// Create a generator with custom configuration
    pub fn with_config(config: GeneratorConfig, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run every stage
    pub fn build(&self, source_dir: &Path) -> Result<BuildReport, BuildError> {
        self.build_with_progress(source_dir, |_| {})
    }

    /// Run every stage, calling `progress` as each one starts
    pub fn build_with_progress<F>(&self, source_dir: &Path, mut progress: F) -> Result<BuildReport, BuildError>
    where
        F: FnMut(BuildStage),
    {
        if !source_dir.is_dir() {
            return Err(BuildError::SourceNotFound {
                path: source_dir.to_path_buf(),
            });
        }

        let layout = self.config.layout.resolve(source_dir);
        let mut work_dir = WorkDir::create(&layout.work_dir)?;
        work_dir.keep(self.config.keep_work_dir);

        progress(BuildStage::Loading);
        let loader = SchemaLoader::with_config(self.config.loader.clone());
        let mut cache = loader.load_cache(source_dir)?;
        let references_resolved = loader.dereference(&mut cache)?;

        progress(BuildStage::Persisting);
        let persisted = persist_cache(&cache, work_dir.path(), &self.config.schema_stem)?;
        let identifiers_removed = rewrite_without_nested_identifiers(&persisted)?;
        info!(file = %persisted.display(), "Resolved schema written");

        progress(BuildStage::GeneratingMarkdown);
        let markdown_stem = persisted
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config.schema_stem.clone());
        let markdown = layout.markdown_file(&markdown_stem);
        let generator_succeeded = self.generate_markdown(&layout, &persisted, &markdown)?;

        progress(BuildStage::PostProcessing);
        let markdown_report = self.post_process(&markdown)?;

        let mut report = BuildReport {
            schemas_loaded: cache.len(),
            references_resolved,
            persisted,
            identifiers_removed,
            markdown,
            generator_succeeded,
            markdown_report,
            site_built: None,
            theme: None,
        };

        if self.config.skip_site {
            info!("Skipping site build");
            return Ok(report);
        }

        progress(BuildStage::BuildingSite);
        report.site_built = Some(self.build_site(&layout)?);

        progress(BuildStage::CopyingTheme);
        copy_theme(&layout.theme_stylesheet, &layout.theme_target)?;
        report.theme = Some(layout.theme_target.clone());

        info!(docs = %layout.docs_dir.display(), "Documentation build finished");
        Ok(report)
    }

    /// Run the fragment generator on a persisted schema
    pub fn generate_markdown(
        &self,
        layout: &ResolvedLayout,
        persisted: &Path,
        markdown: &Path,
    ) -> PublishResult<bool> {
        if let Some(parent) = markdown.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PublishError::io_error(parent.to_path_buf(), e))?;
        }
        let invocation = generator_invocation(
            &self.config.generator_program,
            &layout.template,
            persisted,
            markdown,
        );
        Ok(run_tool(self.runner, &invocation))
    }

    /// Post-process generated markdown, if the generator produced any
    pub fn post_process(&self, markdown: &Path) -> PublishResult<Option<MarkdownReport>> {
        if !markdown.is_file() {
            warn!(file = %markdown.display(), "Generated markdown not found, skipping post-processing");
            return Ok(None);
        }

        let processor = match self.config.publication_date {
            Some(date) => MarkdownPostProcessor::new(date),
            None => MarkdownPostProcessor::today(),
        };
        let processor = processor
            .with_description_marker(self.config.description_marker.clone())
            .with_labels(self.config.labels.clone());

        processor.process_file(markdown).map(Some)
    }

    /// Write the site configuration (if enabled) and run the site builder
    pub fn build_site(&self, layout: &ResolvedLayout) -> PublishResult<bool> {
        if self.config.write_site_config {
            self.config
                .site
                .clone()
                .with_layout(&self.config.layout)
                .write(&layout.site_config)?;
        }
        let invocation = site_builder_invocation(
            &self.config.site_builder_program,
            &layout.docs_dir,
            &layout.site_config,
        );
        Ok(run_tool(self.runner, &invocation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documentation::tools::{Invocation, ToolOutcome};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    /// Records invocations and writes a canned markdown file for the generator
    #[derive(Default)]
    struct FakeTools {
        calls: RefCell<Vec<Invocation>>,
        markdown: Option<&'static str>,
    }

    impl CommandRunner for FakeTools {
        fn run(&self, invocation: &Invocation) -> std::io::Result<ToolOutcome> {
            self.calls.borrow_mut().push(invocation.clone());
            if invocation.program == DEFAULT_GENERATOR_PROGRAM {
                if let (Some(text), Some(target)) = (self.markdown, invocation.args.last()) {
                    fs::write(target, text)?;
                }
            }
            Ok(ToolOutcome {
                code: Some(0),
                success: true,
                ..Default::default()
            })
        }
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn source_tree() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "schema/study.json",
            r#"{
                "$schema": "https://json-schema.org/draft/2020-12/schema",
                "$id": "https://example.org/study?version=3",
                "title": "Study",
                "properties": {"study_doi": {"$ref": "https://example.org/yaml/doi"}}
            }"#,
        );
        write(
            dir.path(),
            "schema/yaml/doi.yaml",
            "$schema: https://json-schema.org/draft/2020-12/schema\n\
             $id: https://example.org/yaml/doi\n\
             type: string\n",
        );
        write(dir.path(), "docs/readthedocs_theme.css", "body {}");
        dir
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig {
            publication_date: NaiveDate::from_ymd_opt(2025, 1, 2),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_source_dir() {
        let tools = FakeTools::default();
        let err = DocGenerator::new(&tools)
            .build(Path::new("/nonexistent/rdedoc-source"))
            .unwrap_err();
        assert!(matches!(err, BuildError::SourceNotFound { .. }));
        assert!(tools.calls.borrow().is_empty());
    }

    #[test]
    fn test_full_build() {
        let dir = source_tree();
        let tools = FakeTools {
            markdown: Some("Metadata Schema for Curated ICPSR Studies\n| [study_doi] | (R) |\n"),
            ..Default::default()
        };

        let mut stages = Vec::new();
        let report = DocGenerator::with_config(config(), &tools)
            .build_with_progress(dir.path(), |stage| stages.push(stage))
            .unwrap();

        assert_eq!(
            stages,
            [
                BuildStage::Loading,
                BuildStage::Persisting,
                BuildStage::GeneratingMarkdown,
                BuildStage::PostProcessing,
                BuildStage::BuildingSite,
                BuildStage::CopyingTheme,
            ]
        );
        assert_eq!(report.schemas_loaded, 2);
        assert_eq!(report.references_resolved, 1);
        assert_eq!(report.identifiers_removed, 2);
        assert!(report.persisted.ends_with("temp/icpsr_study_schema_3.json"));
        assert_eq!(report.site_built, Some(true));

        let markdown = fs::read_to_string(dir.path().join("docs/markdown/icpsr_study_schema_3.md")).unwrap();
        assert_eq!(
            markdown,
            "Metadata Schema for Curated ICPSR Studies as of January 02, 2025.\n| [Study DOI] | (R) |\n"
        );

        assert!(report.markdown.ends_with("docs/markdown/icpsr_study_schema_3.md"));
        assert!(dir.path().join("docs/mkdocs.yaml").is_file());
        assert!(dir.path().join("docs/html/css/theme.css").is_file());
        assert!(!dir.path().join("temp").exists());

        let calls = tools.calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program, "generate-schema-doc");
        assert_eq!(calls[1].program, "mkdocs");
        assert_eq!(calls[1].current_dir.as_deref(), Some(dir.path().join("docs").as_path()));
    }

    #[test]
    fn test_skip_site_and_keep_temp() {
        let dir = source_tree();
        let tools = FakeTools::default();
        let config = GeneratorConfig {
            skip_site: true,
            keep_work_dir: true,
            ..config()
        };

        let report = DocGenerator::with_config(config, &tools).build(dir.path()).unwrap();

        assert_eq!(report.site_built, None);
        assert!(report.markdown_report.is_none());
        assert_eq!(tools.calls.borrow().len(), 1);

        let persisted = fs::read_to_string(&report.persisted).unwrap();
        assert!(!persisted.contains("https://example.org/yaml/doi"));
        assert!(!dir.path().join("docs/mkdocs.yaml").exists());
    }

    #[test]
    fn test_site_config_follows_layout() {
        let dir = source_tree();
        let tools = FakeTools::default();
        let mut config = config();
        config.layout.markdown_dir = PathBuf::from("pages");
        config.layout.html_dir = PathBuf::from("public");

        let report = DocGenerator::with_config(config, &tools).build(dir.path()).unwrap();
        assert!(report.markdown.starts_with(dir.path().join("docs/pages")));
        assert!(dir.path().join("docs/public/css/theme.css").is_file());

        let written = fs::read_to_string(dir.path().join("docs/mkdocs.yaml")).unwrap();
        let site: serde_yaml::Value = serde_yaml::from_str(&written).unwrap();
        assert_eq!(site["docs_dir"], "pages");
        assert_eq!(site["site_dir"], "public");
    }

    #[test]
    fn test_work_dir_removed_on_failure() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "schema/broken.json",
            r#"{"$schema": "s", "$id": "a", "properties": {"x": {"$ref": "missing"}}}"#,
        );
        let tools = FakeTools::default();

        let err = DocGenerator::with_config(config(), &tools).build(dir.path()).unwrap_err();
        assert!(matches!(err, BuildError::Loader(_)));
        assert!(!dir.path().join("temp").exists());
    }
}
