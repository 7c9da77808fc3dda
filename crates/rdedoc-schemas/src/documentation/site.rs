//! Documentation tree layout and static site configuration
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use crate::documentation::error::{PublishError, PublishResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the documentation inputs and outputs live.
///
/// `docs_dir` and `work_dir` are relative to the source root, everything
/// else is relative to `docs_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsLayout {
    pub docs_dir: PathBuf,
    pub work_dir: PathBuf,
    pub template: PathBuf,
    pub markdown_dir: PathBuf,
    pub html_dir: PathBuf,
    pub site_config: PathBuf,
    pub theme_stylesheet: PathBuf,
    /// Destination of the stylesheet, relative to `html_dir`
    pub theme_target: PathBuf,
}

impl Default for DocsLayout {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            work_dir: PathBuf::from("temp"),
            template: PathBuf::from("template").join("base.md"),
            markdown_dir: PathBuf::from("markdown"),
            html_dir: PathBuf::from("html"),
            site_config: PathBuf::from("mkdocs.yaml"),
            theme_stylesheet: PathBuf::from("readthedocs_theme.css"),
            theme_target: PathBuf::from("css").join("theme.css"),
        }
    }
}

impl DocsLayout {
    /// Layout anchored at a source root
    pub fn resolve(&self, source_dir: &Path) -> ResolvedLayout {
        let docs_dir = source_dir.join(&self.docs_dir);
        let html_dir = docs_dir.join(&self.html_dir);
        ResolvedLayout {
            work_dir: source_dir.join(&self.work_dir),
            template: docs_dir.join(&self.template),
            markdown_dir: docs_dir.join(&self.markdown_dir),
            site_config: docs_dir.join(&self.site_config),
            theme_stylesheet: docs_dir.join(&self.theme_stylesheet),
            theme_target: html_dir.join(&self.theme_target),
            html_dir,
            docs_dir,
        }
    }
}

/// Paths of one build, anchored at the source root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    pub docs_dir: PathBuf,
    pub work_dir: PathBuf,
    pub template: PathBuf,
    pub markdown_dir: PathBuf,
    pub html_dir: PathBuf,
    pub site_config: PathBuf,
    pub theme_stylesheet: PathBuf,
    pub theme_target: PathBuf,
}

impl ResolvedLayout {
    /// Markdown output for a schema stem
    pub fn markdown_file(&self, stem: &str) -> PathBuf {
        self.markdown_dir.join(format!("{stem}.md"))
    }
}

/// Theme section of the site configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub name: String,
    pub prev_next_buttons_location: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "readthedocs".to_string(),
            prev_next_buttons_location: "none".to_string(),
        }
    }
}

/// Static site builder configuration document.
///
/// `docs_dir` and `site_dir` always follow the [`DocsLayout`] the site is
/// built from, so they are not read from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    #[serde(skip_deserializing)]
    pub docs_dir: String,
    #[serde(skip_deserializing)]
    pub site_dir: String,
    pub markdown_extensions: Vec<String>,
    pub plugins: Vec<String>,
    pub theme: ThemeConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "ICPSR Curated Study Metadata Schema".to_string(),
            docs_dir: "markdown".to_string(),
            site_dir: "html".to_string(),
            markdown_extensions: vec![
                "tables".to_string(),
                "markdown.extensions.smarty".to_string(),
            ],
            plugins: Vec::new(),
            theme: ThemeConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Point the markdown and html directories at those of `layout`
    pub fn with_layout(mut self, layout: &DocsLayout) -> Self {
        self.docs_dir = layout.markdown_dir.to_string_lossy().into_owned();
        self.site_dir = layout.html_dir.to_string_lossy().into_owned();
        self
    }

    /// Render as YAML
    pub fn to_yaml(&self, path: &Path) -> PublishResult<String> {
        serde_yaml::to_string(self).map_err(|e| PublishError::yaml_error(path.to_path_buf(), e))
    }

    /// Write the configuration file, creating parent directories
    pub fn write(&self, path: &Path) -> PublishResult<()> {
        let yaml = self.to_yaml(path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PublishError::io_error(parent.to_path_buf(), e))?;
        }
        std::fs::write(path, yaml).map_err(|e| PublishError::io_error(path.to_path_buf(), e))?;
        debug!(file = %path.display(), "Site configuration written");
        Ok(())
    }
}

/// Copy the theme stylesheet into the built site
pub fn copy_theme(stylesheet: &Path, target: &Path) -> PublishResult<u64> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| PublishError::io_error(parent.to_path_buf(), e))?;
    }
    std::fs::copy(stylesheet, target).map_err(|e| PublishError::io_error(stylesheet.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_layout_resolution() {
        let layout = DocsLayout::default().resolve(Path::new("/src"));

        assert_eq!(layout.docs_dir, PathBuf::from("/src/docs"));
        assert_eq!(layout.work_dir, PathBuf::from("/src/temp"));
        assert_eq!(layout.template, PathBuf::from("/src/docs/template/base.md"));
        assert_eq!(layout.site_config, PathBuf::from("/src/docs/mkdocs.yaml"));
        assert_eq!(layout.theme_target, PathBuf::from("/src/docs/html/css/theme.css"));
        assert_eq!(
            layout.markdown_file("icpsr_study_schema_3"),
            PathBuf::from("/src/docs/markdown/icpsr_study_schema_3.md")
        );
    }

    #[test]
    fn test_site_config_yaml() -> PublishResult<()> {
        let yaml = SiteConfig::default().to_yaml(Path::new("mkdocs.yaml"))?;
        let parsed: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed["site_name"], "ICPSR Curated Study Metadata Schema");
        assert_eq!(parsed["docs_dir"], "markdown");
        assert_eq!(parsed["site_dir"], "html");
        assert_eq!(parsed["markdown_extensions"][0], "tables");
        assert_eq!(parsed["markdown_extensions"][1], "markdown.extensions.smarty");
        assert_eq!(parsed["plugins"].as_sequence().map(Vec::len), Some(0));
        assert_eq!(parsed["theme"]["name"], "readthedocs");
        assert_eq!(parsed["theme"]["prev_next_buttons_location"], "none");

        assert!(yaml.starts_with("site_name:"));
        Ok(())
    }

    #[test]
    fn test_partial_site_config_uses_defaults() {
        let config: SiteConfig = serde_yaml::from_str("site_name: Custom\n").unwrap();
        assert_eq!(config.site_name, "Custom");
        assert_eq!(config.theme, ThemeConfig::default());
    }

    #[test]
    fn test_site_dirs_follow_layout() {
        let config: SiteConfig =
            serde_yaml::from_str("site_name: Custom\ndocs_dir: elsewhere\nsite_dir: public\n").unwrap();
        assert_eq!(config.docs_dir, "markdown");
        assert_eq!(config.site_dir, "html");

        let layout = DocsLayout {
            markdown_dir: PathBuf::from("pages"),
            html_dir: PathBuf::from("public"),
            ..Default::default()
        };
        let config = config.with_layout(&layout);
        assert_eq!(config.site_name, "Custom");
        assert_eq!(config.docs_dir, "pages");
        assert_eq!(config.site_dir, "public");
    }

    #[test]
    fn test_write_and_copy() -> PublishResult<()> {
        let dir = tempdir().unwrap();
        let layout = DocsLayout::default().resolve(dir.path());

        SiteConfig::default().write(&layout.site_config)?;
        assert!(layout.site_config.exists());

        fs::write(&layout.theme_stylesheet, "body {}").unwrap();
        copy_theme(&layout.theme_stylesheet, &layout.theme_target)?;
        assert_eq!(fs::read_to_string(&layout.theme_target).unwrap(), "body {}");
        Ok(())
    }

    #[test]
    fn test_copy_missing_stylesheet() {
        let dir = tempdir().unwrap();
        let err = copy_theme(&dir.path().join("missing.css"), &dir.path().join("out.css")).unwrap_err();
        assert!(err.path().unwrap().ends_with("missing.css"));
    }
}
