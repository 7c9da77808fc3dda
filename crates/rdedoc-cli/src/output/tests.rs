// Tests for output formatting functionality
//
// These tests verify formatting of build reports and cache statistics
// and the quiet/format rules of the output writer.

use super::*;
use rdedoc_schemas::documentation::MarkdownReport;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Writer that keeps everything written to it
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
    (writer, buffer)
}

fn sample_report() -> BuildReport {
    BuildReport {
        schemas_loaded: 12,
        references_resolved: 40,
        persisted: PathBuf::from("standard/temp/icpsr_study_schema_2.json"),
        identifiers_removed: 18,
        markdown: PathBuf::from("standard/docs/markdown/icpsr_study_schema_2.md"),
        generator_succeeded: true,
        markdown_report: Some(MarkdownReport {
            stamped: true,
            table_rows: 30,
            headings: 25,
            option_tables: 2,
            additional_properties: 1,
        }),
        site_built: Some(true),
        theme: Some(PathBuf::from("standard/docs/html/css/theme.css")),
    }
}

#[test]
fn test_build_report_human() {
    let formatted = format_build_report_human(&sample_report());

    assert!(formatted.contains("Schemas loaded:      12"));
    assert!(formatted.contains("References resolved: 40"));
    assert!(formatted.contains("relabelled 30 table rows and 25 headings, publication date added"));
    assert!(formatted.contains("Site:                built"));
    assert!(formatted.contains("theme.css"));
}

#[test]
fn test_build_report_without_markdown_or_site() {
    let report = BuildReport {
        markdown_report: None,
        site_built: None,
        theme: None,
        ..sample_report()
    };
    let formatted = format_build_report_human(&report);

    assert!(formatted.contains("Markdown:            not generated"));
    assert!(formatted.contains("Site:                skipped"));
    assert!(!formatted.contains("Theme:"));
}

#[test]
fn test_build_report_json() {
    let formatted = OutputFormat::Json.format_build_report(&sample_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&formatted).unwrap();

    assert_eq!(value["schemas_loaded"], 12);
    assert_eq!(value["markdown_report"]["table_rows"], 30);
    assert_eq!(value["site_built"], true);
}

#[test]
fn test_cache_stats_yaml() {
    let stats = CacheStats {
        total_entries: 4,
        titled: 2,
        vocabularies: 2,
        yaml_sources: 2,
    };
    let formatted = OutputFormat::Yaml.format_cache_stats(&stats).unwrap();
    assert!(formatted.contains("total_entries: 4"));

    let human = OutputFormat::Human.format_cache_stats(&stats).unwrap();
    assert!(human.contains("Vocabularies: 2"));
}

#[test]
fn test_quiet_suppresses_messages() {
    let (mut output, buffer) = writer(OutputFormat::Human, true);
    output.info("loading").unwrap();
    output.success("done").unwrap();
    output.section("Summary").unwrap();
    output.build_report(&sample_report()).unwrap();

    assert_eq!(buffer.contents(), "");
}

#[test]
fn test_machine_formats_only_emit_data() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.info("loading").unwrap();
    output.warning("careful").unwrap();
    output.data(&serde_json::json!({"title": "Study"})).unwrap();

    assert_eq!(buffer.contents(), "{\"title\":\"Study\"}\n");
}

#[test]
fn test_human_messages_without_color() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output.info("loading").unwrap();
    output.warning("careful").unwrap();
    output.section("Summary").unwrap();

    assert_eq!(
        buffer.contents(),
        "INFO: loading\nWARNING: careful\n\n=== Summary ===\n"
    );
}

#[test]
fn test_no_spinner_without_terminal() {
    let (output, _) = writer(OutputFormat::Human, false);
    assert!(output.spinner("working").is_none());
}
