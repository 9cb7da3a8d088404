use std::fs;

use mdpage_config::{RenderSettings, TocSettings};
use mdpage_convert::Converter;
use tempfile::TempDir;

fn write_file(dir: &TempDir, relative: &str, contents: &str) {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write file");
}

fn converter(settings: RenderSettings) -> Converter {
    Converter::new(settings).expect("build converter")
}

#[test]
fn converts_a_file_to_a_sibling_html_page() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "doc.md", "# Title\n\nBody text.\n");

    let report = converter(RenderSettings::default()).convert_file(&temp.path().join("doc.md"));
    assert!(report.succeeded());

    let output = report.output.expect("output path");
    assert_eq!(output, temp.path().join("doc.html"));
    let html = fs::read_to_string(output).expect("read output");
    assert!(html.contains("<title>Title</title>"));
    assert!(html.contains("<p>Body text.</p>"));
}

#[test]
fn unreadable_sources_are_skipped_with_a_warning() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("absent.md");

    let report = converter(RenderSettings::default()).convert_file(&missing);
    assert!(!report.succeeded());
    assert!(report.output.is_none());
    let warning = report.warning.expect("warning recorded");
    assert!(warning.contains("Failed to load file"));
    assert!(!missing.with_extension("html").exists());
}

#[test]
fn directory_runs_convert_every_discovered_document() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "one.md", "# One\n");
    write_file(&temp, "sub/two.md", "# Two\n");
    write_file(&temp, "sub/notes.txt", "not markdown");

    let outcome = converter(RenderSettings::default())
        .run(None, Some(temp.path()))
        .expect("run");

    assert_eq!(outcome.converted(), 2);
    assert_eq!(outcome.skipped(), 0);
    assert!(temp.path().join("one.html").exists());
    assert!(temp.path().join("sub/two.html").exists());
    assert!(!temp.path().join("sub/notes.html").exists());
}

#[test]
fn empty_directories_warn_and_convert_nothing() {
    let temp = TempDir::new().expect("tempdir");

    let outcome = converter(RenderSettings::default())
        .run(None, Some(temp.path()))
        .expect("run");

    assert!(outcome.reports.is_empty());
    assert!(outcome
        .all_warnings()
        .iter()
        .any(|warning| warning.contains("No markdown files found")));
}

#[test]
fn runs_accept_a_file_and_a_directory_together() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "tree/inner.md", "# Inner\n");
    write_file(&temp, "single.md", "# Single\n");

    let outcome = converter(RenderSettings::default())
        .run(
            Some(&temp.path().join("single.md")),
            Some(&temp.path().join("tree")),
        )
        .expect("run");

    assert_eq!(outcome.converted(), 2);
    assert!(temp.path().join("single.html").exists());
    assert!(temp.path().join("tree/inner.html").exists());
}

#[test]
fn style_assets_are_embedded_into_every_page() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "styles/site.css", "h1 { color: teal; }");
    write_file(&temp, "styles/site.js", "window.ready = true;");
    write_file(&temp, "doc.md", "# Styled\n");

    let settings = RenderSettings {
        style_source: Some(temp.path().join("styles")),
        ..RenderSettings::default()
    };
    let report = converter(settings).convert_file(&temp.path().join("doc.md"));
    assert!(report.succeeded());

    let html = fs::read_to_string(report.output.expect("output")).expect("read output");
    assert!(html.contains("h1 { color: teal; }"));
    assert!(html.contains("window.ready = true;"));
}

#[test]
fn style_directories_without_assets_only_warn() {
    let temp = TempDir::new().expect("tempdir");
    fs::create_dir_all(temp.path().join("styles")).expect("create styles dir");
    write_file(&temp, "doc.md", "# Plain\n");

    let settings = RenderSettings {
        style_source: Some(temp.path().join("styles")),
        ..RenderSettings::default()
    };
    let outcome = converter(settings)
        .run(Some(&temp.path().join("doc.md")), None)
        .expect("run");

    assert_eq!(outcome.converted(), 1);
    assert!(outcome
        .all_warnings()
        .iter()
        .any(|warning| warning.contains("No styles were found")));
}

#[test]
fn rewrites_existing_outputs_in_place() {
    let temp = TempDir::new().expect("tempdir");
    write_file(&temp, "doc.md", "# First\n");
    write_file(&temp, "doc.html", "stale output");

    let settings = RenderSettings {
        toc: Some(TocSettings::with_depth(3)),
        ..RenderSettings::default()
    };
    let report = converter(settings).convert_file(&temp.path().join("doc.md"));
    assert!(report.succeeded());

    let html = fs::read_to_string(temp.path().join("doc.html")).expect("read output");
    assert!(!html.contains("stale output"));
    assert!(html.contains("<div id=\"toc\">"));
}

#[test]
fn converters_are_shareable_across_threads() {
    // Parallel directory runs rely on this bound.
    fn assert_send_sync<T: Send + Sync>(_: &T) {}
    assert_send_sync(&converter(RenderSettings::default()));
}
