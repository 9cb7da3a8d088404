//! Conversion driver: discovery, per-document pipeline, parallel runs.
//!
//! Each document conversion is an independent, side-effect-free
//! computation over its own block sequence, so a directory run fans out
//! across a rayon pool with nothing shared but the read-only settings and
//! style assets. Failures follow the tool's taxonomy: unreadable sources
//! and missing styles are warnings and the run keeps going.

mod discovery;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use mdpage_config::RenderSettings;
use mdpage_html::{render_page, StyleAssets};
use rayon::prelude::*;
use thiserror::Error;

pub use discovery::{find_files, find_markdown_files};

/// Errors that abort a run outright. Per-document trouble is reported
/// through [`FileReport`] warnings instead.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid discovery pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },
}

/// Result of converting one document.
#[derive(Clone, Debug)]
pub struct FileReport {
    pub source: PathBuf,
    /// Written output path; `None` when the document was skipped.
    pub output: Option<PathBuf>,
    /// Present when the document was skipped or its output failed to land.
    pub warning: Option<String>,
}

impl FileReport {
    pub fn succeeded(&self) -> bool {
        self.warning.is_none()
    }
}

/// Aggregate outcome of a run: per-document reports plus run-level
/// warnings (style discovery, empty directories).
#[derive(Clone, Debug, Default)]
pub struct RunOutcome {
    pub reports: Vec<FileReport>,
    pub warnings: Vec<String>,
}

impl RunOutcome {
    pub fn converted(&self) -> usize {
        self.reports.iter().filter(|report| report.succeeded()).count()
    }

    pub fn skipped(&self) -> usize {
        self.reports.len() - self.converted()
    }

    /// Every warning the run produced, per-document ones included.
    pub fn all_warnings(&self) -> Vec<&str> {
        self.warnings
            .iter()
            .map(String::as_str)
            .chain(
                self.reports
                    .iter()
                    .filter_map(|report| report.warning.as_deref()),
            )
            .collect()
    }
}

/// Converts markdown documents into HTML pages. Style assets are loaded
/// once at construction and shared read-only across every conversion.
pub struct Converter {
    settings: RenderSettings,
    styles: StyleAssets,
    style_warnings: Vec<String>,
}

impl Converter {
    pub fn new(settings: RenderSettings) -> Result<Self, ConvertError> {
        let mut style_warnings = Vec::new();
        let styles = load_styles(settings.style_source.as_deref(), &mut style_warnings)?;
        Ok(Converter {
            settings,
            styles,
            style_warnings,
        })
    }

    /// Convert an explicit file and/or every document under a directory,
    /// mirroring the CLI surface. Directory conversions run in parallel.
    pub fn run(&self, file: Option<&Path>, dir: Option<&Path>) -> Result<RunOutcome, ConvertError> {
        let mut outcome = RunOutcome {
            warnings: self.style_warnings.clone(),
            ..RunOutcome::default()
        };

        if let Some(dir) = dir {
            let files = find_markdown_files(dir)?;
            if files.is_empty() {
                outcome.warnings.push("No markdown files found".to_string());
            } else {
                let mut reports: Vec<FileReport> = files
                    .par_iter()
                    .map(|path| self.convert_file(path))
                    .collect();
                outcome.reports.append(&mut reports);
            }
        }

        if let Some(file) = file {
            outcome.reports.push(self.convert_file(file));
        }

        Ok(outcome)
    }

    /// Convert a single document, writing the sibling `.html` file.
    /// Unreadable sources skip the document rather than failing the run.
    pub fn convert_file(&self, path: &Path) -> FileReport {
        let markdown = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => {
                return FileReport {
                    source: path.to_path_buf(),
                    output: None,
                    warning: Some(format!("Failed to load file: {}", path.display())),
                }
            }
        };

        let page = render_page(&markdown, &self.settings, &self.styles);
        let output = path.with_extension("html");

        match atomic_write(&output, &page) {
            Ok(()) => FileReport {
                source: path.to_path_buf(),
                output: Some(output),
                warning: None,
            },
            Err(err) => FileReport {
                source: path.to_path_buf(),
                output: None,
                warning: Some(format!("Failed to write {}: {err}", output.display())),
            },
        }
    }
}

/// Read every discovered style asset up front; a style directory with no
/// assets, or an unreadable asset, is a warning, never an error.
fn load_styles(
    dir: Option<&Path>,
    warnings: &mut Vec<String>,
) -> Result<StyleAssets, ConvertError> {
    let Some(dir) = dir else {
        return Ok(StyleAssets::default());
    };

    let css_files = find_files(dir, "*.css")?;
    let js_files = find_files(dir, "*.js")?;
    if css_files.is_empty() && js_files.is_empty() {
        warnings.push("No styles were found".to_string());
        return Ok(StyleAssets::default());
    }

    let mut assets = StyleAssets::default();
    for path in css_files {
        match fs::read_to_string(&path) {
            Ok(contents) => assets.css.push(contents),
            Err(_) => warnings.push(format!("Failed to load file: {}", path.display())),
        }
    }
    for path in js_files {
        match fs::read_to_string(&path) {
            Ok(contents) => assets.js.push(contents),
            Err(_) => warnings.push(format!("Failed to load file: {}", path.display())),
        }
    }

    Ok(assets)
}

/// Write via a temp file in the destination directory plus a rename, so
/// readers never observe a half-written page.
fn atomic_write(path: &Path, contents: &str) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = tempfile::Builder::new().prefix(".mdpage").tempfile_in(parent)?;
    tmp.as_file_mut().write_all(contents.as_bytes())?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map(|_| ()).map_err(|err| err.error)
}
