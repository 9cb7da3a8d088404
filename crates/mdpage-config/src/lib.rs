//! Typed settings for mdpage conversions.
//!
//! Settings resolve from built-in defaults, an optional `.mdpage.toml` at
//! the git root, then one at the working directory; CLI flags are applied
//! on top by the caller. The resolved [`RenderSettings`] struct is passed
//! by reference into every conversion, so nothing configuration-shaped is
//! ambient.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".mdpage.toml";

/// Default depth of the table of contents.
pub const DEFAULT_TOC_DEPTH: u8 = 4;

/// Default title of the table-of-contents block.
pub const DEFAULT_TOC_TITLE: &str = "Table of Contents";

/// What happens to the document's first element, which doubles as the page
/// title.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TitleMode {
    /// Leave the element in the body.
    #[default]
    Keep,
    /// Drop it from the body before any structure is derived.
    Remove,
}

/// Table-of-contents settings; absent entirely when the TOC is off.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocSettings {
    /// Deepest normalized heading level listed (1..=6).
    pub depth: u8,
    pub title: String,
    /// Prefix entries with heading numbers.
    pub numbered: bool,
}

impl TocSettings {
    pub fn with_depth(depth: u8) -> Self {
        TocSettings {
            depth,
            title: DEFAULT_TOC_TITLE.to_string(),
            numbered: false,
        }
    }
}

impl Default for TocSettings {
    fn default() -> Self {
        TocSettings::with_depth(DEFAULT_TOC_DEPTH)
    }
}

/// Complete settings for one conversion run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderSettings {
    pub title: TitleMode,
    pub toc: Option<TocSettings>,
    /// Give headings referenceable ids and link the TOC to them.
    pub heading_links: bool,
    /// Prefix headings with hierarchical numbers.
    pub heading_numbering: bool,
    /// Wrap the body in a titled header plus a content container.
    pub header_wrapper: bool,
    /// Emit nested section containers instead of the flat sequence.
    pub semantic_output: bool,
    /// Directory searched recursively for style assets to inline.
    pub style_source: Option<PathBuf>,
}

/// Loader options, typically supplied by the CLI layer.
#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub working_dir: Option<PathBuf>,
}

impl LoadOptions {
    pub fn with_working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }
}

/// Errors surfaced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to resolve working directory {attempted}: {source}")]
    WorkingDirectory {
        attempted: PathBuf,
        source: io::Error,
    },
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

impl RenderSettings {
    /// Resolve settings from defaults and on-disk layers: git root first,
    /// working directory second, later layers overriding earlier ones
    /// field by field.
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let working_dir = resolve_working_dir(options.working_dir)?;
        let mut settings = RenderSettings::default();

        let local_path = working_dir.join(CONFIG_FILE_NAME);
        if let Some(git_root) = find_git_root(&working_dir) {
            let git_path = git_root.join(CONFIG_FILE_NAME);
            if git_path.exists() && git_path != local_path {
                apply_file(&mut settings, &git_path)?;
            }
        }
        if local_path.exists() {
            apply_file(&mut settings, &local_path)?;
        }

        Ok(settings)
    }
}

/// Parse a requested TOC depth the way the original flag behaved: an
/// unparsable value falls back to the default, an out-of-range value
/// clamps to 1..=6.
pub fn resolve_toc_depth(raw: &str) -> u8 {
    match raw.trim().parse::<i64>() {
        Ok(depth) => depth.clamp(1, 6) as u8,
        Err(_) => DEFAULT_TOC_DEPTH,
    }
}

fn resolve_working_dir(override_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_dir {
        Some(path) => {
            fs::canonicalize(&path).map_err(|source| ConfigError::WorkingDirectory {
                attempted: path,
                source,
            })
        }
        None => env::current_dir().map_err(|source| ConfigError::WorkingDirectory {
            attempted: PathBuf::from("."),
            source,
        }),
    }
}

fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(".git").exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

fn apply_file(settings: &mut RenderSettings, path: &Path) -> Result<(), ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    raw.apply(settings, path)
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    page: Option<RawPage>,
    #[serde(default)]
    toc: Option<RawToc>,
    #[serde(default)]
    headings: Option<RawHeadings>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPage {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    header: Option<bool>,
    #[serde(default)]
    semantic: Option<bool>,
    #[serde(default)]
    style: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawToc {
    #[serde(default)]
    depth: Option<u8>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    numbered: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHeadings {
    #[serde(default)]
    links: Option<bool>,
    #[serde(default)]
    numbering: Option<bool>,
}

impl RawConfig {
    fn apply(self, settings: &mut RenderSettings, path: &Path) -> Result<(), ConfigError> {
        if let Some(page) = self.page {
            if let Some(title) = page.title {
                settings.title = match title.as_str() {
                    "keep" => TitleMode::Keep,
                    "remove" => TitleMode::Remove,
                    other => {
                        return Err(invalid(
                            path,
                            format!("page.title must be \"keep\" or \"remove\" (received \"{other}\")"),
                        ))
                    }
                };
            }
            if let Some(header) = page.header {
                settings.header_wrapper = header;
            }
            if let Some(semantic) = page.semantic {
                settings.semantic_output = semantic;
            }
            if let Some(style) = page.style {
                let style = if style.is_absolute() {
                    style
                } else {
                    parent_dir(path).join(style)
                };
                settings.style_source = Some(style);
            }
        }

        if let Some(toc) = self.toc {
            let resolved = settings.toc.get_or_insert_with(TocSettings::default);
            if let Some(depth) = toc.depth {
                if depth == 0 || depth > 6 {
                    return Err(invalid(
                        path,
                        format!("toc.depth must be between 1 and 6 (received {depth})"),
                    ));
                }
                resolved.depth = depth;
            }
            if let Some(title) = toc.title {
                if title.trim().is_empty() {
                    return Err(invalid(path, "toc.title cannot be empty".to_string()));
                }
                resolved.title = title;
            }
            if let Some(numbered) = toc.numbered {
                resolved.numbered = numbered;
            }
        }

        if let Some(headings) = self.headings {
            if let Some(links) = headings.links {
                settings.heading_links = links;
            }
            if let Some(numbering) = headings.numbering {
                settings.heading_numbering = numbering;
            }
        }

        Ok(())
    }
}

fn invalid(path: &Path, message: String) -> ConfigError {
    ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
