use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use walkdir::WalkDir;

use crate::ConvertError;

/// Recursively collect files under `root` whose file names match `pattern`,
/// sorted so runs are deterministic.
pub fn find_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, ConvertError> {
    let matcher = compile(pattern)?;

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| matcher.is_match(Path::new(entry.file_name())))
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    Ok(files)
}

/// Markdown documents under `root`.
pub fn find_markdown_files(root: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    find_files(root, "*.md")
}

fn compile(pattern: &str) -> Result<GlobMatcher, ConvertError> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|source| ConvertError::Pattern {
            pattern: pattern.to_string(),
            source,
        })
}
