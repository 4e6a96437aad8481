use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::is_glob_pattern;

/// Result of scanning the source tree.
#[derive(Debug, Default)]
pub struct SourceScan {
    /// Eligible source files in walk order (sorted by file name per directory).
    pub files: Vec<PathBuf>,
    /// Entries that could not be read while walking.
    pub skipped: Vec<String>,
}

/// Compiled `ignores` setting.
#[derive(Debug, Default)]
pub struct IgnoreRules {
    literal_paths: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreRules {
    /// Split patterns into glob patterns and literal path prefixes under `root`.
    pub fn new(root: &Path, patterns: &[String]) -> Result<Self, glob::PatternError> {
        let mut rules = Self::default();
        for p in patterns {
            if is_glob_pattern(p) {
                rules.globs.push(Pattern::new(p)?);
            } else {
                rules.literal_paths.push(root.join(p));
            }
        }
        Ok(rules)
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        if self
            .literal_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.globs.iter().any(|p| p.matches(&path_str))
    }
}

/// Return the first extension in `extensions` that `file_name` ends with.
pub fn matched_extension<'a>(file_name: &str, extensions: &'a [String]) -> Option<&'a str> {
    extensions
        .iter()
        .map(String::as_str)
        .find(|ext| file_name.ends_with(ext))
}

/// Walk `root` and collect files whose names end with one of `extensions`.
pub fn scan_sources(root: &Path, extensions: &[String], ignores: &IgnoreRules) -> SourceScan {
    let mut scan = SourceScan::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                scan.skipped.push(format!("Cannot access path: {}", e));
                continue;
            }
        };
        let path = entry.path();

        if ignores.is_ignored(path) {
            continue;
        }

        let is_source = entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| matched_extension(name, extensions).is_some());
        if is_source {
            scan.files.push(path.to_path_buf());
        }
    }

    scan
}
