//! Import statements for the lookup function.
//!
//! A rewritten file calls the lookup function, so it needs
//! `import { getLangResource } from "<module>";`. The statement goes after the
//! leading block of imports (and `"use ..."` directives), or at the top of the
//! file when there is none. Files that already import the function are left
//! alone.

use std::{
    io,
    path::{Component, Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

static IMPORT_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^import[\s{*'"]"#).unwrap());

static SIDE_EFFECT_IMPORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^import\s*['"]"#).unwrap());

static DIRECTIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^['"]use [\w-]+['"];?$"#).unwrap());

/// An import statement to add to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdit {
    /// Imported function name.
    pub function: String,
    pub statement: String,
    /// 1-based line of the statement in the planned file.
    pub line: usize,
}

/// Plans imports of `function` from one module for any number of source files.
#[derive(Debug, Clone)]
pub struct LookupImport {
    function: String,
    module: PathBuf,
}

impl LookupImport {
    /// `module` is a path without extension, e.g. `./src/i18n/utils`.
    pub fn new(function: &str, module: &Path) -> io::Result<Self> {
        Ok(Self {
            function: function.to_string(),
            module: normalize(module)?,
        })
    }

    /// The edit needed for `source`, or `None` if it already imports the
    /// function or is the module itself.
    pub fn plan(&self, source: &Path, content: &str) -> io::Result<Option<ImportEdit>> {
        if is_imported(content, &self.function) {
            return Ok(None);
        }
        let source = normalize(source)?;
        if source.with_extension("") == self.module {
            return Ok(None);
        }

        let from_dir = source.parent().unwrap_or(Path::new(""));
        let statement = format!(
            "import {{ {} }} from \"{}\";",
            self.function,
            relative_specifier(from_dir, &self.module)
        );
        Ok(Some(ImportEdit {
            function: self.function.clone(),
            statement,
            line: insertion_index(content) + 1,
        }))
    }
}

/// Whether `content` already has a named or default import of `function`.
pub fn is_imported(content: &str, function: &str) -> bool {
    let name = regex::escape(function);
    let pattern = format!(
        r"(?m)^\s*import\s+(?:type\s+)?(?:[\w$]+\s*,\s*)?\{{[^}}]*\b{name}\b[^}}]*\}}|^\s*import\s+{name}\b"
    );
    Regex::new(&pattern).is_ok_and(|re| re.is_match(content))
}

/// Insert `statement` as its own line after the leading imports.
pub fn insert_import(content: &str, statement: &str) -> String {
    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let index = insertion_index(content);

    let mut result = String::with_capacity(content.len() + statement.len() + 2);
    let mut lines = content.split_inclusive('\n');
    for line in lines.by_ref().take(index) {
        result.push_str(line);
    }
    if !result.is_empty() && !result.ends_with('\n') {
        result.push_str(newline);
    }
    result.push_str(statement);
    result.push_str(newline);
    for line in lines {
        result.push_str(line);
    }
    result
}

/// 0-based line index right after the last leading import or directive.
fn insertion_index(content: &str) -> usize {
    let mut insert_at = 0;
    let mut in_import = false;

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if in_import {
            if trimmed.ends_with(';') || trimmed.contains("from ") {
                in_import = false;
                insert_at = i + 1;
            }
            continue;
        }

        if IMPORT_START_REGEX.is_match(trimmed) {
            if trimmed.ends_with(';')
                || trimmed.contains(" from ")
                || SIDE_EFFECT_IMPORT_REGEX.is_match(trimmed)
            {
                insert_at = i + 1;
            } else {
                in_import = true;
            }
        } else if DIRECTIVE_REGEX.is_match(trimmed) {
            insert_at = i + 1;
        } else if !(trimmed.is_empty() || trimmed.starts_with("//")) {
            break;
        }
    }

    insert_at
}

/// Module specifier for `target` as seen from a file in `from_dir`.
fn relative_specifier(from_dir: &Path, target: &Path) -> String {
    let from: Vec<Component> = from_dir.components().collect();
    let to: Vec<Component> = target.components().collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts = vec!["..".to_string(); from.len() - common];
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );

    let joined = parts.join("/");
    if joined.starts_with('.') {
        joined
    } else {
        format!("./{}", joined)
    }
}

/// Absolute path with `.` and `..` resolved lexically.
fn normalize(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
