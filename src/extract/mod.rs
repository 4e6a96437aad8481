//! Literal extraction: quoted strings to per-file resource documents.
//!
//! Extraction is split in two phases so the caller owns confirmation:
//!
//! ```text
//! Extractor::plan()            scan sources, build documents and replacements (no writes)
//!     ↓
//! Extractor::write_resources() write <output_dir>/<basename>_<lang>.json per source file
//!     ↓
//! apply(&plan)                 rewrite each source, literal → lookup call,
//!                              then import the lookup function if needed
//! ```
//!
//! Every extracted literal doubles as its own dot-path key: `"home.title"`
//! lands at `{"home": {"title": "home.title"}}` and is rewritten to
//! `getLangResource("home.title")`.

mod import;
mod literal;
mod scanner;


use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};

use crate::config::ExtractConfig;
use crate::resource::{PathConflict, ResourceDocument};

pub use import::{ImportEdit, LookupImport, insert_import, is_imported};
pub use literal::{IgnoreTexts, Literal, LiteralFilter, QuoteStyle, scan_literals};
pub use scanner::{IgnoreRules, SourceScan, matched_extension, scan_sources};

/// Indentation of generated resource files.
pub const RESOURCE_INDENT: usize = 4;

/// One planned substitution in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Dot-path key the literal is stored under.
    pub key: String,
    /// Literal text as found between the quotes.
    pub text: String,
    pub quote: QuoteStyle,
    /// Call expression that replaces the quoted literal.
    pub expression: String,
    /// 1-based line of the opening quote.
    pub line: usize,
}

/// A literal whose key path runs through an existing leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConflict {
    pub key: String,
    /// Prefix of the key that already holds a value.
    pub segment: String,
    pub line: usize,
}

/// Planned work for one source file.
#[derive(Debug, Clone)]
pub struct FilePlan {
    pub source: PathBuf,
    pub output: PathBuf,
    pub resources: ResourceDocument,
    /// One entry per literal occurrence, in source order.
    pub replacements: Vec<Replacement>,
    pub conflicts: Vec<KeyConflict>,
    /// Import of the lookup function, when the file lacks one.
    pub import: Option<ImportEdit>,
}

#[derive(Debug, Default)]
pub struct ExtractionPlan {
    pub files: Vec<FilePlan>,
    pub warnings: Vec<String>,
}

impl ExtractionPlan {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn replacement_count(&self) -> usize {
        self.files.iter().map(|f| f.replacements.len()).sum()
    }

    pub fn conflict_count(&self) -> usize {
        self.files.iter().map(|f| f.conflicts.len()).sum()
    }
}

/// Statistics from rewriting source files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyStats {
    /// Number of quoted occurrences replaced.
    pub replacements_applied: usize,
    /// Number of files whose content changed.
    pub files_modified: usize,
    /// Number of lookup imports inserted.
    pub imports_added: usize,
}

impl std::ops::AddAssign for ApplyStats {
    fn add_assign(&mut self, other: Self) {
        self.replacements_applied += other.replacements_applied;
        self.files_modified += other.files_modified;
        self.imports_added += other.imports_added;
    }
}

pub struct Extractor {
    config: ExtractConfig,
    ignores: IgnoreRules,
    filters: Vec<Box<dyn LiteralFilter>>,
    import: Option<LookupImport>,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Result<Self> {
        config.validate()?;
        let ignores = IgnoreRules::new(&config.root_dir, &config.ignores)
            .context("Invalid glob pattern in 'ignores'")?;

        let mut filters: Vec<Box<dyn LiteralFilter>> = Vec::new();
        if !config.ignore_texts.is_empty() {
            filters.push(Box::new(IgnoreTexts::new(config.ignore_texts.iter().cloned())));
        }

        let import = if config.add_import {
            let module = config.lookup_module();
            let import = LookupImport::new(&config.lookup_fn, &module)
                .with_context(|| format!("Invalid 'lookupImport' path: {}", module.display()))?;
            Some(import)
        } else {
            None
        };

        Ok(Self {
            config,
            ignores,
            filters,
            import,
        })
    }

    /// Add a filter; a literal is extracted only if every filter accepts it.
    pub fn with_filter(mut self, filter: impl LiteralFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// The lookup call that replaces a literal.
    pub fn expression(&self, text: &str) -> String {
        format!("{}(\"{}\")", self.config.lookup_fn, text)
    }

    /// `<output_dir>/<basename>_<lang_code>.json`, basename without the matched extension.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = match matched_extension(&file_name, &self.config.extensions) {
            Some(ext) => &file_name[..file_name.len() - ext.len()],
            None => file_name.as_str(),
        };
        self.config
            .output_dir
            .join(format!("{}_{}.json", stem, self.config.lang_code))
    }

    fn accepts(&self, text: &str) -> bool {
        self.filters.iter().all(|f| f.accept(text))
    }

    /// Scan every eligible source file and plan its extraction.
    ///
    /// Reads files but writes nothing. Unreadable files abort the plan.
    pub fn plan(&self) -> Result<ExtractionPlan> {
        let root = &self.config.root_dir;
        if !root.is_dir() {
            bail!(
                "Source directory '{}' does not exist.\n\
                 Hint: Check the 'extract.rootDir' setting or pass --root-dir.",
                root.display()
            );
        }

        let scan = scan_sources(root, &self.config.extensions, &self.ignores);
        let mut plan = ExtractionPlan {
            warnings: scan.skipped,
            ..Default::default()
        };

        let mut outputs: HashMap<PathBuf, PathBuf> = HashMap::new();
        for source in scan.files {
            let content = fs::read_to_string(&source)
                .with_context(|| format!("Failed to read file: {}", source.display()))?;
            let file_plan = self.plan_file(&source, &content)?;

            if let Some(previous) = outputs.insert(file_plan.output.clone(), source.clone()) {
                plan.warnings.push(format!(
                    "{} and {} both write {}; the later file wins",
                    previous.display(),
                    source.display(),
                    file_plan.output.display()
                ));
            }
            plan.files.push(file_plan);
        }

        Ok(plan)
    }

    /// Plan extraction for one file's content.
    pub fn plan_file(&self, source: &Path, content: &str) -> Result<FilePlan> {
        let line_index = build_line_index(content);
        let mut resources = ResourceDocument::new();
        let mut replacements = Vec::new();
        let mut conflicts = Vec::new();

        for literal in scan_literals(content) {
            if !self.accepts(&literal.text) {
                continue;
            }
            let line = offset_to_line(&line_index, literal.offset);
            let key = literal.text.clone();

            if let Err(PathConflict { segment, .. }) = resources.set(&key, literal.text.as_str()) {
                conflicts.push(KeyConflict {
                    key: key.clone(),
                    segment,
                    line,
                });
            }

            replacements.push(Replacement {
                expression: self.expression(&literal.text),
                key,
                text: literal.text,
                quote: literal.quote,
                line,
            });
        }

        let import = match &self.import {
            Some(import) if !replacements.is_empty() => import
                .plan(source, content)
                .with_context(|| format!("Failed to resolve path: {}", source.display()))?,
            _ => None,
        };

        Ok(FilePlan {
            source: source.to_path_buf(),
            output: self.output_path(source),
            resources,
            replacements,
            conflicts,
            import,
        })
    }

    /// Write each planned resource document, ASCII-escaped with 4-space indentation.
    ///
    /// Returns the number of files written.
    pub fn write_resources(&self, plan: &ExtractionPlan) -> Result<usize> {
        if plan.is_empty() {
            return Ok(0);
        }
        fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "Failed to create directory: {}",
                self.config.output_dir.display()
            )
        })?;

        for file in &plan.files {
            let content = file
                .resources
                .to_ascii_json(RESOURCE_INDENT)
                .with_context(|| format!("Failed to serialize {}", file.output.display()))?;
            fs::write(&file.output, content)
                .with_context(|| format!("Failed to write file: {}", file.output.display()))?;
        }

        Ok(plan.files.len())
    }
}

/// Rewrite every planned source file in place.
///
/// Each file is re-read so edits made since planning are kept; files whose
/// content does not change are not written. The planned import is added only
/// when at least one literal was replaced and the file still lacks it.
pub fn apply(plan: &ExtractionPlan) -> Result<ApplyStats> {
    let mut stats = ApplyStats::default();

    for file in plan.files.iter().filter(|f| !f.replacements.is_empty()) {
        let content = fs::read_to_string(&file.source)
            .with_context(|| format!("Failed to read file: {}", file.source.display()))?;
        let (mut rewritten, applied) = rewrite_source(&content, &file.replacements);

        let mut imports_added = 0;
        if applied > 0
            && let Some(edit) = &file.import
            && !is_imported(&rewritten, &edit.function)
        {
            rewritten = insert_import(&rewritten, &edit.statement);
            imports_added = 1;
        }

        if rewritten != content {
            fs::write(&file.source, rewritten)
                .with_context(|| format!("Failed to write file: {}", file.source.display()))?;
            stats += ApplyStats {
                replacements_applied: applied,
                files_modified: 1,
                imports_added,
            };
        }
    }

    Ok(stats)
}

/// Replace both quoted forms of every recorded literal with its expression.
///
/// Records apply in order and each sees the output of the previous ones.
/// Returns the new content and the number of occurrences replaced.
pub fn rewrite_source(content: &str, replacements: &[Replacement]) -> (String, usize) {
    let mut content = content.to_string();
    let mut applied = 0;

    for replacement in replacements {
        for quote in QuoteStyle::ALL {
            let quoted = quote.quote(&replacement.text);
            let count = content.matches(quoted.as_str()).count();
            if count > 0 {
                content = content.replace(quoted.as_str(), &replacement.expression);
                applied += count;
            }
        }
    }

    (content, applied)
}

/// Byte offsets where each line starts.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// 1-based line number for a byte offset.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
