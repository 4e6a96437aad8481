//! Backfilling translation keys reported missing at runtime.
//!
//! The reconciler reads the front-end's `Translation key not found` console
//! messages, checks each distinct key against two locale files and, once the
//! operator agrees, adds an empty placeholder wherever a key is absent.
//!
//! ```text
//! parse_log → unique_keys → check_existence → Confirm → add_missing → save
//! ```

mod log_parser;


use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;

use crate::config::LocaleFileConfig;
use crate::resource::{PathConflict, ResourceDocument};

pub use log_parser::{LogMiss, parse_log, unique_keys};

/// A locale's resource document together with where it lives.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    pub locale: String,
    pub path: PathBuf,
    pub document: ResourceDocument,
}

impl LocaleFile {
    pub fn new(locale: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            locale: locale.into(),
            path: path.into(),
            document: ResourceDocument::new(),
        }
    }

    /// Load a locale file, falling back to an empty document.
    ///
    /// Never fails: a missing, unreadable or malformed file yields an empty
    /// document and a warning describing what happened.
    pub fn load(locale: impl Into<String>, path: impl Into<PathBuf>) -> (Self, Option<String>) {
        let mut file = Self::new(locale, path);
        let warning = match read_document(&file.path) {
            Ok(document) => {
                file.document = document;
                None
            }
            Err(warning) => Some(warning),
        };
        (file, warning)
    }

    /// Overwrite the file with 2-space indented UTF-8 JSON.
    pub fn save(&self) -> Result<()> {
        self.document.write_pretty(&self.path)
    }
}

fn read_document(path: &Path) -> Result<ResourceDocument, String> {
    if !path.exists() {
        return Err(format!(
            "{} does not exist, it will be created",
            path.display()
        ));
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    ResourceDocument::from_json(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

/// Whether a key exists in each of the two locale files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPresence {
    pub key: String,
    pub primary: bool,
    pub secondary: bool,
}

/// A placeholder inserted into a locale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedKey {
    pub locale: String,
    pub key: String,
}

/// A key that could not be inserted because its path runs through a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictedKey {
    pub locale: String,
    pub key: String,
    pub segment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    pub added: Vec<AddedKey>,
    pub conflicts: Vec<ConflictedKey>,
}

impl AddReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.conflicts.is_empty()
    }
}

/// What `process` found before asking for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub primary_locale: String,
    pub secondary_locale: String,
    /// Every log match, duplicates included.
    pub misses: Vec<LogMiss>,
    /// Distinct keys in order of first appearance.
    pub keys: Vec<String>,
    pub presence: Vec<KeyPresence>,
}

impl ReconcilePlan {
    /// Number of (key, locale file) pairs that would receive a placeholder.
    pub fn missing_count(&self) -> usize {
        self.presence
            .iter()
            .map(|p| usize::from(!p.primary) + usize::from(!p.secondary))
            .sum()
    }
}

#[derive(Debug)]
pub enum ProcessOutcome {
    /// The log contained no missing-key messages.
    NoKeys,
    /// The operator declined; nothing was written.
    Cancelled(ReconcilePlan),
    Applied {
        plan: ReconcilePlan,
        report: AddReport,
    },
}

/// Operator decision on a reconcile plan.
pub trait Confirm {
    fn confirm(&mut self, plan: &ReconcilePlan) -> Result<bool>;
}

/// Cross-checks log-reported keys against two locale files.
#[derive(Debug)]
pub struct KeyReconciler {
    primary: LocaleFile,
    secondary: LocaleFile,
    warnings: Vec<String>,
}

impl KeyReconciler {
    /// Load both locale files. Problems become warnings, never errors.
    pub fn load(primary: &LocaleFileConfig, secondary: &LocaleFileConfig) -> Self {
        let mut warnings = Vec::new();
        let (primary, warning) = LocaleFile::load(&primary.locale, &primary.path);
        warnings.extend(warning);
        let (secondary, warning) = LocaleFile::load(&secondary.locale, &secondary.path);
        warnings.extend(warning);

        Self {
            primary,
            secondary,
            warnings,
        }
    }

    pub fn primary(&self) -> &LocaleFile {
        &self.primary
    }

    pub fn secondary(&self) -> &LocaleFile {
        &self.secondary
    }

    /// Warnings produced while loading.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn check_existence(&self, keys: &[String]) -> Vec<KeyPresence> {
        keys.iter()
            .map(|key| KeyPresence {
                key: key.clone(),
                primary: self.primary.document.contains(key),
                secondary: self.secondary.document.contains(key),
            })
            .collect()
    }

    /// Insert an empty placeholder into each locale file that lacks a key.
    ///
    /// Keys already present are left alone, so running this twice with the
    /// same keys changes nothing the second time.
    pub fn add_missing(&mut self, keys: &[String]) -> AddReport {
        let mut report = AddReport::default();
        for key in keys {
            for file in [&mut self.primary, &mut self.secondary] {
                if file.document.contains(key) {
                    continue;
                }
                match file.document.set(key, "") {
                    Ok(()) => report.added.push(AddedKey {
                        locale: file.locale.clone(),
                        key: key.clone(),
                    }),
                    Err(PathConflict { segment, .. }) => report.conflicts.push(ConflictedKey {
                        locale: file.locale.clone(),
                        key: key.clone(),
                        segment,
                    }),
                }
            }
        }
        report
    }

    /// Write both locale files.
    pub fn save(&self) -> Result<()> {
        self.primary.save()?;
        self.secondary.save()
    }

    /// Parse a log and check its keys without touching anything.
    ///
    /// Returns `None` when the log has no missing-key messages.
    pub fn plan(&self, log_text: &str) -> Option<ReconcilePlan> {
        let misses = parse_log(log_text);
        if misses.is_empty() {
            return None;
        }
        let keys = unique_keys(&misses);
        let presence = self.check_existence(&keys);

        Some(ReconcilePlan {
            primary_locale: self.primary.locale.clone(),
            secondary_locale: self.secondary.locale.clone(),
            misses,
            keys,
            presence,
        })
    }

    /// Plan, ask `confirm`, then add missing keys and save both files.
    pub fn process<C>(&mut self, log_text: &str, confirm: &mut C) -> Result<ProcessOutcome>
    where
        C: Confirm + ?Sized,
    {
        let Some(plan) = self.plan(log_text) else {
            return Ok(ProcessOutcome::NoKeys);
        };

        if !confirm.confirm(&plan)? {
            return Ok(ProcessOutcome::Cancelled(plan));
        }

        let report = self.add_missing(&plan.keys);
        self.save()?;
        Ok(ProcessOutcome::Applied { plan, report })
    }
}
