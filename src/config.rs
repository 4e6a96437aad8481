use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".langkitrc.json";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

/// Settings for scanning sources and generating per-file resources.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractConfig {
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_lang_code")]
    pub lang_code: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Paths to skip. Patterns with `*` or `?` are globs, anything else is a
    /// directory or file path relative to `rootDir`.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Literals that are never extracted.
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default = "default_lookup_fn")]
    pub lookup_fn: String,
    /// Module exporting `lookupFn`, without extension. Defaults to
    /// `<rootDir>/i18n/utils`.
    #[serde(default)]
    pub lookup_import: Option<PathBuf>,
    /// Import `lookupFn` into rewritten files that do not import it yet.
    #[serde(default = "default_add_import")]
    pub add_import: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileConfig {
    #[serde(default = "default_primary_locale")]
    pub primary: LocaleFileConfig,
    #[serde(default = "default_secondary_locale")]
    pub secondary: LocaleFileConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleFileConfig {
    pub locale: String,
    pub path: PathBuf,
}

impl LocaleFileConfig {
    pub fn new(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            path: PathBuf::from(format!("{}.json", locale)),
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("./src")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./src/i18n")
}

fn default_lang_code() -> String {
    "en".to_string()
}

fn default_extensions() -> Vec<String> {
    [".ts", ".tsx"].map(String::from).to_vec()
}

fn default_lookup_fn() -> String {
    "getLangResource".to_string()
}

fn default_add_import() -> bool {
    true
}

fn default_primary_locale() -> LocaleFileConfig {
    LocaleFileConfig::new("zh")
}

fn default_secondary_locale() -> LocaleFileConfig {
    LocaleFileConfig::new("en")
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            output_dir: default_output_dir(),
            lang_code: default_lang_code(),
            extensions: default_extensions(),
            ignores: Vec::new(),
            ignore_texts: Vec::new(),
            lookup_fn: default_lookup_fn(),
            lookup_import: None,
            add_import: default_add_import(),
        }
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            primary: default_primary_locale(),
            secondary: default_secondary_locale(),
        }
    }
}

impl ExtractConfig {
    /// Module the lookup function is imported from.
    pub fn lookup_module(&self) -> PathBuf {
        self.lookup_import
            .clone()
            .unwrap_or_else(|| self.root_dir.join("i18n").join("utils"))
    }

    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or a
    /// required value is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if is_glob_pattern(pattern) {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        if self.extensions.iter().any(|ext| ext.is_empty()) {
            anyhow::bail!("'extensions' must not contain an empty string");
        }

        if self.lookup_fn.trim().is_empty() {
            anyhow::bail!("'lookupFn' must not be empty");
        }

        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.extract.validate()
    }

    /// Read and validate one config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Nearest config file at or above `start_dir`, stopping at the repository root.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Settings in effect for a run.
pub struct LoadedConfig {
    pub config: Config,
    /// File the settings came from; `None` means built-in defaults.
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Load the nearest config file, or defaults when there is none.
    pub fn discover(start_dir: &Path) -> Result<Self> {
        let source = find_config_file(start_dir);
        let config = source
            .as_deref()
            .map(Config::from_file)
            .transpose()?
            .unwrap_or_default();
        Ok(Self { config, source })
    }
}
