//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract quoted literals into per-file resources and rewrite sources
//! - `reconcile`: Add placeholders for keys reported missing in a runtime log
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::config::{ExtractConfig, LocaleFileConfig, ReconcileConfig};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(args)) => args.common.verbose,
            Some(Command::Reconcile(args)) => args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the interactive commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Apply changes without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Source directory to scan (overrides config file)
    #[arg(long)]
    pub root_dir: Option<PathBuf>,

    /// Directory for generated resource files (overrides config file)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Language code used in output file names (overrides config file)
    #[arg(long)]
    pub lang_code: Option<String>,

    /// Source file extension to scan, may be repeated: --ext .ts --ext .tsx
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// Function name used in replacement calls (overrides config file)
    #[arg(long)]
    pub lookup_fn: Option<String>,

    /// Module to import the lookup function from (overrides config file)
    #[arg(long, conflicts_with = "no_import")]
    pub lookup_import: Option<PathBuf>,

    /// Do not add lookup function imports to rewritten files
    #[arg(long)]
    pub no_import: bool,
}

impl ExtractArgs {
    /// Overlay command-line values on the configured ones.
    pub fn merge_into(&self, mut config: ExtractConfig) -> ExtractConfig {
        if let Some(root_dir) = &self.root_dir {
            config.root_dir = root_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(lang_code) = &self.lang_code {
            config.lang_code = lang_code.clone();
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        if let Some(lookup_fn) = &self.lookup_fn {
            config.lookup_fn = lookup_fn.clone();
        }
        if let Some(lookup_import) = &self.lookup_import {
            config.lookup_import = Some(lookup_import.clone());
        }
        if self.no_import {
            config.add_import = false;
        }
        config
    }
}

#[derive(Debug, Args)]
pub struct ReconcileArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Primary (first) locale file; prompted for when omitted
    #[arg(long)]
    pub primary: Option<PathBuf>,

    /// Secondary (second) locale file; prompted for when omitted
    #[arg(long)]
    pub secondary: Option<PathBuf>,

    /// Read the log from a file instead of standard input
    #[arg(long)]
    pub log: Option<PathBuf>,
}

impl ReconcileArgs {
    /// Locale files given on the command line, with labels from the config.
    pub fn locale_overrides(
        &self,
        config: &ReconcileConfig,
    ) -> (Option<LocaleFileConfig>, Option<LocaleFileConfig>) {
        let with_path = |base: &LocaleFileConfig, path: &PathBuf| LocaleFileConfig {
            locale: base.locale.clone(),
            path: path.clone(),
        };
        (
            self.primary.as_ref().map(|p| with_path(&config.primary, p)),
            self.secondary
                .as_ref()
                .map(|p| with_path(&config.secondary, p)),
        )
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract quoted strings into resource files and rewrite them as lookup calls
    Extract(ExtractArgs),
    /// Add empty entries for translation keys reported missing in a log
    Reconcile(ReconcileArgs),
    /// Initialize a new .langkitrc.json configuration file
    Init,
}
