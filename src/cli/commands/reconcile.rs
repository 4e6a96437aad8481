use std::{env, fs, io::BufRead};

use anyhow::{Context, Result};

use super::super::args::ReconcileArgs;
use super::super::exit_status::ExitStatus;
use super::super::prompt::Prompter;
use super::super::report;
use crate::config::{LoadedConfig, LocaleFileConfig};
use crate::reconcile::{Confirm, KeyReconciler, ProcessOutcome, ReconcilePlan};

/// Line that ends pasted log input.
pub const END_MARKER: &str = "END";
pub const CONFIRM_ANSWERS: &[&str] = &["y", "yes", "是"];

/// Shows the plan, then asks (or assumes yes with `--yes`).
struct ConsoleConfirm<'a, R> {
    prompter: &'a mut Prompter<R>,
    assume_yes: bool,
}

impl<R: BufRead> Confirm for ConsoleConfirm<'_, R> {
    fn confirm(&mut self, plan: &ReconcilePlan) -> Result<bool> {
        report::print_reconcile_plan(plan);
        println!();
        if self.assume_yes {
            return Ok(true);
        }
        self.prompter
            .confirm("Add the missing translation keys? (y/n): ", CONFIRM_ANSWERS)
    }
}

fn resolve_locale<R: BufRead>(
    prompter: &mut Prompter<R>,
    given: Option<LocaleFileConfig>,
    default: &LocaleFileConfig,
) -> Result<LocaleFileConfig> {
    if let Some(given) = given {
        return Ok(given);
    }
    let path = prompter.ask_path(
        &format!(
            "{} translation file path (default: {}): ",
            default.locale,
            default.path.display()
        ),
        &default.path,
    )?;
    Ok(LocaleFileConfig {
        locale: default.locale.clone(),
        path,
    })
}

pub fn reconcile(args: ReconcileArgs) -> Result<ExitStatus> {
    let verbose = args.common.verbose;
    let loaded = LoadedConfig::discover(&env::current_dir()?)?;
    if verbose && let Some(path) = &loaded.source {
        println!("Using config {}", path.display());
    }
    let config = loaded.config.reconcile;
    let (primary, secondary) = args.locale_overrides(&config);

    let mut prompter = Prompter::stdin();
    let primary = resolve_locale(&mut prompter, primary, &config.primary)?;
    let secondary = resolve_locale(&mut prompter, secondary, &config.secondary)?;

    let mut reconciler = KeyReconciler::load(&primary, &secondary);
    for warning in reconciler.warnings() {
        report::print_warning(warning);
    }
    if verbose {
        for file in [reconciler.primary(), reconciler.secondary()] {
            println!(
                "Loaded {} ({} keys) from {}",
                file.locale,
                file.document.leaf_count(),
                file.path.display()
            );
        }
    }

    let log_text = match &args.log {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read log file: {}", path.display()))?,
        None => {
            println!(
                "Paste the log output, then a line containing only '{}':",
                END_MARKER
            );
            prompter.read_block(END_MARKER)?
        }
    };

    if log_text.trim().is_empty() {
        println!("No log content entered.");
        return Ok(ExitStatus::Success);
    }

    let mut confirm = ConsoleConfirm {
        prompter: &mut prompter,
        assume_yes: args.common.yes,
    };
    match reconciler.process(&log_text, &mut confirm)? {
        ProcessOutcome::NoKeys => {
            println!("No 'Translation key not found' messages found in the log.");
            Ok(ExitStatus::Success)
        }
        ProcessOutcome::Cancelled(_) => {
            println!("Operation cancelled.");
            Ok(ExitStatus::Success)
        }
        ProcessOutcome::Applied { report: added, .. } => {
            if added.is_empty() {
                println!("Both files already contain every key.");
            }
            report::print_add_report(&added);
            report::print_success(&format!(
                "Saved {} and {}",
                reconciler.primary().path.display(),
                reconciler.secondary().path.display()
            ));
            if added.conflicts.is_empty() {
                Ok(ExitStatus::Success)
            } else {
                Ok(ExitStatus::Failure)
            }
        }
    }
}
