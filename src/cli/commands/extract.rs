use std::env;

use anyhow::Result;

use super::super::args::ExtractArgs;
use super::super::exit_status::ExitStatus;
use super::super::prompt::Prompter;
use super::super::report;
use crate::config::LoadedConfig;
use crate::extract::{Extractor, apply};

pub const CONFIRM_PROMPT: &str = "确认结果？（yes/no）：";
pub const CONFIRM_ANSWERS: &[&str] = &["yes"];

pub fn extract(args: ExtractArgs) -> Result<ExitStatus> {
    let verbose = args.common.verbose;
    let loaded = LoadedConfig::discover(&env::current_dir()?)?;
    if verbose && let Some(path) = &loaded.source {
        println!("Using config {}", path.display());
    }

    let extractor = Extractor::new(args.merge_into(loaded.config.extract))?;
    let plan = extractor.plan()?;
    for warning in &plan.warnings {
        report::print_warning(warning);
    }

    if plan.is_empty() {
        println!(
            "No source files matching {} found in {}",
            extractor.config().extensions.join(", "),
            extractor.config().root_dir.display()
        );
        return Ok(ExitStatus::Success);
    }

    let written = extractor.write_resources(&plan)?;
    if verbose {
        for file in &plan.files {
            println!("{} -> {}", file.source.display(), file.output.display());
        }
    }
    println!(
        "Wrote {} resource file(s) to {}",
        written,
        extractor.config().output_dir.display()
    );

    report::print_extraction_preview(&plan);

    let confirmed =
        args.common.yes || Prompter::stdin().confirm(CONFIRM_PROMPT, CONFIRM_ANSWERS)?;
    if !confirmed {
        println!("Replacement cancelled, source files were not changed.");
        return Ok(ExitStatus::Success);
    }

    let stats = apply(&plan)?;
    report::print_apply_stats(&stats);

    if plan.conflict_count() > 0 {
        report::print_warning(&format!(
            "{} literal(s) could not be added to resource files because of key conflicts",
            plan.conflict_count()
        ));
        return Ok(ExitStatus::Failure);
    }
    Ok(ExitStatus::Success)
}
