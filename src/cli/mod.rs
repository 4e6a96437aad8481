//! Command-line interface layer.
//!
//! Parses arguments, owns every operator prompt and prints results. The
//! extraction and reconcile logic lives in the library modules so it can be
//! driven without a terminal.

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod prompt;
mod report;

pub use args::{Arguments, Command, CommonArgs, ExtractArgs, ReconcileArgs};
pub use exit_status::ExitStatus;
pub use prompt::Prompter;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Extract(args)) => commands::extract::extract(args),
        Some(Command::Reconcile(args)) => commands::reconcile::reconcile(args),
        Some(Command::Init) => commands::init::init(),
        None => Ok(ExitStatus::Success),
    }
}
