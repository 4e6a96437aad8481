//! Line-oriented operator prompts.
//!
//! All interactive input is read through one [`Prompter`] so that prompts,
//! the pasted log block and the final confirmation share a single buffered
//! reader over standard input.

use std::{
    io::{self, BufRead, StdinLock, Write},
    path::{Path, PathBuf},
};

use anyhow::Result;

pub struct Prompter<R> {
    input: R,
}

impl Prompter<StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Read one line without its line ending. `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    /// Show `prompt` and read the answer.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        io::stdout().flush()?;
        self.read_line()
    }

    /// Ask for a path; an empty answer (or end of input) selects `default`.
    pub fn ask_path(&mut self, prompt: &str, default: &Path) -> Result<PathBuf> {
        let answer = self.ask(prompt)?.unwrap_or_default();
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            default.to_path_buf()
        } else {
            PathBuf::from(answer)
        })
    }

    /// Ask a yes/no question. True only if the trimmed, lowercased answer is
    /// one of `accepted`; end of input counts as no.
    pub fn confirm(&mut self, prompt: &str, accepted: &[&str]) -> Result<bool> {
        let Some(answer) = self.ask(prompt)? else {
            println!();
            return Ok(false);
        };
        let answer = answer.trim().to_lowercase();
        Ok(accepted.contains(&answer.as_str()))
    }

    /// Read lines until one equals `terminator` (ignoring surrounding
    /// whitespace) or input ends. The terminator line is not included.
    pub fn read_block(&mut self, terminator: &str) -> Result<String> {
        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.trim() == terminator {
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}
