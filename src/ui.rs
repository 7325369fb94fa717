// UI layer: small terminal helpers shared by the binary and the workflows.
// Prompts use `dialoguer` when stdin is a terminal and fall back to a
// plain line read otherwise, so arguments can be piped in.

use crate::error::{FaceError, Result};
use crossterm::style::Stylize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, IsTerminal};
use std::time::Duration;

/// Return `value` if it was given on the command line, otherwise ask for it.
pub fn arg_or_prompt(value: Option<String>, prompt: &str, what: &'static str) -> Result<String> {
    if let Some(v) = value {
        return Ok(v);
    }
    let stdin = std::io::stdin();
    let line = if stdin.is_terminal() {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| FaceError::io("<stdin>", e))?
    } else {
        read_line(stdin.lock())?
    };
    if line.is_empty() {
        return Err(FaceError::EmptyArgument(what));
    }
    Ok(line)
}

fn read_line(mut input: impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .map_err(|e| FaceError::io("<stdin>", e))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Spinner on stderr; hidden automatically when stderr is not a terminal.
pub fn spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Printed in place of a result when a tolerated call fails.
pub const ERROR_MARKER: &str = " - error!";

/// Final error line of a failed command, written to stderr.
pub fn print_fatal(err: &anyhow::Error) {
    let label = if std::io::stderr().is_terminal() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    };
    eprintln!("{label} {err:#}");
}
