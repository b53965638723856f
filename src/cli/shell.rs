use std::io::{self, BufRead};

use rustyline::{history::DefaultHistory, Editor};
use shell_words::split;

use crate::errors::CliError;

use super::context::{CliMode, ShellContext};
use super::output;

/// Entry point for the CLI: interactive shell by default, line-per-command
/// script mode when `FINANCE_CORE_CLI_SCRIPT` is set.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os("FINANCE_CORE_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor: Editor<(), DefaultHistory> = Editor::new()?;
    output::info("Finance Core shell. Type `help` for commands.");

    while context.running {
        match editor.readline("finance> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                handle_line(context, trimmed);
            }
            Err(rustyline::error::ReadlineError::Interrupted) => continue,
            Err(rustyline::error::ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        handle_line(context, line.trim());
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("could not parse input: {err}"));
            return;
        }
    };
    let Some((command, rest)) = tokens.split_first() else {
        return;
    };
    let command = command.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    if let Err(err) = context.dispatch(&command, &args) {
        output::error(err);
    }
}
