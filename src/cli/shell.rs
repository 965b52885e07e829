use std::{
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::info as output_info;

/// Presence of this variable switches the shell to reading commands from stdin.
pub const SCRIPT_ENV: &str = "ONBOARD_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::info!(?mode, "onboarding shell started");

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<StepHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(StepHelper::default()));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    context.show();
    output_info("Type `help` to list the commands for this step.");

    while context.running {
        if let Some(helper) = editor.helper_mut() {
            helper.refresh(context);
        }

        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);
                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Leaving onboarding.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Reads one command per stdin line; errors are reported and the script goes on.
fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match handle_line(context, trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let command = raw.to_lowercase();
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    tracing::debug!(command = %command, step = %context.step(), "dispatching command");

    let control = context.dispatch(&command, raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completion for the commands and field keys of the current step.
#[derive(Default)]
struct StepHelper {
    commands: Vec<String>,
    fields: Vec<&'static str>,
}

impl StepHelper {
    fn refresh(&mut self, context: &ShellContext) {
        let mut commands: Vec<String> = context
            .available_commands()
            .iter()
            .map(|entry| entry.name.to_string())
            .collect();
        commands.sort();
        commands.dedup();
        self.commands = commands;
        self.fields = context.field_keys();
    }

    fn candidates(&self, first_word: Option<&str>, needle: &str) -> Vec<Pair> {
        let pool: Vec<&str> = match first_word {
            None => self.commands.iter().map(String::as_str).collect(),
            Some("set") => self.fields.clone(),
            Some("help") => self.commands.iter().map(String::as_str).collect(),
            Some(_) => Vec::new(),
        };
        let needle = needle.to_ascii_lowercase();
        pool.into_iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect()
    }
}

impl Helper for StepHelper {}

impl Completer for StepHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let earlier: Vec<&str> = prefix[..start].split_whitespace().collect();
        let candidates = match earlier.as_slice() {
            [] => self.candidates(None, &prefix[start..]),
            [first] => {
                self.candidates(Some(first.to_ascii_lowercase().as_str()), &prefix[start..])
            }
            _ => Vec::new(),
        };
        Ok((start, candidates))
    }
}

impl Hinter for StepHelper {
    type Hint = String;
}

impl Highlighter for StepHelper {}

impl Validator for StepHelper {}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper() -> StepHelper {
        StepHelper {
            commands: vec!["select".into(), "set".into(), "show".into(), "submit".into()],
            fields: vec!["email", "password", "confirm-password"],
        }
    }

    fn names(pairs: Vec<Pair>) -> Vec<String> {
        pairs.into_iter().map(|pair| pair.replacement).collect()
    }

    #[test]
    fn quoted_values_stay_together() {
        let tokens = parse_command_line("set industry \"IT & Software\"").expect("tokens");
        assert_eq!(tokens, ["set", "industry", "IT & Software"]);
        let tokens = parse_command_line("set industry \"\"").expect("tokens");
        assert_eq!(tokens, ["set", "industry", ""]);
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        assert!(parse_command_line("set city \"Lisbon").is_err());
    }

    #[test]
    fn first_word_completes_commands() {
        assert_eq!(names(helper().candidates(None, "S")), ["select", "set", "show", "submit"]);
        assert_eq!(names(helper().candidates(None, "su")), ["submit"]);
    }

    #[test]
    fn set_completes_field_keys() {
        assert_eq!(names(helper().candidates(Some("set"), "p")), ["password"]);
        assert!(helper().candidates(Some("submit"), "").is_empty());
    }
}
