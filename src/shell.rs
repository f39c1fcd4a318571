//! Line-oriented front end.
//!
//! Reads one command per line and prints the outcome, which makes the store
//! scriptable and usable without a terminal UI.

use std::io::{BufRead, Write};

use anyhow::Result;
use colored::Colorize;
use thiserror::Error;
use tracing::debug;

use crate::{
    commands::{LibraryCommand, selection_from_row},
    store::LibraryStore,
    table::render_table,
};

/// Help text printed by the `help` command
pub const HELP: &str = "\
Commands:
  list [--json]            show every book
  add <title> | <author>   add a book
  borrow <row>             borrow the book in row <row>
  return <row>             return the book in row <row>
  help                     show this help
  quit                     leave the program";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Print the book table
    List {
        /// Print JSON instead of a text table
        json: bool,
    },
    /// Apply a store command
    Run(LibraryCommand),
    /// Print the help text
    Help,
    /// Leave the shell
    Quit,
}

/// Problems understanding a shell line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The command word is not known
    #[error("unknown command `{0}`, type `help` for a list of commands")]
    UnknownCommand(String),
    /// The row argument is not an integer
    #[error("`{0}` is not a row number")]
    InvalidRow(String),
    /// `list` got an argument other than `--json`
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
}

/// Parse one input line; blank lines yield `None`
///
/// # Errors
///
/// Returns a `ParseError` for unknown commands or malformed arguments.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => match rest {
            "" => ShellCommand::List { json: false },
            "--json" => ShellCommand::List { json: true },
            other => return Err(ParseError::UnexpectedArgument(other.to_string())),
        },
        "add" => {
            let (title, author) = rest.split_once('|').unwrap_or((rest, ""));
            ShellCommand::Run(LibraryCommand::Add {
                title: title.to_string(),
                author: author.to_string(),
            })
        }
        "borrow" => ShellCommand::Run(LibraryCommand::Borrow { row: parse_row(rest)? }),
        "return" => ShellCommand::Run(LibraryCommand::Return { row: parse_row(rest)? }),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => return Err(ParseError::UnknownCommand(word.to_string())),
    };

    Ok(Some(command))
}

/// An absent or negative row means nothing is selected
fn parse_row(arg: &str) -> Result<Option<usize>, ParseError> {
    if arg.is_empty() {
        return Ok(None);
    }
    arg.parse::<i64>()
        .map(selection_from_row)
        .map_err(|_| ParseError::InvalidRow(arg.to_string()))
}

/// Interactive command loop over a store it owns
#[derive(Debug)]
pub struct Shell {
    /// The inventory being edited
    store: LibraryStore,
    /// Print a prompt and use colors
    interactive: bool,
}

impl Shell {
    /// Create a shell around `store`
    #[must_use]
    pub fn new(store: LibraryStore, interactive: bool) -> Self {
        Self { store, interactive }
    }

    /// The inventory being edited
    #[must_use]
    pub fn store(&self) -> &LibraryStore {
        &self.store
    }

    /// Read commands from `input` until `quit` or end of input
    ///
    /// Library and parse errors are reported on `output` and never end the
    /// loop.
    ///
    /// # Errors
    ///
    /// Fails only if reading `input` or writing `output` fails.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        writeln!(output, "{}", render_table(&self.store.list_all()))?;
        self.prompt(&mut output)?;

        for line in input.lines() {
            let line = line?;
            debug!(line = line.as_str(), "shell input");

            match parse_line(&line) {
                Ok(Some(ShellCommand::Quit)) => break,
                Ok(Some(command)) => self.dispatch(command, &mut output)?,
                Ok(None) => {}
                Err(err) => self.report("Command Error", &err.to_string(), &mut output)?,
            }
            self.prompt(&mut output)?;
        }

        Ok(())
    }

    /// Carry out a single parsed command
    fn dispatch(&mut self, command: ShellCommand, output: &mut impl Write) -> Result<()> {
        match command {
            ShellCommand::List { json: false } => {
                write!(output, "{}", render_table(&self.store.list_all()))?;
            }
            ShellCommand::List { json: true } => {
                serde_json::to_writer_pretty(&mut *output, &self.store.list_all())?;
                writeln!(output)?;
            }
            ShellCommand::Run(command) => match command.execute(&mut self.store) {
                Ok(outcome) => {
                    let message = if self.interactive {
                        outcome.message.green().to_string()
                    } else {
                        outcome.message
                    };
                    writeln!(output, "{message}")?;
                }
                Err(err) => self.report(err.caption(), &err.user_message(), output)?,
            },
            ShellCommand::Help => writeln!(output, "{HELP}")?,
            ShellCommand::Quit => {}
        }
        Ok(())
    }

    /// Print an error line
    fn report(&self, caption: &str, message: &str, output: &mut impl Write) -> Result<()> {
        if self.interactive {
            writeln!(output, "{}: {message}", caption.red().bold())?;
        } else {
            writeln!(output, "{caption}: {message}")?;
        }
        Ok(())
    }

    /// Print the input prompt when attached to a terminal
    fn prompt(&self, output: &mut impl Write) -> Result<()> {
        if self.interactive {
            write!(output, "> ")?;
            output.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn run_script(script: &str) -> (Shell, String) {
        let mut shell = Shell::new(LibraryStore::with_seed_books(), false);
        let mut output = Vec::new();
        let result = shell.run(script.as_bytes(), &mut output);
        assert!(result.is_ok());
        (shell, String::from_utf8_lossy(&output).into_owned())
    }

    #[rstest]
    #[case("list", ShellCommand::List { json: false })]
    #[case("  LS  ", ShellCommand::List { json: false })]
    #[case("list --json", ShellCommand::List { json: true })]
    #[case("help", ShellCommand::Help)]
    #[case("exit", ShellCommand::Quit)]
    #[case("borrow 2", ShellCommand::Run(LibraryCommand::Borrow { row: Some(2) }))]
    #[case("borrow -1", ShellCommand::Run(LibraryCommand::Borrow { row: None }))]
    #[case("return", ShellCommand::Run(LibraryCommand::Return { row: None }))]
    fn parses_commands(#[case] line: &str, #[case] expected: ShellCommand) {
        assert_eq!(parse_line(line), Ok(Some(expected)));
    }

    #[test]
    fn add_splits_on_first_bar() {
        let parsed = parse_line("add Dune | Frank Herbert");
        assert_eq!(
            parsed,
            Ok(Some(ShellCommand::Run(LibraryCommand::Add {
                title: "Dune ".to_string(),
                author: " Frank Herbert".to_string(),
            })))
        );

        let parsed = parse_line("add Dune");
        assert!(matches!(
            parsed,
            Ok(Some(ShellCommand::Run(LibraryCommand::Add { ref author, .. }))) if author.is_empty()
        ));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("delete 1"), Err(ParseError::UnknownCommand("delete".to_string())));
        assert_eq!(parse_line("borrow two"), Err(ParseError::InvalidRow("two".to_string())));
        assert_eq!(parse_line("list all"), Err(ParseError::UnexpectedArgument("all".to_string())));
    }

    #[test]
    fn script_borrows_and_returns() {
        let (shell, transcript) = run_script("borrow 0\nborrow 0\nreturn 0\nreturn 0\n");

        let lines: Vec<&str> = transcript.lines().skip(6).collect();
        assert_eq!(
            lines,
            vec![
                "Borrowed \"To Kill A Mockingbird\"",
                "Borrow Error: Book is already borrowed.",
                "Returned \"To Kill A Mockingbird\"",
                "Return Error: Book is not currently borrowed.",
            ]
        );
        assert_eq!(shell.store().list_all().first().map(|r| r.status.as_str()), Some("Available"));
    }

    #[test]
    fn script_reports_errors_and_keeps_going() {
        let (shell, transcript) =
            run_script("add | nobody\nborrow\nborrow 9\nfrobnicate\nadd Dune | Frank Herbert\n");

        let lines: Vec<&str> = transcript.lines().skip(6).collect();
        assert_eq!(
            lines,
            vec![
                "Input Error: Please enter both title and author.",
                "Selection Error: Please select a book to borrow.",
                "Selection Error: No book at row 9.",
                "Command Error: unknown command `frobnicate`, type `help` for a list of commands",
                "Added \"Dune\" by Frank Herbert",
            ]
        );
        assert_eq!(shell.store().len(), 4);
    }

    #[test]
    fn quit_stops_reading() {
        let (shell, _) = run_script("quit\nadd Dune | Frank Herbert\n");
        assert_eq!(shell.store().len(), 3);
    }

    #[test]
    fn list_json_prints_rows() {
        let (_, transcript) = run_script("list --json\n");
        let json_start = transcript.find('[').unwrap_or_default();
        let rows: Vec<serde_json::Value> =
            serde_json::from_str(transcript.get(json_start..).unwrap_or_default())
                .unwrap_or_default();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.first().and_then(|r| r.get("status")), Some(&serde_json::json!("Available")));
    }
}
