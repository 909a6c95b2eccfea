//! Line-oriented terminal host for the task screen.

use crate::types::TaskList;
use crate::view::{Screen, Surface};
use std::io::{self, Write};
use std::str::FromStr;
use thiserror::Error;

/// Renders the list as numbered rows on any writer
#[derive(Debug)]
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    /// Creates a surface writing to `out`
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Write a line that is not part of the list (prompts, messages)
    ///
    /// # Errors
    ///
    /// Propagates write errors.
    pub fn message(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    /// The underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    type Error = io::Error;

    fn render(&mut self, tasks: &TaskList) -> io::Result<()> {
        if tasks.is_empty() {
            writeln!(self.out, "(no tasks)")?;
        }
        for (n, task) in tasks.iter().enumerate() {
            let mark = if task.completed { 'x' } else { ' ' };
            writeln!(self.out, "{}. [{mark}] {}", n + 1, task.title)?;
        }
        self.out.flush()
    }
}

/// Input lines the terminal host understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a title to the add input
    Add(String),
    /// Toggle the row at a one-based position
    Toggle(usize),
    /// Delete the row at a one-based position
    Delete(usize),
    /// Render the list again
    List,
    /// Show usage
    Help,
    /// Leave
    Quit,
}

/// Usage text printed for `help`
pub const HELP: &str = "\
commands:
  add <title>   add a task            (a)
  done <n>      complete task n       (toggle, d)
  rm <n>        delete task n         (delete, x)
  list          show tasks again      (ls)
  help          this text             (?)
  quit          leave                 (exit, q)";

/// Lines the terminal host could not interpret
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Nothing matched the first word
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    /// The command needs an argument
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    /// The argument is not a row number
    #[error("'{0}' is not a row number")]
    InvalidRow(String),
}

fn row_number(arg: &str) -> Result<usize, CommandError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidRow(arg.to_string())),
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word.to_ascii_lowercase().as_str() {
            "add" | "a" => Ok(Self::Add(rest.to_string())),
            "done" | "toggle" | "d" if rest.is_empty() => Err(CommandError::MissingArgument("done")),
            "done" | "toggle" | "d" => row_number(rest).map(Self::Toggle),
            "rm" | "delete" | "x" if rest.is_empty() => Err(CommandError::MissingArgument("rm")),
            "rm" | "delete" | "x" => row_number(rest).map(Self::Delete),
            "list" | "ls" | "" => Ok(Self::List),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Carry out one command against a terminal screen
///
/// Row numbers are one-based; a row that is not on screen is reported, as is
/// a title the add input refuses. Returns `false` once the command is
/// [`Command::Quit`].
///
/// # Errors
///
/// Propagates write errors from the surface.
pub fn apply<W: Write>(screen: &mut Screen<TerminalSurface<W>>, command: Command) -> io::Result<bool> {
    match command {
        Command::Add(title) => {
            let submitted = screen.add_input().submit(&title);
            if let Err(error) = submitted {
                tracing::debug!(%error, "Title refused");
                screen.surface_mut().message(error)?;
            }
        },
        Command::Toggle(n) => {
            let found = n
                .checked_sub(1)
                .and_then(|index| screen.row_at(index))
                .map(|mut row| row.toggle())
                .is_some();
            if !found {
                screen.surface_mut().message(format!("no task {n}"))?;
            }
        },
        Command::Delete(n) => {
            let found = n
                .checked_sub(1)
                .and_then(|index| screen.row_at(index))
                .map(|mut row| row.delete())
                .is_some();
            if !found {
                screen.surface_mut().message(format!("no task {n}"))?;
            }
        },
        Command::List => screen.redraw()?,
        Command::Help => screen.surface_mut().message(HELP)?,
        Command::Quit => return Ok(false),
    }

    screen.refresh()?;
    Ok(true)
}
