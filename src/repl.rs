//! Line-oriented command loop around a [`TextBuffer`].
//!
//! Each input line is one command. Menu numbers `1`-`13` work as aliases for
//! the named commands.

use anyhow::Result;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::debug;

use crate::editor::{Status, TextBuffer};
use crate::error::EditError;

pub const HELP: &str = "\
Commands:
  insert <pos> <text>   (i, 1)   insert a line at <pos>
  x                     (2)      delete the character under the cursor
  r <c>                 (3)      replace the character under the cursor
  j / down              (4)      next line
  k / up                (5)      previous line
  l / right             (6)      next character
  h / left              (7)      previous character
  / <keyword>           (8)      highlight <keyword>
  u / undo              (9)      undo
  redo / U              (10)     redo
  p / print             (11)     show the document
  dd / delete-line      (12)     delete the current line
  history                        show the undo and redo stacks and limit as JSON
  q / quit              (13)     exit";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Invalid syntax: {0}")]
    InvalidSyntax(String),
    #[error("Empty command")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert { position: usize, text: String },
    DeleteChar,
    Replace(char),
    NextLine,
    PrevLine,
    NextChar,
    PrevChar,
    Search(String),
    Undo,
    Redo,
    Print,
    DeleteLine,
    History,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Arguments keep their inner and trailing
    /// whitespace so lines like `"kopi, "` survive intact.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let line = input.trim_end_matches(['\n', '\r']).trim_start();
        if line.trim().is_empty() {
            return Err(CommandError::Empty);
        }

        let (head, rest) = line.split_once(' ').unwrap_or((line, ""));
        let no_args = |command: Command| {
            if rest.trim().is_empty() {
                Ok(command)
            } else {
                Err(CommandError::InvalidSyntax(format!(
                    "`{}` takes no arguments",
                    head
                )))
            }
        };

        match head {
            "i" | "insert" | "1" => parse_insert(rest),
            "x" | "delete-char" | "2" => no_args(Command::DeleteChar),
            "r" | "replace" | "3" => {
                // Surrounding blanks are ignored unless the argument is all blank
                let arg = match rest.trim() {
                    "" => rest,
                    trimmed => trimmed,
                };
                let mut chars = arg.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(Command::Replace(ch)),
                    _ => Err(CommandError::InvalidSyntax(
                        "replace takes exactly one character".into(),
                    )),
                }
            }
            "j" | "down" | "4" => no_args(Command::NextLine),
            "k" | "up" | "5" => no_args(Command::PrevLine),
            "l" | "right" | "6" => no_args(Command::NextChar),
            "h" | "left" | "7" => no_args(Command::PrevChar),
            "/" | "search" | "8" => {
                if rest.is_empty() {
                    Err(CommandError::InvalidSyntax(
                        "search requires a keyword".into(),
                    ))
                } else {
                    Ok(Command::Search(rest.to_string()))
                }
            }
            "u" | "undo" | "9" => no_args(Command::Undo),
            "U" | "redo" | "10" => no_args(Command::Redo),
            "p" | "print" | "11" => no_args(Command::Print),
            "dd" | "delete-line" | "12" => no_args(Command::DeleteLine),
            "history" => no_args(Command::History),
            "?" | "help" => no_args(Command::Help),
            "q" | "quit" | "13" => no_args(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_insert(rest: &str) -> Result<Command, CommandError> {
    let rest = rest.trim_start();
    let (position, text) = rest.split_once(' ').unwrap_or((rest, ""));
    if position.is_empty() {
        return Err(CommandError::InvalidSyntax(
            "insert requires a position".into(),
        ));
    }
    let position = position.parse::<usize>().map_err(|_| {
        CommandError::InvalidSyntax(format!(
            "position must be a non-negative number, got `{}`",
            position
        ))
    })?;
    Ok(Command::Insert {
        position,
        text: text.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs one command and writes its status and the resulting view.
pub fn execute<W: Write>(
    buffer: &mut TextBuffer,
    command: Command,
    out: &mut W,
) -> Result<Flow> {
    debug!(?command, "execute");
    let outcome: Result<Status, EditError> = match command {
        Command::Insert { position, text } => buffer.insert_and_track(position, text),
        Command::DeleteChar => buffer.delete_current_char(),
        Command::Replace(ch) => buffer.replace_current_char(ch),
        Command::NextLine => buffer.move_next_line(),
        Command::PrevLine => buffer.move_prev_line(),
        Command::NextChar => buffer.move_next_char(),
        Command::PrevChar => buffer.move_prev_char(),
        Command::Undo => buffer.undo(),
        Command::Redo => buffer.redo(),
        Command::DeleteLine => buffer.delete_current_line(),
        Command::Search(keyword) => {
            let hits = buffer.search_and_highlight(&keyword);
            writeln!(out, "{}", hits.view)?;
            writeln!(out, "{}", hits.status())?;
            return Ok(Flow::Continue);
        }
        Command::Print => {
            writeln!(out, "{}", buffer.render())?;
            return Ok(Flow::Continue);
        }
        Command::History => {
            writeln!(out, "{}", serde_json::to_string_pretty(buffer.history())?)?;
            return Ok(Flow::Continue);
        }
        Command::Help => {
            writeln!(out, "{}", HELP)?;
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    };

    match outcome {
        Ok(status) => writeln!(out, "{}", status)?,
        Err(err) => writeln!(out, "{}", err)?,
    }
    writeln!(out, "{}", buffer.render())?;
    Ok(Flow::Continue)
}

/// Reads commands from `input` until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    buffer: &mut TextBuffer,
    input: R,
    mut out: W,
    prompt: &str,
) -> Result<()> {
    writeln!(out, "{}", buffer.render())?;
    let mut lines = input.lines();
    loop {
        write!(out, "{}", prompt)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        let line = line?;

        match Command::parse(&line) {
            Ok(command) => {
                if execute(buffer, command, &mut out)? == Flow::Quit {
                    break;
                }
            }
            Err(CommandError::Empty) => {}
            Err(err) => writeln!(out, "{}. Type `help` for a list of commands.", err)?,
        }
    }
    Ok(())
}
