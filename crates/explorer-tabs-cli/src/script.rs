//! Line-oriented command scripts.
//!
//! Each non-empty line names one action on the tab strip. Everything after
//! a `#` is a comment.

use explorer_tabs_core::{Location, TabCommand, TabId};
use thiserror::Error;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAction {
    Command(TabCommand),
    /// Drag the tab at `from` over the strip until it sits at `to`.
    Drag { from: usize, to: usize },
    List,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' expects {expected}")]
    MissingArgument {
        line: usize,
        command: String,
        expected: &'static str,
    },

    #[error("line {line}: '{value}' is not a number")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: unexpected argument '{value}'")]
    UnexpectedArgument { line: usize, value: String },
}

/// Parses one line. Returns `None` for blank and comment-only lines.
///
/// # Errors
///
/// Returns a [`ScriptError`] naming `line` when the command is unknown or
/// its arguments do not fit.
pub fn parse_line(line: usize, text: &str) -> Result<Option<ScriptAction>, ScriptError> {
    let text = match text.find('#') {
        Some(comment) => &text[..comment],
        None => text,
    };
    let mut words = text.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let mut args = Args {
        line,
        command,
        words,
    };

    let action = match command {
        "new" => match args.rest() {
            Some(path) => ScriptAction::Command(TabCommand::NewTabAt(Location::new(path))),
            None => ScriptAction::Command(TabCommand::NewTab),
        },
        "open" => {
            let id = args.id()?;
            let path = args.rest().ok_or(ScriptError::MissingArgument {
                line,
                command: "open".to_string(),
                expected: "a path",
            })?;
            ScriptAction::Command(TabCommand::Navigate(id, Location::new(path)))
        }
        "close" => ScriptAction::Command(TabCommand::Close(args.id()?)),
        "close-selected" => ScriptAction::Command(TabCommand::CloseSelected),
        "close-others" => ScriptAction::Command(TabCommand::CloseOthers(args.id()?)),
        "close-right" => ScriptAction::Command(TabCommand::CloseToRight(args.id()?)),
        "select" => ScriptAction::Command(TabCommand::Select(args.id()?)),
        "index" => ScriptAction::Command(TabCommand::SelectIndex(args.number("an index")?)),
        "next" => ScriptAction::Command(TabCommand::Next),
        "prev" => ScriptAction::Command(TabCommand::Previous),
        "dup" => ScriptAction::Command(TabCommand::Duplicate(args.id()?)),
        "parent" => ScriptAction::Command(TabCommand::OpenParentInNewTab(args.id()?)),
        "refresh" => ScriptAction::Command(TabCommand::Refresh(args.id()?)),
        "refresh-all" => ScriptAction::Command(TabCommand::RefreshAll),
        "rename" => {
            let id = args.id()?;
            ScriptAction::Command(TabCommand::Rename(id, args.rest()))
        }
        "lock" => ScriptAction::Command(TabCommand::Lock(args.id()?)),
        "lock-address" => ScriptAction::Command(TabCommand::LockAddress(args.id()?)),
        "reopen" => ScriptAction::Command(TabCommand::ReopenClosed),
        "move" => {
            let id = args.id()?;
            ScriptAction::Command(TabCommand::Move(id, args.number("an index")?))
        }
        "drag" => {
            let from = args.number("two indices")?;
            let to = args.number("two indices")?;
            ScriptAction::Drag { from, to }
        }
        "list" => ScriptAction::List,
        other => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };

    args.finish()?;
    Ok(Some(action))
}

/// Parses a whole script, stopping at the first bad line.
///
/// # Errors
///
/// Returns the [`ScriptError`] of the first line that fails to parse.
pub fn parse_script(text: &str) -> Result<Vec<ScriptAction>, ScriptError> {
    let mut actions = Vec::new();
    for (number, line) in text.lines().enumerate() {
        if let Some(action) = parse_line(number + 1, line)? {
            actions.push(action);
        }
    }
    Ok(actions)
}

struct Args<'a> {
    line: usize,
    command: &'a str,
    words: std::str::SplitWhitespace<'a>,
}

impl Args<'_> {
    fn number(&mut self, expected: &'static str) -> Result<usize, ScriptError> {
        let line = self.line;
        let word = self
            .words
            .next()
            .ok_or_else(|| ScriptError::MissingArgument {
                line,
                command: self.command.to_string(),
                expected,
            })?;
        word.parse().map_err(|_| ScriptError::InvalidNumber {
            line,
            value: word.to_string(),
        })
    }

    fn id(&mut self) -> Result<TabId, ScriptError> {
        let id = self.number("a tab id")?;
        TabId::try_from(id).map_err(|_| ScriptError::InvalidNumber {
            line: self.line,
            value: id.to_string(),
        })
    }

    /// The remaining words joined by single spaces.
    fn rest(&mut self) -> Option<String> {
        let rest = self.words.by_ref().collect::<Vec<_>>().join(" ");
        (!rest.is_empty()).then_some(rest)
    }

    fn finish(mut self) -> Result<(), ScriptError> {
        match self.words.next() {
            Some(value) => Err(ScriptError::UnexpectedArgument {
                line: self.line,
                value: value.to_string(),
            }),
            None => Ok(()),
        }
    }
}
