use std::fmt;

use super::history::Action;

/// What a successful buffer operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Inserted { position: usize },
    DeletedChar { ch: char, index: usize },
    ReplacedChar { old: char, new: char, index: usize },
    DeletedLine { position: usize },
    MovedNextLine,
    MovedPrevLine,
    MovedNextChar,
    MovedPrevChar,
    Undone(Action),
    Redone(Action),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Inserted { position } => write!(f, "Inserted line {}", position),
            Status::DeletedChar { ch, index } => {
                write!(f, "Deleted '{}' at position {}", ch, index)
            }
            Status::ReplacedChar { old, new, index } => {
                write!(f, "Replaced '{}' with '{}' at position {}", old, new, index)
            }
            Status::DeletedLine { position } => write!(f, "Deleted line {}", position),
            Status::MovedNextLine => write!(f, "Moved to the next line"),
            Status::MovedPrevLine => write!(f, "Moved to the previous line"),
            Status::MovedNextChar => write!(f, "Moved to the next character"),
            Status::MovedPrevChar => write!(f, "Moved to the previous character"),
            Status::Undone(action) => match action {
                Action::InsertLine { position, .. } => {
                    write!(f, "Undo: removed inserted line {}", position)
                }
                Action::DeleteLine { position, .. } => {
                    write!(f, "Undo: restored deleted line {}", position)
                }
                Action::InsertChar { ch, .. } => write!(f, "Undo: removed inserted '{}'", ch),
                Action::DeleteChar { ch, .. } => write!(f, "Undo: restored deleted '{}'", ch),
                Action::ReplaceChar { old, .. } => write!(f, "Undo: changed back to '{}'", old),
            },
            Status::Redone(action) => match action {
                Action::InsertLine { position, .. } => {
                    write!(f, "Redo: inserted line {} again", position)
                }
                Action::DeleteLine { position, .. } => {
                    write!(f, "Redo: deleted line {} again", position)
                }
                Action::InsertChar { ch, .. } => write!(f, "Redo: inserted '{}' again", ch),
                Action::DeleteChar { ch, .. } => write!(f, "Redo: deleted '{}' again", ch),
                Action::ReplaceChar { new, .. } => write!(f, "Redo: changed to '{}' again", new),
            },
        }
    }
}
