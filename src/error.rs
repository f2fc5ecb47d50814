use std::fmt;
use thiserror::Error;

/// Which history stack an operation was working against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryDirection::Undo => write!(f, "undo"),
            HistoryDirection::Redo => write!(f, "redo"),
        }
    }
}

/// The edge a navigation or character operation ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Boundary {
    #[error("already at the first line")]
    FirstLine,
    #[error("already at the last line")]
    LastLine,
    #[error("already at the first character of the line")]
    FirstChar,
    #[error("already at the last character of the line")]
    LastChar,
    #[error("character index {index} is out of range for a line of length {len}")]
    CharIndex { index: usize, len: usize },
}

/// Why a buffer operation left the document untouched.
///
/// None of these are fatal: the buffer is unchanged and the caller only needs
/// to show the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("the document has no lines")]
    EmptyDocument,
    #[error(transparent)]
    OutOfRange(#[from] Boundary),
    #[error("nothing to {0}")]
    EmptyHistory(HistoryDirection),
    #[error("{direction} skipped: line {position} no longer matches the recorded edit")]
    StructuralDrift {
        position: usize,
        direction: HistoryDirection,
    },
}
