use serde::{Deserialize, Serialize};

/// Undo depth used unless a limit is configured. 0 keeps every edit.
pub const DEFAULT_HISTORY_LIMIT: usize = 0;

/// A reversible edit.
///
/// `position` is the line index at the time the edit was recorded and is
/// looked up again when the action is replayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    InsertLine {
        position: usize,
        text: String,
    },
    DeleteLine {
        position: usize,
        text: String,
    },
    /// No buffer operation records this yet, but it replays like the others.
    InsertChar {
        position: usize,
        index: usize,
        ch: char,
    },
    DeleteChar {
        position: usize,
        index: usize,
        ch: char,
    },
    ReplaceChar {
        position: usize,
        index: usize,
        old: char,
        new: char,
    },
}

impl Action {
    pub fn position(&self) -> usize {
        match self {
            Action::InsertLine { position, .. }
            | Action::DeleteLine { position, .. }
            | Action::InsertChar { position, .. }
            | Action::DeleteChar { position, .. }
            | Action::ReplaceChar { position, .. } => *position,
        }
    }
}

/// Undo and redo stacks.
#[derive(Debug, Serialize)]
pub struct ActionLog {
    undo: Vec<Action>,
    redo: Vec<Action>,
    /// Maximum undo depth; 0 means unbounded.
    max_entries: usize,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_entries,
        }
    }

    /// Records a fresh user edit. Anything that was undone is no longer
    /// reachable afterwards.
    pub fn record(&mut self, action: Action) {
        self.redo.clear();
        self.push_undo(action);
    }

    pub fn pop_undo(&mut self) -> Option<Action> {
        self.undo.pop()
    }

    pub fn pop_redo(&mut self) -> Option<Action> {
        self.redo.pop()
    }

    pub fn push_undo(&mut self, action: Action) {
        self.undo.push(action);

        // Drop the oldest edits once over the limit
        if self.max_entries > 0 && self.undo.len() > self.max_entries {
            let excess = self.undo.len() - self.max_entries;
            self.undo.drain(..excess);
        }
    }

    pub fn push_redo(&mut self, action: Action) {
        self.redo.push(action);
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Undo entries, most recent first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &Action> {
        self.undo.iter().rev()
    }

    /// Redo entries, most recent first.
    pub fn redo_entries(&self) -> impl Iterator<Item = &Action> {
        self.redo.iter().rev()
    }
}
