use super::lines::{char_count, LineId, LineStore, Removed};
use super::status::Status;
use crate::error::{Boundary, EditError};

/// Current line and character offset.
///
/// The offset can sit outside the line (after a deletion or on an empty
/// line). Such an offset means "no valid character" and the whole line is
/// highlighted instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    line: Option<LineId>,
    char_index: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self) -> Option<LineId> {
        self.line
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn place(&mut self, line: LineId, char_index: usize) {
        self.line = Some(line);
        self.char_index = char_index;
    }

    pub fn set_char_index(&mut self, char_index: usize) {
        self.char_index = char_index;
    }

    pub fn clear(&mut self) {
        self.line = None;
        self.char_index = 0;
    }

    /// The line under the cursor, if it is still live.
    pub fn current(&self, store: &LineStore) -> Result<LineId, EditError> {
        self.line
            .filter(|&id| store.contains(id))
            .ok_or(EditError::EmptyDocument)
    }

    /// The cursor line and offset, only if the offset names a character.
    pub fn target(&self, store: &LineStore) -> Result<(LineId, usize), EditError> {
        let id = self.current(store)?;
        let len = store.get(id).map(char_count).unwrap_or(0);
        if self.char_index >= len {
            return Err(Boundary::CharIndex {
                index: self.char_index,
                len,
            }
            .into());
        }
        Ok((id, self.char_index))
    }

    pub fn move_next_line(&mut self, store: &LineStore) -> Result<Status, EditError> {
        let id = self.current(store)?;
        let next = store.next(id).ok_or(Boundary::LastLine)?;
        self.place(next, 0);
        Ok(Status::MovedNextLine)
    }

    pub fn move_prev_line(&mut self, store: &LineStore) -> Result<Status, EditError> {
        let id = self.current(store)?;
        let prev = store.prev(id).ok_or(Boundary::FirstLine)?;
        self.place(prev, 0);
        Ok(Status::MovedPrevLine)
    }

    pub fn move_next_char(&mut self, store: &LineStore) -> Result<Status, EditError> {
        let id = self.current(store)?;
        let len = store.get(id).map(char_count).unwrap_or(0);
        if self.char_index + 1 >= len {
            return Err(Boundary::LastChar.into());
        }
        self.char_index += 1;
        Ok(Status::MovedNextChar)
    }

    pub fn move_prev_char(&mut self, store: &LineStore) -> Result<Status, EditError> {
        self.current(store)?;
        if self.char_index == 0 {
            return Err(Boundary::FirstChar.into());
        }
        self.char_index -= 1;
        Ok(Status::MovedPrevChar)
    }

    /// Retargets the cursor after `removed` was unlinked from `store`.
    ///
    /// Successor first (offset 0), then predecessor (offset at its last
    /// char), otherwise the document is empty and the cursor is cleared.
    pub fn repair(&mut self, store: &LineStore, removed: &Removed) {
        if self.line != Some(removed.id) {
            return;
        }
        if let Some(next) = removed.next.filter(|&id| store.contains(id)) {
            self.place(next, 0);
        } else if let Some(prev) = removed.prev.filter(|&id| store.contains(id)) {
            let len = store.get(prev).map(char_count).unwrap_or(0);
            self.place(prev, len.saturating_sub(1));
        } else {
            self.clear();
        }
    }
}
