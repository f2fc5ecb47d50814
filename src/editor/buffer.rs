use tracing::{debug, warn};

use super::cursor::Cursor;
use super::history::{Action, ActionLog};
use super::lines::{self, LineStore};
use super::render::{find_first, Markers, SearchHits};
use super::status::Status;
use crate::error::{EditError, HistoryDirection};

/// Whether a mutating primitive pushes its inverse onto the undo stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recording {
    On,
    Off,
}

#[derive(Debug)]
pub struct TextBuffer {
    store: LineStore,
    cursor: Cursor,
    history: ActionLog,
    markers: Markers,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            store: LineStore::new(),
            cursor: Cursor::new(),
            history: ActionLog::new(),
            markers: Markers::default(),
        }
    }

    /// Starts a document with `lines` already in place. The initial lines
    /// are not part of the undo history.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = LineStore::from_lines(lines);
        let mut cursor = Cursor::new();
        if let Some(first) = store.first() {
            cursor.place(first, 0);
        }
        Self {
            store,
            cursor,
            ..Self::new()
        }
    }

    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = ActionLog::with_limit(limit);
        self
    }

    // Inspection

    pub fn line_count(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn line(&self, position: usize) -> Option<&str> {
        self.store.resolve(position).and_then(|id| self.store.get(id))
    }

    pub fn lines(&self) -> Vec<String> {
        self.store.iter().map(|(_, text)| text.to_string()).collect()
    }

    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    /// `(line, char)` of the cursor, or `None` for an empty document.
    pub fn cursor_position(&self) -> Option<(usize, usize)> {
        let id = self.cursor.current(&self.store).ok()?;
        let line = self.store.position_of(id)?;
        Some((line, self.cursor.char_index()))
    }

    pub fn history(&self) -> &ActionLog {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // Rendering

    /// The document with the cursor position highlighted.
    pub fn render(&self) -> String {
        let cursor = self.cursor.line();
        let index = self.cursor.char_index();
        self.store
            .iter()
            .map(|(id, text)| {
                if Some(id) == cursor {
                    self.markers.cursor_line(text, index)
                } else {
                    text.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The document with the first occurrence of `keyword` highlighted on
    /// every line that has one. The cursor is not moved.
    pub fn search_and_highlight(&self, keyword: &str) -> SearchHits {
        let mut lines = Vec::new();
        let view = self
            .store
            .iter()
            .enumerate()
            .map(|(position, (_, text))| match find_first(text, keyword) {
                Some((start, end)) => {
                    lines.push(position);
                    self.markers.wrap_range(text, start, end)
                }
                None => text.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n");

        debug!(keyword, hits = lines.len(), "search");
        SearchHits {
            keyword: keyword.to_string(),
            view,
            lines,
        }
    }

    // Navigation

    pub fn move_next_line(&mut self) -> Result<Status, EditError> {
        self.cursor.move_next_line(&self.store)
    }

    pub fn move_prev_line(&mut self) -> Result<Status, EditError> {
        self.cursor.move_prev_line(&self.store)
    }

    pub fn move_next_char(&mut self) -> Result<Status, EditError> {
        self.cursor.move_next_char(&self.store)
    }

    pub fn move_prev_char(&mut self) -> Result<Status, EditError> {
        self.cursor.move_prev_char(&self.store)
    }

    // Tracked edits

    pub fn insert_and_track(
        &mut self,
        position: usize,
        text: impl Into<String>,
    ) -> Result<Status, EditError> {
        let landed = self.insert_line(position, text.into(), Recording::On);
        Ok(Status::Inserted { position: landed })
    }

    pub fn delete_current_char(&mut self) -> Result<Status, EditError> {
        let (id, index) = self.cursor.target(&self.store)?;
        let position = self.store.position_of(id).ok_or(EditError::EmptyDocument)?;
        let ch = self
            .delete_char_at(position, index, Recording::On)
            .ok_or(EditError::EmptyDocument)?;

        let len = self.store.get(id).map(lines::char_count).unwrap_or(0);
        if index >= len && index > 0 {
            self.cursor.set_char_index(index - 1);
        }
        Ok(Status::DeletedChar { ch, index })
    }

    pub fn replace_current_char(&mut self, new: char) -> Result<Status, EditError> {
        let (id, index) = self.cursor.target(&self.store)?;
        let position = self.store.position_of(id).ok_or(EditError::EmptyDocument)?;
        let old = self
            .replace_char_at(position, index, new, Recording::On)
            .ok_or(EditError::EmptyDocument)?;
        Ok(Status::ReplacedChar { old, new, index })
    }

    /// Deletes the line under the cursor.
    ///
    /// The action is recorded here, from the cursor line, and the delete
    /// primitive runs with recording off.
    pub fn delete_current_line(&mut self) -> Result<Status, EditError> {
        let id = self.cursor.current(&self.store)?;
        let position = self.store.position_of(id).ok_or(EditError::EmptyDocument)?;
        let text = self.store.get(id).unwrap_or_default().to_string();

        self.record(Recording::On, Action::DeleteLine { position, text });
        self.delete_line(position, Recording::Off);
        Ok(Status::DeletedLine { position })
    }

    // History

    pub fn undo(&mut self) -> Result<Status, EditError> {
        let action = self
            .history
            .pop_undo()
            .ok_or(EditError::EmptyHistory(HistoryDirection::Undo))?;

        if !self.apply_undo(&action) {
            warn!(?action, "undo no longer applies, dropping it");
            return Err(EditError::StructuralDrift {
                position: action.position(),
                direction: HistoryDirection::Undo,
            });
        }

        debug!(?action, "undo");
        self.history.push_redo(action.clone());
        Ok(Status::Undone(action))
    }

    pub fn redo(&mut self) -> Result<Status, EditError> {
        let action = self
            .history
            .pop_redo()
            .ok_or(EditError::EmptyHistory(HistoryDirection::Redo))?;

        if !self.apply_redo(&action) {
            warn!(?action, "redo no longer applies, dropping it");
            return Err(EditError::StructuralDrift {
                position: action.position(),
                direction: HistoryDirection::Redo,
            });
        }

        debug!(?action, "redo");
        self.history.push_undo(action.clone());
        Ok(Status::Redone(action))
    }

    fn apply_undo(&mut self, action: &Action) -> bool {
        match action {
            Action::InsertLine { position, .. } => {
                self.delete_line(*position, Recording::Off).is_some()
            }
            Action::DeleteLine { position, text } => self.restore_line(*position, text.clone()),
            Action::InsertChar {
                position, index, ..
            } => self
                .delete_char_at(*position, *index, Recording::Off)
                .is_some(),
            Action::DeleteChar {
                position,
                index,
                ch,
            } => self.insert_char_at(*position, *index, *ch, Recording::Off),
            Action::ReplaceChar {
                position,
                index,
                old,
                ..
            } => self
                .replace_char_at(*position, *index, *old, Recording::Off)
                .is_some(),
        }
    }

    fn apply_redo(&mut self, action: &Action) -> bool {
        match action {
            Action::InsertLine { position, text } => self.restore_line(*position, text.clone()),
            Action::DeleteLine { position, .. } => {
                self.delete_line(*position, Recording::Off).is_some()
            }
            Action::InsertChar {
                position,
                index,
                ch,
            } => self.insert_char_at(*position, *index, *ch, Recording::Off),
            Action::DeleteChar {
                position, index, ..
            } => self
                .delete_char_at(*position, *index, Recording::Off)
                .is_some(),
            Action::ReplaceChar {
                position,
                index,
                new,
                ..
            } => self
                .replace_char_at(*position, *index, *new, Recording::Off)
                .is_some(),
        }
    }

    /// Replays a line insertion. A position past the end means the document
    /// no longer has the shape the action was recorded against.
    fn restore_line(&mut self, position: usize, text: String) -> bool {
        if position > self.store.len() {
            return false;
        }
        self.insert_line(position, text, Recording::Off);
        true
    }

    // Primitives

    fn record(&mut self, recording: Recording, action: Action) {
        if recording == Recording::On {
            debug!(?action, "record");
            self.history.record(action);
        }
    }

    fn insert_line(&mut self, position: usize, text: String, recording: Recording) -> usize {
        let recorded = (recording == Recording::On).then(|| text.clone());
        let (id, landed) = self.store.insert_line(position, text);
        if self.cursor.line().is_none() {
            self.cursor.place(id, 0);
        }
        if let Some(text) = recorded {
            self.record(
                recording,
                Action::InsertLine {
                    position: landed,
                    text,
                },
            );
        }
        landed
    }

    fn delete_line(&mut self, position: usize, recording: Recording) -> Option<String> {
        let removed = self.store.delete_line(position)?;
        self.cursor.repair(&self.store, &removed);
        self.record(
            recording,
            Action::DeleteLine {
                position,
                text: removed.text.clone(),
            },
        );
        Some(removed.text)
    }

    fn insert_char_at(
        &mut self,
        position: usize,
        index: usize,
        ch: char,
        recording: Recording,
    ) -> bool {
        let Some(text) = self.line_text_mut(position) else {
            return false;
        };
        if !lines::insert_char(text, index, ch) {
            return false;
        }
        self.record(
            recording,
            Action::InsertChar {
                position,
                index,
                ch,
            },
        );
        true
    }

    fn delete_char_at(
        &mut self,
        position: usize,
        index: usize,
        recording: Recording,
    ) -> Option<char> {
        let text = self.line_text_mut(position)?;
        let ch = lines::remove_char(text, index)?;
        self.record(
            recording,
            Action::DeleteChar {
                position,
                index,
                ch,
            },
        );
        Some(ch)
    }

    fn replace_char_at(
        &mut self,
        position: usize,
        index: usize,
        new: char,
        recording: Recording,
    ) -> Option<char> {
        let text = self.line_text_mut(position)?;
        let old = lines::replace_char(text, index, new)?;
        self.record(
            recording,
            Action::ReplaceChar {
                position,
                index,
                old,
                new,
            },
        );
        Some(old)
    }

    fn line_text_mut(&mut self, position: usize) -> Option<&mut String> {
        let id = self.store.resolve(position)?;
        self.store.get_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Boundary;

    const SEED: [&str; 4] = [
        "Hidup itu seperti kopi, ",
        "terkadang pahit, ",
        "terkadang manis, ",
        "tapi selalu bisa dinikmati jika kita tahu caranya.",
    ];

    fn seeded() -> TextBuffer {
        TextBuffer::from_lines(SEED)
    }

    // --- Construction ---

    #[test]
    fn test_new_buffer() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.render(), "");
        assert_eq!(buf.cursor_position(), None);
        assert!(!buf.can_undo());
    }

    #[test]
    fn test_from_lines_places_cursor_and_skips_history() {
        let buf = seeded();
        assert_eq!(buf.line_count(), 4);
        assert_eq!(buf.cursor_position(), Some((0, 0)));
        assert!(!buf.can_undo());
    }

    #[test]
    fn test_text() {
        let buf = TextBuffer::from_lines(["a", "b"]);
        assert_eq!(buf.text(), "a\nb");
        assert_eq!(buf.line(1), Some("b"));
        assert_eq!(buf.line(2), None);
    }

    // --- Rendering ---

    #[test]
    fn test_render_highlights_cursor_char() {
        let buf = seeded();
        assert_eq!(
            buf.render(),
            "[H]idup itu seperti kopi, \nterkadang pahit, \nterkadang manis, \ntapi selalu bisa dinikmati jika kita tahu caranya."
        );
    }

    #[test]
    fn test_render_brackets_whole_line_for_invalid_offset() {
        let mut buf = TextBuffer::from_lines(["", "x"]);
        assert_eq!(buf.render(), "[]\nx");
        buf.move_next_line().unwrap();
        buf.delete_current_char().unwrap();
        assert_eq!(buf.render(), "\n[]");
    }

    #[test]
    fn test_render_with_custom_markers() {
        let buf = TextBuffer::from_lines(["ab"]).with_markers(Markers::new("<", ">"));
        assert_eq!(buf.render(), "<a>b");
    }

    // --- Search ---

    #[test]
    fn test_search_highlights_only_matching_line() {
        let buf = seeded();
        let hits = buf.search_and_highlight("pahit");
        assert_eq!(hits.lines, vec![1]);
        assert_eq!(
            hits.view,
            "Hidup itu seperti kopi, \nterkadang [pahit], \nterkadang manis, \ntapi selalu bisa dinikmati jika kita tahu caranya."
        );
        assert_eq!(buf.cursor_position(), Some((0, 0)));
    }

    #[test]
    fn test_search_first_match_per_line() {
        let buf = TextBuffer::from_lines(["ab ab", "xx", "ab"]);
        let hits = buf.search_and_highlight("ab");
        assert_eq!(hits.lines, vec![0, 2]);
        assert_eq!(hits.view, "[ab] ab\nxx\n[ab]");
    }

    #[test]
    fn test_search_not_found() {
        let buf = seeded();
        let hits = buf.search_and_highlight("teh");
        assert!(hits.is_empty());
        assert_eq!(hits.view, buf.text());
        assert_eq!(hits.status(), "Keyword \"teh\" not found");
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let buf = seeded();
        assert!(buf.search_and_highlight("hidup").is_empty());
        assert_eq!(buf.search_and_highlight("Hidup").lines, vec![0]);
    }

    // --- Insertion ---

    #[test]
    fn test_insert_into_empty_buffer_places_cursor() {
        let mut buf = TextBuffer::new();
        assert_eq!(
            buf.insert_and_track(3, "first"),
            Ok(Status::Inserted { position: 0 })
        );
        assert_eq!(buf.cursor_position(), Some((0, 0)));
        assert_eq!(buf.render(), "[f]irst");
    }

    #[test]
    fn test_insert_before_cursor_keeps_cursor_line() {
        let mut buf = seeded();
        buf.insert_and_track(0, "Pagi.").unwrap();
        assert_eq!(buf.cursor_position(), Some((1, 0)));
        assert_eq!(buf.line(0), Some("Pagi."));
    }

    #[test]
    fn test_insert_past_end_records_landed_position() {
        let mut buf = seeded();
        assert_eq!(
            buf.insert_and_track(99, "end"),
            Ok(Status::Inserted { position: 4 })
        );
        assert_eq!(
            buf.history().undo_entries().next(),
            Some(&Action::InsertLine {
                position: 4,
                text: "end".to_string()
            })
        );
        buf.undo().unwrap();
        assert_eq!(buf.lines(), SEED);
    }

    // --- Character edits ---

    #[test]
    fn test_delete_current_char_and_undo() {
        let mut buf = seeded();
        assert_eq!(
            buf.delete_current_char(),
            Ok(Status::DeletedChar { ch: 'H', index: 0 })
        );
        assert_eq!(buf.line(0), Some("idup itu seperti kopi, "));
        buf.undo().unwrap();
        assert_eq!(buf.line(0), Some("Hidup itu seperti kopi, "));
    }

    #[test]
    fn test_delete_last_char_steps_cursor_back() {
        let mut buf = TextBuffer::from_lines(["abc"]);
        buf.move_next_char().unwrap();
        buf.move_next_char().unwrap();
        buf.delete_current_char().unwrap();
        assert_eq!(buf.line(0), Some("ab"));
        assert_eq!(buf.cursor_position(), Some((0, 1)));
    }

    #[test]
    fn test_delete_only_char_keeps_cursor_at_zero() {
        let mut buf = TextBuffer::from_lines(["a"]);
        buf.delete_current_char().unwrap();
        assert_eq!(buf.line(0), Some(""));
        assert_eq!(buf.cursor_position(), Some((0, 0)));
        assert_eq!(
            buf.delete_current_char(),
            Err(EditError::OutOfRange(Boundary::CharIndex { index: 0, len: 0 }))
        );
    }

    #[test]
    fn test_char_edits_on_empty_document() {
        let mut buf = TextBuffer::new();
        assert_eq!(buf.delete_current_char(), Err(EditError::EmptyDocument));
        assert_eq!(buf.replace_current_char('x'), Err(EditError::EmptyDocument));
        assert_eq!(buf.delete_current_line(), Err(EditError::EmptyDocument));
        assert!(!buf.can_undo());
    }

    #[test]
    fn test_replace_current_char() {
        let mut buf = seeded();
        buf.move_next_line().unwrap();
        assert_eq!(
            buf.replace_current_char('T'),
            Ok(Status::ReplacedChar {
                old: 't',
                new: 'T',
                index: 0
            })
        );
        assert_eq!(buf.line(1), Some("Terkadang pahit, "));
        buf.undo().unwrap();
        assert_eq!(buf.line(1), Some("terkadang pahit, "));
        buf.redo().unwrap();
        assert_eq!(buf.line(1), Some("Terkadang pahit, "));
    }

    // --- Line deletion ---

    #[test]
    fn test_delete_current_line_records_once() {
        let mut buf = seeded();
        buf.move_next_line().unwrap();
        assert_eq!(
            buf.delete_current_line(),
            Ok(Status::DeletedLine { position: 1 })
        );
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.history().undo_depth(), 1);
        assert_eq!(buf.cursor_position(), Some((1, 0)));
        assert_eq!(buf.line(1), Some("terkadang manis, "));

        buf.undo().unwrap();
        assert_eq!(buf.lines(), SEED);
    }

    #[test]
    fn test_delete_last_line_moves_cursor_to_predecessor_end() {
        let mut buf = TextBuffer::from_lines(["abc", "d"]);
        buf.move_next_line().unwrap();
        buf.delete_current_line().unwrap();
        assert_eq!(buf.cursor_position(), Some((0, 2)));
        assert_eq!(buf.render(), "ab[c]");
    }

    #[test]
    fn test_delete_only_line_clears_cursor() {
        let mut buf = TextBuffer::from_lines(["solo"]);
        buf.delete_current_line().unwrap();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor_position(), None);
        assert_eq!(buf.move_next_line(), Err(EditError::EmptyDocument));

        buf.undo().unwrap();
        assert_eq!(buf.lines(), vec!["solo"]);
        assert_eq!(buf.cursor_position(), Some((0, 0)));
    }

    #[test]
    fn test_undo_insert_of_other_line_keeps_cursor_identity() {
        let mut buf = seeded();
        buf.move_next_line().unwrap();
        buf.move_next_line().unwrap();
        buf.insert_and_track(0, "top").unwrap();
        assert_eq!(buf.cursor_position(), Some((3, 0)));
        buf.undo().unwrap();
        assert_eq!(buf.cursor_position(), Some((2, 0)));
        assert_eq!(buf.line(2), Some("terkadang manis, "));
    }

    // --- Undo / Redo ---

    #[test]
    fn test_insert_undo_redo_scenario() {
        let mut buf = seeded();
        buf.insert_and_track(4, "Selamat pagi.").unwrap();
        assert_eq!(buf.line_count(), 5);
        assert_eq!(buf.line(4), Some("Selamat pagi."));

        buf.undo().unwrap();
        assert_eq!(buf.line_count(), 4);
        assert_eq!(buf.lines(), SEED);

        assert_eq!(
            buf.redo(),
            Ok(Status::Redone(Action::InsertLine {
                position: 4,
                text: "Selamat pagi.".to_string()
            }))
        );
        assert_eq!(buf.line(4), Some("Selamat pagi."));
    }

    #[test]
    fn test_round_trip_many_edits() {
        let mut buf = seeded();
        buf.insert_and_track(2, "sisipan").unwrap();
        buf.move_next_char().unwrap();
        buf.delete_current_char().unwrap();
        buf.replace_current_char('X').unwrap();
        buf.move_next_line().unwrap();
        buf.move_next_line().unwrap();
        buf.delete_current_line().unwrap();
        buf.insert_and_track(0, "awal").unwrap();

        for _ in 0..5 {
            buf.undo().unwrap();
        }
        assert_eq!(buf.lines(), SEED);
        assert_eq!(buf.undo(), Err(EditError::EmptyHistory(HistoryDirection::Undo)));
    }

    #[test]
    fn test_undo_then_redo_is_noop_for_each_kind() {
        let edits: [fn(&mut TextBuffer); 4] = [
            |buf: &mut TextBuffer| {
                buf.insert_and_track(1, "baru").unwrap();
            },
            |buf: &mut TextBuffer| {
                buf.delete_current_char().unwrap();
            },
            |buf: &mut TextBuffer| {
                buf.replace_current_char('#').unwrap();
            },
            |buf: &mut TextBuffer| {
                buf.delete_current_line().unwrap();
            },
        ];
        for edit in edits {
            let mut buf = seeded();
            edit(&mut buf);
            let after = buf.lines();
            buf.undo().unwrap();
            buf.redo().unwrap();
            assert_eq!(buf.lines(), after);
        }
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut buf = seeded();
        buf.insert_and_track(4, "satu").unwrap();
        buf.insert_and_track(5, "dua").unwrap();
        buf.undo().unwrap();
        buf.undo().unwrap();
        assert!(buf.can_redo());

        buf.replace_current_char('h').unwrap();
        assert!(!buf.can_redo());
        assert_eq!(buf.redo(), Err(EditError::EmptyHistory(HistoryDirection::Redo)));
    }

    #[test]
    fn test_empty_history_messages() {
        let mut buf = seeded();
        assert_eq!(buf.undo().unwrap_err().to_string(), "nothing to undo");
        assert_eq!(buf.redo().unwrap_err().to_string(), "nothing to redo");
    }

    #[test]
    fn test_navigation_is_not_recorded() {
        let mut buf = seeded();
        buf.move_next_line().unwrap();
        buf.move_next_char().unwrap();
        assert!(!buf.can_undo());
    }

    #[test]
    fn test_default_history_undoes_every_edit() {
        let mut buf = TextBuffer::from_lines(["abc"]);
        for i in 0..1001 {
            buf.insert_and_track(1, format!("l{i}")).unwrap();
        }
        assert_eq!(buf.line_count(), 1002);

        let mut undone = 0;
        while buf.undo().is_ok() {
            undone += 1;
        }
        assert_eq!(undone, 1001);
        assert_eq!(buf.lines(), ["abc"]);
    }

    #[test]
    fn test_history_limit() {
        let mut buf = TextBuffer::from_lines(["abc"]).with_history_limit(2);
        buf.replace_current_char('x').unwrap();
        buf.replace_current_char('y').unwrap();
        buf.replace_current_char('z').unwrap();
        buf.undo().unwrap();
        buf.undo().unwrap();
        assert_eq!(buf.line(0), Some("xbc"));
        assert!(buf.undo().is_err());
    }

    // --- Structural drift ---

    #[test]
    fn test_undo_with_unresolvable_line_is_skipped() {
        let mut buf = seeded();
        buf.history.record(Action::DeleteChar {
            position: 9,
            index: 0,
            ch: 'x',
        });
        assert_eq!(
            buf.undo(),
            Err(EditError::StructuralDrift {
                position: 9,
                direction: HistoryDirection::Undo
            })
        );
        assert_eq!(buf.lines(), SEED);
        assert!(!buf.can_redo());
    }

    #[test]
    fn test_redo_with_unresolvable_char_is_skipped() {
        let mut buf = seeded();
        buf.history.push_redo(Action::ReplaceChar {
            position: 1,
            index: 500,
            old: 'a',
            new: 'b',
        });
        assert_eq!(
            buf.redo(),
            Err(EditError::StructuralDrift {
                position: 1,
                direction: HistoryDirection::Redo
            })
        );
        assert_eq!(buf.lines(), SEED);
        assert!(!buf.can_undo());
    }

    #[test]
    fn test_line_reinsert_past_end_is_drift() {
        let mut buf = TextBuffer::from_lines(["a"]);
        buf.history.push_redo(Action::InsertLine {
            position: 5,
            text: "b".to_string(),
        });
        assert!(matches!(
            buf.redo(),
            Err(EditError::StructuralDrift { position: 5, .. })
        ));
        assert_eq!(buf.line_count(), 1);
    }

    #[test]
    fn test_insert_char_action_replays() {
        let mut buf = TextBuffer::from_lines(["ac"]);
        buf.history.record(Action::InsertChar {
            position: 0,
            index: 1,
            ch: 'b',
        });
        // Undo removes the char the action claims was inserted
        buf.undo().unwrap();
        assert_eq!(buf.line(0), Some("a"));
        buf.redo().unwrap();
        assert_eq!(buf.line(0), Some("ab"));
    }
}
