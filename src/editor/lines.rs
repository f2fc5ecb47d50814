use slab::Slab;

/// Stable handle to a line in a [`LineStore`].
///
/// Handles are generational: once the line is removed the handle stops
/// resolving, even if its arena slot is later reused for a new line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId {
    slot: usize,
    generation: u64,
}

#[derive(Debug)]
struct Line {
    text: String,
    generation: u64,
    prev: Option<LineId>,
    next: Option<LineId>,
}

/// A line that was unlinked from the store, along with its former neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub id: LineId,
    pub text: String,
    pub prev: Option<LineId>,
    pub next: Option<LineId>,
}

/// Doubly linked sequence of lines stored in an arena.
#[derive(Debug, Default)]
pub struct LineStore {
    lines: Slab<Line>,
    head: Option<LineId>,
    tail: Option<LineId>,
    generation: u64,
}

impl LineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for text in lines {
            let id = store.alloc(text.into());
            store.push_back(id);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn first(&self) -> Option<LineId> {
        self.head
    }

    pub fn last(&self) -> Option<LineId> {
        self.tail
    }

    /// Whether `id` still refers to a live line.
    pub fn contains(&self, id: LineId) -> bool {
        self.line(id).is_some()
    }

    pub fn get(&self, id: LineId) -> Option<&str> {
        self.line(id).map(|line| line.text.as_str())
    }

    pub fn get_mut(&mut self, id: LineId) -> Option<&mut String> {
        self.line_mut(id).map(|line| &mut line.text)
    }

    pub fn next(&self, id: LineId) -> Option<LineId> {
        self.line(id).and_then(|line| line.next)
    }

    pub fn prev(&self, id: LineId) -> Option<LineId> {
        self.line(id).and_then(|line| line.prev)
    }

    /// Walks from the head to the line at `position`.
    pub fn resolve(&self, position: usize) -> Option<LineId> {
        self.ids().nth(position)
    }

    /// Index of `id` in traversal order.
    pub fn position_of(&self, id: LineId) -> Option<usize> {
        self.ids().position(|candidate| candidate == id)
    }

    pub fn ids(&self) -> Ids<'_> {
        Ids {
            store: self,
            next: self.head,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (LineId, &str)> + '_ {
        self.ids()
            .filter_map(move |id| self.get(id).map(|text| (id, text)))
    }

    /// Inserts `text` so that it becomes the line at `position`.
    ///
    /// Positions at or past the end append. Returns the new handle and the
    /// index the line landed at.
    pub fn insert_line(&mut self, position: usize, text: String) -> (LineId, usize) {
        let at = if position < self.len() {
            self.resolve(position)
        } else {
            None
        };
        let id = self.alloc(text);
        match at {
            Some(at) => {
                self.link_before(at, id);
                (id, position)
            }
            None => {
                self.push_back(id);
                (id, self.len() - 1)
            }
        }
    }

    /// Unlinks the line at `position`. Returns `None` when out of range.
    pub fn delete_line(&mut self, position: usize) -> Option<Removed> {
        let id = self.resolve(position)?;
        let line = self.lines.try_remove(id.slot)?;

        match line.prev {
            Some(prev) => {
                if let Some(prev_line) = self.line_mut(prev) {
                    prev_line.next = line.next;
                }
            }
            None => self.head = line.next,
        }
        match line.next {
            Some(next) => {
                if let Some(next_line) = self.line_mut(next) {
                    next_line.prev = line.prev;
                }
            }
            None => self.tail = line.prev,
        }

        Some(Removed {
            id,
            text: line.text,
            prev: line.prev,
            next: line.next,
        })
    }

    fn line(&self, id: LineId) -> Option<&Line> {
        self.lines
            .get(id.slot)
            .filter(|line| line.generation == id.generation)
    }

    fn line_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.lines
            .get_mut(id.slot)
            .filter(|line| line.generation == id.generation)
    }

    fn alloc(&mut self, text: String) -> LineId {
        self.generation += 1;
        let generation = self.generation;
        let slot = self.lines.insert(Line {
            text,
            generation,
            prev: None,
            next: None,
        });
        LineId { slot, generation }
    }

    fn push_back(&mut self, id: LineId) {
        let tail = self.tail;
        if let Some(line) = self.line_mut(id) {
            line.prev = tail;
            line.next = None;
        }
        match tail {
            Some(tail) => {
                if let Some(tail_line) = self.line_mut(tail) {
                    tail_line.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
    }

    fn link_before(&mut self, at: LineId, id: LineId) {
        let prev = self.prev(at);
        if let Some(line) = self.line_mut(id) {
            line.prev = prev;
            line.next = Some(at);
        }
        if let Some(at_line) = self.line_mut(at) {
            at_line.prev = Some(id);
        }
        match prev {
            Some(prev) => {
                if let Some(prev_line) = self.line_mut(prev) {
                    prev_line.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
    }
}

/// Iterator over line handles in traversal order.
pub struct Ids<'a> {
    store: &'a LineStore,
    next: Option<LineId>,
}

impl Iterator for Ids<'_> {
    type Item = LineId;

    fn next(&mut self) -> Option<LineId> {
        let id = self.next?;
        self.next = self.store.next(id);
        Some(id)
    }
}

// Character helpers. Indices count `char`s, not bytes.

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

fn byte_offset(text: &str, index: usize) -> Option<usize> {
    text.char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .nth(index)
}

/// Inserts `ch` before the char at `index`; `index == len` appends.
pub fn insert_char(text: &mut String, index: usize, ch: char) -> bool {
    match byte_offset(text, index) {
        Some(offset) => {
            text.insert(offset, ch);
            true
        }
        None => false,
    }
}

pub fn remove_char(text: &mut String, index: usize) -> Option<char> {
    let offset = byte_offset(text, index).filter(|&offset| offset < text.len())?;
    Some(text.remove(offset))
}

/// Overwrites the char at `index`, returning the previous one.
pub fn replace_char(text: &mut String, index: usize, ch: char) -> Option<char> {
    let offset = byte_offset(text, index).filter(|&offset| offset < text.len())?;
    let old = text[offset..].chars().next()?;
    text.replace_range(offset..offset + old.len_utf8(), ch.encode_utf8(&mut [0; 4]));
    Some(old)
}
