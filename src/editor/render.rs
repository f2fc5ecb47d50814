use serde::{Deserialize, Serialize};

/// Strings placed around highlighted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    pub open: String,
    pub close: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            open: "[".to_string(),
            close: "]".to_string(),
        }
    }
}

impl Markers {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    pub fn wrap(&self, text: &str) -> String {
        format!("{}{}{}", self.open, text, self.close)
    }

    /// Wraps the byte range `start..end` of `line`.
    pub fn wrap_range(&self, line: &str, start: usize, end: usize) -> String {
        let mut out = String::with_capacity(line.len() + self.open.len() + self.close.len());
        out.push_str(&line[..start]);
        out.push_str(&self.open);
        out.push_str(&line[start..end]);
        out.push_str(&self.close);
        out.push_str(&line[end..]);
        out
    }

    /// Wraps the char at `index`, or `None` if the line has no such char.
    pub fn wrap_char(&self, line: &str, index: usize) -> Option<String> {
        let (start, ch) = line.char_indices().nth(index)?;
        Some(self.wrap_range(line, start, start + ch.len_utf8()))
    }

    /// Highlight for the cursor line: the char under the cursor, or the
    /// whole line when the offset is not a valid position.
    pub fn cursor_line(&self, line: &str, index: usize) -> String {
        self.wrap_char(line, index).unwrap_or_else(|| self.wrap(line))
    }
}

/// Byte range of the first occurrence of `keyword` in `line`.
pub fn find_first(line: &str, keyword: &str) -> Option<(usize, usize)> {
    if keyword.is_empty() {
        return None;
    }
    line.find(keyword).map(|start| (start, start + keyword.len()))
}

/// Rendered search output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHits {
    pub keyword: String,
    pub view: String,
    /// Indices of the lines that contained the keyword.
    pub lines: Vec<usize>,
}

impl SearchHits {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn status(&self) -> String {
        match self.lines.len() {
            0 => format!("Keyword \"{}\" not found", self.keyword),
            1 => format!("Found \"{}\" on 1 line", self.keyword),
            n => format!("Found \"{}\" on {} lines", self.keyword, n),
        }
    }
}
