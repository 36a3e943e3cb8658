//! Single-line text input with a byte-offset cursor

/// Editable line of text. The cursor is a byte offset that always sits on
/// a char boundary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextField {
    value: String,
    cursor: usize,
}

impl TextField {
    /// New field holding `value` with the cursor at the end
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        TextField { value, cursor }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position in characters, for placing the terminal cursor
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.set(String::new());
    }

    /// Text that `insert(c)` would produce, without applying it
    pub fn with_inserted(&self, c: char) -> String {
        let mut candidate = self.value.clone();
        candidate.insert(self.cursor, c);
        candidate
    }

    /// Text that `backspace()` would produce, without applying it
    pub fn with_backspace(&self) -> String {
        let mut candidate = self.value.clone();
        if let Some(prev) = self.prev_boundary() {
            candidate.remove(prev);
        }
        candidate
    }

    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.value[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(self.value.len());
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        if self.cursor == 0 {
            return None;
        }
        self.value[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
    }
}
