/// Single-line text input with a character-based cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters, not bytes
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_string(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::from_string(value);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Visible slice and cursor column when only `width` columns are available
    pub fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let start = self.cursor.saturating_sub(width - 1);
        let text: String = self.value.chars().skip(start).take(width).collect();
        (text, self.cursor - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_at_cursor() {
        let mut input = TextInput::from_string("2024-01-10 0900");
        input.move_left();
        input.move_left();
        input.insert_char(':');
        assert_eq!(input.value(), "2024-01-10 09:00");

        input.move_home();
        input.delete();
        input.insert_char('3');
        assert_eq!(input.value(), "3024-01-10 09:00");

        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "3024-01-10 09:0");
    }

    #[test]
    fn multibyte_characters() {
        let mut input = TextInput::from_string("Bäckerei");
        input.move_home();
        input.move_right();
        input.move_right();
        input.backspace();
        assert_eq!(input.value(), "Bckerei");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn visible_window_follows_cursor() {
        let input = TextInput::from_string("abcdefghij");
        let (text, col) = input.visible(4);
        assert_eq!(text, "hij");
        assert_eq!(col, 3);
    }
}
