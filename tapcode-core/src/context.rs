//! Typing context extraction.
//!
//! The keyboard reports the buffer text and a cursor offset; everything the
//! scoring rules look at is derived here, once per keystroke.

/// Characters that end a word for context purposes. Deliberately smaller
/// than the tokenizer's boundary set: `.` and `:` stay inside the word so
/// dotted and scoped paths (`console.log`, `std::cout`) survive as one unit.
const WORD_BOUNDARIES: &[char] = &['(', ')', '[', ']', '{', '}', ',', ';'];

/// What the cursor sees on its line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypingContext {
    /// Last word before the cursor on its line; empty when the line holds
    /// none.
    pub last_word: String,
    /// Full text of the line containing the cursor.
    pub current_line: String,
    /// True when the current line is empty or whitespace-only.
    pub is_new_line: bool,
    /// Leading whitespace of the current line.
    pub line_indentation: String,
}

impl TypingContext {
    /// Extracts the context at `cursor`, a byte offset into `text`. The
    /// current line runs between the nearest newlines around the cursor.
    ///
    /// Total over any offset: values past the end clamp to the text end, and
    /// offsets inside a multi-byte character snap back to its start.
    #[must_use]
    pub fn extract(text: &str, cursor: usize) -> Self {
        let mut cursor = cursor.min(text.len());
        while !text.is_char_boundary(cursor) {
            cursor -= 1;
        }
        let line_start = text[..cursor].rfind('\n').map_or(0, |at| at + 1);
        let line_end = text[cursor..].find('\n').map_or(text.len(), |at| cursor + at);
        let line = &text[line_start..line_end];
        let last_word = text[line_start..cursor]
            .rsplit(|c: char| c.is_whitespace() || WORD_BOUNDARIES.contains(&c))
            .find(|piece| !piece.is_empty())
            .unwrap_or_default()
            .to_owned();
        let trimmed = line.trim_start();
        Self {
            last_word,
            current_line: line.to_owned(),
            is_new_line: trimmed.is_empty(),
            line_indentation: line[..line.len() - trimmed.len()].to_owned(),
        }
    }
}
