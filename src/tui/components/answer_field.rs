//! Single-line answer input with a byte-offset cursor.
//!
//! Answers are short, so the field never wraps: when the text is wider than
//! the field it scrolls horizontally to keep the cursor in view.

use unicode_width::UnicodeWidthChar;

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnswerField {
    buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    cursor: usize,
}

/// Emitted when the field content or cursor changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edited;

impl AnswerField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// The slice of text that fits in `width` columns, and the cursor's
    /// column within it.
    pub fn visible(&self, width: u16) -> (String, u16) {
        let width = usize::from(width);
        if width == 0 {
            return (String::new(), 0);
        }

        // Walk back from the cursor until the field is full; one column is
        // kept free for the cursor itself.
        let mut start = self.cursor;
        let mut used = 0;
        for (i, ch) in self.buffer[..self.cursor].char_indices().rev() {
            let w = ch.width().unwrap_or(0);
            if used + w > width - 1 {
                break;
            }
            used += w;
            start = i;
        }

        let mut shown = String::new();
        let mut shown_width = 0;
        for ch in self.buffer[start..].chars() {
            let w = ch.width().unwrap_or(0);
            if shown_width + w > width {
                break;
            }
            shown.push(ch);
            shown_width += w;
        }
        (shown, used as u16)
    }
}

impl EventHandler for AnswerField {
    type Event = Edited;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Edited> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut encoded = [0u8; 4];
                self.insert(c.encode_utf8(&mut encoded));
                Some(Edited)
            }
            TuiEvent::Paste(text) => {
                let single_line: String = text.chars().filter(|c| !c.is_control()).collect();
                if single_line.is_empty() {
                    return None;
                }
                self.insert(&single_line);
                Some(Edited)
            }
            TuiEvent::Backspace => {
                let prev = prev_char_boundary(&self.buffer, self.cursor)?;
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(Edited)
            }
            TuiEvent::Delete => {
                let next = next_char_boundary(&self.buffer, self.cursor)?;
                self.buffer.drain(self.cursor..next);
                Some(Edited)
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor)?;
                Some(Edited)
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor)?;
                Some(Edited)
            }
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                Edited
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                Edited
            }),
            _ => None,
        }
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> Option<usize> {
    text[..pos].char_indices().next_back().map(|(i, _)| i)
}

fn next_char_boundary(text: &str, pos: usize) -> Option<usize> {
    text[pos..].chars().next().map(|c| pos + c.len_utf8())
}
