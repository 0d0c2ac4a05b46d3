//! In-memory editor buffer for headless sessions.

use std::ops::Range;
use std::sync::{Mutex, MutexGuard, PoisonError};

use inkwell_core::ports::EditorSurface;

#[derive(Debug, Default)]
struct Buffer {
    title: String,
    body: String,
    /// Byte range of the selection; empty means a caret.
    selection: Range<usize>,
}

impl Buffer {
    fn clamp(&self, at: usize) -> usize {
        let mut at = at.min(self.body.len());
        while !self.body.is_char_boundary(at) {
            at -= 1;
        }
        at
    }
}

/// Title + markdown body with a selection, held in memory.
#[derive(Debug, Default)]
pub struct BufferEditor {
    buffer: Mutex<Buffer>,
}

impl BufferEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a byte range of the body. Out-of-range ends are clamped.
    pub fn select(&self, range: Range<usize>) {
        let mut buffer = self.lock();
        let start = buffer.clamp(range.start);
        let end = buffer.clamp(range.end.max(start));
        buffer.selection = start..end;
    }

    /// Append text at the end of the body and move the caret there.
    pub fn append(&self, text: &str) {
        let mut buffer = self.lock();
        buffer.body.push_str(text);
        let end = buffer.body.len();
        buffer.selection = end..end;
    }

    fn lock(&self) -> MutexGuard<'_, Buffer> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EditorSurface for BufferEditor {
    fn title(&self) -> String {
        self.lock().title.clone()
    }

    fn set_title(&self, title: &str) {
        self.lock().title = title.to_string();
    }

    fn content(&self) -> String {
        self.lock().body.clone()
    }

    fn set_content(&self, content: &str) {
        let mut buffer = self.lock();
        buffer.body = content.to_string();
        let end = buffer.body.len();
        buffer.selection = end..end;
    }

    fn insert_at_selection(&self, text: &str) {
        let mut buffer = self.lock();
        let start = buffer.clamp(buffer.selection.start);
        let end = buffer.clamp(buffer.selection.end.max(start));
        buffer.body.replace_range(start..end, text);
        let caret = start + text.len();
        buffer.selection = caret..caret;
    }
}
