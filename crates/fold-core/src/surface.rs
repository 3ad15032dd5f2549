//! The external editing surface.
//!
//! The kernel owns no text buffer and renders nothing: it reads and writes
//! text and cursor state through [`EditSurface`], implemented by the host.
//! Hosts forward the surface's content-changed and cursor-moved events to
//! [`FoldSession::on_content_changed`](crate::FoldSession::on_content_changed)
//! and [`FoldSession::on_cursor_moved`](crate::FoldSession::on_cursor_moved).
//!
//! [`MemorySurface`] is a rope-backed in-memory reference implementation,
//! useful for headless hosts and for tests that need to simulate external
//! edits.

use ropey::Rope;

/// Host editing surface the kernel reads and mutates.
///
/// All offsets are char offsets. `set_text` and `set_cursor_offset` are
/// *programmatic* mutations: a surface that re-fires change notifications on
/// mutation must deliver them synchronously, so the session's suppress guard
/// is still raised when they arrive.
pub trait EditSurface {
    /// Current buffer content.
    fn text(&self) -> String;

    /// Replace the whole buffer content.
    fn set_text(&mut self, text: &str);

    /// Current cursor char offset.
    fn cursor_offset(&self) -> usize;

    /// Move the cursor to `offset`, clamped to the buffer length.
    fn set_cursor_offset(&mut self, offset: usize);
}

/// An in-memory [`EditSurface`] backed by a rope.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    rope: Rope,
    cursor: usize,
}

impl MemorySurface {
    /// Create a surface with the given content and the cursor at offset 0.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: 0,
        }
    }

    /// Char count of the buffer.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Replace the char range `[start, start + len)` with `text`, simulating
    /// an external edit. Out-of-range offsets are clamped.
    ///
    /// Does not move the cursor; callers position the cursor separately.
    pub fn splice(&mut self, start: usize, len: usize, text: &str) {
        let start = start.min(self.rope.len_chars());
        let end = start.saturating_add(len).min(self.rope.len_chars());
        self.rope.remove(start..end);
        self.rope.insert(start, text);
    }
}

impl EditSurface for MemorySurface {
    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = self.cursor.min(self.rope.len_chars());
    }

    fn cursor_offset(&self) -> usize {
        self.cursor
    }

    fn set_cursor_offset(&mut self, offset: usize) {
        self.cursor = offset.min(self.rope.len_chars());
    }
}
