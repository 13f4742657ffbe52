// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

/// Undo snapshots kept by [`CodePointBuffer`] before the oldest is dropped.
pub const UNDO_STACK_MAX: usize = 100;

/// Mutation contract for the editable line. Positions and lengths are in code points,
/// the cursor is always in `0..=code_points().len()`.
pub trait LineBuffer: Debug + Send {
    fn code_points(&self) -> &[char];

    fn cursor(&self) -> usize;

    /// Moves the cursor by `delta`, clamped to the line.
    fn move_cursor(&mut self, delta: isize);

    /// Inserts at the cursor, which ends up after the inserted text.
    fn insert(&mut self, code_points: &[char]);

    /// Deletes `delta` code points after the cursor when positive, or `-delta` before it
    /// when negative (moving the cursor back by that much). Clamped to the line.
    fn delete(&mut self, delta: isize);

    /// Replaces the whole line, the cursor moves to the end.
    fn replace(&mut self, code_points: &[char]);

    /// Saves the current line and cursor so [`LineBuffer::undo`] can restore them.
    fn push_undo(&mut self);

    /// Restores the last saved state, returns false if there was none.
    fn undo(&mut self) -> bool;

    /// Password entry, the line must not be echoed.
    fn is_masking(&self) -> bool;

    fn len(&self) -> usize { self.code_points().len() }

    fn is_empty(&self) -> bool { self.code_points().is_empty() }

    #[allow(clippy::cast_possible_wrap)]
    fn set_cursor(&mut self, position: usize) {
        let delta = position as isize - self.cursor() as isize;
        self.move_cursor(delta);
    }

    fn clear(&mut self) { self.replace(&[]); }

    fn to_line_string(&self) -> String { self.code_points().iter().collect() }
}

/// In memory [`LineBuffer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePointBuffer {
    code_points: Vec<char>,
    cursor: usize,
    undo_stack: Vec<(Vec<char>, usize)>,
    masking: bool,
}

impl CodePointBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_masking(mut self, masking: bool) -> Self {
        self.masking = masking;
        self
    }
}

impl LineBuffer for CodePointBuffer {
    fn code_points(&self) -> &[char] { &self.code_points }

    fn cursor(&self) -> usize { self.cursor }

    fn move_cursor(&mut self, delta: isize) {
        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .min(self.code_points.len());
    }

    fn insert(&mut self, code_points: &[char]) {
        let tail = self.code_points.split_off(self.cursor);
        self.code_points.extend_from_slice(code_points);
        self.code_points.extend(tail);
        self.cursor += code_points.len();
    }

    fn delete(&mut self, delta: isize) {
        let count = delta.unsigned_abs();
        if delta >= 0 {
            let end = (self.cursor + count).min(self.code_points.len());
            self.code_points.drain(self.cursor..end);
        } else {
            let start = self.cursor.saturating_sub(count);
            self.code_points.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    fn replace(&mut self, code_points: &[char]) {
        self.code_points.clear();
        self.code_points.extend_from_slice(code_points);
        self.cursor = self.code_points.len();
    }

    fn push_undo(&mut self) {
        if self.undo_stack.len() == UNDO_STACK_MAX {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push((self.code_points.clone(), self.cursor));
    }

    fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some((code_points, cursor)) => {
                self.code_points = code_points;
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }

    fn is_masking(&self) -> bool { self.masking }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn buffer_of(text: &str) -> CodePointBuffer {
        let mut buffer = CodePointBuffer::new();
        buffer.replace(&text.chars().collect::<Vec<_>>());
        buffer
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut buffer = buffer_of("ad");
        buffer.move_cursor(-1);
        buffer.insert(&['b', 'c']);
        assert_eq!(buffer.to_line_string(), "abcd");
        assert_eq!(buffer.cursor(), 3);
    }

    #[test]
    fn test_delete_is_sign_aware() {
        let mut buffer = buffer_of("hello");
        buffer.set_cursor(2);
        buffer.delete(2);
        assert_eq!(buffer.to_line_string(), "heo");
        assert_eq!(buffer.cursor(), 2);

        buffer.delete(-5);
        assert_eq!(buffer.to_line_string(), "o");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut buffer = buffer_of("abc");
        buffer.move_cursor(10);
        assert_eq!(buffer.cursor(), 3);
        buffer.move_cursor(-10);
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_undo_restores_line_and_cursor() {
        let mut buffer = buffer_of("abc");
        buffer.set_cursor(1);
        buffer.push_undo();
        buffer.delete(1);
        assert_eq!(buffer.to_line_string(), "ac");
        assert!(buffer.undo());
        assert_eq!(buffer.to_line_string(), "abc");
        assert_eq!(buffer.cursor(), 1);
        assert!(!buffer.undo());
    }
}
