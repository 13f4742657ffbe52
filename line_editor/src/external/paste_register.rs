// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque, fmt::Debug};

pub const PASTE_RING_CAPACITY: usize = 10;

/// Holds text that was killed (deleted) or yanked (copied) so it can be pasted later.
pub trait PasteRegister: Debug + Send {
    fn add(&mut self, code_points: Vec<char>);

    /// Most recently added text.
    fn get(&self) -> Option<&[char]>;
}

/// Bounded ring of the last [`PASTE_RING_CAPACITY`] entries.
#[derive(Debug, Clone)]
pub struct PasteRing {
    entries: VecDeque<Vec<char>>,
    capacity: usize,
}

impl Default for PasteRing {
    fn default() -> Self { Self::new(PASTE_RING_CAPACITY) }
}

impl PasteRing {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Makes the entry before the current one current, wrapping around.
    pub fn rotate(&mut self) {
        if let Some(it) = self.entries.pop_back() {
            self.entries.push_front(it);
        }
    }
}

impl PasteRegister for PasteRing {
    fn add(&mut self, code_points: Vec<char>) {
        if code_points.is_empty() {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(code_points);
    }

    fn get(&self) -> Option<&[char]> { self.entries.back().map(Vec::as_slice) }
}
