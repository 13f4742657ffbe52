// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{key_action::KeyAction,
            key_trie::{KeyTrie, Resolution}};
use std::{collections::VecDeque, sync::Arc};

/// Turns decoded code points into [`KeyAction`]s by longest match against the active
/// key table (see [`KeyTrie`] for the exact rules).
///
/// The pending buffer only holds code points that haven't been attributed to a resolved
/// action yet. Each successful [`KeyAssembler::next`] removes exactly the length of the
/// action it returns from the front.
#[derive(Debug)]
pub struct KeyAssembler {
    pending: VecDeque<char>,
    trie: Arc<KeyTrie>,
}

impl KeyAssembler {
    #[must_use]
    pub fn new(trie: Arc<KeyTrie>) -> Self {
        Self {
            pending: VecDeque::new(),
            trie,
        }
    }

    /// Swaps the active key table (eg: when the edit mode changes). Pending input is
    /// kept and will be resolved against the new table.
    pub fn set_table(&mut self, trie: Arc<KeyTrie>) { self.trie = trie; }

    #[must_use]
    pub fn table(&self) -> &Arc<KeyTrie> { &self.trie }

    pub fn feed(&mut self, code_point: char) { self.pending.push_back(code_point); }

    pub fn feed_all(&mut self, code_points: &[char]) { self.pending.extend(code_points); }

    #[must_use]
    pub fn pending(&self) -> &VecDeque<char> { &self.pending }

    fn resolve(&self) -> Resolution { self.trie.resolve(self.pending.iter().copied()) }

    /// True if [`KeyAssembler::next`] would return an action right now, false when
    /// nothing is pending or the pending code points are an ambiguous prefix.
    #[must_use]
    pub fn has_next(&self) -> bool { self.resolve().consumed_len() > 0 }

    /// The action [`KeyAssembler::next`] would return, without consuming anything.
    #[must_use]
    pub fn peek(&self) -> Option<KeyAction> { self.resolve().into_key_action() }

    /// Resolves and consumes the next action, or returns `None` if more input is needed.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<KeyAction> {
        let resolution = self.resolve();
        let consumed_len = resolution.consumed_len();
        if consumed_len == 0 {
            if matches!(resolution, Resolution::NeedMore) {
                tracing::trace!(pending = self.pending.len(), "ambiguous prefix, waiting");
            }
            return None;
        }
        self.pending.drain(..consumed_len);
        let key_action = resolution.into_key_action()?;
        tracing::trace!(key = %key_action, "resolved key");
        Some(key_action)
    }

    /// Drains every action that can be resolved with the input fed so far.
    pub fn drain_ready(&mut self) -> Vec<KeyAction> {
        let mut acc = vec![];
        while let Some(key_action) = self.next() {
            acc.push(key_action);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ESC, Key, KeyTableBuilder};
    use pretty_assertions::assert_eq;

    fn assembler_with(keys: &[Key]) -> KeyAssembler {
        let mut builder = KeyTableBuilder::new();
        for key in keys {
            builder.bind(*key, ()).unwrap();
        }
        KeyAssembler::new(builder.build().trie())
    }

    #[test]
    fn test_longest_match_across_feeds() {
        let mut assembler = assembler_with(&[Key::Delete, Key::Meta('[')]);

        assembler.feed(ESC);
        assert!(!assembler.has_next());
        assert_eq!(assembler.next(), None);

        assembler.feed('[');
        // Meta-[ is a complete match, it wins over the pending Delete prefix.
        assert_eq!(assembler.next(), Some(Key::Meta('[').into()));
        assert!(assembler.pending().is_empty());
    }

    #[test]
    fn test_ambiguous_prefix_defers_until_complete() {
        let mut assembler = assembler_with(&[Key::Delete]);
        assembler.feed_all(&[ESC, '[', '3']);
        assert_eq!(assembler.peek(), None);
        assert_eq!(assembler.next(), None);
        assert_eq!(assembler.pending().len(), 3);

        assembler.feed('~');
        assert_eq!(assembler.next(), Some(Key::Delete.into()));
    }

    #[test]
    fn test_dead_end_consumes_one_code_point_at_a_time() {
        let mut assembler = assembler_with(&[Key::Delete]);
        assembler.feed_all(&[ESC, '[', 'x']);
        let names: Vec<String> = assembler
            .drain_ready()
            .iter()
            .map(|it| it.name().to_string())
            .collect();
        assert_eq!(names, vec!["^[", "[", "x"]);
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut assembler = assembler_with(&[Key::Up]);
        assembler.feed_all(&Key::Up.code_points());
        assert!(assembler.has_next());
        assert_eq!(assembler.peek(), Some(Key::Up.into()));
        assert_eq!(assembler.pending().len(), 3);
        assert_eq!(assembler.next(), Some(Key::Up.into()));
    }

    #[test]
    fn test_set_table_keeps_pending_input() {
        let mut assembler = assembler_with(&[Key::Delete]);
        assembler.feed_all(&[ESC, '[']);
        assert_eq!(assembler.next(), None);

        let other = assembler_with(&[Key::Left]);
        assembler.set_table(other.trie.clone());
        assembler.feed('D');
        assert_eq!(assembler.next(), Some(Key::Left.into()));
    }
}
