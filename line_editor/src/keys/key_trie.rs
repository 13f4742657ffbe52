// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Prefix trie over every bound key sequence of a frozen [`KeyTable`].
//!
//! Resolving the pending code points against a trie costs one step per code point,
//! instead of comparing the pending buffer against every binding. The outcome is the
//! same as such a scan:
//!
//! 1. The longest bound sequence that is a complete prefix of the pending buffer wins,
//!    even if a longer binding could still match with more input.
//! 2. With no complete match, if the whole buffer is a prefix of some longer binding,
//!    resolution waits for more input.
//! 3. Otherwise the first pending code point becomes a default single code point action.
//!
//! Equal length ties can't happen since [`KeyTable`] rejects duplicate sequences.
//!
//! [`KeyTable`]: crate::KeyTable

use super::key_action::KeyAction;
use smallvec::SmallVec;

const ROOT: usize = 0;

#[derive(Debug, Default)]
struct TrieNode {
    children: SmallVec<[(char, usize); 4]>,
    terminal: Option<KeyAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A bound sequence matched, consume its length.
    Matched(KeyAction),
    /// The pending buffer is a prefix of at least one longer binding.
    NeedMore,
    /// Nothing can match, consume exactly one code point.
    Unbound(KeyAction),
    /// Nothing is pending.
    Empty,
}

impl Resolution {
    /// Number of pending code points this resolution consumes.
    #[must_use]
    pub fn consumed_len(&self) -> usize {
        match self {
            Resolution::Matched(it) | Resolution::Unbound(it) => it.len(),
            Resolution::NeedMore | Resolution::Empty => 0,
        }
    }

    #[must_use]
    pub fn into_key_action(self) -> Option<KeyAction> {
        match self {
            Resolution::Matched(it) | Resolution::Unbound(it) => Some(it),
            Resolution::NeedMore | Resolution::Empty => None,
        }
    }
}

/// Arena backed trie, nodes refer to their children by index.
#[derive(Debug)]
pub struct KeyTrie {
    nodes: Vec<TrieNode>,
    max_sequence_len: usize,
}

impl Default for KeyTrie {
    fn default() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            max_sequence_len: 0,
        }
    }
}

impl KeyTrie {
    #[must_use]
    pub fn from_bindings<'a>(bindings: impl IntoIterator<Item = &'a KeyAction>) -> Self {
        let mut trie = Self::default();
        for key_action in bindings {
            trie.insert(key_action);
        }
        trie
    }

    fn insert(&mut self, key_action: &KeyAction) {
        let mut node = ROOT;
        for ch in key_action.code_points() {
            node = match self.child(node, *ch) {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.push((*ch, child));
                    child
                }
            };
        }
        self.nodes[node].terminal = Some(key_action.clone());
        self.max_sequence_len = self.max_sequence_len.max(key_action.len());
    }

    fn child(&self, node: usize, ch: char) -> Option<usize> {
        self.nodes[node]
            .children
            .iter()
            .find_map(|(it, child)| (*it == ch).then_some(*child))
    }

    /// Length of the longest bound sequence.
    #[must_use]
    pub fn max_sequence_len(&self) -> usize { self.max_sequence_len }

    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.nodes.iter().filter(|it| it.terminal.is_some()).count()
    }

    pub fn resolve(&self, pending: impl IntoIterator<Item = char>) -> Resolution {
        let mut pending = pending.into_iter();
        let Some(first) = pending.next() else {
            return Resolution::Empty;
        };

        let mut longest_match: Option<&KeyAction> = None;
        let mut node = ROOT;
        let mut walked_whole_buffer = true;

        for ch in std::iter::once(first).chain(pending) {
            match self.child(node, ch) {
                Some(child) => {
                    node = child;
                    if let Some(it) = &self.nodes[node].terminal {
                        longest_match = Some(it);
                    }
                }
                None => {
                    walked_whole_buffer = false;
                    break;
                }
            }
        }

        match longest_match {
            Some(it) => Resolution::Matched(it.clone()),
            None if walked_whole_buffer && !self.nodes[node].children.is_empty() => {
                Resolution::NeedMore
            }
            None => Resolution::Unbound(KeyAction::default_for(first)),
        }
    }
}
