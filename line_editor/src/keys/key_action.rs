// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::key::{Key, KeySequence, display_code_points};
use smallvec::smallvec;
use std::{fmt::{Display, Formatter},
          hash::{Hash, Hasher}};

/// A resolved unit of keyboard input: the code points that were consumed plus a display
/// name. Equality and hashing only look at the code points, so a [`KeyAction`] made from
/// a [`Key`] matches the same bytes coming off the wire no matter what it is called.
#[derive(Debug, Clone)]
pub struct KeyAction {
    code_points: KeySequence,
    name: String,
}

impl KeyAction {
    #[must_use]
    pub fn new(code_points: impl IntoIterator<Item = char>, name: impl Into<String>) -> Self {
        Self {
            code_points: code_points.into_iter().collect(),
            name: name.into(),
        }
    }

    /// Sequence named after its caret notation, for raw bindings that aren't a [`Key`].
    #[must_use]
    pub fn from_sequence(code_points: &[char]) -> Self {
        Self::new(code_points.iter().copied(), display_code_points(code_points))
    }

    /// Wraps exactly one code point that didn't match any binding.
    #[must_use]
    pub fn default_for(code_point: char) -> Self {
        Self {
            code_points: smallvec![code_point],
            name: display_code_points(&[code_point]),
        }
    }

    #[must_use]
    pub fn code_points(&self) -> &[char] { &self.code_points }

    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    #[must_use]
    pub fn len(&self) -> usize { self.code_points.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.code_points.is_empty() }

    /// The single code point of a one code point action, eg: a printable key.
    #[must_use]
    pub fn single_code_point(&self) -> Option<char> {
        match self.code_points.as_slice() {
            [it] => Some(*it),
            _ => None,
        }
    }

    /// Printable single code point, ie: something that can be inserted into the line.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        self.single_code_point().filter(|it| !it.is_control())
    }

    /// This sequence with `leader` in front, used for leader key lookups.
    #[must_use]
    pub fn prefixed_with(&self, leader: &KeyAction) -> KeyAction {
        let code_points = leader.code_points.iter().chain(self.code_points.iter()).copied();
        KeyAction::new(code_points, format!("{} {}", leader.name, self.name))
    }
}

impl From<Key> for KeyAction {
    fn from(key: Key) -> Self {
        Self {
            code_points: key.code_points(),
            name: key.name(),
        }
    }
}

impl PartialEq for KeyAction {
    fn eq(&self, other: &Self) -> bool { self.code_points == other.code_points }
}

impl Eq for KeyAction {}

impl Hash for KeyAction {
    fn hash<H: Hasher>(&self, state: &mut H) { self.code_points.hash(state); }
}

impl Display for KeyAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.name) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_equality_ignores_name() {
        let named = KeyAction::from(Key::Ctrl('D'));
        let raw = KeyAction::default_for('\x04');
        assert_eq!(named, raw);
        assert_eq!(named.name(), "Ctrl-D");
        assert_eq!(raw.name(), "^D");
    }

    #[test]
    fn test_printable_rejects_control_and_multi_code_point() {
        assert_eq!(KeyAction::default_for('x').printable(), Some('x'));
        assert_eq!(KeyAction::default_for('\x01').printable(), None);
        assert_eq!(KeyAction::from(Key::Up).printable(), None);
    }

    #[test]
    fn test_prefixed_with_leader() {
        let leader = KeyAction::from(Key::Escape);
        let combined = KeyAction::default_for('f').prefixed_with(&leader);
        assert_eq!(combined, KeyAction::from(Key::Meta('f')));
    }
}
