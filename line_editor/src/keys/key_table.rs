// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{key::{Key, display_code_points},
            key_action::KeyAction,
            key_trie::KeyTrie};
use crate::KeyTableError;
use std::{collections::HashMap, sync::Arc};

/// Mutable stage of a key table. Bindings (and device remapping through
/// [`KeyTableBuilder::rebind`]) happen here, then [`KeyTableBuilder::build`] freezes
/// the result into a [`KeyTable`].
#[derive(Debug, Clone)]
pub struct KeyTableBuilder<T> {
    named: HashMap<KeyAction, T>,
    raw: Vec<(KeyAction, T)>,
}

impl<T> Default for KeyTableBuilder<T> {
    fn default() -> Self {
        Self {
            named: HashMap::new(),
            raw: Vec::new(),
        }
    }
}

impl<T> KeyTableBuilder<T> {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    fn contains(&self, key_action: &KeyAction) -> bool {
        self.named.contains_key(key_action) || self.raw.iter().any(|(it, _)| it == key_action)
    }

    fn ensure_unbound(&self, key_action: &KeyAction) -> Result<(), KeyTableError> {
        if key_action.is_empty() {
            return Err(KeyTableError::EmptySequence);
        }
        if self.contains(key_action) {
            return Err(KeyTableError::DuplicateBinding {
                sequence: display_code_points(key_action.code_points()),
            });
        }
        Ok(())
    }

    /// Binds a named key.
    ///
    /// # Errors
    ///
    /// [`KeyTableError::DuplicateBinding`] if the key's code points are already bound,
    /// under any name.
    pub fn bind(&mut self, key: Key, value: T) -> Result<&mut Self, KeyTableError> {
        let key_action = KeyAction::from(key);
        self.ensure_unbound(&key_action)?;
        self.named.insert(key_action, value);
        Ok(self)
    }

    /// Binds a raw sequence that has no [`Key`] name, eg: a two key chord like `g U`.
    ///
    /// # Errors
    ///
    /// [`KeyTableError::EmptySequence`] or [`KeyTableError::DuplicateBinding`].
    pub fn bind_sequence(
        &mut self,
        code_points: &[char],
        value: T,
    ) -> Result<&mut Self, KeyTableError> {
        let key_action = KeyAction::from_sequence(code_points);
        self.ensure_unbound(&key_action)?;
        self.raw.push((key_action, value));
        Ok(self)
    }

    /// Moves the binding of `old` to the sequence `new`, keeping its value. Used to adapt
    /// the default bindings to what the connected device actually sends.
    ///
    /// # Errors
    ///
    /// [`KeyTableError::MissingBinding`] if `old` isn't bound, and
    /// [`KeyTableError::DuplicateBinding`] if `new` already is.
    pub fn rebind(&mut self, old: &KeyAction, new: KeyAction) -> Result<&mut Self, KeyTableError> {
        if old == &new {
            return Ok(self);
        }
        if !self.contains(old) {
            return Err(KeyTableError::MissingBinding {
                sequence: display_code_points(old.code_points()),
            });
        }
        self.ensure_unbound(&new)?;

        if let Some(value) = self.named.remove(old) {
            self.named.insert(new, value);
        } else if let Some(entry) = self.raw.iter_mut().find(|(it, _)| it == old) {
            entry.0 = new;
        }
        Ok(self)
    }

    #[must_use]
    pub fn len(&self) -> usize { self.named.len() + self.raw.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    #[must_use]
    pub fn build(self) -> KeyTable<T> {
        let trie = KeyTrie::from_bindings(
            self.named.keys().chain(self.raw.iter().map(|(it, _)| it)),
        );
        tracing::debug!(
            named = self.named.len(),
            raw = self.raw.len(),
            max_sequence_len = trie.max_sequence_len(),
            "key table built"
        );
        KeyTable {
            named: self.named,
            raw: self.raw,
            trie: Arc::new(trie),
        }
    }
}

/// Frozen binding table owned by an edit mode. Lookups go to the named key map first,
/// then to a linear scan of the raw sequences. The prefix trie over all bindings is
/// shared with the [`KeyAssembler`].
///
/// [`KeyAssembler`]: crate::KeyAssembler
#[derive(Debug)]
pub struct KeyTable<T> {
    named: HashMap<KeyAction, T>,
    raw: Vec<(KeyAction, T)>,
    trie: Arc<KeyTrie>,
}

impl<T> KeyTable<T> {
    #[must_use]
    pub fn get(&self, key_action: &KeyAction) -> Option<&T> {
        self.named.get(key_action).or_else(|| {
            self.raw
                .iter()
                .find_map(|(it, value)| (it == key_action).then_some(value))
        })
    }

    #[must_use]
    pub fn contains(&self, key_action: &KeyAction) -> bool { self.get(key_action).is_some() }

    /// Every binding. Named keys come in no particular order, raw sequences follow in
    /// the order they were bound.
    pub fn bindings(&self) -> impl Iterator<Item = (&KeyAction, &T)> {
        self.named.iter().chain(self.raw.iter().map(|(key, value)| (key, value)))
    }

    #[must_use]
    pub fn trie(&self) -> Arc<KeyTrie> { self.trie.clone() }

    #[must_use]
    pub fn len(&self) -> usize { self.named.len() + self.raw.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl<T: Clone> KeyTable<T> {
    /// Thaws the table so more bindings can be added, then [`KeyTableBuilder::build`]
    /// produces a replacement.
    #[must_use]
    pub fn to_builder(&self) -> KeyTableBuilder<T> {
        KeyTableBuilder {
            named: self.named.clone(),
            raw: self.raw.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Resolution;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_named_and_raw_lookup() {
        let mut builder = KeyTableBuilder::new();
        builder.bind(Key::Ctrl('A'), 1).unwrap();
        builder.bind_sequence(&['g', 'U'], 2).unwrap();
        let table = builder.build();

        assert_eq!(table.get(&KeyAction::default_for('\x01')), Some(&1));
        assert_eq!(table.get(&KeyAction::new(['g', 'U'], "gU")), Some(&2));
        assert_eq!(table.get(&KeyAction::default_for('g')), None);
        assert_eq!(table.len(), 2);
        assert_eq!(table.bindings().last().map(|(_, it)| *it), Some(2));
    }

    #[test]
    fn test_duplicate_binding_is_rejected_across_names() {
        let mut builder = KeyTableBuilder::new();
        builder.bind(Key::Enter, "accept").unwrap();
        let result = builder.bind(Key::Ctrl('M'), "other");
        assert_eq!(
            result.err(),
            Some(KeyTableError::DuplicateBinding {
                sequence: "^M".to_string(),
            })
        );
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let mut builder = KeyTableBuilder::<u8>::new();
        assert_eq!(
            builder.bind_sequence(&[], 0).err(),
            Some(KeyTableError::EmptySequence)
        );
    }

    #[test]
    fn test_rebind_moves_value_and_updates_trie() {
        let mut builder = KeyTableBuilder::new();
        builder.bind(Key::Home, "home").unwrap();
        builder
            .rebind(&Key::Home.into(), Key::HomeVt.into())
            .unwrap();
        let table = builder.build();

        assert_eq!(table.get(&Key::Home.into()), None);
        assert_eq!(table.get(&Key::HomeVt.into()), Some(&"home"));
        assert!(matches!(
            table.trie().resolve(Key::HomeVt.code_points()),
            Resolution::Matched(_)
        ));
    }

    #[test]
    fn test_rebind_errors() {
        let mut builder = KeyTableBuilder::new();
        builder.bind(Key::Up, 1).unwrap();
        builder.bind(Key::UpSs3, 2).unwrap();

        assert!(matches!(
            builder.rebind(&Key::Up.into(), Key::UpSs3.into()),
            Err(KeyTableError::DuplicateBinding { .. })
        ));
        assert!(matches!(
            builder.rebind(&Key::Down.into(), Key::DownSs3.into()),
            Err(KeyTableError::MissingBinding { .. })
        ));
    }

    #[test]
    fn test_to_builder_keeps_existing_bindings() {
        let mut builder = KeyTableBuilder::new();
        builder.bind(Key::Tab, 'c').unwrap();
        let table = builder.build();

        let mut thawed = table.to_builder();
        thawed.bind(Key::Ctrl('T'), 't').unwrap();
        let table = thawed.build();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&Key::Tab.into()), Some(&'c'));
    }
}
