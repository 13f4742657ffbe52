// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{EditMode,
            chained_focus::ChainedFocus,
            device_remap::remap_device_keys,
            leader::{LeaderState, LeaderStep}};
use crate::{Action, ActionName, DeviceCapabilities, EditStatus, EditingMode, ESC, DEL, Key,
            KeyAction, KeyTable, KeyTableBuilder, KeyTableError, KeyTrie};
use std::sync::Arc;

/// Default Emacs bindings for named keys. `ESC` is the meta leader, so Meta chords work
/// both when the terminal sends them in one read and when `ESC` arrives on its own.
pub const EMACS_KEY_BINDINGS: &[(Key, ActionName)] = &[
    (Key::Ctrl('A'), ActionName::BeginningOfLine),
    (Key::Ctrl('B'), ActionName::BackwardChar),
    (Key::Ctrl('C'), ActionName::Interrupt),
    (Key::Ctrl('D'), ActionName::DeleteCharOrEof),
    (Key::Ctrl('E'), ActionName::EndOfLine),
    (Key::Ctrl('F'), ActionName::ForwardChar),
    (Key::Ctrl('H'), ActionName::BackwardDeleteChar),
    (Key::Tab, ActionName::Complete),
    (Key::Newline, ActionName::AcceptLine),
    (Key::Ctrl('K'), ActionName::KillLine),
    (Key::Ctrl('L'), ActionName::ClearScreen),
    (Key::Enter, ActionName::AcceptLine),
    (Key::Ctrl('N'), ActionName::NextHistory),
    (Key::Ctrl('P'), ActionName::PreviousHistory),
    (Key::Ctrl('R'), ActionName::ReverseSearchHistory),
    (Key::Ctrl('S'), ActionName::ForwardSearchHistory),
    (Key::Ctrl('T'), ActionName::TransposeChars),
    (Key::Ctrl('U'), ActionName::BackwardKillLine),
    (Key::Ctrl('V'), ActionName::QuotedInsert),
    (Key::Ctrl('W'), ActionName::UnixWordRubout),
    (Key::Ctrl('Y'), ActionName::Yank),
    (Key::Ctrl('_'), ActionName::Undo),
    (Key::Backspace, ActionName::BackwardDeleteChar),
    (Key::Escape, ActionName::MetaPrefix),
    (Key::Meta('f'), ActionName::ForwardWord),
    (Key::Meta('b'), ActionName::BackwardWord),
    (Key::Meta('d'), ActionName::KillWord),
    (Key::Meta('u'), ActionName::UpcaseWord),
    (Key::Meta('l'), ActionName::DowncaseWord),
    (Key::Meta('c'), ActionName::CapitalizeWord),
    (Key::Meta('<'), ActionName::BeginningOfHistory),
    (Key::Meta('>'), ActionName::EndOfHistory),
    (Key::Up, ActionName::PreviousHistory),
    (Key::Down, ActionName::NextHistory),
    (Key::Right, ActionName::ForwardChar),
    (Key::Left, ActionName::BackwardChar),
    (Key::UpSs3, ActionName::PreviousHistory),
    (Key::DownSs3, ActionName::NextHistory),
    (Key::RightSs3, ActionName::ForwardChar),
    (Key::LeftSs3, ActionName::BackwardChar),
    (Key::CtrlRight, ActionName::ForwardWord),
    (Key::CtrlLeft, ActionName::BackwardWord),
    (Key::Home, ActionName::BeginningOfLine),
    (Key::End, ActionName::EndOfLine),
    (Key::HomeSs3, ActionName::BeginningOfLine),
    (Key::EndSs3, ActionName::EndOfLine),
    (Key::Delete, ActionName::DeleteChar),
];

/// Sequences with no [`Key`] name.
pub const EMACS_RAW_BINDINGS: &[(&[char], ActionName)] =
    &[(&[ESC, DEL], ActionName::BackwardKillWord)];

/// Flat Emacs dispatcher: a key maps to the same action no matter what came before,
/// except right after the meta leader and while a chained action holds focus.
#[derive(Debug)]
pub struct EmacsMode {
    table: KeyTable<ActionName>,
    leader: LeaderState,
    leader_key: KeyAction,
    focus: ChainedFocus,
}

impl EmacsMode {
    /// # Errors
    ///
    /// [`KeyTableError`] if the default bindings conflict.
    pub fn new(capabilities: &dyn DeviceCapabilities) -> Result<Self, KeyTableError> {
        let mut builder = Self::default_bindings()?;
        remap_device_keys(&mut builder, capabilities, Some(ActionName::KillLine));
        Ok(Self::from_table(builder.build()))
    }

    /// # Errors
    ///
    /// [`KeyTableError`] if the default bindings conflict.
    pub fn default_bindings() -> Result<KeyTableBuilder<ActionName>, KeyTableError> {
        let mut builder = KeyTableBuilder::new();
        for (key, name) in EMACS_KEY_BINDINGS {
            builder.bind(*key, *name)?;
        }
        for (sequence, name) in EMACS_RAW_BINDINGS {
            builder.bind_sequence(sequence, *name)?;
        }
        Ok(builder)
    }

    #[must_use]
    pub fn from_table(table: KeyTable<ActionName>) -> Self {
        Self {
            table,
            leader: LeaderState::default(),
            leader_key: Key::Escape.into(),
            focus: ChainedFocus::default(),
        }
    }

    #[must_use]
    pub fn leader_state(&self) -> LeaderState { self.leader }

    fn build(&mut self, name: ActionName) -> Action {
        let action = Action::from_name(name, EditStatus::Move, 1);
        self.focus.take_focus(&action);
        action
    }
}

impl EditMode for EmacsMode {
    fn editing_mode(&self) -> EditingMode { EditingMode::Emacs }

    fn parse(&mut self, key: &KeyAction) -> Option<Action> {
        let resolved = self.table.get(key).copied();

        if let Some(action) = self.focus.route(resolved, key) {
            return Some(action);
        }

        let is_leader = resolved == Some(ActionName::MetaPrefix);
        match self.leader.step(key, is_leader, &self.leader_key) {
            LeaderStep::Armed => {
                tracing::trace!("meta prefix armed");
                None
            }
            LeaderStep::Cleared => None,
            LeaderStep::Target(combined) => {
                let name = self.table.get(&combined).copied()?;
                Some(self.build(name))
            }
            LeaderStep::Pass => match resolved {
                Some(name) => Some(self.build(name)),
                None => key.printable().map(Action::self_insert),
            },
        }
    }

    fn is_in_chained_action(&self) -> bool { self.focus.is_active() }

    fn add_action(&mut self, sequence: &[char], name: ActionName) -> Result<(), KeyTableError> {
        let mut builder = self.table.to_builder();
        builder.bind_sequence(sequence, name)?;
        self.table = builder.build();
        Ok(())
    }

    fn keys(&self) -> Arc<KeyTrie> { self.table.trie() }

    fn reset(&mut self) {
        self.leader.reset();
        self.focus.clear();
    }
}
