// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Action, ActionName, KeyAction, SafeChainedAction, lock};

/// Holds the chained action that currently has input focus, if any.
#[derive(Debug, Default)]
pub struct ChainedFocus {
    current: Option<SafeChainedAction>,
}

impl ChainedFocus {
    #[must_use]
    pub fn is_active(&self) -> bool { self.current.as_ref().is_some_and(|it| lock(it).keep_focus()) }

    /// Gives focus to `action` if it is chained.
    pub fn take_focus(&mut self, action: &Action) {
        if let Some(it) = action.as_chained() {
            tracing::debug!(action = %lock(it).name(), "chained action has focus");
            self.current = Some(it.clone());
        }
    }

    /// Routes `key` to the focused action. Returns `None` (and drops the action) once it
    /// has released focus, so the key gets resolved normally.
    pub fn route(&mut self, resolved: Option<ActionName>, key: &KeyAction) -> Option<Action> {
        let current = self.current.as_ref()?;
        if !lock(current).keep_focus() {
            self.current = None;
            return None;
        }
        lock(current).input(resolved, key);
        Some(Action::Chained(current.clone()))
    }

    pub fn clear(&mut self) { self.current = None; }
}
