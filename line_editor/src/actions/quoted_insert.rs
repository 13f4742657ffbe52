// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{action::ActionEvent,
            action_context::{ActionContext, ActionOutcome},
            action_name::ActionName};
use crate::KeyAction;

/// Ctrl-V: inserts the next key literally, whatever it is bound to.
#[derive(Debug, Default)]
pub struct QuotedInsert {
    pending: Option<KeyAction>,
    done: bool,
}

impl ActionEvent for QuotedInsert {
    fn name(&self) -> ActionName { ActionName::QuotedInsert }

    fn input(&mut self, _resolved: Option<ActionName>, key: &KeyAction) {
        self.pending = Some(key.clone());
    }

    fn keep_focus(&self) -> bool { !self.done }

    fn apply(&mut self, ctx: &mut ActionContext<'_>) -> ActionOutcome {
        if let Some(key) = self.pending.take() {
            ctx.buffer.push_undo();
            ctx.buffer.insert(key.code_points());
            self.done = true;
        }
        ActionOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodePointBuffer, History, Key, LineBuffer, PasteRing, ReadlineConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_next_key_is_inserted_literally() {
        let mut buffer = CodePointBuffer::new();
        let mut paste = PasteRing::default();
        let mut history = History::default();
        let config = ReadlineConfig::default();
        let mut ctx = ActionContext::new(&mut buffer, &mut paste, &mut history, &config);

        let mut action = QuotedInsert::default();
        assert_eq!(action.apply(&mut ctx), ActionOutcome::Continue);
        assert!(action.keep_focus());

        action.input(Some(ActionName::AcceptLine), &Key::Enter.into());
        action.apply(&mut ctx);
        assert!(!action.keep_focus());
        assert_eq!(ctx.buffer.code_points(), &['\r']);
    }
}
