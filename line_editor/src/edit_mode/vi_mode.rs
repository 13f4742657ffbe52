// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Layered Vi dispatcher.
//!
//! Every key is bound to one or more [`ActionStatus`] entries, and only the entry whose
//! required status equals the current [`EditStatus`] applies. Operator + motion
//! composition falls out of this: `d` moves the status to [`EditStatus::Delete`], and
//! the motion entries bound under that status carry the delete operation into the
//! action they produce.
//!
//! ```text
//! COMMAND --d--> DELETE --w--> COMMAND   (delete word)
//! COMMAND --c--> CHANGE --w--> EDIT      (change word)
//! COMMAND --r--> REPLACE --<char>--> COMMAND
//! EDIT --Esc--> COMMAND --i--> EDIT
//! ```

use super::{EditMode,
            chained_focus::ChainedFocus,
            device_remap::remap_device_keys,
            vi_status::{ActionStatus, EditStatus, RepeatCategory, StatusBinding}};
use crate::{Action, ActionName, DeviceCapabilities, EditingMode, Key, KeyAction, KeyTable,
            KeyTableBuilder, KeyTableError, KeyTrie, SimpleAction};
use std::sync::Arc;

/// Largest count prefix, anything typed past it is ignored.
pub const VI_COUNT_MAX: usize = 9_999;

/// Operator statuses a motion key is also bound under, and the status each returns to.
const OPERATOR_PENDING: [(EditStatus, EditStatus); 5] = [
    (EditStatus::Delete, EditStatus::Command),
    (EditStatus::Change, EditStatus::Edit),
    (EditStatus::Yank, EditStatus::Command),
    (EditStatus::UpCase, EditStatus::Command),
    (EditStatus::DownCase, EditStatus::Command),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum ViKey {
    Named(Key),
    Raw(&'static [char]),
}

/// Collects the entries of each key in declaration order, then hands them to a
/// [`KeyTableBuilder`] as one [`StatusBinding`] per key.
#[derive(Debug, Default)]
struct ViBindings {
    entries: Vec<(ViKey, Vec<ActionStatus>)>,
}

impl ViBindings {
    fn push(&mut self, key: ViKey, entry: ActionStatus) -> &mut Self {
        match self.entries.iter_mut().find(|(it, _)| *it == key) {
            Some((_, group)) => group.push(entry),
            None => self.entries.push((key, vec![entry])),
        }
        self
    }

    fn entry(
        &mut self,
        key: Key,
        action: ActionName,
        required: EditStatus,
        next: EditStatus,
        repeat: RepeatCategory,
    ) -> &mut Self {
        self.push(ViKey::Named(key), ActionStatus::new(action, required, next, repeat))
    }

    fn command(&mut self, key: Key, action: ActionName, next: EditStatus, repeat: RepeatCategory) -> &mut Self {
        self.entry(key, action, EditStatus::Command, next, repeat)
    }

    fn edit(&mut self, key: Key, action: ActionName) -> &mut Self {
        self.entry(key, action, EditStatus::Edit, EditStatus::Edit, RepeatCategory::Never)
    }

    /// Same action in both EDIT and COMMAND status.
    fn both(&mut self, key: Key, action: ActionName) -> &mut Self {
        self.edit(key, action)
            .command(key, action, EditStatus::Command, RepeatCategory::Never)
    }

    /// A motion: moves the cursor in COMMAND status, supplies the range while an
    /// operator is pending.
    fn motion(&mut self, key: Key, action: ActionName) -> &mut Self {
        self.command(key, action, EditStatus::Command, RepeatCategory::Motion);
        for (required, next) in OPERATOR_PENDING {
            self.entry(key, action, required, next, RepeatCategory::Motion);
        }
        self
    }

    fn operator(&mut self, key: ViKey, action: ActionName, pending: EditStatus) -> &mut Self {
        self.push(
            key,
            ActionStatus::new(action, EditStatus::Command, pending, RepeatCategory::Never),
        )
    }

    /// The doubled form of an operator (`dd`, `cc`, ...) works on the whole line.
    fn whole_line(&mut self, key: Key, pending: EditStatus, next: EditStatus) -> &mut Self {
        self.entry(key, ActionName::ViWholeLine, pending, next, RepeatCategory::Motion)
    }

    fn into_builder(self) -> Result<KeyTableBuilder<StatusBinding>, KeyTableError> {
        let mut builder = KeyTableBuilder::new();
        for (key, group) in self.entries {
            let binding = StatusBinding::from_entries(&group);
            match key {
                ViKey::Named(key) => builder.bind(key, binding)?,
                ViKey::Raw(sequence) => builder.bind_sequence(sequence, binding)?,
            };
        }
        Ok(builder)
    }
}

fn default_bindings() -> ViBindings {
    use ActionName as A;
    use EditStatus::{Change, Command, Delete, DownCase, Edit, Repeat, Replace, UpCase, Yank};
    use RepeatCategory::{Change as Recorded, Never};

    let mut it = ViBindings::default();

    // Motions.
    it.motion(Key::Char('h'), A::BackwardChar)
        .motion(Key::Char('l'), A::ForwardChar)
        .motion(Key::Char(' '), A::ForwardChar)
        .motion(Key::Char('0'), A::BeginningOfLine)
        .motion(Key::Char('^'), A::ViFirstNonBlank)
        .motion(Key::Char('$'), A::EndOfLine)
        .motion(Key::Char('w'), A::ViForwardWord)
        .motion(Key::Char('W'), A::ViForwardBigWord)
        .motion(Key::Char('b'), A::ViBackwardWord)
        .motion(Key::Char('B'), A::ViBackwardBigWord)
        .motion(Key::Char('e'), A::ViEndWord)
        .motion(Key::Char('E'), A::ViEndBigWord);

    // Cursor keys also move in EDIT status.
    for (key, action) in [
        (Key::Left, A::BackwardChar),
        (Key::Right, A::ForwardChar),
        (Key::LeftSs3, A::BackwardChar),
        (Key::RightSs3, A::ForwardChar),
        (Key::Home, A::BeginningOfLine),
        (Key::End, A::EndOfLine),
        (Key::HomeSs3, A::BeginningOfLine),
        (Key::EndSs3, A::EndOfLine),
    ] {
        it.edit(key, action).motion(key, action);
    }

    // Operators, and their doubled forms.
    it.operator(ViKey::Named(Key::Char('d')), A::ViDeleteOperator, Delete)
        .whole_line(Key::Char('d'), Delete, Command)
        .operator(ViKey::Named(Key::Char('c')), A::ViChangeOperator, Change)
        .whole_line(Key::Char('c'), Change, Edit)
        .operator(ViKey::Named(Key::Char('y')), A::ViYankOperator, Yank)
        .whole_line(Key::Char('y'), Yank, Command)
        .operator(ViKey::Raw(&['g', 'U']), A::ViUpCaseOperator, UpCase)
        .whole_line(Key::Char('U'), UpCase, Command)
        .operator(ViKey::Raw(&['g', 'u']), A::ViDownCaseOperator, DownCase)
        .whole_line(Key::Char('u'), DownCase, Command);

    // Inserts.
    it.command(Key::Char('i'), A::ViInsert, Edit, Never)
        .command(Key::Char('a'), A::ViAppend, Edit, Never)
        .command(Key::Char('I'), A::ViInsertBeginning, Edit, Never)
        .command(Key::Char('A'), A::ViAppendEnd, Edit, Never);

    // Changes.
    it.command(Key::Char('x'), A::ViDeleteChar, Command, Recorded)
        .command(Key::Char('X'), A::ViBackwardDeleteChar, Command, Recorded)
        .command(Key::Char('D'), A::ViDeleteToEnd, Command, Recorded)
        .command(Key::Char('C'), A::ViChangeToEnd, Edit, Recorded)
        .command(Key::Char('s'), A::ViSubstituteChar, Edit, Recorded)
        .command(Key::Char('S'), A::ViSubstituteLine, Edit, Recorded)
        .command(Key::Char('~'), A::ViToggleCase, Command, Recorded)
        .command(Key::Char('p'), A::ViPasteAfter, Command, Recorded)
        .command(Key::Char('P'), A::ViPasteBefore, Command, Recorded)
        .command(Key::Char('r'), A::ViReplace, Replace, Never)
        .command(Key::Char('.'), A::ViRepeat, Repeat, Never)
        .command(Key::Char('u'), A::Undo, Command, Never);

    // History.
    it.command(Key::Char('j'), A::NextHistory, Command, Never)
        .command(Key::Char('k'), A::PreviousHistory, Command, Never)
        .command(Key::Char('/'), A::ReverseSearchHistory, Command, Never)
        .command(Key::Char('?'), A::ForwardSearchHistory, Command, Never)
        .both(Key::Up, A::PreviousHistory)
        .both(Key::Down, A::NextHistory)
        .both(Key::UpSs3, A::PreviousHistory)
        .both(Key::DownSs3, A::NextHistory);

    // Line control.
    it.both(Key::Enter, A::AcceptLine)
        .both(Key::Newline, A::AcceptLine)
        .both(Key::Ctrl('C'), A::Interrupt)
        .both(Key::Ctrl('D'), A::DeleteCharOrEof)
        .both(Key::Ctrl('L'), A::ClearScreen);

    // Insert mode editing keys.
    it.edit(Key::Tab, A::Complete)
        .edit(Key::Ctrl('R'), A::ReverseSearchHistory)
        .edit(Key::Ctrl('S'), A::ForwardSearchHistory)
        .edit(Key::Ctrl('V'), A::QuotedInsert)
        .edit(Key::Ctrl('W'), A::UnixWordRubout)
        .edit(Key::Ctrl('U'), A::BackwardKillLine)
        .edit(Key::Ctrl('K'), A::KillLine)
        .edit(Key::Ctrl('Y'), A::Yank)
        .edit(Key::Backspace, A::BackwardDeleteChar)
        .command(Key::Backspace, A::BackwardChar, Command, Never)
        .edit(Key::Ctrl('H'), A::BackwardDeleteChar)
        .command(Key::Ctrl('H'), A::BackwardChar, Command, Never)
        .edit(Key::Delete, A::DeleteChar)
        .command(Key::Delete, A::ViDeleteChar, Command, Recorded);

    // Escape leaves insert mode, and cancels a pending operator.
    it.entry(Key::Escape, A::ViCommandMode, Edit, Command, Never)
        .command(Key::Escape, A::ViCancel, Command, Never);
    for (pending, _) in OPERATOR_PENDING {
        it.entry(Key::Escape, A::ViCancel, pending, Command, Never);
    }

    it
}

/// Vi dispatcher. Starts in EDIT (insert) status like a shell line editor does.
///
/// Two prefix tries are handed out through [`EditMode::keys`]. EDIT and REPLACE status
/// only see sequences bound under EDIT, so a typed `g` inserts right away instead of
/// waiting to see whether `gU` follows.
#[derive(Debug)]
pub struct ViMode {
    table: KeyTable<StatusBinding>,
    insert_keys: Arc<KeyTrie>,
    status: EditStatus,
    last_change: Option<Action>,
    /// Count typed before the operator or command.
    count: Option<usize>,
    /// Count typed before the operator, once the operator is pending (the `2` in `2dw`).
    operator_count: Option<usize>,
    focus: ChainedFocus,
}

impl ViMode {
    /// # Errors
    ///
    /// [`KeyTableError`] if the default bindings conflict.
    pub fn new(capabilities: &dyn DeviceCapabilities) -> Result<Self, KeyTableError> {
        let mut builder = Self::default_bindings()?;
        let kill_to_eol = StatusBinding::Direct(ActionStatus::new(
            ActionName::KillLine,
            EditStatus::Edit,
            EditStatus::Edit,
            RepeatCategory::Never,
        ));
        remap_device_keys(&mut builder, capabilities, Some(kill_to_eol));
        Ok(Self::from_table(builder.build()))
    }

    /// # Errors
    ///
    /// [`KeyTableError`] if the default bindings conflict.
    pub fn default_bindings() -> Result<KeyTableBuilder<StatusBinding>, KeyTableError> {
        default_bindings().into_builder()
    }

    #[must_use]
    pub fn from_table(table: KeyTable<StatusBinding>) -> Self {
        Self {
            insert_keys: Self::insert_keys(&table),
            table,
            status: EditStatus::Edit,
            last_change: None,
            count: None,
            operator_count: None,
            focus: ChainedFocus::default(),
        }
    }

    fn insert_keys(table: &KeyTable<StatusBinding>) -> Arc<KeyTrie> {
        let keys = table
            .bindings()
            .filter(|(_, binding)| binding.for_status(EditStatus::Edit).is_some())
            .map(|(key, _)| key);
        Arc::new(KeyTrie::from_bindings(keys))
    }

    #[must_use]
    pub fn status(&self) -> EditStatus { self.status }

    #[must_use]
    pub fn last_change(&self) -> Option<&Action> { self.last_change.as_ref() }

    #[must_use]
    pub fn pending_count(&self) -> Option<usize> { self.count }

    fn set_status(&mut self, next: EditStatus) {
        if self.status != next {
            tracing::debug!(from = %self.status, to = %next, "vi status");
            self.status = next;
        }
    }

    fn clear_counts(&mut self) {
        self.count = None;
        self.operator_count = None;
    }

    /// Digits typed outside EDIT and REPLACE build up a count. `0` only continues a
    /// count, on its own it is the beginning-of-line motion.
    fn accumulate_count(&mut self, key: &KeyAction) -> bool {
        if matches!(self.status, EditStatus::Edit | EditStatus::Replace) {
            return false;
        }
        let Some(digit) = key.single_code_point().and_then(|it| it.to_digit(10)) else {
            return false;
        };
        if digit == 0 && self.count.is_none() {
            return false;
        }
        let digit = digit as usize;
        let count = self.count.unwrap_or(0).saturating_mul(10).saturating_add(digit);
        self.count = Some(count.min(VI_COUNT_MAX));
        true
    }

    /// Count for the action about to be built, `2d3w` deletes 6 words.
    fn take_count(&mut self) -> usize {
        let count = self.operator_count.unwrap_or(1) * self.count.unwrap_or(1);
        self.clear_counts();
        count
    }

    /// Name a key is bound to, used to tell a chained action what was typed. Chained
    /// actions take text, so keys mean what they mean in EDIT status.
    fn resolved_name(binding: Option<&StatusBinding>) -> Option<ActionName> {
        binding?.for_status(EditStatus::Edit).map(|it| it.action)
    }

    fn parse_replace(&mut self, key: &KeyAction) -> Option<Action> {
        self.clear_counts();
        self.set_status(EditStatus::Command);
        let ch = key.printable()?;
        let action = Action::Simple(SimpleAction::ReplaceChar(ch));
        self.last_change = Some(action.clone());
        Some(action)
    }
}

impl EditMode for ViMode {
    fn editing_mode(&self) -> EditingMode { EditingMode::Vi }

    fn parse(&mut self, key: &KeyAction) -> Option<Action> {
        let resolved = Self::resolved_name(self.table.get(key));
        if let Some(action) = self.focus.route(resolved, key) {
            return Some(action);
        }

        if self.accumulate_count(key) {
            tracing::trace!(count = ?self.count, "vi count");
            return None;
        }

        if self.status == EditStatus::Replace {
            return self.parse_replace(key);
        }

        let current = self.status;
        let entry = self.table.get(key).and_then(|it| it.for_status(current)).copied();
        let Some(entry) = entry else {
            if current == EditStatus::Edit {
                return Action::insert_key(key);
            }
            tracing::trace!(key = %key, status = %current, "no binding");
            self.clear_counts();
            return None;
        };

        if entry.action.is_chained() {
            self.clear_counts();
            let action = Action::from_name(entry.action, EditStatus::Move, 1);
            self.focus.take_focus(&action);
            return Some(action);
        }

        if entry.next == EditStatus::Repeat {
            self.clear_counts();
            return self.last_change.clone();
        }

        let count = if entry.next.is_operator_pending() && !current.is_operator_pending() {
            self.operator_count = self.count.take();
            1
        } else {
            self.take_count()
        };

        let action = Action::from_name(entry.action, current.operation(), count);
        self.set_status(entry.next);
        if entry.is_recorded_change(current) {
            self.last_change = Some(action.clone());
        }
        Some(action)
    }

    fn is_in_chained_action(&self) -> bool { self.focus.is_active() }

    fn add_action(&mut self, sequence: &[char], name: ActionName) -> Result<(), KeyTableError> {
        let repeat = if name.motion().is_some() {
            RepeatCategory::Motion
        } else {
            RepeatCategory::Never
        };
        let binding = StatusBinding::Direct(ActionStatus::new(
            name,
            EditStatus::Command,
            EditStatus::Command,
            repeat,
        ));
        let mut builder = self.table.to_builder();
        builder.bind_sequence(sequence, binding)?;
        self.table = builder.build();
        self.insert_keys = Self::insert_keys(&self.table);
        Ok(())
    }

    fn keys(&self) -> Arc<KeyTrie> {
        match self.status {
            EditStatus::Edit | EditStatus::Replace => self.insert_keys.clone(),
            _ => self.table.trie(),
        }
    }

    fn is_command_mode(&self) -> bool { self.status != EditStatus::Edit }

    fn reset(&mut self) {
        self.set_status(EditStatus::Edit);
        self.clear_counts();
        self.focus.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnsiDefaults, Motion, MotionAction, Resolution};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn vi() -> ViMode { ViMode::new(&AnsiDefaults).unwrap() }

    fn key(ch: char) -> KeyAction { KeyAction::default_for(ch) }

    fn command_mode() -> ViMode {
        let mut mode = vi();
        mode.parse(&Key::Escape.into());
        assert_eq!(mode.status(), EditStatus::Command);
        mode
    }

    #[test]
    fn test_starts_in_edit_and_self_inserts() {
        let mut mode = vi();
        assert_eq!(mode.status(), EditStatus::Edit);
        assert!(!mode.is_command_mode());
        let action = mode.parse(&key('x')).unwrap();
        assert!(matches!(action, Action::Simple(SimpleAction::SelfInsert('x'))));
    }

    #[test]
    fn test_multi_key_binding_inserts_text_in_edit() {
        let mut mode = vi();
        let action = mode.parse(&KeyAction::from_sequence(&['g', 'U'])).unwrap();
        assert!(matches!(action, Action::Simple(SimpleAction::InsertText(ref it)) if it == &['g', 'U']));
    }

    #[test]
    fn test_escape_enters_command_status() {
        let mut mode = vi();
        let action = mode.parse(&Key::Escape.into()).unwrap();
        assert_eq!(action.name(), ActionName::ViCommandMode);
        assert!(mode.is_command_mode());

        // Escape again is a no-op cancel.
        let action = mode.parse(&Key::Escape.into()).unwrap();
        assert_eq!(action.name(), ActionName::ViCancel);
        assert_eq!(mode.status(), EditStatus::Command);
    }

    #[test]
    fn test_unbound_key_in_command_is_a_silent_miss() {
        let mut mode = command_mode();
        assert!(mode.parse(&key('Z')).is_none());
        assert_eq!(mode.status(), EditStatus::Command);
    }

    #[test]
    fn test_unbound_key_keeps_pending_operator() {
        let mut mode = command_mode();
        mode.parse(&key('d'));
        assert!(mode.parse(&key('z')).is_none());
        assert_eq!(mode.status(), EditStatus::Delete);
        assert!(mode.last_change().is_none());

        // The operator still applies to the next motion.
        let action = mode.parse(&key('w')).unwrap();
        assert_eq!(action.name(), ActionName::ViForwardWord);
        assert_eq!(mode.status(), EditStatus::Command);
    }

    #[test]
    fn test_insert_status_trie_has_no_command_sequences() {
        let mut mode = vi();
        assert_eq!(mode.keys().resolve(['g']), Resolution::Unbound(key('g')));
        assert_eq!(mode.keys().resolve([crate::ESC]), Resolution::Matched(Key::Escape.into()));

        mode.parse(&Key::Escape.into());
        assert_eq!(mode.keys().resolve(['g']), Resolution::NeedMore);

        mode.parse(&key('i'));
        assert_eq!(mode.status(), EditStatus::Edit);
        assert_eq!(mode.keys().resolve(['g']), Resolution::Unbound(key('g')));
    }

    #[test]
    fn test_change_word_stops_at_end_of_word() {
        let mut mode = command_mode();
        mode.parse(&key('c'));
        let Some(Action::Repeatable(motion)) = mode.parse(&key('w')) else {
            panic!("expected a repeatable action");
        };
        assert_eq!(motion.motion, Motion::ViChangeWord { big: false });
        assert_eq!(motion.operation, EditStatus::Change);
        assert_eq!(mode.status(), EditStatus::Edit);
    }

    #[test]
    fn test_operator_then_motion_composes() {
        let mut mode = command_mode();
        let action = mode.parse(&key('d')).unwrap();
        assert_eq!(action.name(), ActionName::ViDeleteOperator);
        assert_eq!(mode.status(), EditStatus::Delete);

        let action = mode.parse(&key('b')).unwrap();
        assert_eq!(mode.status(), EditStatus::Command);
        let Action::Repeatable(motion) = action else {
            panic!("expected a repeatable action");
        };
        assert_eq!(
            motion,
            MotionAction {
                name: ActionName::ViBackwardWord,
                motion: Motion::ViBackwardWord { big: false },
                operation: EditStatus::Delete,
                count: 1,
            }
        );
        assert_eq!(mode.last_change().map(Action::name), Some(ActionName::ViBackwardWord));
    }

    #[test]
    fn test_plain_motion_is_not_recorded() {
        let mut mode = command_mode();
        mode.parse(&key('x'));
        mode.parse(&key('w'));
        assert_eq!(mode.last_change().map(Action::name), Some(ActionName::ViDeleteChar));
    }

    #[test]
    fn test_repeat_returns_last_change() {
        let mut mode = command_mode();
        assert!(mode.parse(&key('.')).is_none());
        mode.parse(&key('x'));
        let action = mode.parse(&key('.')).unwrap();
        assert_eq!(action.name(), ActionName::ViDeleteChar);
        assert_eq!(mode.status(), EditStatus::Command);
    }

    #[test]
    fn test_change_operator_ends_in_edit() {
        let mut mode = command_mode();
        mode.parse(&key('c'));
        assert_eq!(mode.status(), EditStatus::Change);
        let action = mode.parse(&key('c')).unwrap();
        assert_eq!(action.name(), ActionName::ViWholeLine);
        assert_eq!(mode.status(), EditStatus::Edit);
    }

    #[test]
    fn test_case_operators_use_raw_sequences() {
        let mut mode = command_mode();
        mode.parse(&KeyAction::from_sequence(&['g', 'U']));
        assert_eq!(mode.status(), EditStatus::UpCase);
        let Some(Action::Repeatable(motion)) = mode.parse(&key('w')) else {
            panic!("expected a repeatable action");
        };
        assert_eq!(motion.operation, EditStatus::UpCase);

        // `u` is undo in COMMAND, but the whole line under a pending `gu`.
        assert_eq!(mode.parse(&key('u')).map(|it| it.name()), Some(ActionName::Undo));
        mode.parse(&KeyAction::from_sequence(&['g', 'u']));
        assert_eq!(mode.parse(&key('u')).map(|it| it.name()), Some(ActionName::ViWholeLine));
    }

    #[test_case(&['3', 'x'], 3; "count before command")]
    #[test_case(&['2', 'd', '3', 'w'], 6; "counts multiply across operator")]
    #[test_case(&['d', '1', '0', 'w'], 10; "zero continues a count")]
    fn test_counts(keys: &[char], expected: usize) {
        let mut mode = command_mode();
        let mut last = None;
        for ch in keys {
            last = mode.parse(&key(*ch));
        }
        let Some(Action::Repeatable(motion)) = last else {
            panic!("expected a repeatable action");
        };
        assert_eq!(motion.count, expected);
        assert_eq!(mode.pending_count(), None);
    }

    #[test]
    fn test_zero_alone_is_beginning_of_line() {
        let mut mode = command_mode();
        let action = mode.parse(&key('0')).unwrap();
        assert_eq!(action.name(), ActionName::BeginningOfLine);
    }

    #[test]
    fn test_replace_takes_next_char() {
        let mut mode = command_mode();
        mode.parse(&key('r'));
        assert_eq!(mode.status(), EditStatus::Replace);
        let action = mode.parse(&key('z')).unwrap();
        assert!(matches!(action, Action::Simple(SimpleAction::ReplaceChar('z'))));
        assert_eq!(mode.status(), EditStatus::Command);
        assert_eq!(mode.last_change().map(Action::name), Some(ActionName::ViReplace));

        // Escape cancels.
        mode.parse(&key('r'));
        assert!(mode.parse(&Key::Escape.into()).is_none());
        assert_eq!(mode.status(), EditStatus::Command);
    }

    #[test]
    fn test_escape_cancels_pending_operator() {
        let mut mode = command_mode();
        mode.parse(&key('y'));
        assert_eq!(mode.status(), EditStatus::Yank);
        mode.parse(&Key::Escape.into());
        assert_eq!(mode.status(), EditStatus::Command);
    }

    #[test]
    fn test_search_is_chained_and_keeps_status() {
        let mut mode = command_mode();
        let action = mode.parse(&key('/')).unwrap();
        assert_eq!(action.name(), ActionName::ReverseSearchHistory);
        assert!(mode.is_in_chained_action());
        assert_eq!(mode.status(), EditStatus::Command);
        // `x` goes to the search instead of deleting.
        assert_eq!(mode.parse(&key('x')).map(|it| it.name()), Some(ActionName::ReverseSearchHistory));
    }

    #[test]
    fn test_reset_returns_to_edit() {
        let mut mode = command_mode();
        mode.parse(&key('d'));
        mode.reset();
        assert_eq!(mode.status(), EditStatus::Edit);
    }

    #[test]
    fn test_add_action_binds_in_command_status() {
        let mut mode = command_mode();
        mode.add_action(&['g', 'g'], ActionName::BeginningOfHistory).unwrap();
        assert_eq!(
            mode.parse(&KeyAction::from_sequence(&['g', 'g'])).map(|it| it.name()),
            Some(ActionName::BeginningOfHistory)
        );
        assert!(mode.add_action(&['x'], ActionName::Undo).is_err());
    }
}
