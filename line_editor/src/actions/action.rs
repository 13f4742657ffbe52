// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{action_context::{ActionContext, ActionOutcome},
            action_name::ActionName,
            apply_delta::apply_delta,
            motion::Motion,
            quoted_insert::QuotedInsert,
            search_action::SearchAction};
use crate::{EditStatus, KeyAction, SearchDirection, find_term};
use std::{fmt::Debug,
          sync::{Arc, Mutex as StdMutex, PoisonError}};

/// An action that keeps input focus across several keystrokes. While
/// [`ActionEvent::keep_focus`] is true, the edit mode routes every key to
/// [`ActionEvent::input`] instead of resolving it, then the editor applies the action
/// again.
pub trait ActionEvent: Debug + Send {
    fn name(&self) -> ActionName;

    /// `resolved` is what the key is bound to in the active mode, if anything.
    fn input(&mut self, resolved: Option<ActionName>, key: &KeyAction);

    fn keep_focus(&self) -> bool;

    fn apply(&mut self, ctx: &mut ActionContext<'_>) -> ActionOutcome;
}

pub type SafeChainedAction = Arc<StdMutex<dyn ActionEvent>>;

/// One shot actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleAction {
    SelfInsert(char),
    /// Printable text that resolved as one key, eg: `gU` typed in Vi insert status.
    InsertText(Vec<char>),
    /// Vi `r<char>`.
    ReplaceChar(char),
    Named { name: ActionName, count: usize },
}

/// A motion combined with an operation, eg: Emacs `kill-word` or Vi `d` `b`. These are
/// what Vi's repeat-last-change replays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionAction {
    pub name: ActionName,
    pub motion: Motion,
    pub operation: EditStatus,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub enum Action {
    Simple(SimpleAction),
    Repeatable(MotionAction),
    Chained(SafeChainedAction),
}

impl Action {
    /// Builds a fresh action for `name`. `status_operation` is used by motions that
    /// don't carry their own operation (see [`ActionName::fixed_operation`]).
    #[must_use]
    pub fn from_name(name: ActionName, status_operation: EditStatus, count: usize) -> Self {
        let count = count.max(1);
        if name.is_chained() {
            let chained: SafeChainedAction = match name {
                ActionName::QuotedInsert => Arc::new(StdMutex::new(QuotedInsert::default())),
                ActionName::ForwardSearchHistory => {
                    Arc::new(StdMutex::new(SearchAction::new(SearchDirection::Forward)))
                }
                _ => Arc::new(StdMutex::new(SearchAction::new(SearchDirection::Reverse))),
            };
            return Action::Chained(chained);
        }
        let operation = name.fixed_operation().unwrap_or(status_operation);
        match name.motion_for(operation) {
            Some(motion) => Action::Repeatable(MotionAction {
                name,
                motion,
                operation,
                count,
            }),
            None => Action::Simple(SimpleAction::Named { name, count }),
        }
    }

    #[must_use]
    pub fn self_insert(ch: char) -> Self { Action::Simple(SimpleAction::SelfInsert(ch)) }

    /// Inserts every code point of `key`, or `None` if any of them is a control
    /// character.
    #[must_use]
    pub fn insert_key(key: &KeyAction) -> Option<Self> {
        if let Some(ch) = key.printable() {
            return Some(Self::self_insert(ch));
        }
        let code_points = key.code_points();
        if code_points.len() > 1 && code_points.iter().all(|it| !it.is_control()) {
            return Some(Action::Simple(SimpleAction::InsertText(code_points.to_vec())));
        }
        None
    }

    #[must_use]
    pub fn name(&self) -> ActionName {
        match self {
            Action::Simple(SimpleAction::SelfInsert(_) | SimpleAction::InsertText(_)) => {
                ActionName::SelfInsert
            }
            Action::Simple(SimpleAction::ReplaceChar(_)) => ActionName::ViReplace,
            Action::Simple(SimpleAction::Named { name, .. }) => *name,
            Action::Repeatable(it) => it.name,
            Action::Chained(it) => lock(it).name(),
        }
    }

    #[must_use]
    pub fn as_chained(&self) -> Option<&SafeChainedAction> {
        match self {
            Action::Chained(it) => Some(it),
            _ => None,
        }
    }

    pub fn apply(&self, ctx: &mut ActionContext<'_>) -> ActionOutcome {
        tracing::trace!(action = %self.name(), "apply");
        match self {
            Action::Simple(it) => it.apply(ctx),
            Action::Repeatable(it) => it.apply(ctx),
            Action::Chained(it) => lock(it).apply(ctx),
        }
    }
}

/// Chained actions are only driven from the reader, a poisoned lock still holds a
/// usable action.
pub fn lock(action: &SafeChainedAction) -> std::sync::MutexGuard<'_, dyn ActionEvent + 'static> {
    action.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MotionAction {
    pub fn apply(&self, ctx: &mut ActionContext<'_>) -> ActionOutcome {
        let from = ctx.buffer.cursor();
        let line = ctx.buffer.code_points();

        let (from, mut to) = if self.motion == Motion::WholeLine {
            (0, line.len())
        } else {
            let to = (0..self.count).fold(from, |pos, _| self.motion.target(line, pos));
            (from, to)
        };
        if self.motion.is_inclusive() && self.operation != EditStatus::Move {
            to = (to + 1).min(line.len());
        }

        if self.motion == Motion::WholeLine && self.operation == EditStatus::Yank {
            let cursor = ctx.buffer.cursor();
            apply_delta(ctx, from, to, self.operation);
            ctx.buffer.set_cursor(cursor);
            ctx.clamp_cursor_for_command_mode();
        } else {
            apply_delta(ctx, from, to, self.operation);
        }
        ActionOutcome::Continue
    }
}

impl SimpleAction {
    pub fn apply(&self, ctx: &mut ActionContext<'_>) -> ActionOutcome {
        match self {
            SimpleAction::SelfInsert(ch) => {
                ctx.buffer.push_undo();
                ctx.buffer.insert(&[*ch]);
                ActionOutcome::Continue
            }
            SimpleAction::InsertText(text) => {
                ctx.buffer.push_undo();
                ctx.buffer.insert(text);
                ActionOutcome::Continue
            }
            SimpleAction::ReplaceChar(ch) => {
                let cursor = ctx.buffer.cursor();
                if cursor < ctx.buffer.len() {
                    ctx.buffer.push_undo();
                    ctx.buffer.delete(1);
                    ctx.buffer.insert(&[*ch]);
                    ctx.buffer.set_cursor(cursor);
                }
                ActionOutcome::Continue
            }
            SimpleAction::Named { name, count } => apply_named(*name, *count, ctx),
        }
    }
}

fn replace_line(ctx: &mut ActionContext<'_>, line: Option<Vec<char>>) -> ActionOutcome {
    match line {
        Some(line) => {
            ctx.buffer.replace(&line);
            ctx.clamp_cursor_for_command_mode();
            ActionOutcome::Continue
        }
        None => ctx.bell(),
    }
}

fn apply_named(name: ActionName, count: usize, ctx: &mut ActionContext<'_>) -> ActionOutcome {
    use ActionName as A;
    match name {
        A::AcceptLine => ActionOutcome::Commit(ctx.buffer.to_line_string()),
        A::Interrupt => ActionOutcome::Interrupted,
        A::ClearScreen => ActionOutcome::ClearScreen,
        A::Complete if ctx.config.disable_completion => ActionOutcome::Continue,
        A::Complete => ActionOutcome::Complete,

        A::DeleteCharOrEof => {
            if ctx.buffer.is_empty() {
                return ActionOutcome::Eof;
            }
            Action::from_name(A::DeleteChar, EditStatus::Delete, 1).apply(ctx)
        }

        A::PreviousHistory => {
            if ctx.history.is_fetching_current_line() {
                ctx.history.set_current_line(ctx.buffer.code_points());
            }
            let line = ctx.history.previous_fetch().map(<[char]>::to_vec);
            replace_line(ctx, line)
        }
        A::NextHistory => {
            let line = ctx.history.next_fetch().map(<[char]>::to_vec);
            replace_line(ctx, line)
        }
        A::BeginningOfHistory => {
            if ctx.history.is_fetching_current_line() {
                ctx.history.set_current_line(ctx.buffer.code_points());
            }
            let line = ctx.history.first().map(<[char]>::to_vec);
            replace_line(ctx, line)
        }
        A::EndOfHistory => {
            let line = ctx.history.last().to_vec();
            replace_line(ctx, Some(line))
        }

        A::Yank | A::ViPasteBefore | A::ViPasteAfter => {
            let Some(text) = ctx.paste.get().map(<[char]>::to_vec) else {
                return ctx.bell();
            };
            ctx.buffer.push_undo();
            if name == A::ViPasteAfter && !ctx.buffer.is_empty() {
                ctx.buffer.move_cursor(1);
            }
            for _ in 0..count {
                ctx.buffer.insert(&text);
            }
            if name != A::Yank {
                // Vi leaves the cursor on the last pasted character.
                ctx.buffer.move_cursor(-1);
            }
            ActionOutcome::Continue
        }

        A::Undo => {
            if ctx.buffer.undo() {
                ctx.clamp_cursor_for_command_mode();
                ActionOutcome::Continue
            } else {
                ctx.bell()
            }
        }

        A::TransposeChars => {
            let len = ctx.buffer.len();
            let cursor = ctx.buffer.cursor();
            if len < 2 || cursor == 0 {
                return ctx.bell();
            }
            let right = if cursor == len { cursor - 1 } else { cursor };
            let mut line = ctx.buffer.code_points().to_vec();
            line.swap(right - 1, right);
            ctx.buffer.push_undo();
            ctx.buffer.replace(&line);
            ctx.buffer.set_cursor(right + 1);
            ActionOutcome::Continue
        }

        A::ViToggleCase => {
            let cursor = ctx.buffer.cursor();
            let end = (cursor + count).min(ctx.buffer.len());
            if cursor == end {
                return ActionOutcome::Continue;
            }
            let toggled: Vec<char> = ctx.buffer.code_points()[cursor..end]
                .iter()
                .flat_map(|ch| {
                    if ch.is_uppercase() {
                        ch.to_lowercase().collect::<Vec<_>>()
                    } else {
                        ch.to_uppercase().collect::<Vec<_>>()
                    }
                })
                .collect();
            ctx.buffer.push_undo();
            ctx.buffer.delete(isize::try_from(end - cursor).unwrap_or(isize::MAX));
            ctx.buffer.insert(&toggled);
            ctx.clamp_cursor_for_command_mode();
            ActionOutcome::Continue
        }

        A::ViCommandMode => {
            ctx.buffer.move_cursor(-1);
            ActionOutcome::Continue
        }
        A::ViAppend => {
            ctx.buffer.move_cursor(1);
            ActionOutcome::Continue
        }
        A::ViAppendEnd => {
            let len = ctx.buffer.len();
            ctx.buffer.set_cursor(len);
            ActionOutcome::Continue
        }
        A::ViInsertBeginning => {
            let target = Motion::FirstNonBlank.target(ctx.buffer.code_points(), 0);
            ctx.buffer.set_cursor(target);
            ActionOutcome::Continue
        }

        // Status changes only, handled by the dispatcher.
        A::ViCancel
        | A::ViInsert
        | A::ViReplace
        | A::ViRepeat
        | A::ViDeleteOperator
        | A::ViChangeOperator
        | A::ViYankOperator
        | A::ViUpCaseOperator
        | A::ViDownCaseOperator
        | A::MetaPrefix
        | A::SelfInsert => ActionOutcome::Continue,

        // Motions and chained actions are built as other variants by `from_name`.
        _ => ActionOutcome::Continue,
    }
}

/// Text of the incremental search banner, and where the cursor goes in it: on the
/// first occurrence of `term` in `matched`.
#[must_use]
pub fn search_banner(
    direction: SearchDirection,
    failed: bool,
    term: &[char],
    matched: &[char],
) -> (String, usize) {
    let term: String = term.iter().collect();
    let prefix = format!(
        "({}{direction}-i-search) `{term}': ",
        if failed { "failed " } else { "" }
    );
    let term_chars: Vec<char> = term.chars().collect();
    let cursor = prefix.chars().count() + find_term(matched, &term_chars).unwrap_or(0);
    let matched: String = matched.iter().collect();
    (format!("{prefix}{matched}"), cursor)
}
