// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{action::{ActionEvent, search_banner},
            action_context::{ActionContext, ActionOutcome},
            action_name::ActionName};
use crate::{KeyAction, SearchDirection, find_term};
use strum_macros::Display;

/// States of the incremental history search. Each keystroke picks the next state in
/// [`SearchAction::input`], and [`SearchAction::apply`] carries it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchState {
    NotStarted,
    /// Search toward older entries (also after the term grew).
    Prev,
    /// Search toward newer entries.
    Next,
    /// Backspace, shrink the term.
    Delete,
    /// Enter, commit the match.
    End,
    /// Escape, keep the match in the line without committing.
    Exit,
    /// Ctrl-C, clear the line.
    Interrupt,
    MovePrev,
    MoveNext,
    MoveLeft,
    MoveRight,
}

/// Ctrl-R / Ctrl-S incremental search over [`History`](crate::History).
#[derive(Debug)]
pub struct SearchAction {
    state: SearchState,
    direction: SearchDirection,
    term: Vec<char>,
    matched: Vec<char>,
    /// Line as it was before the search started, restored if nothing ever matched.
    original: Vec<char>,
    failed: bool,
    focus: bool,
}

impl SearchAction {
    #[must_use]
    pub fn new(direction: SearchDirection) -> Self {
        Self {
            state: SearchState::NotStarted,
            direction,
            term: Vec::new(),
            matched: Vec::new(),
            original: Vec::new(),
            failed: false,
            focus: true,
        }
    }

    #[must_use]
    pub fn state(&self) -> SearchState { self.state }

    #[must_use]
    pub fn term(&self) -> String { self.term.iter().collect() }

    #[must_use]
    pub fn matched(&self) -> String { self.matched.iter().collect() }

    fn search(&mut self, ctx: &mut ActionContext<'_>) -> ActionOutcome {
        ctx.history.set_search_direction(self.direction);
        if self.term.is_empty() {
            self.failed = false;
            return ActionOutcome::Continue;
        }
        match ctx.history.search(&self.term) {
            Some(hit) => {
                self.matched = hit.to_vec();
                self.failed = false;
                ActionOutcome::Continue
            }
            None => {
                self.failed = true;
                ctx.bell()
            }
        }
    }

    fn render_banner(&self, ctx: &mut ActionContext<'_>) {
        let (text, cursor) = search_banner(self.direction, self.failed, &self.term, &self.matched);
        ctx.request_banner(text, cursor);
    }

    /// Leaves search mode with the match (or the original line) in the buffer, the
    /// cursor on the matched term.
    fn finish(&mut self, ctx: &mut ActionContext<'_>) -> usize {
        self.focus = false;
        ctx.history.reset_search();
        if self.matched.is_empty() {
            ctx.buffer.replace(&self.original);
            return ctx.buffer.cursor();
        }
        ctx.buffer.replace(&self.matched);
        let offset = find_term(&self.matched, &self.term).unwrap_or(0);
        ctx.buffer.set_cursor(offset);
        offset
    }
}

impl ActionEvent for SearchAction {
    fn name(&self) -> ActionName {
        match self.direction {
            SearchDirection::Reverse => ActionName::ReverseSearchHistory,
            SearchDirection::Forward => ActionName::ForwardSearchHistory,
        }
    }

    fn input(&mut self, resolved: Option<ActionName>, key: &KeyAction) {
        use ActionName as A;
        self.state = match resolved {
            Some(A::ReverseSearchHistory) => {
                self.direction = SearchDirection::Reverse;
                SearchState::Prev
            }
            Some(A::ForwardSearchHistory) => {
                self.direction = SearchDirection::Forward;
                SearchState::Next
            }
            Some(A::BackwardDeleteChar) => SearchState::Delete,
            Some(A::AcceptLine) => SearchState::End,
            Some(A::Interrupt) => SearchState::Interrupt,
            Some(A::PreviousHistory) => SearchState::MovePrev,
            Some(A::NextHistory) => SearchState::MoveNext,
            Some(A::BackwardChar) => SearchState::MoveLeft,
            Some(A::ForwardChar) => SearchState::MoveRight,
            _ => match key.printable() {
                Some(ch) => {
                    self.term.push(ch);
                    match self.direction {
                        SearchDirection::Reverse => SearchState::Prev,
                        SearchDirection::Forward => SearchState::Next,
                    }
                }
                None => SearchState::Exit,
            },
        };
        tracing::trace!(state = %self.state, term = %self.term(), "search input");
    }

    fn keep_focus(&self) -> bool { self.focus }

    fn apply(&mut self, ctx: &mut ActionContext<'_>) -> ActionOutcome {
        let outcome = match self.state {
            SearchState::NotStarted => {
                self.original = ctx.buffer.code_points().to_vec();
                ctx.history.set_search_direction(self.direction);
                ctx.history.reset_search();
                ActionOutcome::Continue
            }
            SearchState::Prev | SearchState::Next => self.search(ctx),
            SearchState::Delete => {
                self.term.pop();
                if self.term.is_empty() {
                    self.matched.clear();
                    self.failed = false;
                    ctx.history.reset_search();
                    ActionOutcome::Continue
                } else {
                    self.search(ctx)
                }
            }
            SearchState::End => {
                self.finish(ctx);
                return ActionOutcome::Commit(ctx.buffer.to_line_string());
            }
            SearchState::Exit | SearchState::MovePrev => {
                self.finish(ctx);
                return ActionOutcome::Continue;
            }
            SearchState::MoveNext => {
                self.finish(ctx);
                let len = ctx.buffer.len();
                ctx.buffer.set_cursor(len);
                return ActionOutcome::Continue;
            }
            SearchState::MoveLeft => {
                self.finish(ctx);
                ctx.buffer.move_cursor(-1);
                return ActionOutcome::Continue;
            }
            SearchState::MoveRight => {
                self.finish(ctx);
                ctx.buffer.move_cursor(1);
                return ActionOutcome::Continue;
            }
            SearchState::Interrupt => {
                self.focus = false;
                ctx.history.reset_search();
                ctx.buffer.clear();
                return ActionOutcome::Continue;
            }
        };
        self.render_banner(ctx);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodePointBuffer, History, LineBuffer, PasteRing, ReadlineConfig,
                RenderRequest};
    use pretty_assertions::assert_eq;

    struct Fixture {
        buffer: CodePointBuffer,
        paste: PasteRing,
        history: History,
        config: ReadlineConfig,
    }

    impl Fixture {
        fn new(entries: &[&str]) -> Self {
            let mut history = History::default();
            for it in entries {
                history.push_str(it);
            }
            Self {
                buffer: CodePointBuffer::new(),
                paste: PasteRing::default(),
                history,
                config: ReadlineConfig::default(),
            }
        }

        fn apply(&mut self, action: &mut SearchAction) -> (ActionOutcome, Vec<RenderRequest>) {
            let mut ctx = ActionContext::new(
                &mut self.buffer,
                &mut self.paste,
                &mut self.history,
                &self.config,
            );
            let outcome = action.apply(&mut ctx);
            (outcome, ctx.render_requests)
        }
    }

    fn type_char(action: &mut SearchAction, ch: char) {
        action.input(None, &KeyAction::default_for(ch));
    }

    #[test]
    fn test_banner_tracks_term_and_match() {
        let mut fixture = Fixture::new(&["git status", "cargo test", "git push"]);
        let mut action = SearchAction::new(SearchDirection::Reverse);
        let (_, renders) = fixture.apply(&mut action);
        assert_eq!(
            renders,
            vec![RenderRequest::Banner {
                text: "(reverse-i-search) `': ".to_string(),
                cursor: 23,
            }]
        );

        type_char(&mut action, 's');
        type_char(&mut action, 't');
        let _unused = fixture.apply(&mut action);
        type_char(&mut action, 'a');
        let (outcome, renders) = fixture.apply(&mut action);
        assert_eq!(outcome, ActionOutcome::Continue);
        assert_eq!(action.matched(), "git status");
        // Prefix is 26 code points, "sta" starts at offset 4 in the match.
        assert_eq!(
            renders,
            vec![RenderRequest::Banner {
                text: "(reverse-i-search) `sta': git status".to_string(),
                cursor: 30,
            }]
        );
    }

    #[test]
    fn test_repeat_key_moves_to_older_match() {
        let mut fixture = Fixture::new(&["foo1", "foo2", "foo3"]);
        let mut action = SearchAction::new(SearchDirection::Reverse);
        let _unused = fixture.apply(&mut action);

        type_char(&mut action, 'f');
        let _unused = fixture.apply(&mut action);
        assert_eq!(action.matched(), "foo3");

        let ctrl_r = KeyAction::default_for('\x12');
        action.input(Some(ActionName::ReverseSearchHistory), &ctrl_r);
        let _unused = fixture.apply(&mut action);
        assert_eq!(action.matched(), "foo2");
    }

    #[test]
    fn test_failed_search_rings_bell_and_keeps_match() {
        let mut fixture = Fixture::new(&["abc"]);
        let mut action = SearchAction::new(SearchDirection::Reverse);
        let _unused = fixture.apply(&mut action);
        type_char(&mut action, 'b');
        let _unused = fixture.apply(&mut action);
        type_char(&mut action, 'z');
        let (outcome, renders) = fixture.apply(&mut action);

        assert!(matches!(outcome, ActionOutcome::Bell(_)));
        assert_eq!(action.matched(), "abc");
        assert!(matches!(
            &renders[0],
            RenderRequest::Banner { text, .. } if text.starts_with("(failed reverse-i-search) `bz'")
        ));
    }

    #[test]
    fn test_enter_commits_match() {
        let mut fixture = Fixture::new(&["make all"]);
        let mut action = SearchAction::new(SearchDirection::Reverse);
        let _unused = fixture.apply(&mut action);
        type_char(&mut action, 'm');
        let _unused = fixture.apply(&mut action);

        action.input(Some(ActionName::AcceptLine), &KeyAction::default_for('\r'));
        let (outcome, renders) = fixture.apply(&mut action);
        assert_eq!(outcome, ActionOutcome::Commit("make all".to_string()));
        assert!(renders.is_empty());
        assert!(!action.keep_focus());
    }

    #[test]
    fn test_escape_reverts_to_match_without_commit() {
        let mut fixture = Fixture::new(&["echo hello"]);
        let mut action = SearchAction::new(SearchDirection::Reverse);
        let _unused = fixture.apply(&mut action);
        for ch in "hel".chars() {
            type_char(&mut action, ch);
        }
        let _unused = fixture.apply(&mut action);

        action.input(Some(ActionName::MetaPrefix), &KeyAction::default_for('\x1b'));
        let (outcome, _) = fixture.apply(&mut action);
        assert_eq!(outcome, ActionOutcome::Continue);
        assert_eq!(fixture.buffer.to_line_string(), "echo hello");
        assert_eq!(fixture.buffer.cursor(), 5);
        assert!(!action.keep_focus());
    }

    #[test]
    fn test_escape_without_match_restores_original_line() {
        let mut fixture = Fixture::new(&["ls"]);
        fixture.buffer.replace(&['d', 'r', 'a', 'f', 't']);
        let mut action = SearchAction::new(SearchDirection::Reverse);
        let _unused = fixture.apply(&mut action);

        action.input(None, &KeyAction::default_for('\x01'));
        let _unused = fixture.apply(&mut action);
        assert_eq!(fixture.buffer.to_line_string(), "draft");
    }

    #[test]
    fn test_interrupt_clears_line() {
        let mut fixture = Fixture::new(&["rm -rf target"]);
        let mut action = SearchAction::new(SearchDirection::Reverse);
        let _unused = fixture.apply(&mut action);
        type_char(&mut action, 'r');
        let _unused = fixture.apply(&mut action);

        action.input(Some(ActionName::Interrupt), &KeyAction::default_for('\x03'));
        let _unused = fixture.apply(&mut action);
        assert!(fixture.buffer.is_empty());
        assert!(!action.keep_focus());
    }

    #[test]
    fn test_backspace_shrinks_term() {
        let mut fixture = Fixture::new(&["ab", "ax"]);
        let mut action = SearchAction::new(SearchDirection::Reverse);
        let _unused = fixture.apply(&mut action);
        type_char(&mut action, 'a');
        type_char(&mut action, 'b');
        let _unused = fixture.apply(&mut action);
        assert_eq!(action.matched(), "ab");

        action.input(Some(ActionName::BackwardDeleteChar), &KeyAction::default_for('\x7f'));
        let _unused = fixture.apply(&mut action);
        assert_eq!(action.term(), "a");
        assert_eq!(action.matched(), "ab");
    }
}
