// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::HISTORY_SIZE_MAX;
use std::collections::VecDeque;
use strum_macros::{Display, EnumString};

/// Which way [`History::search`] scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SearchDirection {
    /// Toward older entries.
    #[default]
    Reverse,
    /// Toward newer entries.
    Forward,
}

/// Bounded, in memory command history.
///
/// Entries are stored oldest first, so index `size() - 1` is the most recent one. Two
/// independent cursors walk over them:
///
/// - The fetch cursor used by [`History::previous_fetch`] and [`History::next_fetch`]
///   (up / down arrow). Position `size()` stands for the line being edited, which is
///   kept in [`History::current_line`].
/// - The search cursor used by [`History::search`], always in `0..=size()`.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Vec<char>>,
    max_size: usize,
    current_line: Vec<char>,
    fetch_index: usize,
    search_index: usize,
    search_direction: SearchDirection,
    last_search_term: Option<Vec<char>>,
}

impl Default for History {
    fn default() -> Self { Self::new(HISTORY_SIZE_MAX) }
}

impl History {
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size.min(HISTORY_SIZE_MAX)),
            max_size,
            current_line: Vec::new(),
            fetch_index: 0,
            search_index: 0,
            search_direction: SearchDirection::default(),
            last_search_term: None,
        }
    }

    #[must_use]
    pub fn size(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn max_size(&self) -> usize { self.max_size }

    /// Shrinking the limit evicts the oldest entries right away.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size;
        while self.entries.len() > self.max_size {
            self.entries.pop_front();
        }
        self.reset_fetch();
        self.reset_search();
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&[char]> {
        self.entries.get(index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[char]> { self.entries.iter().map(Vec::as_slice) }

    /// Appends `entry` unless it is blank or the same as the most recent entry. Both
    /// cursors are reset to point past the newest entry either way.
    pub fn push(&mut self, entry: &[char]) {
        let is_blank = entry.iter().all(|it| it.is_whitespace());
        let is_duplicate = self.entries.back().is_some_and(|last| last == entry);

        if !is_blank && !is_duplicate && self.max_size > 0 {
            if self.entries.len() == self.max_size {
                self.entries.pop_front();
            }
            self.entries.push_back(entry.to_vec());
            tracing::debug!(size = self.entries.len(), "history entry added");
        }

        self.reset_fetch();
        self.reset_search();
    }

    pub fn push_str(&mut self, entry: &str) {
        let code_points: Vec<char> = entry.chars().collect();
        self.push(&code_points);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.reset_fetch();
        self.reset_search();
    }

    #[must_use]
    pub fn current_line(&self) -> &[char] { &self.current_line }

    /// Snapshot of the uncommitted line, returned when fetching past the newest entry.
    pub fn set_current_line(&mut self, line: &[char]) {
        self.current_line.clear();
        self.current_line.extend_from_slice(line);
    }

    /// True while the fetch cursor is on the uncommitted line rather than an entry.
    #[must_use]
    pub fn is_fetching_current_line(&self) -> bool { self.fetch_index == self.entries.len() }

    fn reset_fetch(&mut self) { self.fetch_index = self.entries.len(); }

    /// One step toward older entries, stopping at the oldest.
    pub fn previous_fetch(&mut self) -> Option<&[char]> {
        if self.entries.is_empty() {
            return None;
        }
        self.fetch_index = self.fetch_index.saturating_sub(1);
        self.get(self.fetch_index)
    }

    /// One step toward newer entries. Past the newest entry this returns the current
    /// line, however many times it is called.
    pub fn next_fetch(&mut self) -> Option<&[char]> {
        if self.fetch_index < self.entries.len() {
            self.fetch_index += 1;
        }
        match self.entries.get(self.fetch_index) {
            Some(it) => Some(it.as_slice()),
            None => Some(self.current_line.as_slice()),
        }
    }

    /// Oldest entry, also moving the fetch cursor there.
    pub fn first(&mut self) -> Option<&[char]> {
        self.fetch_index = 0;
        self.get(0)
    }

    /// Back to the current line, ie: past the newest entry.
    pub fn last(&mut self) -> &[char] {
        self.reset_fetch();
        &self.current_line
    }

    #[must_use]
    pub fn search_direction(&self) -> SearchDirection { self.search_direction }

    /// Changing the direction restarts the search session. Setting the direction that
    /// is already active does nothing.
    pub fn set_search_direction(&mut self, direction: SearchDirection) {
        if self.search_direction != direction {
            self.search_direction = direction;
            self.reset_search();
        }
    }

    /// Puts the search cursor at the start for the active direction and forgets the last
    /// search term.
    pub fn reset_search(&mut self) {
        self.search_index = match self.search_direction {
            SearchDirection::Reverse => self.entries.len(),
            SearchDirection::Forward => 0,
        };
        self.last_search_term = None;
    }

    #[must_use]
    pub fn search_index(&self) -> usize { self.search_index }

    /// Finds the next entry containing `term`.
    ///
    /// Searching for the same term as last time continues past the previous hit, a
    /// different term is first tried against the previous hit itself (so typing more
    /// characters narrows the current match). A miss returns `None` and leaves the
    /// cursor and the remembered term untouched.
    pub fn search(&mut self, term: &[char]) -> Option<&[char]> {
        let size = self.entries.len();
        if size == 0 {
            return None;
        }
        let is_continuation = self.last_search_term.as_deref() == Some(term);

        let hit = match self.search_direction {
            SearchDirection::Reverse => {
                let start = if is_continuation {
                    self.search_index.checked_sub(1)
                } else {
                    Some(self.search_index.min(size - 1))
                };
                start.and_then(|start| {
                    (0..=start)
                        .rev()
                        .find(|index| contains_term(&self.entries[*index], term))
                })
            }
            SearchDirection::Forward => {
                let start = if is_continuation {
                    self.search_index + 1
                } else {
                    self.search_index
                };
                (start..size).find(|index| contains_term(&self.entries[*index], term))
            }
        };

        match hit {
            Some(index) => {
                self.search_index = index;
                self.last_search_term = Some(term.to_vec());
                tracing::trace!(index, direction = %self.search_direction, "history search hit");
                self.get(index)
            }
            None => None,
        }
    }
}

/// Offset of the first occurrence of `term` in `haystack`. The empty term matches at 0.
#[must_use]
pub fn find_term(haystack: &[char], term: &[char]) -> Option<usize> {
    if term.is_empty() {
        return Some(0);
    }
    haystack.windows(term.len()).position(|window| window == term)
}

fn contains_term(haystack: &[char], term: &[char]) -> bool { find_term(haystack, term).is_some() }

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chars(it: &str) -> Vec<char> { it.chars().collect() }

    fn string(it: Option<&[char]>) -> Option<String> { it.map(|it| it.iter().collect()) }

    fn history_of(entries: &[&str]) -> History {
        let mut history = History::default();
        for entry in entries {
            history.push_str(entry);
        }
        history
    }

    #[test]
    fn test_push_coalesces_duplicates_and_skips_blank() {
        let mut history = History::new(10);
        history.push_str("ls");
        history.push_str("ls");
        history.push_str("   ");
        history.push_str("");
        assert_eq!(history.size(), 1);

        history.push_str("pwd");
        history.push_str("ls");
        assert_eq!(history.size(), 3);
    }

    #[test]
    fn test_push_evicts_exactly_the_oldest() {
        let mut history = History::new(2);
        history.push_str("one");
        history.push_str("two");
        history.push_str("three");
        assert_eq!(history.size(), 2);
        assert_eq!(string(history.get(0)), Some("two".to_string()));
        assert_eq!(string(history.get(1)), Some("three".to_string()));

        history.set_max_size(1);
        assert_eq!(string(history.get(0)), Some("three".to_string()));
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut history = History::new(0);
        history.push_str("ls");
        assert!(history.is_empty());
    }

    #[test]
    fn test_fetch_is_clamped_at_both_ends() {
        let mut history = history_of(&["a", "b"]);
        history.set_current_line(&chars("draft"));

        assert_eq!(string(history.previous_fetch()), Some("b".to_string()));
        assert_eq!(string(history.previous_fetch()), Some("a".to_string()));
        assert_eq!(string(history.previous_fetch()), Some("a".to_string()));
        assert_eq!(string(history.next_fetch()), Some("b".to_string()));
        assert_eq!(string(history.next_fetch()), Some("draft".to_string()));
        assert_eq!(string(history.next_fetch()), Some("draft".to_string()));
        assert!(history.is_fetching_current_line());
    }

    #[test]
    fn test_first_and_last() {
        let mut history = history_of(&["a", "b", "c"]);
        assert_eq!(string(history.first()), Some("a".to_string()));
        assert_eq!(string(history.next_fetch()), Some("b".to_string()));
        assert_eq!(history.last(), &[] as &[char]);
        assert_eq!(string(history.previous_fetch()), Some("c".to_string()));
    }

    #[test]
    fn test_reverse_search_repeats_visit_strictly_older_matches() {
        let mut history = history_of(&["foo1", "bar", "foo2", "foo3"]);
        let term = chars("foo");

        assert_eq!(string(history.search(&term)), Some("foo3".to_string()));
        assert_eq!(string(history.search(&term)), Some("foo2".to_string()));
        assert_eq!(string(history.search(&term)), Some("foo1".to_string()));
        assert_eq!(history.search(&term), None);
        // A miss leaves the cursor on the last hit.
        assert_eq!(history.search_index(), 0);
    }

    #[test]
    fn test_new_term_starts_from_last_hit() {
        let mut history = history_of(&["foo1", "foo22", "foo3"]);

        assert_eq!(string(history.search(&chars("foo"))), Some("foo3".to_string()));
        assert_eq!(string(history.search(&chars("foo"))), Some("foo22".to_string()));
        // Narrowing the term re-checks the current hit before moving on.
        assert_eq!(string(history.search(&chars("foo2"))), Some("foo22".to_string()));
        assert_eq!(history.search(&chars("foo2")), None);
        assert_eq!(string(history.search(&chars("foo"))), Some("foo22".to_string()));
    }

    #[test]
    fn test_forward_search_and_direction_change() {
        let mut history = history_of(&["foo1", "foo2", "bar"]);
        history.set_search_direction(SearchDirection::Forward);
        let term = chars("foo");

        assert_eq!(string(history.search(&term)), Some("foo1".to_string()));
        assert_eq!(string(history.search(&term)), Some("foo2".to_string()));
        assert_eq!(history.search(&term), None);

        // Setting the same direction again does not restart.
        history.set_search_direction(SearchDirection::Forward);
        assert_eq!(history.search(&term), None);

        history.set_search_direction(SearchDirection::Reverse);
        assert_eq!(history.search_index(), 3);
        assert_eq!(string(history.search(&term)), Some("foo2".to_string()));
    }

    #[test]
    fn test_search_index_stays_in_bounds() {
        let mut history = History::default();
        assert_eq!(history.search(&chars("x")), None);
        history.push_str("x");
        assert!(history.search_index() <= history.size());
        assert_eq!(find_term(&chars("hello"), &chars("ll")), Some(2));
        assert_eq!(find_term(&chars("hello"), &[]), Some(0));
    }
}
