// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ActionName;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, Display, EnumString};

/// Vi mode status. Exactly one is current at any time, transitions only happen through
/// [`ActionStatus`] entries. Doubles as the operation applied by motions (see
/// [`EditStatus::operation`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EditStatus {
    /// Insert mode.
    #[default]
    Edit,
    Command,
    Delete,
    Change,
    Yank,
    Replace,
    UpCase,
    DownCase,
    Capitalize,
    Search,
    Move,
    Repeat,
}

impl EditStatus {
    /// Operation a motion typed in this status performs.
    #[must_use]
    pub fn operation(self) -> EditStatus {
        match self {
            EditStatus::Delete
            | EditStatus::Change
            | EditStatus::Yank
            | EditStatus::UpCase
            | EditStatus::DownCase
            | EditStatus::Capitalize => self,
            _ => EditStatus::Move,
        }
    }

    #[must_use]
    pub fn is_operator_pending(self) -> bool { self.operation() != EditStatus::Move }

    /// Statuses that make an action count as an edit for repeat-last-change.
    #[must_use]
    pub fn is_edit_operator(self) -> bool { matches!(self, EditStatus::Delete | EditStatus::Change) }
}

/// How an action takes part in repeat-last-change (`.`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatCategory {
    /// Always recorded, eg: `x`, `p`, `~`.
    Change,
    /// Recorded when it completes a delete or change, eg: `w` after `d`.
    Motion,
    /// Never recorded, eg: `i`, `u`, Escape, operator keys.
    Never,
}

/// Immutable binding entry: `action` applies when the current status is `required`,
/// after which the status becomes `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionStatus {
    pub action: ActionName,
    pub required: EditStatus,
    pub next: EditStatus,
    pub repeat: RepeatCategory,
}

impl ActionStatus {
    #[must_use]
    pub const fn new(
        action: ActionName,
        required: EditStatus,
        next: EditStatus,
        repeat: RepeatCategory,
    ) -> Self {
        Self {
            action,
            required,
            next,
            repeat,
        }
    }

    /// Whether applying this entry from `current` replaces the last recorded change.
    #[must_use]
    pub fn is_recorded_change(&self, current: EditStatus) -> bool {
        match self.repeat {
            RepeatCategory::Change => true,
            RepeatCategory::Never => false,
            RepeatCategory::Motion => current.is_edit_operator() || self.next.is_edit_operator(),
        }
    }
}

/// What a Vi key is bound to: one entry, or a small group differentiated by required
/// status (the same key meaning different things in COMMAND vs operator pending).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusBinding {
    Direct(ActionStatus),
    Group(SmallVec<[ActionStatus; 4]>),
}

impl StatusBinding {
    #[must_use]
    pub fn from_entries(entries: &[ActionStatus]) -> Self {
        match entries {
            [it] => StatusBinding::Direct(*it),
            _ => StatusBinding::Group(entries.iter().copied().collect()),
        }
    }

    /// The entry whose required status is `current`. Anything else is a miss.
    #[must_use]
    pub fn for_status(&self, current: EditStatus) -> Option<&ActionStatus> {
        match self {
            StatusBinding::Direct(it) => (it.required == current).then_some(it),
            StatusBinding::Group(group) => group.iter().find(|it| it.required == current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_misses_on_other_status() {
        let binding = StatusBinding::from_entries(&[ActionStatus::new(
            ActionName::ViDeleteChar,
            EditStatus::Command,
            EditStatus::Command,
            RepeatCategory::Change,
        )]);
        assert!(binding.for_status(EditStatus::Command).is_some());
        assert_eq!(binding.for_status(EditStatus::Edit), None);
    }

    #[test]
    fn test_group_lookup() {
        let binding = StatusBinding::from_entries(&[
            ActionStatus::new(
                ActionName::ViDeleteOperator,
                EditStatus::Command,
                EditStatus::Delete,
                RepeatCategory::Never,
            ),
            ActionStatus::new(
                ActionName::ViWholeLine,
                EditStatus::Delete,
                EditStatus::Command,
                RepeatCategory::Motion,
            ),
        ]);
        let entry = binding.for_status(EditStatus::Delete).unwrap();
        assert_eq!(entry.action, ActionName::ViWholeLine);
        assert!(entry.is_recorded_change(EditStatus::Delete));
        assert!(!binding.for_status(EditStatus::Command).unwrap().is_recorded_change(EditStatus::Command));
    }

    #[test]
    fn test_status_names_and_operations() {
        assert_eq!(EditStatus::UpCase.to_string(), "UP_CASE");
        assert_eq!(EditStatus::Command.operation(), EditStatus::Move);
        assert_eq!(EditStatus::Yank.operation(), EditStatus::Yank);
        assert!(EditStatus::Change.is_operator_pending());
    }
}
