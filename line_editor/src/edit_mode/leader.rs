// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Two step leader key protocol. Receiving the leader arms it, the next single code
//! point key is then looked up as `leader + key`. A multi code point key while armed
//! (eg: an arrow) disarms it without producing anything.

use crate::KeyAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeaderState {
    #[default]
    Idle,
    AwaitingLeaderTarget,
}

/// Result of feeding one key through [`LeaderState::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderStep {
    /// Not leader related, resolve the key normally.
    Pass,
    /// The leader was received.
    Armed,
    /// Look this combined sequence up.
    Target(KeyAction),
    /// Armed, but the key can't be combined, nothing happens.
    Cleared,
}

impl LeaderState {
    pub fn step(&mut self, key: &KeyAction, is_leader: bool, leader: &KeyAction) -> LeaderStep {
        match self {
            LeaderState::Idle if is_leader => {
                *self = LeaderState::AwaitingLeaderTarget;
                LeaderStep::Armed
            }
            LeaderState::Idle => LeaderStep::Pass,
            LeaderState::AwaitingLeaderTarget => {
                *self = LeaderState::Idle;
                if key.len() == 1 {
                    LeaderStep::Target(key.prefixed_with(leader))
                } else {
                    LeaderStep::Cleared
                }
            }
        }
    }

    pub fn reset(&mut self) { *self = LeaderState::Idle; }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Key;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_leader_then_single_key() {
        let leader = KeyAction::from(Key::Escape);
        let mut state = LeaderState::default();

        assert_eq!(state.step(&leader, true, &leader), LeaderStep::Armed);
        assert_eq!(state, LeaderState::AwaitingLeaderTarget);
        assert_eq!(
            state.step(&KeyAction::default_for('f'), false, &leader),
            LeaderStep::Target(Key::Meta('f').into())
        );
        assert_eq!(state, LeaderState::Idle);
    }

    #[test]
    fn test_multi_code_point_key_clears() {
        let leader = KeyAction::from(Key::Escape);
        let mut state = LeaderState::AwaitingLeaderTarget;
        assert_eq!(state.step(&Key::Up.into(), false, &leader), LeaderStep::Cleared);
        assert_eq!(state, LeaderState::Idle);
        assert_eq!(state.step(&Key::Up.into(), false, &leader), LeaderStep::Pass);
    }
}
