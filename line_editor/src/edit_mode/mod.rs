// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Edit mode dispatchers turn resolved [`KeyAction`]s into [`Action`]s. There are two
//! interchangeable variants, [`EmacsMode`] and [`ViMode`], selected by
//! [`ReadlineConfig::editing_mode`].

// Attach sources.
pub mod chained_focus;
pub mod device_remap;
pub mod emacs_mode;
pub mod leader;
pub mod vi_mode;
pub mod vi_status;

// Re-export.
pub use chained_focus::*;
pub use device_remap::*;
pub use emacs_mode::*;
pub use leader::*;
pub use vi_mode::*;
pub use vi_status::*;

use crate::{Action, ActionName, DeviceCapabilities, EditingMode, KeyAction, KeyTableError,
            KeyTrie, ReadlineConfig};
use std::{fmt::Debug, sync::Arc};

/// Contract shared by the edit mode dispatchers.
///
/// A key with no binding in the current state is not an error: [`EditMode::parse`]
/// returns `None` and nothing changes.
pub trait EditMode: Debug + Send {
    fn editing_mode(&self) -> EditingMode;

    fn parse(&mut self, key: &KeyAction) -> Option<Action>;

    /// True while a chained action holds input focus.
    fn is_in_chained_action(&self) -> bool;

    /// Binds `sequence` to `name`, replacing the frozen key table.
    ///
    /// # Errors
    ///
    /// [`KeyTableError::DuplicateBinding`] if the sequence is already bound.
    fn add_action(&mut self, sequence: &[char], name: ActionName) -> Result<(), KeyTableError>;

    /// Prefix trie over the sequences the current state can resolve, for the
    /// [`KeyAssembler`]. It may change after [`EditMode::parse`].
    ///
    /// [`KeyAssembler`]: crate::KeyAssembler
    fn keys(&self) -> Arc<KeyTrie>;

    /// Vi COMMAND (or operator pending) status.
    fn is_command_mode(&self) -> bool { false }

    /// Back to the initial state, after a line is committed.
    fn reset(&mut self);
}

/// Builds the dispatcher `config` asks for, with arrow/home/end keys adapted to the
/// device.
///
/// # Errors
///
/// [`KeyTableError`] if the default bindings conflict.
pub fn create_edit_mode(
    config: &ReadlineConfig,
    capabilities: &dyn DeviceCapabilities,
) -> Result<Box<dyn EditMode>, KeyTableError> {
    tracing::debug!(editing_mode = %config.editing_mode, "create edit mode");
    let it: Box<dyn EditMode> = match config.editing_mode {
        EditingMode::Emacs => Box::new(EmacsMode::new(capabilities)?),
        EditingMode::Vi => Box::new(ViMode::new(capabilities)?),
    };
    Ok(it)
}

/// Parses a user supplied action name, eg: `"kill-word"`.
///
/// # Errors
///
/// [`KeyTableError::UnknownAction`] if no action has that name.
pub fn parse_action_name(name: &str) -> Result<ActionName, KeyTableError> {
    name.parse::<ActionName>().map_err(|_| KeyTableError::UnknownAction {
        name: name.to_string(),
    })
}
