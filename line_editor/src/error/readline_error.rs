// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::Charset;
use miette::Diagnostic;

/// Fatal failure of a [`StreamDecoder`] instance.
///
/// Once a decoder reports [`DecoderError::MalformedInput`] it is poisoned, and every
/// subsequent call returns [`DecoderError::Poisoned`]. The session that owns it must be
/// ended, since the byte stream can no longer be trusted to line up with code point
/// boundaries.
///
/// [`StreamDecoder`]: crate::StreamDecoder
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum DecoderError {
    #[error("Malformed {charset} input at byte offset {offset}")]
    #[diagnostic(
        code(r3bl_line_editor::decoder::malformed_input),
        help("The transport is sending bytes that don't match the configured charset")
    )]
    MalformedInput { charset: Charset, offset: usize },

    #[error("Decoder was already stopped by malformed input")]
    #[diagnostic(
        code(r3bl_line_editor::decoder::poisoned),
        help("Create a new session, this decoder instance can't be reused")
    )]
    Poisoned,
}

/// Problems found while building a frozen key table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum KeyTableError {
    #[error("Key sequence {sequence} is bound more than once")]
    #[diagnostic(
        code(r3bl_line_editor::keys::duplicate_binding),
        help("Use `rebind` to move an existing binding to a new sequence")
    )]
    DuplicateBinding { sequence: String },

    #[error("Can't bind an empty key sequence")]
    #[diagnostic(code(r3bl_line_editor::keys::empty_sequence))]
    EmptySequence,

    #[error("Key sequence {sequence} is not bound, so it can't be rebound")]
    #[diagnostic(code(r3bl_line_editor::keys::missing_binding))]
    MissingBinding { sequence: String },

    #[error("Unknown action name '{name}'")]
    #[diagnostic(
        code(r3bl_line_editor::keys::unknown_action),
        help("Action names are kebab-case, eg: 'forward-word', 'accept-line'")
    )]
    UnknownAction { name: String },
}

/// Invalid entries in the option set passed to [`ReadlineConfig`].
///
/// [`ReadlineConfig`]: crate::ReadlineConfig
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum ConfigError {
    #[error("Option {option} can't be set to '{value}'")]
    #[diagnostic(code(r3bl_line_editor::config::invalid_value))]
    InvalidValue { option: String, value: String },

    #[error("Unknown option {option}")]
    #[diagnostic(
        code(r3bl_line_editor::config::unknown_option),
        help("Recognized options: EDITING_MODE, HISTORY_SIZE, DISABLE_COMPLETION, BELL_STYLE")
    )]
    UnknownOption { option: String },
}

/// Top level error for an editing session. Only [`ReadlineError::Decoder`] can happen
/// while input is being processed; the other variants come from setup.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ReadlineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Decoder(#[from] DecoderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    KeyTable(#[from] KeyTableError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(r3bl_line_editor::io))]
    Io(#[from] std::io::Error),
}
