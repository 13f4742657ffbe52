// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Delivered to the line committed callback, and returned by
/// [`ReadlineSession::read_line`].
///
/// [`ReadlineSession::read_line`]: crate::ReadlineSession::read_line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// The user pressed Enter.
    Line(String),
    /// Ctrl-D on an empty line, or the input stream ended.
    Eof,
    /// Ctrl-C.
    Interrupted,
}

/// Receives every [`LineEvent`] as soon as the editor produces it.
pub type LineCallback = Box<dyn FnMut(LineEvent) + Send>;
