// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The `r3bl_line_editor` library is the input half of an interactive line editor. It
//! takes raw bytes from a terminal (or any other byte stream) and turns them into edits
//! on a line, committed lines and an in-memory command history. Rendering is kept behind
//! a small [`OutputSink`] trait so the same core can drive a local tty, a telnet or ssh
//! style remote session, or a test harness.
//!
//! # Pipeline
//!
//! ```text
//! bytes ──► StreamDecoder ──► KeyAssembler ──► EditMode ──► Action ──► LineBuffer
//!            (charset)         (key trie)       (Emacs/Vi)             History
//!                                                                      OutputSink
//! ```
//!
//! 1. [`StreamDecoder`] decodes bytes incrementally in one of the supported
//!    [`Charset`]s. Multi byte characters split across reads are stitched together, and
//!    malformed input is reported once and then poisons the decoder.
//! 2. [`KeyAssembler`] buffers code points and resolves them into [`KeyAction`]s by
//!    longest match against the prefix trie of every bound key sequence. An escape
//!    sequence split across reads is held until it completes or can no longer match.
//! 3. An [`EditMode`] (either [`EmacsMode`] or [`ViMode`]) maps each key to an
//!    [`Action`], given its own state: the Emacs leader (meta prefix), the Vi status
//!    (EDIT, COMMAND, or operator pending), repeat counts, and any chained action (eg:
//!    incremental history search, quoted insert) that currently holds input focus.
//! 4. The [`Action`] is applied to the [`LineBuffer`], the [`PasteRegister`] and the
//!    [`History`], and the result is rendered to the [`OutputSink`].
//!
//! [`Editor`] wires these together for synchronous callers, and [`ReadlineSession`]
//! drives an [`Editor`] from any [`tokio::io::AsyncRead`], with cooperative stop, an
//! [`InputGate`] to park reading, and out of band [`Signal`]s.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber itself. Apps can
//! use [`try_initialize_logging_global`] (and tests
//! [`try_initialize_logging_thread_local`]) with a [`TracingConfig`] to send them to a
//! file, to stderr, or both.

// https://github.com/rust-lang/rust-clippy
// https://rust-lang.github.io/rust-clippy/master/index.html
#![warn(clippy::all)]
#![warn(clippy::unwrap_in_result)]
#![warn(rust_2018_idioms)]
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

/// Shorthand for `Ok(())`, or `Ok(value)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Upper bound on the number of lines a [`History`] keeps.
pub const HISTORY_SIZE_MAX: usize = 500;

// Attach sources.
pub mod actions;
pub mod config;
pub mod decoder;
pub mod edit_mode;
pub mod editor;
pub mod error;
pub mod external;
pub mod history;
pub mod keys;
pub mod log;

#[cfg(test)]
pub mod test_fixtures;

// Re-export.
pub use actions::*;
pub use config::*;
pub use decoder::*;
pub use edit_mode::*;
pub use editor::*;
pub use error::*;
pub use external::*;
pub use history::*;
pub use keys::*;
pub use log::*;
