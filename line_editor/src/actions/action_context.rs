// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BellStyle, History, LineBuffer, PasteRegister, ReadlineConfig, RenderRequest};

/// What applying an action means for the caller loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Continue,
    /// Enter, the line is done.
    Commit(String),
    /// End of input, eg: Ctrl-D on an empty line.
    Eof,
    /// Ctrl-C.
    Interrupted,
    /// Completion was requested, handled outside this crate.
    Complete,
    Bell(BellStyle),
    ClearScreen,
}

/// Everything an action can touch while it is applied.
#[derive(Debug)]
pub struct ActionContext<'a> {
    pub buffer: &'a mut dyn LineBuffer,
    pub paste: &'a mut dyn PasteRegister,
    pub history: &'a mut History,
    pub config: &'a ReadlineConfig,
    /// Vi command status, where the cursor can't sit past the last character.
    pub vi_command_mode: bool,
    pub render_requests: Vec<RenderRequest>,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        buffer: &'a mut dyn LineBuffer,
        paste: &'a mut dyn PasteRegister,
        history: &'a mut History,
        config: &'a ReadlineConfig,
    ) -> Self {
        Self {
            buffer,
            paste,
            history,
            config,
            vi_command_mode: false,
            render_requests: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_vi_command_mode(mut self, vi_command_mode: bool) -> Self {
        self.vi_command_mode = vi_command_mode;
        self
    }

    #[must_use]
    pub fn bell(&self) -> ActionOutcome { ActionOutcome::Bell(self.config.bell_style) }

    /// In Vi command status a cursor left past the last character moves back onto it.
    pub fn clamp_cursor_for_command_mode(&mut self) {
        let len = self.buffer.len();
        if self.vi_command_mode && len > 0 && self.buffer.cursor() >= len {
            self.buffer.set_cursor(len - 1);
        }
    }

    pub fn request_banner(&mut self, text: String, cursor: usize) {
        self.render_requests.push(RenderRequest::Banner { text, cursor });
    }
}
