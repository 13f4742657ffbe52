// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The per session pipeline. Every call to [`Editor::write`] runs it in line:
//!
//! ```text
//! bytes -> StreamDecoder -> code points -> KeyAssembler -> KeyAction
//!       -> EditMode -> Action -> LineBuffer / History -> RenderRequest
//! ```
//!
//! Nothing here locks or spawns. Exactly one caller drives an [`Editor`] at a time,
//! which is what [`ReadlineSession`] does.
//!
//! [`ReadlineSession`]: crate::ReadlineSession

use super::line_event::{LineCallback, LineEvent};
use crate::{ActionContext, ActionName, ActionOutcome, AnsiDefaults, AnsiRenderer, Charset,
            CodePointBuffer, DeviceCapabilities, EditMode, EditingMode, History, KeyAction,
            KeyAssembler, KeyTableError, LineBuffer, OutputSink, PasteRegister, PasteRing,
            ReadlineConfig, ReadlineError, RenderRequest, StreamDecoder, create_edit_mode, ok};
use std::{fmt::{Debug, Formatter},
          sync::Arc};

pub struct Editor {
    config: ReadlineConfig,
    decoder: StreamDecoder,
    assembler: KeyAssembler,
    mode: Box<dyn EditMode>,
    capabilities: Arc<dyn DeviceCapabilities>,
    buffer: Box<dyn LineBuffer>,
    paste: Box<dyn PasteRegister>,
    history: History,
    renderer: AnsiRenderer,
    sink: Box<dyn OutputSink>,
    on_line: Option<LineCallback>,
    /// Reused for each write's decoded code points.
    scratch: Vec<char>,
}

impl Debug for Editor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("config", &self.config)
            .field("decoder", &self.decoder)
            .field("assembler", &self.assembler)
            .field("mode", &self.mode)
            .field("buffer", &self.buffer)
            .field("history", &self.history.size())
            .field("has_line_callback", &self.on_line.is_some())
            .finish_non_exhaustive()
    }
}

impl Editor {
    /// An editor over in memory collaborators ([`CodePointBuffer`], [`PasteRing`]) that
    /// expects UTF-8 and ANSI key sequences.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::KeyTable`] if the edit mode can't be built.
    pub fn new(config: ReadlineConfig, sink: Box<dyn OutputSink>) -> Result<Self, ReadlineError> {
        let capabilities: Arc<dyn DeviceCapabilities> = Arc::new(AnsiDefaults);
        let mode = create_edit_mode(&config, capabilities.as_ref())?;
        let assembler = KeyAssembler::new(mode.keys());
        tracing::debug!(editing_mode = %config.editing_mode, history_size = config.history_size, "editor created");
        Ok(Self {
            history: History::new(config.history_size),
            config,
            decoder: StreamDecoder::default(),
            assembler,
            mode,
            capabilities,
            buffer: Box::new(CodePointBuffer::new()),
            paste: Box::new(PasteRing::default()),
            renderer: AnsiRenderer::default(),
            sink,
            on_line: None,
            scratch: Vec::new(),
        })
    }

    /// Bytes are decoded with `charset` from now on. Anything staged by the old decoder
    /// is dropped.
    #[must_use]
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.decoder = StreamDecoder::new(charset);
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.renderer = AnsiRenderer::new(prompt);
        self
    }

    #[must_use]
    pub fn with_line_buffer(mut self, buffer: Box<dyn LineBuffer>) -> Self {
        self.buffer = buffer;
        self
    }

    #[must_use]
    pub fn with_paste_register(mut self, paste: Box<dyn PasteRegister>) -> Self {
        self.paste = paste;
        self
    }

    #[must_use]
    pub fn with_history(mut self, history: History) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_line_callback(mut self, on_line: LineCallback) -> Self {
        self.on_line = Some(on_line);
        self
    }

    /// Rebuilds the edit mode so arrow/home/end keys match what `capabilities` says the
    /// device sends.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::KeyTable`] if the remapped table can't be built.
    pub fn with_capabilities(
        mut self,
        capabilities: Arc<dyn DeviceCapabilities>,
    ) -> Result<Self, ReadlineError> {
        self.capabilities = capabilities;
        self.rebuild_mode()?;
        Ok(self)
    }

    pub fn set_line_callback(&mut self, on_line: LineCallback) { self.on_line = Some(on_line); }

    #[must_use]
    pub fn config(&self) -> &ReadlineConfig { &self.config }

    #[must_use]
    pub fn editing_mode(&self) -> EditingMode { self.mode.editing_mode() }

    #[must_use]
    pub fn line(&self) -> String { self.buffer.to_line_string() }

    #[must_use]
    pub fn cursor(&self) -> usize { self.buffer.cursor() }

    #[must_use]
    pub fn history(&self) -> &History { &self.history }

    pub fn history_mut(&mut self) -> &mut History { &mut self.history }

    #[must_use]
    pub fn is_command_mode(&self) -> bool { self.mode.is_command_mode() }

    #[must_use]
    pub fn is_in_chained_action(&self) -> bool { self.mode.is_in_chained_action() }

    /// Code points that are a prefix of a longer binding and are waiting for more input.
    #[must_use]
    pub fn pending_key_count(&self) -> usize { self.assembler.pending().len() }

    /// Switches between Emacs and Vi. Input that hasn't been resolved yet is kept and
    /// resolved against the new table.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::KeyTable`] if the edit mode can't be built.
    pub fn set_editing_mode(&mut self, editing_mode: EditingMode) -> Result<(), ReadlineError> {
        self.config.editing_mode = editing_mode;
        self.rebuild_mode()
    }

    /// Binds `sequence` to the action called `name` (eg: `"kill-whole-line"`) in the
    /// active edit mode.
    ///
    /// # Errors
    ///
    /// [`KeyTableError::UnknownAction`] or [`KeyTableError::DuplicateBinding`].
    pub fn add_action(&mut self, sequence: &[char], name: &str) -> Result<(), KeyTableError> {
        let name = crate::parse_action_name(name)?;
        self.add_named_action(sequence, name)
    }

    /// # Errors
    ///
    /// [`KeyTableError::DuplicateBinding`] if the sequence is already bound.
    pub fn add_named_action(
        &mut self,
        sequence: &[char],
        name: ActionName,
    ) -> Result<(), KeyTableError> {
        self.mode.add_action(sequence, name)?;
        self.assembler.set_table(self.mode.keys());
        ok!()
    }

    fn rebuild_mode(&mut self) -> Result<(), ReadlineError> {
        self.mode = create_edit_mode(&self.config, self.capabilities.as_ref())?;
        self.assembler.set_table(self.mode.keys());
        ok!()
    }

    /// Feeds raw bytes from the transport. Returns the outcome of every action that was
    /// applied, in order. Committed lines also go to the line callback.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::Decoder`] when the bytes are malformed, this ends the session.
    /// [`ReadlineError::Io`] when rendering fails.
    pub fn write(&mut self, bytes: &[u8]) -> Result<Vec<ActionOutcome>, ReadlineError> {
        self.scratch.clear();
        self.decoder.decode_into(bytes, &mut self.scratch)?;
        self.assembler.feed_all(&self.scratch);

        let mut acc = vec![];
        while let Some(key) = self.assembler.next() {
            if let Some(outcome) = self.dispatch(&key)? {
                acc.push(outcome);
            }
        }
        Ok(acc)
    }

    /// Convenience for tests and scripted input.
    ///
    /// # Errors
    ///
    /// See [`Self::write`].
    pub fn write_str(&mut self, text: &str) -> Result<Vec<ActionOutcome>, ReadlineError> {
        self.write(text.as_bytes())
    }

    /// Resolves one key through the edit mode and applies the resulting action. A key
    /// with no binding returns `None`.
    fn dispatch(&mut self, key: &KeyAction) -> Result<Option<ActionOutcome>, ReadlineError> {
        let result = self.apply_key(key);
        self.sync_key_table();
        result
    }

    fn apply_key(&mut self, key: &KeyAction) -> Result<Option<ActionOutcome>, ReadlineError> {
        let Some(action) = self.mode.parse(key) else {
            return Ok(None);
        };

        let (outcome, requests) = {
            let mut ctx = ActionContext::new(
                self.buffer.as_mut(),
                self.paste.as_mut(),
                &mut self.history,
                &self.config,
            )
            .with_vi_command_mode(self.mode.is_command_mode());
            let outcome = action.apply(&mut ctx);
            (outcome, std::mem::take(&mut ctx.render_requests))
        };

        self.handle_outcome(&outcome, requests)?;
        Ok(Some(outcome))
    }

    /// Vi resolves keys against a different trie in insert and command status, the
    /// assembler follows whatever the mode says after each key.
    fn sync_key_table(&mut self) {
        let keys = self.mode.keys();
        if !Arc::ptr_eq(&keys, self.assembler.table()) {
            tracing::trace!(command_mode = self.mode.is_command_mode(), "key table swapped");
            self.assembler.set_table(keys);
        }
    }

    fn handle_outcome(
        &mut self,
        outcome: &ActionOutcome,
        requests: Vec<RenderRequest>,
    ) -> Result<(), ReadlineError> {
        match outcome {
            ActionOutcome::Commit(line) => {
                tracing::debug!(line = %line, "line committed");
                if !self.buffer.is_masking() {
                    self.history.push(self.buffer.code_points());
                }
                self.end_line(LineEvent::Line(line.clone()))?;
            }
            ActionOutcome::Eof => {
                tracing::debug!("eof");
                self.end_line(LineEvent::Eof)?;
            }
            ActionOutcome::Interrupted => {
                tracing::debug!("interrupted");
                self.end_line(LineEvent::Interrupted)?;
            }
            ActionOutcome::Bell(style) => {
                self.render(&RenderRequest::Bell(*style))?;
                self.render_line(requests)?;
            }
            ActionOutcome::ClearScreen => {
                self.render(&RenderRequest::ClearScreen)?;
                self.render_line(requests)?;
            }
            ActionOutcome::Continue | ActionOutcome::Complete => self.render_line(requests)?,
        }
        ok!()
    }

    /// Finishes the current line: fresh buffer, initial mode state, history cursor past
    /// the newest entry.
    fn end_line(&mut self, event: LineEvent) -> Result<(), ReadlineError> {
        self.buffer.clear();
        self.mode.reset();
        self.history.reset_search();
        self.render(&RenderRequest::NewLine)?;
        if let Some(on_line) = self.on_line.as_mut() {
            on_line(event);
        }
        ok!()
    }

    /// Renders what the action asked for, or the edit line when it asked for nothing.
    fn render_line(&mut self, requests: Vec<RenderRequest>) -> Result<(), ReadlineError> {
        if requests.is_empty() {
            let request = RenderRequest::Line {
                code_points: self.buffer.code_points().to_vec(),
                cursor: self.buffer.cursor(),
                masked: self.buffer.is_masking(),
            };
            return self.render(&request);
        }
        for request in &requests {
            self.render(request)?;
        }
        ok!()
    }

    fn render(&mut self, request: &RenderRequest) -> Result<(), ReadlineError> {
        self.renderer.render(request, self.sink.as_mut())?;
        ok!()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BellStyle, DecoderError, FixedCapabilities, LogicalKey,
                test_fixtures::{editor_with_mock_sink as editor, write_chunks}};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex as StdMutex;

    #[test]
    fn test_typing_and_commit() {
        let (mut editor, _sink) = editor(ReadlineConfig::default());
        let received = Arc::new(StdMutex::new(vec![]));
        let received_clone = received.clone();
        editor.set_line_callback(Box::new(move |event| {
            received_clone.lock().unwrap().push(event);
        }));

        let outcomes = editor.write_str("ls -la\r").unwrap();
        assert_eq!(outcomes.last(), Some(&ActionOutcome::Commit("ls -la".to_string())));
        assert_eq!(*received.lock().unwrap(), vec![LineEvent::Line("ls -la".to_string())]);
        assert_eq!(editor.line(), "");
        assert_eq!(editor.history().get(0), Some(['l', 's', ' ', '-', 'l', 'a'].as_slice()));
    }

    #[test]
    fn test_escape_sequence_split_across_writes() {
        let (mut editor, _sink) = editor(ReadlineConfig::default());
        editor.write_str("abc").unwrap();
        // Left arrow, one byte at a time. ESC alone resolves to the meta leader.
        editor.write(b"\x1b[D").unwrap();
        assert_eq!(editor.cursor(), 2);
        editor.write(b"\x1b").unwrap();
        editor.write(b"[").unwrap();
        editor.write(b"D").unwrap();
        // ESC armed the leader, `[` cleared it with no action, `D` self inserts.
        assert_eq!(editor.line(), "abDc");
    }

    #[test]
    fn test_multi_byte_char_split_across_writes() {
        let (mut editor, _sink) = editor(ReadlineConfig::default());
        let bytes = "é".as_bytes();
        editor.write(&bytes[..1]).unwrap();
        assert_eq!(editor.line(), "");
        editor.write(&bytes[1..]).unwrap();
        assert_eq!(editor.line(), "é");
    }

    #[test]
    fn test_ctrl_d_on_empty_line_is_eof() {
        let (mut editor, _sink) = editor(ReadlineConfig::default());
        let outcomes = editor.write(b"\x04").unwrap();
        assert_eq!(outcomes, vec![ActionOutcome::Eof]);
    }

    #[test]
    fn test_malformed_input_ends_session() {
        let (mut editor, _sink) = editor(ReadlineConfig::default());
        let result = editor.write(&[b'a', 0xFF]);
        assert!(matches!(
            result,
            Err(ReadlineError::Decoder(DecoderError::MalformedInput { .. }))
        ));
        assert!(matches!(
            editor.write(b"a"),
            Err(ReadlineError::Decoder(DecoderError::Poisoned))
        ));
    }

    #[test]
    fn test_bell_on_history_miss_is_rendered() {
        let (mut editor, sink) = editor(ReadlineConfig::default());
        let outcomes = editor.write(b"\x10").unwrap();
        assert_eq!(outcomes, vec![ActionOutcome::Bell(BellStyle::Audible)]);
        assert!(sink.get_copy_of_buffer_as_string().contains('\x07'));
    }

    #[test]
    fn test_line_is_rendered_after_each_key() {
        let (mut editor, sink) = editor(ReadlineConfig::default());
        editor.write_str("hi").unwrap();
        assert!(sink.get_copy_of_buffer_as_string_strip_ansi().ends_with("hi"));
    }

    #[test]
    fn test_add_action_updates_assembler() {
        let (mut editor, _sink) = editor(ReadlineConfig::default());
        editor.add_action(&['\x1b', 'k'], "kill-whole-line").unwrap();
        editor.write_str("hello").unwrap();
        editor.write(b"\x1bk").unwrap();
        assert_eq!(editor.line(), "");
        assert!(matches!(
            editor.add_action(&['\x1b', 'j'], "no-such-action"),
            Err(KeyTableError::UnknownAction { .. })
        ));
    }

    #[test]
    fn test_switch_to_vi_keeps_history() {
        let (mut editor, _sink) = editor(ReadlineConfig::default());
        editor.write_str("one\r").unwrap();
        editor.set_editing_mode(EditingMode::Vi).unwrap();
        assert_eq!(editor.editing_mode(), EditingMode::Vi);
        editor.write(b"\x1bk").unwrap();
        assert_eq!(editor.line(), "one");
        assert!(editor.is_command_mode());
    }

    #[test]
    fn test_device_capabilities_remap_home() {
        let capabilities = FixedCapabilities::new().with(LogicalKey::Home, b"\x1b[1~");
        let (editor, _sink) = editor(ReadlineConfig::default());
        let mut editor = editor.with_capabilities(Arc::new(capabilities)).unwrap();
        editor.write_str("abc").unwrap();
        editor.write(b"\x1b[1~").unwrap();
        assert_eq!(editor.cursor(), 0);
    }

    #[test]
    fn test_masked_line_renders_mask() {
        let (editor, sink) = editor(ReadlineConfig::default());
        let mut editor =
            editor.with_line_buffer(Box::new(CodePointBuffer::new().with_masking(true)));
        editor.write_str("pw").unwrap();
        let output = sink.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.ends_with("**"));
        assert!(!output.contains("pw"));
    }

    fn vi_config() -> ReadlineConfig { ReadlineConfig::default().with_editing_mode(EditingMode::Vi) }

    #[test]
    fn test_vi_insert_does_not_wait_on_command_sequences() {
        let (mut editor, _sink) = editor(vi_config());
        editor.write_str("dog").unwrap();
        assert_eq!(editor.line(), "dog");
        assert_eq!(editor.pending_key_count(), 0);

        // In command status `g` is the start of `gU`.
        write_chunks(&mut editor, &["\x1b", "0", "g"]);
        assert_eq!(editor.pending_key_count(), 1);
        editor.write_str("Uw").unwrap();
        assert_eq!(editor.line(), "DOG");
        assert_eq!(editor.pending_key_count(), 0);
    }

    #[test]
    fn test_vi_unbound_key_under_operator_changes_nothing() {
        let (mut editor, _sink) = editor(vi_config());
        write_chunks(&mut editor, &["abc", "\x1b", "d"]);
        let cursor = editor.cursor();
        let outcomes = editor.write_str("z").unwrap();
        assert!(outcomes.is_empty());
        assert_eq!(editor.line(), "abc");
        assert_eq!(editor.cursor(), cursor);
        assert!(editor.is_command_mode());
    }

    #[test]
    fn test_vi_change_word_keeps_blank() {
        let (mut editor, _sink) = editor(vi_config());
        write_chunks(&mut editor, &["one two three", "\x1b", "0", "cw", "XX", "\x1b"]);
        assert_eq!(editor.line(), "XX two three");
    }

    /// A cursor key split across reads resolves each byte on its own: Escape, an unbound
    /// `[`, then `D` (delete to end of line).
    #[test]
    fn test_vi_escape_sequence_split_across_writes() {
        let (mut editor, _sink) = editor(vi_config());
        write_chunks(&mut editor, &["abc", "\x1b", "[", "D"]);
        assert_eq!(editor.line(), "ab");
        assert_eq!(editor.cursor(), 1);
        assert!(editor.is_command_mode());

        // In one read it is the Left key and insert status is kept.
        let (mut one_read, _sink) = self::editor(vi_config());
        one_read.write_str("abc\x1b[D").unwrap();
        assert_eq!(one_read.line(), "abc");
        assert_eq!(one_read.cursor(), 2);
        assert!(!one_read.is_command_mode());
    }

    #[test]
    fn test_vi_repeat_across_chunks() {
        let (mut editor, _sink) = editor(vi_config());
        let outcomes = write_chunks(&mut editor, &["one two three", "\x1b", "0", "dw", "."]);
        assert!(!outcomes.iter().any(|it| matches!(it, ActionOutcome::Commit(_))));
        assert_eq!(editor.line(), "three");
    }
}
