// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{editor_pipeline::Editor,
            input_gate::InputGate,
            line_event::LineEvent,
            signals::{Signal, SignalDispatcher, SignalHandler}};
use crate::{ActionOutcome, ReadlineError};
use std::collections::VecDeque;
use tokio::{io::{AsyncRead, AsyncReadExt},
            sync::{broadcast, mpsc}};

/// Bytes requested from the input per read.
pub const READ_BUFFER_SIZE: usize = 1024;

/// Cooperative stop for a [`ReadlineSession`]. Reads after the stop are not dispatched,
/// anything already applied stays applied.
#[derive(Debug, Clone)]
pub struct StopHandle {
    sender: broadcast::Sender<()>,
}

impl StopHandle {
    pub fn stop(&self) {
        tracing::debug!("stop requested");
        // No receivers means the session is already gone.
        self.sender.send(()).ok();
    }
}

/// Drives an [`Editor`] from any [`AsyncRead`] (a tty, a socket, a test buffer).
///
/// One reader does all the work: each chunk that arrives runs through the whole pipeline
/// before the next read. Between reads the session waits on its [`InputGate`], and
/// [`Signal`]s sent through [`Self::signal_sender`] are handed to the
/// [`SignalDispatcher`] without touching the pipeline.
#[derive(Debug)]
pub struct ReadlineSession<R> {
    editor: Editor,
    input: R,
    gate: InputGate,
    stop_sender: broadcast::Sender<()>,
    stop_receiver: broadcast::Receiver<()>,
    signal_sender: mpsc::UnboundedSender<Signal>,
    signal_receiver: mpsc::UnboundedReceiver<Signal>,
    signals: SignalDispatcher,
    pending_events: VecDeque<LineEvent>,
    read_buffer: Vec<u8>,
    is_stopped: bool,
}

/// What woke the reader.
enum Wakeup {
    Stop,
    Signal(Signal),
    GateOpen,
    Read(std::io::Result<usize>),
}

impl<R: AsyncRead + Unpin> ReadlineSession<R> {
    pub fn new(editor: Editor, input: R) -> Self {
        let (stop_sender, stop_receiver) = broadcast::channel(1);
        let (signal_sender, signal_receiver) = mpsc::unbounded_channel();
        Self {
            editor,
            input,
            gate: InputGate::new(),
            stop_sender,
            stop_receiver,
            signal_sender,
            signal_receiver,
            signals: SignalDispatcher::new(),
            pending_events: VecDeque::new(),
            read_buffer: vec![0; READ_BUFFER_SIZE],
            is_stopped: false,
        }
    }

    #[must_use]
    pub fn editor(&self) -> &Editor { &self.editor }

    pub fn editor_mut(&mut self) -> &mut Editor { &mut self.editor }

    #[must_use]
    pub fn input_gate(&self) -> InputGate { self.gate.clone() }

    #[must_use]
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            sender: self.stop_sender.clone(),
        }
    }

    #[must_use]
    pub fn signal_sender(&self) -> mpsc::UnboundedSender<Signal> { self.signal_sender.clone() }

    pub fn set_signal_handler(&mut self, handler: SignalHandler) {
        self.signals.set_handler(handler);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool { self.is_stopped }

    /// Reads until the next [`LineEvent`]. Returns `Ok(None)` once the session is
    /// stopped, and [`LineEvent::Eof`] (once) when the input ends.
    ///
    /// This is cancel safe: dropping the future between reads loses nothing, since
    /// every chunk read is fully dispatched before the next await.
    ///
    /// # Errors
    ///
    /// [`ReadlineError::Decoder`] on malformed input and [`ReadlineError::Io`] when the
    /// input fails. Both end the session.
    pub async fn read_line(&mut self) -> Result<Option<LineEvent>, ReadlineError> {
        loop {
            if let Some(event) = self.pending_events.pop_front() {
                return Ok(Some(event));
            }
            if self.is_stopped {
                return Ok(None);
            }

            let wakeup = if self.gate.is_parked() {
                tokio::select! {
                    biased;
                    _ = self.stop_receiver.recv() => Wakeup::Stop,
                    Some(signal) = self.signal_receiver.recv() => Wakeup::Signal(signal),
                    () = self.gate.wait_until_open() => Wakeup::GateOpen,
                }
            } else {
                tokio::select! {
                    biased;
                    _ = self.stop_receiver.recv() => Wakeup::Stop,
                    Some(signal) = self.signal_receiver.recv() => Wakeup::Signal(signal),
                    result = self.input.read(&mut self.read_buffer) => Wakeup::Read(result),
                }
            };

            match wakeup {
                Wakeup::Stop => {
                    tracing::debug!("session stopped");
                    self.is_stopped = true;
                }
                Wakeup::Signal(signal) => {
                    self.signals.dispatch(signal);
                }
                Wakeup::GateOpen => {}
                Wakeup::Read(result) => self.handle_read(result)?,
            }
        }
    }

    fn handle_read(&mut self, result: std::io::Result<usize>) -> Result<(), ReadlineError> {
        let count = result.inspect_err(|_| self.is_stopped = true)?;
        if count == 0 {
            tracing::debug!("input ended");
            self.is_stopped = true;
            self.pending_events.push_back(LineEvent::Eof);
            return Ok(());
        }

        let outcomes = self
            .editor
            .write(&self.read_buffer[..count])
            .inspect_err(|err| {
                tracing::error!(%err, "session ended by input error");
                self.is_stopped = true;
            })?;

        for outcome in outcomes {
            let event = match outcome {
                ActionOutcome::Commit(line) => LineEvent::Line(line),
                ActionOutcome::Eof => LineEvent::Eof,
                ActionOutcome::Interrupted => LineEvent::Interrupted,
                _ => continue,
            };
            self.pending_events.push_back(event);
        }
        Ok(())
    }
}
