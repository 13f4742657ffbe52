// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::AsRefStr;

/// Platform signals. They arrive out of band and never go through the key pipeline, so
/// a half typed escape sequence or a pending Vi operator isn't disturbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum Signal {
    Interrupt,
    Resize { cols: u16, rows: u16 },
}

pub type SignalHandler = Box<dyn FnMut(Signal) + Send>;

/// Hands signals straight to the registered handler.
#[derive(Default)]
pub struct SignalDispatcher {
    handler: Option<SignalHandler>,
}

impl std::fmt::Debug for SignalDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalDispatcher")
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

impl SignalDispatcher {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn set_handler(&mut self, handler: SignalHandler) { self.handler = Some(handler); }

    /// Returns false if nobody was registered, the signal is dropped then.
    pub fn dispatch(&mut self, signal: Signal) -> bool {
        match self.handler.as_mut() {
            Some(handler) => {
                tracing::debug!(signal = signal.as_ref(), "dispatch signal");
                handler(signal);
                true
            }
            None => {
                tracing::trace!(signal = signal.as_ref(), "no signal handler");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex as StdMutex};

    #[test]
    fn test_dispatch_to_handler() {
        let mut dispatcher = SignalDispatcher::new();
        assert!(!dispatcher.dispatch(Signal::Interrupt));

        let received = Arc::new(StdMutex::new(vec![]));
        let received_clone = received.clone();
        dispatcher.set_handler(Box::new(move |signal| {
            received_clone.lock().unwrap().push(signal);
        }));
        assert!(dispatcher.dispatch(Signal::Resize { cols: 80, rows: 24 }));
        assert_eq!(*received.lock().unwrap(), vec![Signal::Resize { cols: 80, rows: 24 }]);
    }
}
