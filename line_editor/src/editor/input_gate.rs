// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;
use tokio::sync::watch;

/// Wait/resume gate the session's reader blocks on between reads. Whoever needs
/// exclusive control of the next keystrokes (eg: a nested "press y/n" prompt) parks it,
/// and resumes it when done. Clones share the same gate.
#[derive(Debug, Clone)]
pub struct InputGate {
    /// `true` while open.
    sender: Arc<watch::Sender<bool>>,
}

impl Default for InputGate {
    fn default() -> Self {
        let (sender, _receiver) = watch::channel(true);
        Self {
            sender: Arc::new(sender),
        }
    }
}

impl InputGate {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn park(&self) {
        tracing::debug!("input gate parked");
        self.sender.send_replace(false);
    }

    pub fn resume(&self) {
        tracing::debug!("input gate resumed");
        self.sender.send_replace(true);
    }

    #[must_use]
    pub fn is_parked(&self) -> bool { !*self.sender.borrow() }

    /// Returns right away when open, otherwise when [`Self::resume`] is called.
    pub async fn wait_until_open(&self) {
        let mut receiver = self.sender.subscribe();
        // The sender lives in `self`, so the channel can't close while waiting.
        receiver.wait_for(|is_open| *is_open).await.ok();
    }
}
