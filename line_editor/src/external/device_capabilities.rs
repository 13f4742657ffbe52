// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap, fmt::Debug};
use strum_macros::{AsRefStr, Display, EnumString};

/// Keys whose encoding differs between devices. Edit modes ask the connected device for
/// these once, when they are constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum LogicalKey {
    Home,
    End,
    Up,
    Down,
    Left,
    Right,
    Delete,
    KillToEol,
}

impl LogicalKey {
    pub const ALL: [LogicalKey; 8] = [
        LogicalKey::Home,
        LogicalKey::End,
        LogicalKey::Up,
        LogicalKey::Down,
        LogicalKey::Left,
        LogicalKey::Right,
        LogicalKey::Delete,
        LogicalKey::KillToEol,
    ];
}

/// Terminal capability lookup, eg: backed by a terminfo database.
pub trait DeviceCapabilities: Debug + Send + Sync {
    /// Bytes the device sends for `key`, or `None` if it has no such key.
    fn sequence_for(&self, key: LogicalKey) -> Option<Vec<u8>>;
}

/// What an xterm compatible terminal sends in normal cursor mode. Using these
/// capabilities leaves the default bindings unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiDefaults;

impl DeviceCapabilities for AnsiDefaults {
    fn sequence_for(&self, key: LogicalKey) -> Option<Vec<u8>> {
        let it: &[u8] = match key {
            LogicalKey::Home => b"\x1b[H",
            LogicalKey::End => b"\x1b[F",
            LogicalKey::Up => b"\x1b[A",
            LogicalKey::Down => b"\x1b[B",
            LogicalKey::Right => b"\x1b[C",
            LogicalKey::Left => b"\x1b[D",
            LogicalKey::Delete => b"\x1b[3~",
            LogicalKey::KillToEol => return None,
        };
        Some(it.to_vec())
    }
}

/// Explicit capability table, eg: filled in from a terminfo entry or a test.
#[derive(Debug, Clone, Default)]
pub struct FixedCapabilities {
    sequences: HashMap<LogicalKey, Vec<u8>>,
}

impl FixedCapabilities {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with(mut self, key: LogicalKey, bytes: &[u8]) -> Self {
        self.sequences.insert(key, bytes.to_vec());
        self
    }
}

impl DeviceCapabilities for FixedCapabilities {
    fn sequence_for(&self, key: LogicalKey) -> Option<Vec<u8>> { self.sequences.get(&key).cloned() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_fixed_capabilities() {
        let caps = FixedCapabilities::new().with(LogicalKey::Home, b"\x1b[1~");
        assert_eq!(caps.sequence_for(LogicalKey::Home), Some(b"\x1b[1~".to_vec()));
        assert_eq!(caps.sequence_for(LogicalKey::End), None);
    }

    #[test]
    fn test_logical_key_names() {
        assert_eq!(LogicalKey::KillToEol.to_string(), "kill-to-eol");
        assert_eq!(LogicalKey::from_str("home").unwrap(), LogicalKey::Home);
        assert_eq!(AnsiDefaults.sequence_for(LogicalKey::KillToEol), None);
    }
}
