// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DeviceCapabilities, Key, KeyAction, KeyTableBuilder, LogicalKey, StreamDecoder};

/// Default binding each device dependent key starts out with.
pub const DEVICE_KEY_DEFAULTS: [(LogicalKey, Key); 7] = [
    (LogicalKey::Home, Key::Home),
    (LogicalKey::End, Key::End),
    (LogicalKey::Up, Key::Up),
    (LogicalKey::Down, Key::Down),
    (LogicalKey::Left, Key::Left),
    (LogicalKey::Right, Key::Right),
    (LogicalKey::Delete, Key::Delete),
];

fn device_sequence(capabilities: &dyn DeviceCapabilities, key: LogicalKey) -> Option<Vec<char>> {
    let bytes = capabilities.sequence_for(key)?;
    match StreamDecoder::default().decode(&bytes) {
        Ok(it) if !it.is_empty() => Some(it),
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(%key, %err, "device sequence is not valid UTF-8, keeping default");
            None
        }
    }
}

/// Moves the default arrow / home / end / delete bindings to the sequences the device
/// reports, and binds its kill-to-end-of-line key (if it has one) to `kill_to_eol`.
/// Conflicts keep the default binding and are logged.
pub fn remap_device_keys<T>(
    builder: &mut KeyTableBuilder<T>,
    capabilities: &dyn DeviceCapabilities,
    kill_to_eol: Option<T>,
) {
    for (logical_key, default_key) in DEVICE_KEY_DEFAULTS {
        let Some(sequence) = device_sequence(capabilities, logical_key) else {
            continue;
        };
        let default = KeyAction::from(default_key);
        let device = KeyAction::new(sequence, default_key.name());
        if device == default {
            continue;
        }
        match builder.rebind(&default, device) {
            Ok(_) => tracing::debug!(%logical_key, "rebound for device"),
            Err(err) => tracing::warn!(%logical_key, %err, "can't rebind for device"),
        }
    }

    if let (Some(sequence), Some(value)) =
        (device_sequence(capabilities, LogicalKey::KillToEol), kill_to_eol)
    {
        if let Err(err) = builder.bind_sequence(&sequence, value) {
            tracing::warn!(%err, "can't bind device kill-to-eol key");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnsiDefaults, FixedCapabilities};
    use pretty_assertions::assert_eq;

    fn builder() -> KeyTableBuilder<&'static str> {
        let mut builder = KeyTableBuilder::new();
        builder.bind(Key::Home, "home").unwrap();
        builder.bind(Key::End, "end").unwrap();
        builder.bind(Key::EndVt, "other").unwrap();
        builder
    }

    #[test]
    fn test_ansi_defaults_change_nothing() {
        let mut builder = builder();
        remap_device_keys(&mut builder, &AnsiDefaults, Some("kill"));
        let table = builder.build();
        assert_eq!(table.get(&Key::Home.into()), Some(&"home"));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_device_sequences_replace_defaults() {
        let capabilities = FixedCapabilities::new()
            .with(LogicalKey::Home, b"\x1b[1~")
            .with(LogicalKey::End, b"\x1b[4~")
            .with(LogicalKey::KillToEol, b"\x1b[K");
        let mut builder = builder();
        remap_device_keys(&mut builder, &capabilities, Some("kill"));
        let table = builder.build();

        assert_eq!(table.get(&Key::HomeVt.into()), Some(&"home"));
        assert_eq!(table.get(&Key::Home.into()), None);
        // ESC [ 4 ~ was already bound, End keeps its default.
        assert_eq!(table.get(&Key::End.into()), Some(&"end"));
        assert_eq!(table.get(&KeyAction::new(['\x1b', '[', 'K'], "")), Some(&"kill"));
    }
}
