// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::OutputSink;
use std::sync::{Arc, Mutex as StdMutex};
use strip_ansi_escapes::strip;

/// You can safely clone this struct, since it only contains an `Arc<StdMutex<Vec<u8>>>`.
/// The inner `buffer` will not be cloned, just the [Arc] will be cloned. Hand one clone
/// to the editor and keep the other to inspect what was rendered.
#[derive(Debug, Clone, Default)]
pub struct OutputSinkMock {
    pub buffer: Arc<StdMutex<Vec<u8>>>,
}

impl OutputSinkMock {
    pub fn new() -> Self { Self::default() }

    pub fn get_copy_of_buffer_as_string(&self) -> String {
        let buffer_data = self.buffer.lock().unwrap();
        String::from_utf8(buffer_data.clone()).expect("utf8")
    }

    pub fn get_copy_of_buffer_as_string_strip_ansi(&self) -> String {
        let buffer_data = self.buffer.lock().unwrap();
        String::from_utf8(strip(buffer_data.clone())).expect("utf8")
    }

    pub fn clear(&self) { self.buffer.lock().unwrap().clear(); }
}

impl OutputSink for OutputSinkMock {
    fn write_code_points(&mut self, code_points: &[char]) -> std::io::Result<()> {
        let text: String = code_points.iter().collect();
        self.buffer.lock().unwrap().extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clones_share_the_buffer() {
        let mut sink = OutputSinkMock::new();
        let sink_clone = sink.clone();
        sink.write_str("\x1b[31mred\x1b[0m").unwrap();
        assert_eq!(sink_clone.get_copy_of_buffer_as_string_strip_ansi(), "red");
        assert!(sink_clone.get_copy_of_buffer_as_string().starts_with('\x1b'));

        sink_clone.clear();
        assert_eq!(sink.get_copy_of_buffer_as_string(), "");
    }
}
