// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Charset, Encoder};
use std::{fmt::Debug, io::Write};

/// Where echo and redraw output goes. Takes code points so the sink decides the byte
/// encoding.
pub trait OutputSink: Debug + Send {
    /// # Errors
    ///
    /// Any I/O error from the underlying device.
    fn write_code_points(&mut self, code_points: &[char]) -> std::io::Result<()>;

    /// # Errors
    ///
    /// Any I/O error from the underlying device.
    fn flush(&mut self) -> std::io::Result<()>;

    /// # Errors
    ///
    /// Any I/O error from the underlying device.
    fn write_str(&mut self, text: &str) -> std::io::Result<()> {
        let code_points: Vec<char> = text.chars().collect();
        self.write_code_points(&code_points)
    }
}

/// [`OutputSink`] over any [`Write`], encoding with the transport's charset.
#[derive(Debug)]
pub struct WriteSink<W: Write + Debug + Send> {
    writer: W,
    encoder: Encoder,
}

impl<W: Write + Debug + Send> WriteSink<W> {
    pub fn new(writer: W, charset: Charset) -> Self {
        Self {
            writer,
            encoder: Encoder::new(charset),
        }
    }

    pub fn into_inner(self) -> W { self.writer }
}

impl<W: Write + Debug + Send> OutputSink for WriteSink<W> {
    fn write_code_points(&mut self, code_points: &[char]) -> std::io::Result<()> {
        self.writer.write_all(&self.encoder.encode(code_points))
    }

    fn flush(&mut self) -> std::io::Result<()> { self.writer.flush() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_sink_encodes_with_charset() {
        let mut sink = WriteSink::new(Vec::<u8>::new(), Charset::Latin1);
        sink.write_str("é!").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.into_inner(), vec![0xE9, b'!']);
    }
}
