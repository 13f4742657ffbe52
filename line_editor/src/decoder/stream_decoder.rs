// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Incremental byte to code point decoding.
//!
//! Transports (a pty, an SSH channel, a WebSocket frame) hand over bytes in whatever
//! chunks they happen to receive. A multi-byte character can be split across two reads,
//! and a UTF-16 surrogate pair can be split across two reads. [`StreamDecoder`] keeps
//! the unconsumed tail of each write in a staging buffer and completes it with the bytes
//! of the next write, so the output never depends on where the chunk boundaries fell.
//!
//! ```text
//! write(bytes) ──▶ byte staging ──▶ decode ──▶ char staging ──▶ consumer(&[char])
//!                    ▲      │                                      │
//!                    └──────┘ incomplete tail          (retained until a consumer
//!                                                       is registered)
//! ```

use super::charset::{Charset, UTF8_MIN_CODE_POINT_FOR_LEN, combine_surrogates,
                     is_high_surrogate, is_low_surrogate, is_utf8_continuation,
                     utf8_code_point, utf8_sequence_length};
use crate::DecoderError;
use smallvec::SmallVec;
use std::fmt::{Debug, Formatter};

/// Decoded code points are delivered to the consumer in batches of at most this many.
pub const CHAR_STAGING_CAPACITY: usize = 256;

/// Receives each batch of decoded code points.
pub type CodePointConsumer = Box<dyn FnMut(&[char]) + Send>;

/// Stateful byte to code point codec. See the [module docs](self) for the data flow.
///
/// A decode failure on genuinely invalid input poisons the instance: the staging
/// buffers are dropped, and every later call returns [`DecoderError::Poisoned`].
pub struct StreamDecoder {
    charset: Charset,
    /// Bytes that can't be converted yet (an incomplete sequence at the end of a write).
    byte_staging: SmallVec<[u8; 8]>,
    /// UTF-16 only: a high surrogate waiting for its low half.
    pending_high_surrogate: Option<u16>,
    /// Code points decoded while no consumer was registered.
    retained: Vec<char>,
    consumer: Option<CodePointConsumer>,
    /// Total bytes consumed so far, used to report the offset of malformed input.
    bytes_consumed: usize,
    poisoned: bool,
}

impl Debug for StreamDecoder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamDecoder")
            .field("charset", &self.charset)
            .field("byte_staging", &self.byte_staging)
            .field("pending_high_surrogate", &self.pending_high_surrogate)
            .field("retained", &self.retained.len())
            .field("has_consumer", &self.consumer.is_some())
            .field("poisoned", &self.poisoned)
            .finish()
    }
}

impl Default for StreamDecoder {
    fn default() -> Self { Self::new(Charset::default()) }
}

impl StreamDecoder {
    #[must_use]
    pub fn new(charset: Charset) -> Self {
        Self {
            charset,
            byte_staging: SmallVec::new(),
            pending_high_surrogate: None,
            retained: Vec::new(),
            consumer: None,
            bytes_consumed: 0,
            poisoned: false,
        }
    }

    #[must_use]
    pub fn charset(&self) -> Charset { self.charset }

    #[must_use]
    pub fn is_poisoned(&self) -> bool { self.poisoned }

    /// Number of bytes (plus a pending high surrogate, counted as its two bytes) that
    /// are waiting for the rest of their sequence.
    #[must_use]
    pub fn pending_byte_count(&self) -> usize {
        self.byte_staging.len() + self.pending_high_surrogate.map_or(0, |_| 2)
    }

    /// Registers the consumer and immediately flushes anything that was decoded while
    /// there was none.
    pub fn set_consumer(&mut self, consumer: CodePointConsumer) {
        let consumer = self.consumer.insert(consumer);
        if !self.retained.is_empty() {
            tracing::trace!(count = self.retained.len(), "flushing retained code points");
            for batch in self.retained.chunks(CHAR_STAGING_CAPACITY) {
                consumer(batch);
            }
            self.retained.clear();
        }
    }

    /// Unregisters the consumer. Later writes are retained until the next
    /// [`Self::set_consumer`].
    pub fn take_consumer(&mut self) -> Option<CodePointConsumer> { self.consumer.take() }

    /// Decodes `bytes` and hands the result to the registered consumer, or retains it
    /// when there isn't one.
    ///
    /// # Errors
    ///
    /// Returns [`DecoderError::MalformedInput`] when `bytes` can't be valid in the
    /// configured charset, and [`DecoderError::Poisoned`] on any call after that.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), DecoderError> {
        let mut decoded = Vec::with_capacity(bytes.len());
        self.decode_into(bytes, &mut decoded)?;
        if decoded.is_empty() {
            return Ok(());
        }
        match self.consumer.as_mut() {
            Some(consumer) => {
                for batch in decoded.chunks(CHAR_STAGING_CAPACITY) {
                    consumer(batch);
                }
            }
            None => self.retained.extend_from_slice(&decoded),
        }
        Ok(())
    }

    /// Same as [`Self::write`] but returns the code points directly, bypassing the
    /// consumer. This is what the editor pipeline uses.
    ///
    /// # Errors
    ///
    /// See [`Self::write`].
    pub fn decode(&mut self, bytes: &[u8]) -> Result<Vec<char>, DecoderError> {
        let mut decoded = Vec::with_capacity(bytes.len());
        self.decode_into(bytes, &mut decoded)?;
        Ok(decoded)
    }

    /// Appends the code points decoded from `bytes` to `out`.
    ///
    /// # Errors
    ///
    /// See [`Self::write`].
    pub fn decode_into(&mut self, bytes: &[u8], out: &mut Vec<char>) -> Result<(), DecoderError> {
        if self.poisoned {
            return Err(DecoderError::Poisoned);
        }
        self.byte_staging.extend_from_slice(bytes);

        let result = match self.charset {
            Charset::Utf8 => self.decode_utf8(out),
            Charset::Utf16Be => self.decode_utf16(out, u16::from_be_bytes),
            Charset::Utf16Le => self.decode_utf16(out, u16::from_le_bytes),
            Charset::Latin1 => self.decode_single_byte(out, |_| true),
            Charset::Ascii => self.decode_single_byte(out, |byte| byte.is_ascii()),
        };

        match result {
            Ok(consumed) => {
                self.byte_staging.drain(..consumed);
                self.bytes_consumed += consumed;
                Ok(())
            }
            Err(offset_in_staging) => {
                let offset = self.bytes_consumed + offset_in_staging;
                tracing::error!(charset = %self.charset, offset, "malformed input, decoder stopped");
                self.poison();
                Err(DecoderError::MalformedInput {
                    charset: self.charset,
                    offset,
                })
            }
        }
    }

    fn poison(&mut self) {
        self.poisoned = true;
        self.byte_staging.clear();
        self.pending_high_surrogate = None;
    }

    /// Returns the number of staged bytes consumed, or the staging offset of the first
    /// malformed byte.
    fn decode_utf8(&self, out: &mut Vec<char>) -> Result<usize, usize> {
        let staging = &self.byte_staging;
        let mut index = 0;

        while index < staging.len() {
            let required_len = utf8_sequence_length(staging[index]).ok_or(index)?;
            let available = staging.len() - index;

            // Reject a bad continuation byte right away, even if the sequence is still
            // incomplete, rather than waiting for more bytes that can't fix it.
            for offset in 1..required_len.min(available) {
                if !is_utf8_continuation(staging[index + offset]) {
                    return Err(index + offset);
                }
            }
            if available < required_len {
                break;
            }

            let sequence = &staging[index..index + required_len];
            let code_point = utf8_code_point(sequence);
            if code_point < UTF8_MIN_CODE_POINT_FOR_LEN[required_len] {
                return Err(index);
            }
            out.push(char::from_u32(code_point).ok_or(index)?);
            index += required_len;
        }

        Ok(index)
    }

    fn decode_utf16(
        &mut self,
        out: &mut Vec<char>,
        to_unit: fn([u8; 2]) -> u16,
    ) -> Result<usize, usize> {
        let mut index = 0;

        while index + 2 <= self.byte_staging.len() {
            let unit = to_unit([self.byte_staging[index], self.byte_staging[index + 1]]);

            match self.pending_high_surrogate.take() {
                Some(high) if is_low_surrogate(unit) => {
                    out.push(combine_surrogates(high, unit).ok_or(index)?);
                }
                // A high surrogate followed by anything but a low surrogate.
                Some(_) => return Err(index),
                None if is_high_surrogate(unit) => self.pending_high_surrogate = Some(unit),
                None if is_low_surrogate(unit) => return Err(index),
                None => out.push(char::from_u32(u32::from(unit)).ok_or(index)?),
            }

            index += 2;
        }

        Ok(index)
    }

    fn decode_single_byte(
        &self,
        out: &mut Vec<char>,
        is_valid: fn(u8) -> bool,
    ) -> Result<usize, usize> {
        for (index, byte) in self.byte_staging.iter().enumerate() {
            if !is_valid(*byte) {
                return Err(index);
            }
            out.push(char::from(*byte));
        }
        Ok(self.byte_staging.len())
    }
}
