// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::charset::Charset;

/// Written in place of a code point the charset can't represent.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Stateless inverse of [`StreamDecoder`], used on the output side (echo, redraw) so
/// the renderer writes bytes in the same charset the transport reads.
///
/// [`StreamDecoder`]: crate::StreamDecoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Encoder {
    pub charset: Charset,
}

impl Encoder {
    #[must_use]
    pub fn new(charset: Charset) -> Self { Self { charset } }

    #[must_use]
    pub fn encode(&self, code_points: &[char]) -> Vec<u8> {
        let mut acc = Vec::with_capacity(code_points.len());
        for ch in code_points {
            self.encode_char(*ch, &mut acc);
        }
        acc
    }

    #[must_use]
    pub fn encode_str(&self, text: &str) -> Vec<u8> {
        let code_points: Vec<char> = text.chars().collect();
        self.encode(&code_points)
    }

    fn encode_char(&self, ch: char, acc: &mut Vec<u8>) {
        match self.charset {
            Charset::Utf8 => {
                let mut buf = [0_u8; 4];
                acc.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            Charset::Utf16Be | Charset::Utf16Le => {
                let mut buf = [0_u16; 2];
                for unit in ch.encode_utf16(&mut buf) {
                    let bytes = match self.charset {
                        Charset::Utf16Be => unit.to_be_bytes(),
                        _ => unit.to_le_bytes(),
                    };
                    acc.extend_from_slice(&bytes);
                }
            }
            Charset::Latin1 => acc.push(u8::try_from(u32::from(ch)).unwrap_or(REPLACEMENT_BYTE)),
            Charset::Ascii => acc.push(if ch.is_ascii() {
                ch as u8
            } else {
                REPLACEMENT_BYTE
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_utf16_surrogate_pair() {
        let encoder = Encoder::new(Charset::Utf16Be);
        assert_eq!(encoder.encode(&['😀']), vec![0xD8, 0x3D, 0xDE, 0x00]);
    }

    #[test]
    fn test_unencodable_code_points_are_replaced() {
        assert_eq!(Encoder::new(Charset::Latin1).encode_str("é€"), vec![0xE9, b'?']);
        assert_eq!(Encoder::new(Charset::Ascii).encode_str("aé"), vec![b'a', b'?']);
    }
}
