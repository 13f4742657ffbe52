// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{AsRefStr, Display, EnumString};

/// Byte encodings a transport can deliver. UTF-8 is what every modern terminal sends;
/// the others exist for legacy devices and for transports that hand over UTF-16 code
/// units (which is where surrogate pairs can straddle two reads).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Charset {
    #[default]
    #[strum(to_string = "utf-8", serialize = "utf8")]
    Utf8,
    #[strum(to_string = "utf-16be", serialize = "utf16be")]
    Utf16Be,
    #[strum(to_string = "utf-16le", serialize = "utf16le")]
    Utf16Le,
    #[strum(to_string = "iso-8859-1", serialize = "latin1")]
    Latin1,
    #[strum(to_string = "us-ascii", serialize = "ascii")]
    Ascii,
}

// UTF-8 bit patterns. The leading 1s of the first byte give the sequence length,
// continuation bytes are always `10xxxxxx`.
pub(crate) const UTF8_1BYTE_MAX: u8 = 0x7F;
pub(crate) const UTF8_2BYTE_MIN: u8 = 0xC0;
pub(crate) const UTF8_2BYTE_MAX: u8 = 0xDF;
pub(crate) const UTF8_3BYTE_MIN: u8 = 0xE0;
pub(crate) const UTF8_3BYTE_MAX: u8 = 0xEF;
pub(crate) const UTF8_4BYTE_MIN: u8 = 0xF0;
pub(crate) const UTF8_4BYTE_MAX: u8 = 0xF7;
pub(crate) const UTF8_2BYTE_FIRST_MASK: u8 = 0b0001_1111;
pub(crate) const UTF8_3BYTE_FIRST_MASK: u8 = 0b0000_1111;
pub(crate) const UTF8_4BYTE_FIRST_MASK: u8 = 0b0000_0111;
pub(crate) const UTF8_CONTINUATION_MASK: u8 = 0b1100_0000;
pub(crate) const UTF8_CONTINUATION_PATTERN: u8 = 0b1000_0000;
pub(crate) const UTF8_CONTINUATION_DATA_MASK: u8 = 0b0011_1111;

/// Smallest code point that may be encoded with a sequence of the given length. Anything
/// below it is an overlong encoding.
pub(crate) const UTF8_MIN_CODE_POINT_FOR_LEN: [u32; 5] = [0, 0, 0x80, 0x800, 0x1_0000];

pub(crate) const HIGH_SURROGATE_MIN: u16 = 0xD800;
pub(crate) const HIGH_SURROGATE_MAX: u16 = 0xDBFF;
pub(crate) const LOW_SURROGATE_MIN: u16 = 0xDC00;
pub(crate) const LOW_SURROGATE_MAX: u16 = 0xDFFF;

/// Total byte length of a UTF-8 sequence given its first byte, or `None` for a
/// continuation byte or a reserved value (`11111xxx`).
pub(crate) fn utf8_sequence_length(first_byte: u8) -> Option<usize> {
    match first_byte {
        0..=UTF8_1BYTE_MAX => Some(1),
        UTF8_2BYTE_MIN..=UTF8_2BYTE_MAX => Some(2),
        UTF8_3BYTE_MIN..=UTF8_3BYTE_MAX => Some(3),
        UTF8_4BYTE_MIN..=UTF8_4BYTE_MAX => Some(4),
        _ => None,
    }
}

pub(crate) fn is_utf8_continuation(byte: u8) -> bool {
    (byte & UTF8_CONTINUATION_MASK) == UTF8_CONTINUATION_PATTERN
}

/// Combines the data bits of a complete, structurally valid sequence. Range checks
/// (overlong, surrogates, > U+10FFFF) are the caller's job.
pub(crate) fn utf8_code_point(sequence: &[u8]) -> u32 {
    let data = |byte: u8| u32::from(byte & UTF8_CONTINUATION_DATA_MASK);
    match sequence {
        [b1] => u32::from(*b1),
        [b1, b2] => (u32::from(b1 & UTF8_2BYTE_FIRST_MASK) << 6) | data(*b2),
        [b1, b2, b3] => {
            (u32::from(b1 & UTF8_3BYTE_FIRST_MASK) << 12) | (data(*b2) << 6) | data(*b3)
        }
        [b1, b2, b3, b4] => {
            (u32::from(b1 & UTF8_4BYTE_FIRST_MASK) << 18)
                | (data(*b2) << 12)
                | (data(*b3) << 6)
                | data(*b4)
        }
        _ => u32::MAX,
    }
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (HIGH_SURROGATE_MIN..=HIGH_SURROGATE_MAX).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (LOW_SURROGATE_MIN..=LOW_SURROGATE_MAX).contains(&unit)
}

pub(crate) fn combine_surrogates(high: u16, low: u16) -> Option<char> {
    let high = u32::from(high - HIGH_SURROGATE_MIN);
    let low = u32::from(low - LOW_SURROGATE_MIN);
    char::from_u32(0x1_0000 + ((high << 10) | low))
}
