// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallvec::{SmallVec, smallvec};

/// Most key sequences fit inline (`ESC [ 1 ; 5 C` is the longest named one).
pub const KEY_SEQUENCE_INLINE_CAPACITY: usize = 6;

pub type KeySequence = SmallVec<[char; KEY_SEQUENCE_INLINE_CAPACITY]>;

pub const ESC: char = '\x1b';
pub const DEL: char = '\x7f';

/// Named keys and their default code point sequences, as sent by an xterm compatible
/// terminal. Some keys have more than one encoding (normal vs application cursor mode,
/// `CSI` vs `SS3` vs `VT` style), each of which is its own variant so that all of them
/// can be bound at the same time.
///
/// [`Key::Char`] is a single printable character, eg: a Vi command like `w`.
/// [`Key::Ctrl`] takes the character printed after the caret in caret notation, eg:
/// `Key::Ctrl('A')` is `0x01`. Note that `Ctrl('M')`, `Ctrl('I')`, `Ctrl('[')` share
/// their code point with [`Key::Enter`], [`Key::Tab`], [`Key::Escape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Ctrl(char),
    /// `ESC` followed by the character, which is how terminals send Alt / Meta chords.
    Meta(char),
    Escape,
    Enter,
    Newline,
    Tab,
    Backspace,
    Up,
    Down,
    Right,
    Left,
    UpSs3,
    DownSs3,
    RightSs3,
    LeftSs3,
    CtrlRight,
    CtrlLeft,
    Home,
    End,
    HomeSs3,
    EndSs3,
    HomeVt,
    EndVt,
    Insert,
    Delete,
    PageUp,
    PageDown,
}

impl Key {
    /// Code point of `Ctrl(ch)`, accepting lower case letters too.
    #[must_use]
    pub fn ctrl_code_point(ch: char) -> char {
        let upper = ch.to_ascii_uppercase() as u32;
        char::from_u32(upper & 0x1F).unwrap_or(ch)
    }

    #[must_use]
    pub fn code_points(&self) -> KeySequence {
        let csi = |tail: &str| -> KeySequence {
            let mut acc: KeySequence = smallvec![ESC, '['];
            acc.extend(tail.chars());
            acc
        };
        let ss3 = |final_char: char| -> KeySequence { smallvec![ESC, 'O', final_char] };

        match self {
            Key::Char(ch) => smallvec![*ch],
            Key::Ctrl(ch) => smallvec![Self::ctrl_code_point(*ch)],
            Key::Meta(ch) => smallvec![ESC, *ch],
            Key::Escape => smallvec![ESC],
            Key::Enter => smallvec!['\r'],
            Key::Newline => smallvec!['\n'],
            Key::Tab => smallvec!['\t'],
            Key::Backspace => smallvec![DEL],
            Key::Up => csi("A"),
            Key::Down => csi("B"),
            Key::Right => csi("C"),
            Key::Left => csi("D"),
            Key::UpSs3 => ss3('A'),
            Key::DownSs3 => ss3('B'),
            Key::RightSs3 => ss3('C'),
            Key::LeftSs3 => ss3('D'),
            Key::CtrlRight => csi("1;5C"),
            Key::CtrlLeft => csi("1;5D"),
            Key::Home => csi("H"),
            Key::End => csi("F"),
            Key::HomeSs3 => ss3('H'),
            Key::EndSs3 => ss3('F'),
            Key::HomeVt => csi("1~"),
            Key::EndVt => csi("4~"),
            Key::Insert => csi("2~"),
            Key::Delete => csi("3~"),
            Key::PageUp => csi("5~"),
            Key::PageDown => csi("6~"),
        }
    }

    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Key::Char(ch) => ch.to_string(),
            Key::Ctrl(ch) => format!("Ctrl-{}", ch.to_ascii_uppercase()),
            Key::Meta(ch) => format!("Meta-{ch}"),
            other => format!("{other:?}"),
        }
    }
}

/// Caret notation for a code point sequence, used in logs and error messages, eg:
/// `^[[A` for the up arrow.
#[must_use]
pub fn display_code_points(code_points: &[char]) -> String {
    let mut acc = String::with_capacity(code_points.len() * 2);
    for ch in code_points {
        match *ch {
            DEL => acc.push_str("^?"),
            ch if (ch as u32) < 0x20 => {
                acc.push('^');
                acc.push(char::from_u32(ch as u32 + 0x40).unwrap_or('?'));
            }
            ch => acc.push(ch),
        }
    }
    acc
}
