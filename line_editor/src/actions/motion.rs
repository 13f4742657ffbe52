// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Cursor motions. Each computes a target offset from the line and the current cursor,
//! without touching the buffer. Operators then act on the range between the two.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    ForwardChar,
    BackwardChar,
    BeginningOfLine,
    EndOfLine,
    FirstNonBlank,
    /// Emacs style: to the end of the next run of alphanumerics.
    ForwardWord,
    /// Emacs style: to the start of the previous run of alphanumerics.
    BackwardWord,
    /// Vi `w` / `W`. A big word is any run of non blank characters.
    ViForwardWord { big: bool },
    /// Vi `b` / `B`.
    ViBackwardWord { big: bool },
    /// Vi `e` / `E`, inclusive when used with an operator.
    ViEndWord { big: bool },
    /// What `w` / `W` become under `c`: up to the end of the word, the blanks after it
    /// are kept. Starting on a blank also takes the word that follows.
    ViChangeWord { big: bool },
    /// The whole line, whatever the cursor position (`dd`, `cc`, `yy`).
    WholeLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Blank,
    Word,
    Punctuation,
}

fn class_of(ch: char, big: bool) -> CharClass {
    if ch.is_whitespace() {
        CharClass::Blank
    } else if big || ch.is_alphanumeric() || ch == '_' {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

impl Motion {
    /// Operators include the character under the target for inclusive motions.
    #[must_use]
    pub fn is_inclusive(self) -> bool { matches!(self, Motion::ViEndWord { .. }) }

    #[must_use]
    pub fn target(self, line: &[char], cursor: usize) -> usize {
        let len = line.len();
        let cursor = cursor.min(len);
        match self {
            Motion::ForwardChar => (cursor + 1).min(len),
            Motion::BackwardChar => cursor.saturating_sub(1),
            Motion::BeginningOfLine => 0,
            Motion::EndOfLine | Motion::WholeLine => len,
            Motion::FirstNonBlank => line.iter().position(|it| !it.is_whitespace()).unwrap_or(len),
            Motion::ForwardWord => emacs_forward_word(line, cursor),
            Motion::BackwardWord => emacs_backward_word(line, cursor),
            Motion::ViForwardWord { big } => vi_forward_word(line, cursor, big),
            Motion::ViBackwardWord { big } => vi_backward_word(line, cursor, big),
            Motion::ViEndWord { big } => vi_end_word(line, cursor, big),
            Motion::ViChangeWord { big } => vi_change_word(line, cursor, big),
        }
    }
}

fn emacs_forward_word(line: &[char], mut pos: usize) -> usize {
    while pos < line.len() && !line[pos].is_alphanumeric() {
        pos += 1;
    }
    while pos < line.len() && line[pos].is_alphanumeric() {
        pos += 1;
    }
    pos
}

fn emacs_backward_word(line: &[char], mut pos: usize) -> usize {
    while pos > 0 && !line[pos - 1].is_alphanumeric() {
        pos -= 1;
    }
    while pos > 0 && line[pos - 1].is_alphanumeric() {
        pos -= 1;
    }
    pos
}

fn vi_forward_word(line: &[char], mut pos: usize, big: bool) -> usize {
    let len = line.len();
    if pos >= len {
        return len;
    }
    let start_class = class_of(line[pos], big);
    if start_class != CharClass::Blank {
        while pos < len && class_of(line[pos], big) == start_class {
            pos += 1;
        }
    }
    while pos < len && class_of(line[pos], big) == CharClass::Blank {
        pos += 1;
    }
    pos
}

fn vi_backward_word(line: &[char], mut pos: usize, big: bool) -> usize {
    if pos == 0 {
        return 0;
    }
    pos -= 1;
    while pos > 0 && class_of(line[pos], big) == CharClass::Blank {
        pos -= 1;
    }
    let word_class = class_of(line[pos], big);
    while pos > 0 && class_of(line[pos - 1], big) == word_class {
        pos -= 1;
    }
    pos
}

fn vi_end_word(line: &[char], mut pos: usize, big: bool) -> usize {
    let len = line.len();
    if pos + 1 >= len {
        return pos.min(len.saturating_sub(1));
    }
    pos += 1;
    while pos + 1 < len && class_of(line[pos], big) == CharClass::Blank {
        pos += 1;
    }
    let word_class = class_of(line[pos], big);
    while pos + 1 < len && class_of(line[pos + 1], big) == word_class {
        pos += 1;
    }
    pos
}

fn vi_change_word(line: &[char], mut pos: usize, big: bool) -> usize {
    let len = line.len();
    while pos < len && class_of(line[pos], big) == CharClass::Blank {
        pos += 1;
    }
    if pos < len {
        let word_class = class_of(line[pos], big);
        while pos < len && class_of(line[pos], big) == word_class {
            pos += 1;
        }
    }
    pos
}
