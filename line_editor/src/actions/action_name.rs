// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::motion::Motion;
use crate::EditStatus;
use strum_macros::{AsRefStr, Display, EnumString};

/// Everything a key can be bound to. Key tables store these (they are `Copy`), and a
/// fresh [`Action`] is built from the name on every keystroke.
///
/// Names are kebab-case so they can be bound from strings, eg: `"kill-word"`.
///
/// [`Action`]: crate::Action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ActionName {
    SelfInsert,
    ForwardChar,
    BackwardChar,
    BeginningOfLine,
    EndOfLine,
    ForwardWord,
    BackwardWord,
    DeleteChar,
    BackwardDeleteChar,
    DeleteCharOrEof,
    KillLine,
    BackwardKillLine,
    KillWholeLine,
    KillWord,
    BackwardKillWord,
    UnixWordRubout,
    Yank,
    Undo,
    TransposeChars,
    UpcaseWord,
    DowncaseWord,
    CapitalizeWord,
    AcceptLine,
    Interrupt,
    PreviousHistory,
    NextHistory,
    BeginningOfHistory,
    EndOfHistory,
    ClearScreen,
    Complete,
    QuotedInsert,
    ReverseSearchHistory,
    ForwardSearchHistory,
    /// Emacs leader key, the next key is looked up with `ESC` in front of it.
    MetaPrefix,

    ViCommandMode,
    /// Escape while already in command mode or with an operator pending.
    ViCancel,
    ViInsert,
    ViAppend,
    ViInsertBeginning,
    ViAppendEnd,
    ViForwardWord,
    ViForwardBigWord,
    ViBackwardWord,
    ViBackwardBigWord,
    ViEndWord,
    ViEndBigWord,
    ViFirstNonBlank,
    ViDeleteChar,
    ViBackwardDeleteChar,
    ViDeleteToEnd,
    ViChangeToEnd,
    ViSubstituteChar,
    ViSubstituteLine,
    ViDeleteOperator,
    ViChangeOperator,
    ViYankOperator,
    ViUpCaseOperator,
    ViDownCaseOperator,
    ViWholeLine,
    ViToggleCase,
    ViReplace,
    ViPasteAfter,
    ViPasteBefore,
    ViRepeat,
}

impl ActionName {
    /// Actions that hold input focus across several keystrokes.
    #[must_use]
    pub fn is_chained(self) -> bool {
        matches!(
            self,
            ActionName::QuotedInsert
                | ActionName::ReverseSearchHistory
                | ActionName::ForwardSearchHistory
        )
    }

    /// The cursor motion behind this action, for the ones that are a motion combined
    /// with an operation.
    #[must_use]
    pub fn motion(self) -> Option<Motion> {
        use ActionName as A;
        let it = match self {
            A::ForwardChar | A::DeleteChar | A::ViDeleteChar | A::ViSubstituteChar => {
                Motion::ForwardChar
            }
            A::BackwardChar | A::BackwardDeleteChar | A::ViBackwardDeleteChar => {
                Motion::BackwardChar
            }
            A::BeginningOfLine | A::BackwardKillLine => Motion::BeginningOfLine,
            A::EndOfLine | A::KillLine | A::ViDeleteToEnd | A::ViChangeToEnd => {
                Motion::EndOfLine
            }
            A::ForwardWord | A::KillWord | A::UpcaseWord | A::DowncaseWord | A::CapitalizeWord => {
                Motion::ForwardWord
            }
            A::BackwardWord | A::BackwardKillWord => Motion::BackwardWord,
            A::KillWholeLine | A::ViWholeLine | A::ViSubstituteLine => Motion::WholeLine,
            A::ViForwardWord => Motion::ViForwardWord { big: false },
            A::ViForwardBigWord => Motion::ViForwardWord { big: true },
            A::ViBackwardWord => Motion::ViBackwardWord { big: false },
            A::ViBackwardBigWord | A::UnixWordRubout => Motion::ViBackwardWord { big: true },
            A::ViEndWord => Motion::ViEndWord { big: false },
            A::ViEndBigWord => Motion::ViEndWord { big: true },
            A::ViFirstNonBlank => Motion::FirstNonBlank,
            _ => return None,
        };
        Some(it)
    }

    /// The motion used when the action runs with `operation`. Vi `cw` changes to the end
    /// of the word like `ce` rather than up to the next word like `dw`.
    #[must_use]
    pub fn motion_for(self, operation: EditStatus) -> Option<Motion> {
        match (self, operation) {
            (ActionName::ViForwardWord, EditStatus::Change) => {
                Some(Motion::ViChangeWord { big: false })
            }
            (ActionName::ViForwardBigWord, EditStatus::Change) => {
                Some(Motion::ViChangeWord { big: true })
            }
            _ => self.motion(),
        }
    }

    /// Operation baked into the action, regardless of the Vi status it was typed in.
    /// `None` means the operation comes from the status (eg: `w` after `d`).
    #[must_use]
    pub fn fixed_operation(self) -> Option<EditStatus> {
        use ActionName as A;
        match self {
            A::DeleteChar
            | A::BackwardDeleteChar
            | A::KillLine
            | A::BackwardKillLine
            | A::KillWholeLine
            | A::KillWord
            | A::BackwardKillWord
            | A::UnixWordRubout
            | A::ViDeleteChar
            | A::ViBackwardDeleteChar
            | A::ViDeleteToEnd => Some(EditStatus::Delete),
            A::ViChangeToEnd | A::ViSubstituteChar | A::ViSubstituteLine => {
                Some(EditStatus::Change)
            }
            A::UpcaseWord => Some(EditStatus::UpCase),
            A::DowncaseWord => Some(EditStatus::DownCase),
            A::CapitalizeWord => Some(EditStatus::Capitalize),
            _ => None,
        }
    }
}
