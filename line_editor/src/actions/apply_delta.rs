// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::action_context::ActionContext;
use crate::EditStatus;

/// Applies `operation` to the range between `from` (where the cursor was) and `to`
/// (where a motion would put it). Works in either direction.
///
/// - Delete and change remove the range, yank copies it. Both put the text in the paste
///   register (unless the line is masked).
/// - The case operations rewrite the range in place. In Vi the cursor goes to the start
///   of the range, in Emacs past its end.
/// - Anything else just moves the cursor to `to`.
///
/// Undo is pushed before the line is mutated.
#[allow(clippy::cast_possible_wrap)]
pub fn apply_delta(ctx: &mut ActionContext<'_>, from: usize, to: usize, operation: EditStatus) {
    let len = ctx.buffer.len();
    let (from, to) = (from.min(len), to.min(len));
    let (start, end) = (from.min(to), from.max(to));

    match operation {
        EditStatus::Delete | EditStatus::Change => {
            if start != end {
                save_to_paste_register(ctx, start, end);
                ctx.buffer.push_undo();
                ctx.buffer.set_cursor(from);
                ctx.buffer.delete(to as isize - from as isize);
            }
        }
        EditStatus::Yank => {
            if start != end {
                save_to_paste_register(ctx, start, end);
            }
            ctx.buffer.set_cursor(start);
        }
        EditStatus::UpCase | EditStatus::DownCase | EditStatus::Capitalize => {
            if start != end {
                let original = ctx.buffer.code_points()[start..end].to_vec();
                let preceded_by_word = start > 0 && ctx.buffer.code_points()[start - 1].is_alphanumeric();
                let transformed = change_case(&original, operation, preceded_by_word);
                ctx.buffer.push_undo();
                ctx.buffer.set_cursor(start);
                ctx.buffer.delete((end - start) as isize);
                ctx.buffer.insert(&transformed);
                if ctx.vi_command_mode {
                    ctx.buffer.set_cursor(start);
                }
            }
        }
        EditStatus::Move
        | EditStatus::Edit
        | EditStatus::Command
        | EditStatus::Replace
        | EditStatus::Search
        | EditStatus::Repeat => ctx.buffer.set_cursor(to),
    }

    ctx.clamp_cursor_for_command_mode();
}

fn save_to_paste_register(ctx: &mut ActionContext<'_>, start: usize, end: usize) {
    if !ctx.buffer.is_masking() {
        let text = ctx.buffer.code_points()[start..end].to_vec();
        ctx.paste.add(text);
    }
}

fn change_case(text: &[char], operation: EditStatus, preceded_by_word: bool) -> Vec<char> {
    let mut acc = Vec::with_capacity(text.len());
    let mut in_word = preceded_by_word;
    for ch in text {
        match operation {
            EditStatus::UpCase => acc.extend(ch.to_uppercase()),
            EditStatus::DownCase => acc.extend(ch.to_lowercase()),
            _ => {
                if !ch.is_alphanumeric() {
                    acc.push(*ch);
                } else if in_word {
                    acc.extend(ch.to_lowercase());
                } else {
                    acc.extend(ch.to_uppercase());
                }
            }
        }
        in_word = ch.is_alphanumeric();
    }
    acc
}
