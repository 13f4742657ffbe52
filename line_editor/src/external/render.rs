// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::output_sink::OutputSink;
use crate::{BellStyle, ok};
use crossterm::{Command, cursor,
                terminal::{Clear, ClearType}};

pub const MASK_CHAR: char = '*';

/// What the editor wants the screen to show after an action was applied. Column
/// positions are code point offsets, glyph widths are not taken into account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderRequest {
    /// The edit line and where the cursor sits in it.
    Line {
        code_points: Vec<char>,
        cursor: usize,
        masked: bool,
    },
    /// Replaces the edit line while a chained action holds focus, eg: the incremental
    /// search banner.
    Banner { text: String, cursor: usize },
    Bell(BellStyle),
    ClearScreen,
    /// The line was committed, move past it.
    NewLine,
}

/// Turns [`RenderRequest`]s into ANSI escape sequences on an [`OutputSink`].
#[derive(Debug, Clone, Default)]
pub struct AnsiRenderer {
    pub prompt: String,
}

fn queue(acc: &mut String, command: impl Command) -> std::io::Result<()> {
    command.write_ansi(acc).map_err(std::io::Error::other)
}

fn to_column(it: usize) -> u16 { u16::try_from(it).unwrap_or(u16::MAX) }

impl AnsiRenderer {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// # Errors
    ///
    /// Any I/O error from the sink.
    pub fn render(
        &self,
        request: &RenderRequest,
        sink: &mut dyn OutputSink,
    ) -> std::io::Result<()> {
        let mut acc = String::new();

        match request {
            RenderRequest::Line {
                code_points,
                cursor,
                masked,
            } => {
                let text: String = if *masked {
                    code_points.iter().map(|_| MASK_CHAR).collect()
                } else {
                    code_points.iter().collect()
                };
                let prompt_len = self.prompt.chars().count();
                self.redraw(&mut acc, &format!("{}{text}", self.prompt), prompt_len + cursor)?;
            }
            RenderRequest::Banner { text, cursor } => self.redraw(&mut acc, text, *cursor)?,
            RenderRequest::Bell(BellStyle::Audible) => acc.push('\x07'),
            RenderRequest::Bell(BellStyle::Visible | BellStyle::None) => {}
            RenderRequest::ClearScreen => {
                queue(&mut acc, Clear(ClearType::All))?;
                queue(&mut acc, cursor::MoveTo(0, 0))?;
            }
            RenderRequest::NewLine => acc.push_str("\r\n"),
        }

        if acc.is_empty() {
            return ok!();
        }
        sink.write_str(&acc)?;
        sink.flush()
    }

    fn redraw(&self, acc: &mut String, text: &str, column: usize) -> std::io::Result<()> {
        queue(acc, cursor::MoveToColumn(0))?;
        queue(acc, Clear(ClearType::UntilNewLine))?;
        acc.push_str(text);
        queue(acc, cursor::MoveToColumn(to_column(column)))?;
        ok!()
    }
}
