// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Installs a [miette](https://docs.rs/miette/latest/miette/index.html) report hook for
//! binaries built on this crate (eg: `readline_demo`).
//!
//! The hook is lazy: the terminal width is only measured when a report is actually
//! displayed, which matters for a line editor since the terminal may be in raw mode or
//! resized between setup and the error.

use miette::MietteHandlerOpts;
use tracing::debug;

const FALLBACK_TERMINAL_WIDTH: u16 = 80;

pub fn setup_default_miette_global_report_handler(issues_url: &'static str) {
    miette::set_hook(Box::new(|_report| {
        let terminal_width = {
            let it = crossterm::terminal::size()
                .map_or(FALLBACK_TERMINAL_WIDTH, |(columns, _rows)| columns);
            debug!("miette::set_hook -> terminal_width: {}", it);
            usize::from(it)
        };
        Box::new(
            MietteHandlerOpts::new()
                .width(terminal_width)
                .wrap_lines(true)
                .unicode(true)
                .context_lines(2)
                .with_cause_chain()
                .footer(issues_url.to_string())
                .build(),
        )
    }))
    .ok();
}
