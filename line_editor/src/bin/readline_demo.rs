// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interactive demo: reads lines from the local terminal in raw mode and echoes each
//! committed line back. Options are read from the environment (see
//! [`ReadlineConfig::from_env`]) and then overridden by the command line.
//!
//! ```sh
//! cargo run --bin readline_demo -- --mode vi --enable-logging
//! ```

use clap::{Parser, ValueEnum};
use miette::IntoDiagnostic;
use r3bl_line_editor::{Charset, DisplayPreference, EditingMode, Editor, LineEvent,
                       ReadlineConfig, ReadlineSession, TracingConfig, WriteSink, ok,
                       setup_default_miette_global_report_handler,
                       try_initialize_logging_global};
use std::io::Write;
use tracing_core::LevelFilter;

const ISSUES_URL: &str = "https://github.com/r3bl-org/r3bl-open-core/issues/new";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Emacs,
    Vi,
}

#[derive(Debug, Parser)]
#[command(bin_name = "readline_demo")]
#[command(about = "Type lines, get them echoed back. Ctrl+D on an empty line exits.")]
#[command(version)]
#[command(next_line_help = true)]
struct CLIArg {
    #[arg(long, short = 'm', value_enum, help = "Keybindings to use")]
    mode: Option<ModeArg>,

    #[arg(long, short = 'p', default_value = "> ", help = "Prompt to show")]
    prompt: String,

    #[arg(long, short = 'c', default_value = "utf-8", help = "Input charset")]
    charset: Charset,

    #[arg(
        long,
        short = 'l',
        help = "Log to a file named `line_editor_log.txt` for debugging"
    )]
    enable_logging: bool,

    #[arg(long, help = "Also log to stderr")]
    log_to_stderr: bool,
}

#[tokio::main]
#[allow(clippy::needless_return)]
async fn main() -> miette::Result<()> {
    setup_default_miette_global_report_handler(ISSUES_URL);
    let cli_arg = CLIArg::parse();

    if cli_arg.enable_logging {
        let tracing_config = if cli_arg.log_to_stderr {
            TracingConfig::new_file_and_display(None, DisplayPreference::Stderr, LevelFilter::DEBUG)
        } else {
            TracingConfig::new_file(None, LevelFilter::DEBUG)
        };
        try_initialize_logging_global(tracing_config)?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let mut config = ReadlineConfig::from_env()?;
    if let Some(mode) = cli_arg.mode {
        config.editing_mode = match mode {
            ModeArg::Emacs => EditingMode::Emacs,
            ModeArg::Vi => EditingMode::Vi,
        };
    }

    let sink = WriteSink::new(std::io::stdout(), Charset::Utf8);
    let editor = Editor::new(config, Box::new(sink))?
        .with_charset(cli_arg.charset)
        .with_prompt(cli_arg.prompt);

    crossterm::terminal::enable_raw_mode().into_diagnostic()?;
    let result = run(ReadlineSession::new(editor, tokio::io::stdin())).await;
    crossterm::terminal::disable_raw_mode().into_diagnostic()?;

    tracing::debug!(message = "Stop logging...");
    result
}

async fn run(mut session: ReadlineSession<tokio::io::Stdin>) -> miette::Result<()> {
    while let Some(event) = session.read_line().await? {
        let mut stdout = std::io::stdout();
        match event {
            LineEvent::Line(line) => {
                // Raw mode, so the carriage return is explicit.
                write!(stdout, "you typed: {line}\r\n").into_diagnostic()?;
            }
            LineEvent::Interrupted => write!(stdout, "^C\r\n").into_diagnostic()?,
            LineEvent::Eof => break,
        }
        stdout.flush().into_diagnostic()?;
    }
    ok!()
}
