// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::OutputSinkMock;
use crate::{ActionOutcome, Editor, ReadlineConfig};

/// Returns the editor and a clone of the sink it renders to.
pub fn editor_with_mock_sink(config: ReadlineConfig) -> (Editor, OutputSinkMock) {
    let sink = OutputSinkMock::new();
    let editor = Editor::new(config, Box::new(sink.clone())).unwrap();
    (editor, sink)
}

/// Feeds each chunk as a separate write, the way a slow transport delivers them.
pub fn write_chunks(editor: &mut Editor, chunks: &[&str]) -> Vec<ActionOutcome> {
    chunks
        .iter()
        .flat_map(|chunk| editor.write_str(chunk).unwrap())
        .collect()
}
