// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod editor_fixtures;
pub mod output_sink_mock;

// Re-export.
pub use editor_fixtures::*;
pub use output_sink_mock::*;
