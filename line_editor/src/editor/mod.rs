// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod editor_pipeline;
pub mod input_gate;
pub mod line_event;
pub mod session;
pub mod signals;

// Re-export.
pub use editor_pipeline::*;
pub use input_gate::*;
pub use line_event::*;
pub use session::*;
pub use signals::*;
