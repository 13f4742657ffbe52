// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Collaborators the core drives but doesn't own: the editable line, the paste
//! register, device key capabilities and the output side. Each is a trait with a
//! simple in crate implementation.

// Attach sources.
pub mod device_capabilities;
pub mod line_buffer;
pub mod output_sink;
pub mod paste_register;
pub mod render;

// Re-export.
pub use device_capabilities::*;
pub use line_buffer::*;
pub use output_sink::*;
pub use paste_register::*;
pub use render::*;
