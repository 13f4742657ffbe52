// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod action;
pub mod action_context;
pub mod action_name;
pub mod apply_delta;
pub mod motion;
pub mod quoted_insert;
pub mod search_action;

// Re-export.
pub use action::*;
pub use action_context::*;
pub use action_name::*;
pub use apply_delta::*;
pub use motion::*;
pub use quoted_insert::*;
pub use search_action::*;
