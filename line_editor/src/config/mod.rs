// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod readline_config;

// Re-export.
pub use readline_config::*;
