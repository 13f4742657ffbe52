// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod charset;
pub mod encoder;
pub mod stream_decoder;

// Re-export.
pub use charset::Charset;
pub use encoder::*;
pub use stream_decoder::*;
