// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod key;
pub mod key_action;
pub mod key_assembler;
pub mod key_table;
pub mod key_trie;

// Re-export.
pub use key::*;
pub use key_action::*;
pub use key_assembler::*;
pub use key_table::*;
pub use key_trie::*;
