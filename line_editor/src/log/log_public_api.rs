// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::tracing_config::TracingConfig;
use crate::ok;
use tracing::dispatcher::DefaultGuard;

/// Installs the process wide subscriber, for apps. Does nothing when `config` has
/// logging off, which is the default.
///
/// # Errors
///
/// If the log file can't be created, or a global subscriber is already set.
pub fn try_initialize_logging_global(config: impl Into<TracingConfig>) -> miette::Result<()> {
    let config: TracingConfig = config.into();
    if !config.is_enabled() {
        return ok!();
    }
    config.install_global()
}

/// Installs a subscriber for the current thread only, for tests. Returns `None` when
/// `config` has logging off.
///
/// # Errors
///
/// If the log file can't be created.
pub fn try_initialize_logging_thread_local(
    config: impl Into<TracingConfig>,
) -> miette::Result<Option<DefaultGuard>> {
    let config: TracingConfig = config.into();
    if !config.is_enabled() {
        return Ok(None);
    }
    config.install_thread_local()
}
