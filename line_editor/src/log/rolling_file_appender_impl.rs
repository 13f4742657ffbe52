// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

/// Log file that is never rotated, the session log of one run of an editor.
///
/// Note that wrapping this in `tracing_appender::non_blocking(..)` doesn't work, the
/// guard would have to outlive the subscriber.
///
/// # Errors
///
/// Returns an error if the path has no parent directory or no file name.
pub fn try_create_log_file_appender(
    path_str: &str,
) -> miette::Result<tracing_appender::rolling::RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = path.parent().ok_or_else(|| {
        miette::miette!(
            "Can't access the folder of {}. It might not exist, or you may not have permission.",
            path.display()
        )
    })?;

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!(
            "Can't get a file name from {}. It must not end in `..` or a separator.",
            path.display()
        )
    })?;

    Ok(tracing_appender::rolling::never(parent, file_name))
}
