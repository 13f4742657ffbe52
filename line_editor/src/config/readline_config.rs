// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ConfigError, HISTORY_SIZE_MAX};
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EditingMode {
    #[default]
    Emacs,
    Vi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BellStyle {
    None,
    #[default]
    Audible,
    Visible,
}

/// Names of the recognized options, as used by [`ReadlineConfig::from_options`] and as
/// environment variable names by [`ReadlineConfig::from_env`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ConfigOption {
    EditingMode,
    HistorySize,
    DisableCompletion,
    BellStyle,
}

impl ConfigOption {
    pub const ALL: [ConfigOption; 4] = [
        ConfigOption::EditingMode,
        ConfigOption::HistorySize,
        ConfigOption::DisableCompletion,
        ConfigOption::BellStyle,
    ];
}

/// Session options.
///
/// - `editing_mode` picks the Emacs or Vi dispatcher.
/// - `history_size` bounds the history.
/// - `disable_completion` turns the `complete` action into a no-op.
/// - `bell_style` is passed along with bell outcomes for the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadlineConfig {
    pub editing_mode: EditingMode,
    pub history_size: usize,
    pub disable_completion: bool,
    pub bell_style: BellStyle,
}

impl Default for ReadlineConfig {
    fn default() -> Self {
        Self {
            editing_mode: EditingMode::default(),
            history_size: HISTORY_SIZE_MAX,
            disable_completion: false,
            bell_style: BellStyle::default(),
        }
    }
}

fn parse_bool(option: ConfigOption, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(invalid(option, value)),
    }
}

fn invalid(option: ConfigOption, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    }
}

impl ReadlineConfig {
    #[must_use]
    pub fn with_editing_mode(mut self, editing_mode: EditingMode) -> Self {
        self.editing_mode = editing_mode;
        self
    }

    #[must_use]
    pub fn with_history_size(mut self, history_size: usize) -> Self {
        self.history_size = history_size;
        self
    }

    #[must_use]
    pub fn with_disable_completion(mut self, disable_completion: bool) -> Self {
        self.disable_completion = disable_completion;
        self
    }

    #[must_use]
    pub fn with_bell_style(mut self, bell_style: BellStyle) -> Self {
        self.bell_style = bell_style;
        self
    }

    /// Applies one option.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] if `value` can't be parsed for `option`.
    pub fn set(&mut self, option: ConfigOption, value: &str) -> Result<(), ConfigError> {
        let trimmed = value.trim();
        match option {
            ConfigOption::EditingMode => {
                self.editing_mode =
                    EditingMode::from_str(trimmed).map_err(|_| invalid(option, value))?;
            }
            ConfigOption::HistorySize => {
                self.history_size = trimmed.parse().map_err(|_| invalid(option, value))?;
            }
            ConfigOption::DisableCompletion => {
                self.disable_completion = parse_bool(option, value)?;
            }
            ConfigOption::BellStyle => {
                self.bell_style =
                    BellStyle::from_str(trimmed).map_err(|_| invalid(option, value))?;
            }
        }
        tracing::debug!(%option, value = trimmed, "config option set");
        Ok(())
    }

    /// Builds a config from `(name, value)` pairs, names are case insensitive. Options
    /// that aren't given keep their default.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownOption`] for an unrecognized name, and
    /// [`ConfigError::InvalidValue`] for a value that doesn't parse.
    pub fn from_options<K, V>(
        options: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, ConfigError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (name, value) in options {
            let name = name.as_ref();
            let option = ConfigOption::from_str(name.trim()).map_err(|_| {
                ConfigError::UnknownOption {
                    option: name.to_string(),
                }
            })?;
            config.set(option, value.as_ref())?;
        }
        Ok(config)
    }

    /// Looks every recognized option up by name, `None` keeps the default.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for a value that doesn't parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for option in ConfigOption::ALL {
            if let Some(value) = lookup(option.as_ref()) {
                config.set(option, &value)?;
            }
        }
        Ok(config)
    }

    /// Reads `EDITING_MODE`, `HISTORY_SIZE`, `DISABLE_COMPLETION`, `BELL_STYLE` from the
    /// environment.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] for a value that doesn't parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }
}
