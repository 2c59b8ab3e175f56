//! Host settings stored in `~/.dialog-overlay/config.json`

use crate::config::{DialogOptions, Mode};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Event poll timeout; also the granularity of transition ticks
    pub tick_rate_ms: u64,
    pub esc_closes: bool,
    pub enter_confirms: bool,
    pub animated: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            esc_closes: true,
            enter_confirms: true,
            animated: true,
        }
    }
}

impl Settings {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".dialog-overlay"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// cannot be parsed
    pub fn load() -> Settings {
        let Some(config_path) = Self::config_path() else {
            return Settings::default();
        };
        if !config_path.exists() {
            return Settings::default();
        }

        match fs::read_to_string(&config_path)
            .map_err(anyhow::Error::from)
            .and_then(|contents| Self::parse(&contents))
        {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %config_path.display(), "ignoring settings file: {}", e);
                Settings::default()
            }
        }
    }

    pub fn parse(contents: &str) -> anyhow::Result<Settings> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    /// Dialog options with these settings' behavior flags applied
    pub fn dialog_options(&self, mode: Mode, content: impl Into<String>) -> DialogOptions {
        DialogOptions::new(mode, content)
            .esc_closes(self.esc_closes)
            .enter_confirms(self.enter_confirms)
            .animated(self.animated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DialogConfig;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::parse(r#"{ "animated": false }"#).unwrap();
        assert!(!settings.animated);
        assert!(settings.esc_closes);
        assert_eq!(settings.tick_rate_ms, 50);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(Settings::parse("{ not json").is_err());
        assert!(Settings::parse(r#"{ "tick_rate_ms": "fast" }"#).is_err());
    }

    #[test]
    fn test_tick_rate_never_zero() {
        let settings = Settings {
            tick_rate_ms: 0,
            ..Settings::default()
        };
        assert_eq!(settings.tick_rate(), Duration::from_millis(1));
    }

    #[test]
    fn test_dialog_options_carry_flags() {
        let settings = Settings {
            esc_closes: false,
            ..Settings::default()
        };
        let config =
            DialogConfig::from_options(settings.dialog_options(Mode::Confirm, "x")).unwrap();
        assert!(!config.esc_closes());
        assert!(config.enter_confirms());
        assert!(config.animated());
    }
}
