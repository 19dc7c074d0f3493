use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const MIN_INITIAL_SECS: u32 = 10;
pub const MAX_INITIAL_SECS: u32 = 600;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_initial_secs")]
    pub initial_secs: u32,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_word_pack")]
    pub word_pack: String,
    #[serde(default)]
    pub muted: bool,
}

fn default_initial_secs() -> u32 {
    60
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_word_pack() -> String {
    "zh-ko".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_secs: default_initial_secs(),
            theme: default_theme(),
            word_pack: default_word_pack(),
            muted: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hanvoca")
            .join("config.toml")
    }

    /// Clamp values from hand-edited or stale config files into the
    /// supported ranges. Called after every load and CLI override.
    pub fn validate(&mut self) {
        self.initial_secs = self.initial_secs.clamp(MIN_INITIAL_SECS, MAX_INITIAL_SECS);
        if self.word_pack.trim().is_empty() {
            self.word_pack = default_word_pack();
        }
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.initial_secs, 60);
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.word_pack, "zh-ko");
        assert!(!config.muted);
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let config: Config = toml::from_str("initial_secs = 90\nmuted = true\n").unwrap();
        assert_eq!(config.initial_secs, 90);
        assert!(config.muted);
        assert_eq!(config.theme, "catppuccin-mocha");
    }

    #[test]
    fn serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.initial_secs, deserialized.initial_secs);
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.word_pack, deserialized.word_pack);
        assert_eq!(config.muted, deserialized.muted);
    }

    #[test]
    fn validate_clamps_round_length() {
        let mut config = Config::default();
        config.initial_secs = 1;
        config.validate();
        assert_eq!(config.initial_secs, MIN_INITIAL_SECS);

        config.initial_secs = 100_000;
        config.validate();
        assert_eq!(config.initial_secs, MAX_INITIAL_SECS);
    }

    #[test]
    fn validate_resets_blank_names() {
        let mut config = Config::default();
        config.word_pack = "  ".to_string();
        config.theme = String::new();
        config.validate();
        assert_eq!(config.word_pack, "zh-ko");
        assert_eq!(config.theme, "catppuccin-mocha");
    }
}
