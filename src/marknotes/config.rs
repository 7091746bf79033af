use crate::error::{NotesError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Browser local storage typically allows about 5 MiB per origin.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

pub const KEYS: &[&str] = &["editor", "quota-bytes"];

/// Configuration for marknotes, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesConfig {
    /// Editor command for note bodies; falls back to `$VISUAL` / `$EDITOR`
    #[serde(default)]
    pub editor: Option<String>,

    /// Total bytes the note and tag collections may occupy. Zero disables the limit.
    #[serde(default = "default_quota")]
    pub quota_bytes: u64,
}

fn default_quota() -> u64 {
    DEFAULT_QUOTA_BYTES
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            editor: None,
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl NotesConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotesError::Io)?;
        let config: NotesConfig =
            serde_json::from_str(&content).map_err(NotesError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotesError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotesError::Serialization)?;
        fs::write(config_path, content).map_err(NotesError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "editor" => Some(self.editor.clone().unwrap_or_default()),
            "quota-bytes" => Some(self.quota_bytes.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "editor" => {
                let value = value.trim();
                self.editor = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
                Ok(())
            }
            "quota-bytes" => {
                self.quota_bytes = value
                    .trim()
                    .parse()
                    .map_err(|_| format!("quota-bytes must be a whole number, got '{}'", value))?;
                Ok(())
            }
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}
