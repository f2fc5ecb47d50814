use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::editor::{Markers, TextBuffer, DEFAULT_HISTORY_LIMIT};

/// User settings, read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub highlight_open: String,
    pub highlight_close: String,
    /// Maximum undo depth. 0 keeps every edit.
    pub history_limit: usize,
    /// Lines the document starts with.
    pub seed_lines: Vec<String>,
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highlight_open: String::from("["),
            highlight_close: String::from("]"),
            history_limit: DEFAULT_HISTORY_LIMIT,
            seed_lines: vec![
                String::from("Hidup itu seperti kopi, "),
                String::from("terkadang pahit, "),
                String::from("terkadang manis, "),
                String::from("tapi selalu bisa dinikmati jika kita tahu caranya."),
            ],
            prompt: String::from("> "),
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("linebuf")
            .join("config.toml")
    }

    /// Loads `path`, or the default location when `None`. A missing file
    /// yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn markers(&self) -> Markers {
        Markers::new(self.highlight_open.clone(), self.highlight_close.clone())
    }

    pub fn build_buffer(&self) -> TextBuffer {
        TextBuffer::from_lines(self.seed_lines.iter().cloned())
            .with_markers(self.markers())
            .with_history_limit(self.history_limit)
    }
}
