use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_server_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_true() -> bool {
    true
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the protection server; relative resource paths in
    /// responses are resolved against it.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// When false the music screen is not built and the workflow is not
    /// wired at all.
    #[serde(default = "default_true")]
    pub music_enabled: bool,
    /// When true the literature screen gets a debug expander showing the
    /// server's marker annotation.
    #[serde(default)]
    pub show_literature_debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            music_enabled: true,
            show_literature_debug: false,
        }
    }
}

impl Config {
    /// Directory: ~/.config/mediaguard/
    fn dir() -> PathBuf {
        let mut p = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("mediaguard");
        p
    }

    fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load from disk, returning defaults if file doesn't exist or is invalid.
    pub fn load() -> Self {
        let path = Self::path();
        match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let dir = Self::dir();
        fs::create_dir_all(&dir)?;
        let data = serde_json::to_string_pretty(self)?;
        fs::write(Self::path(), data)?;
        Ok(())
    }
}
