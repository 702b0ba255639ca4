use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Which workflow produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Art,
    Literature,
    Music,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Art => "Art",
            MediaKind::Literature => "Literature",
            MediaKind::Music => "Music",
        }
    }
}

/// One completed protection with metadata (no media bytes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtectionRecord {
    pub kind: MediaKind,
    /// Short human description, e.g. the source filename or a word count.
    pub detail: String,
    pub timestamp: String,
}

/// Persistent usage statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    pub art_protected: usize,
    pub literature_protected: usize,
    pub music_protected: usize,
    #[serde(default)]
    pub history: Vec<ProtectionRecord>,
}

impl Stats {
    /// Directory: ~/.local/share/mediaguard/
    fn dir() -> PathBuf {
        let mut p = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("mediaguard");
        p
    }

    fn path() -> PathBuf {
        Self::dir().join("stats.json")
    }

    /// Load from disk, returning defaults if missing.
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

    pub fn total(&self) -> usize {
        self.art_protected + self.literature_protected + self.music_protected
    }

    /// Record a completed protection.
    pub fn record(&mut self, kind: MediaKind, detail: &str) {
        match kind {
            MediaKind::Art => self.art_protected += 1,
            MediaKind::Literature => self.literature_protected += 1,
            MediaKind::Music => self.music_protected += 1,
        }
        self.history.push(ProtectionRecord {
            kind,
            detail: detail.to_string(),
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_bumps_the_right_counter() {
        let mut stats = Stats::default();
        stats.record(MediaKind::Art, "cat.png");
        stats.record(MediaKind::Art, "dog.png");
        stats.record(MediaKind::Music, "track.wav");
        assert_eq!(stats.art_protected, 2);
        assert_eq!(stats.music_protected, 1);
        assert_eq!(stats.literature_protected, 0);
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.history.len(), 3);
        assert_eq!(stats.history[2].detail, "track.wav");
    }
}
