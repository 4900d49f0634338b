use std::path::PathBuf;

use anyhow::{Context, Result};

/// Where the loop keeps its state. One profile file, one shadow-send
/// file, all JSON under a single data directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mystic")
                .join("loop")
        });

        std::fs::create_dir_all(&data_dir)
            .context("Failed to create data directory")?;

        Ok(Config { data_dir })
    }

    pub fn profile_file(&self) -> PathBuf {
        self.data_dir.join("profile.json")
    }

    pub fn shadows_file(&self) -> PathBuf {
        self.data_dir.join("shadows.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(config.profile_file(), dir.path().join("profile.json"));
        assert_eq!(config.shadows_file(), dir.path().join("shadows.json"));
    }
}
