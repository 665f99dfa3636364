use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("animeta");

        Ok(Self {
            log_dir: base_dir.join("logs"),
            config_dir: base_dir,
        })
    }

    pub fn from_base(base: PathBuf) -> Self {
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("animeta.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // ANIMETA_CONFIG_DIR overrides platform paths (containers, tests)
        if let Ok(base) = std::env::var("ANIMETA_CONFIG_DIR") {
            return Self::from_base(PathBuf::from(base));
        }

        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".animeta")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_base() {
        let manager = PathManager::from_base(PathBuf::from("/tmp/animeta-test"));
        assert_eq!(manager.config_file(), PathBuf::from("/tmp/animeta-test/config.toml"));
        assert_eq!(manager.log_file(), PathBuf::from("/tmp/animeta-test/logs/animeta.log"));
    }
}
