use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::algorithm::Algorithm;
use crate::error::{Result, SortError};

// Ranges offered by the settings panel.
pub const BAR_COUNT_RANGE: RangeInclusive<usize> = 4..=60;
pub const MIN_HEIGHT_RANGE: RangeInclusive<i32> = 1..=10;
pub const MAX_HEIGHT_RANGE: RangeInclusive<i32> = 11..=30;
pub const DELAY_MS_RANGE: RangeInclusive<u64> = 0..=2000;
pub const DELAY_MS_STEP: u64 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VisualizerConfig {
    pub algorithm: Algorithm,
    pub bar_count: usize,
    pub min_height: i32,
    pub max_height: i32,
    pub delay_ms: u64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bubble,
            bar_count: 10,
            min_height: 1,
            max_height: 20,
            delay_ms: 500,
        }
    }
}

impl VisualizerConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bar_count == 0 {
            return Err(SortError::InvalidConfiguration(
                "bar count must be greater than zero".to_string(),
            ));
        }
        if self.min_height > self.max_height {
            return Err(SortError::InvalidConfiguration(format!(
                "min height {} is greater than max height {}",
                self.min_height, self.max_height
            )));
        }
        Ok(())
    }
}

pub trait ConfigStore {
    fn load(&self) -> VisualizerConfig;
    fn save(&self, cfg: &VisualizerConfig) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "sortviz") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("sortviz_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing, unreadable, or invalid files fall back to the defaults.
    fn load(&self) -> VisualizerConfig {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<VisualizerConfig>(&bytes) {
                if cfg.validate().is_ok() {
                    return cfg;
                }
                tracing::warn!(path = %self.path.display(), "ignoring invalid stored config");
            }
        }
        VisualizerConfig::default()
    }

    fn save(&self, cfg: &VisualizerConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
