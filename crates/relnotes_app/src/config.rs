use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use relnotes_core::NOTIFICATION_CHANNEL;
use relnotes_engine::DEFAULT_FEED_URL;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "./relnotes.ron";

/// Settings read from `relnotes.ron`. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feed_url: String,
    /// Holds the persisted watermark.
    pub state_dir: PathBuf,
    pub poll_interval_secs: u64,
    pub viewport_rows: u16,
    pub wrap_width: u16,
    pub notification_channel: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            state_dir: PathBuf::from("./.relnotes"),
            poll_interval_secs: 24 * 60 * 60,
            viewport_rows: 24,
            wrap_width: 80,
            notification_channel: NOTIFICATION_CHANNEL.to_string(),
        }
    }
}

impl AppConfig {
    /// A missing or unreadable file yields the defaults.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Self::default();
            }
            Err(err) => {
                engine_warn!("Failed to read config from {:?}: {}", path, err);
                return Self::default();
            }
        };

        match ron::from_str(&content) {
            Ok(config) => {
                engine_info!("Loaded config from {:?}", path);
                config
            }
            Err(err) => {
                engine_warn!("Failed to parse config from {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
