use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub observer: ObserverConfig,
    #[serde(default)]
    pub daemon: DaemonConfig,
}

/// Progress observer cadences.  The video cadence is coarser because its
/// progress is advisory (host UI only) while the podcast cadence drives a
/// visible scrubber.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserverConfig {
    #[serde(default = "default_audio_tick_secs")]
    pub audio_tick_secs: f64,
    #[serde(default = "default_video_tick_secs")]
    pub video_tick_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Capacity of the outbound host-event channel.  Ticks that the host
    /// cannot drain in time queue here; overflow is the transport's problem.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
    /// Duration reported by the simulated engine in the stdio harness.
    #[serde(default = "default_sim_duration_secs")]
    pub sim_duration_secs: f64,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            audio_tick_secs: default_audio_tick_secs(),
            video_tick_secs: default_video_tick_secs(),
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            event_capacity: default_event_capacity(),
            sim_duration_secs: default_sim_duration_secs(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_audio_tick_secs() -> f64 {
    0.5
}

fn default_video_tick_secs() -> f64 {
    1.0
}

fn default_event_capacity() -> usize {
    64
}

fn default_sim_duration_secs() -> f64 {
    3600.0
}

fn default_log_dir() -> PathBuf {
    data_dir()
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mediabridge")
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mediabridge")
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }
}
