use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::chart::scatter::ScatterMetric;
use crate::core::data_source::DataLocation;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub chart: ChartConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Dataset document location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Relative path or http(s) URL of the portfolio document.
    pub source: String,
}

/// Dot resolution used for chart surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMarker {
    #[default]
    Braille,
    HalfBlock,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub marker: ChartMarker,
    /// Initial vertical axis of the bubble chart.
    pub scatter_metric: ScatterMetric,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            mouse_enabled: true,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: "data.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/peer-observatory/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &std::path::Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {} — using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    pub fn data_location(&self) -> DataLocation {
        DataLocation::parse(&self.data.source)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("peer-observatory").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
