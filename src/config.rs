use crate::grid::MAX_GRID_SIZE;
use crate::search::Strategy;
use serde::Deserialize;
use std::fs;
use tracing::{info, warn};

pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    /// Cells per side
    #[serde(default = "default_size")]
    pub size: i32,
    /// Window width and height in pixels
    #[serde(default = "default_window_size")]
    pub window_size: f32,
}

#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub default_strategy: Strategy,
    /// Expansions animated per rendered frame
    #[serde(default = "default_steps_per_frame")]
    pub steps_per_frame: usize,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_show_grid_lines")]
    pub show_grid_lines: bool,
}

#[derive(Debug, Deserialize)]
pub struct PersistenceConfig {
    #[serde(default = "default_save_path")]
    pub save_path: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default values
fn default_size() -> i32 { 50 }
fn default_window_size() -> f32 { 800.0 }
fn default_steps_per_frame() -> usize { 1 }
fn default_window_title() -> String { "Path Finding Algorithm".to_string() }
fn default_show_grid_lines() -> bool { true }
fn default_save_path() -> String { "grid_layout.json".to_string() }
fn default_log_filter() -> String { "info".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            window_size: default_window_size(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_strategy: Strategy::default(),
            steps_per_frame: default_steps_per_frame(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            show_grid_lines: default_show_grid_lines(),
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl GridConfig {
    /// Configured size clamped to `1..=MAX_GRID_SIZE`
    pub fn cells_per_side(&self) -> i32 {
        self.size.clamp(1, MAX_GRID_SIZE)
    }

    /// Pixel size of one cell, as the window width divided evenly by the cell count
    pub fn cell_size(&self) -> f32 {
        (self.window_size / self.cells_per_side() as f32).floor()
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!(path, "loaded configuration");
                    if config.grid.cells_per_side() != config.grid.size {
                        warn!(
                            size = config.grid.size,
                            used = config.grid.cells_per_side(),
                            "grid size out of range"
                        );
                    }
                    config
                }
                Err(e) => {
                    warn!(path, error = %e, "failed to parse configuration, using defaults");
                    Config::default()
                }
            },
            Err(_) => {
                info!(path, "no configuration file found, using defaults");
                Config::default()
            }
        }
    }
}
