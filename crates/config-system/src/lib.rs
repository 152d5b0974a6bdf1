//! Configuration system for pollchart
//! Chart layout, polling, surface and mock server settings

use pollchart_shared::{ChartError, ChartResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod validation;

pub use validation::ConfigValidator;

/// Prefix of environment overrides, e.g. `POLLCHART__POLLER__SOURCE_URL`
pub const ENV_PREFIX: &str = "POLLCHART";

/// Space reserved around the plot area, in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            bottom: 30.0,
            left: 60.0,
            right: 50.0,
        }
    }
}

/// Fixed chart box; the plot area is the box minus the margins
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub box_width: f64,
    pub box_height: f64,
    pub margins: Margins,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            box_width: 656.0,
            box_height: 400.0,
            margins: Margins::default(),
        }
    }
}

impl ChartLayout {
    pub fn plot_width(&self) -> f64 {
        self.box_width - self.margins.left - self.margins.right
    }

    pub fn plot_height(&self) -> f64 {
        self.box_height - self.margins.top - self.margins.bottom
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    pub source_url: String,
    /// Period between poll ticks. The default is long enough to act as "fetch once".
    pub poll_interval_ms: u64,
    pub request_timeout_ms: Option<u64>,
    /// Drop responses that arrive after a newer request has already been applied
    pub discard_stale_responses: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            source_url: "http://localhost:3001".to_string(),
            poll_interval_ms: 1_000_000,
            request_timeout_ms: None,
            discard_stale_responses: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub container_id: String,
    pub input_id: String,
    /// Where the viewer writes the rendered page, if anywhere
    pub output_path: Option<PathBuf>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            container_id: "container".to_string(),
            input_id: "inp".to_string(),
            output_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub point_count: usize,
    pub max_value: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3001,
            point_count: 20,
            max_value: 1000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub layout: ChartLayout,
    pub poller: PollerConfig,
    pub surface: SurfaceConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load from a file (format picked from the extension) with environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(defaults_source()?)
            .add_source(config::File::from(path))
            .add_source(env_source())
            .build()
            .map_err(load_error)?;

        let config: AppConfig = settings.try_deserialize().map_err(load_error)?;
        ConfigValidator::validate(&config)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Defaults with environment overrides only
    pub fn from_env() -> ChartResult<Self> {
        let settings = config::Config::builder()
            .add_source(defaults_source()?)
            .add_source(env_source())
            .build()
            .map_err(load_error)?;

        let config: AppConfig = settings.try_deserialize().map_err(load_error)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml_str(toml: &str) -> ChartResult<Self> {
        let settings = config::Config::builder()
            .add_source(defaults_source()?)
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .map_err(load_error)?;

        let config: AppConfig = settings.try_deserialize().map_err(load_error)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

fn defaults_source() -> ChartResult<config::Config> {
    config::Config::try_from(&AppConfig::default()).map_err(load_error)
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn load_error(err: config::ConfigError) -> ChartError {
    ChartError::InvalidConfig {
        message: err.to_string(),
        field: None,
    }
}
