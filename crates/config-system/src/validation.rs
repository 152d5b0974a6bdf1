//! Configuration validation utilities

use crate::{AppConfig, ChartLayout, PollerConfig, ServerConfig, SurfaceConfig};
use pollchart_shared::{ChartError, ChartResult};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &AppConfig) -> ChartResult<()> {
        Self::validate_layout(&config.layout)?;
        Self::validate_poller(&config.poller)?;
        Self::validate_surface(&config.surface)?;
        Self::validate_server(&config.server)?;
        Ok(())
    }

    pub fn validate_layout(layout: &ChartLayout) -> ChartResult<()> {
        let margins = [
            ("layout.margins.top", layout.margins.top),
            ("layout.margins.bottom", layout.margins.bottom),
            ("layout.margins.left", layout.margins.left),
            ("layout.margins.right", layout.margins.right),
        ];
        for (field, value) in margins {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::invalid_config(
                    field,
                    format!("Invalid margin: {value}. Must be a non-negative number"),
                ));
            }
        }

        if !(layout.plot_width() > 0.0) {
            return Err(ChartError::invalid_config(
                "layout.box_width",
                format!(
                    "Plot width is {} after margins. Box must be wider than left + right margins",
                    layout.plot_width()
                ),
            ));
        }

        if !(layout.plot_height() > 0.0) {
            return Err(ChartError::invalid_config(
                "layout.box_height",
                format!(
                    "Plot height is {} after margins. Box must be taller than top + bottom margins",
                    layout.plot_height()
                ),
            ));
        }

        Ok(())
    }

    pub fn validate_poller(poller: &PollerConfig) -> ChartResult<()> {
        if poller.source_url.trim().is_empty() {
            return Err(ChartError::invalid_config(
                "poller.source_url",
                "Source URL must not be empty",
            ));
        }

        if poller.poll_interval_ms == 0 {
            return Err(ChartError::invalid_config(
                "poller.poll_interval_ms",
                "Poll interval must be at least 1ms",
            ));
        }

        if poller.request_timeout_ms == Some(0) {
            return Err(ChartError::invalid_config(
                "poller.request_timeout_ms",
                "Request timeout must be at least 1ms when set",
            ));
        }

        Ok(())
    }

    pub fn validate_surface(surface: &SurfaceConfig) -> ChartResult<()> {
        if surface.container_id.is_empty() {
            return Err(ChartError::invalid_config(
                "surface.container_id",
                "Container id must not be empty",
            ));
        }

        if surface.input_id.is_empty() {
            return Err(ChartError::invalid_config(
                "surface.input_id",
                "Input id must not be empty",
            ));
        }

        if surface.container_id == surface.input_id {
            return Err(ChartError::invalid_config(
                "surface.input_id",
                "Input id must differ from the container id",
            ));
        }

        Ok(())
    }

    pub fn validate_server(server: &ServerConfig) -> ChartResult<()> {
        if server.point_count == 0 {
            return Err(ChartError::invalid_config(
                "server.point_count",
                "Mock server must generate at least one point",
            ));
        }

        Ok(())
    }
}
