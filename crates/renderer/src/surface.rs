//! Host surface the chart is mounted into
//!
//! The surface owns a container element that receives the chart tree and a
//! text input holding the data URL.

use pollchart_config::SurfaceConfig;
use pollchart_shared::{ChartError, ChartResult};
use std::fmt::Write;

use crate::visual::{escape_text, Element};

/// Presentation for the class names used by the chart tree
pub const CHART_STYLE: &str = "\
.chartSvg { width: 656px; height: 400px; font-family: sans-serif; }
.colorBackground { fill: #f5f7fa; }
.text { font-size: 12px; fill: #4a5568; }
.rect { fill: transparent; }
.line { fill: none; stroke: #3182ce; stroke-width: 2; }
.lineHover { fill: #a0aec0; }
.circle { fill: #3182ce; }
.graphLabel { fill: #2d3748; width: 50px; height: 20px; rx: 3px; }
.labelText { fill: #ffffff; font-size: 12px; text-anchor: middle; }
";

pub trait Surface {
    /// Replace the container's content with `tree`; `None` empties it
    fn mount(&mut self, container_id: &str, tree: Option<&Element>) -> ChartResult<()>;

    /// Current text of the input element
    fn input_value(&self, input_id: &str) -> ChartResult<String>;
}

/// In-memory page with one container and one text input
#[derive(Debug, Clone, Default)]
pub struct Document {
    container_id: String,
    input_id: String,
    input_value: String,
    content: Option<Element>,
    mounts: usize,
}

impl Document {
    pub fn new(container_id: impl Into<String>, input_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            input_id: input_id.into(),
            ..Self::default()
        }
    }

    pub fn from_config(config: &SurfaceConfig) -> Self {
        Self::new(config.container_id.clone(), config.input_id.clone())
    }

    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.input_value = value.into();
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Tree currently mounted in the container
    pub fn content(&self) -> Option<&Element> {
        self.content.as_ref()
    }

    /// Number of mounts so far
    pub fn mount_count(&self) -> usize {
        self.mounts
    }

    /// Standalone HTML page of the current state
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>pollchart</title>\n<style>\n");
        html.push_str(CHART_STYLE);
        html.push_str("</style>\n</head>\n<body>\n");
        let _ = writeln!(
            html,
            "<input id=\"{}\" type=\"text\" value=\"{}\">",
            escape_text(&self.input_id),
            escape_text(&self.input_value)
        );
        let _ = writeln!(html, "<div id=\"{}\">", escape_text(&self.container_id));
        if let Some(content) = &self.content {
            html.push_str(&content.to_svg());
        }
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }
}

impl Surface for Document {
    fn mount(&mut self, container_id: &str, tree: Option<&Element>) -> ChartResult<()> {
        if container_id != self.container_id {
            return Err(ChartError::ElementNotFound {
                id: container_id.to_string(),
            });
        }
        self.content = tree.cloned();
        self.mounts += 1;
        Ok(())
    }

    fn input_value(&self, input_id: &str) -> ChartResult<String> {
        if input_id != self.input_id {
            return Err(ChartError::ElementNotFound {
                id: input_id.to_string(),
            });
        }
        Ok(self.input_value.clone())
    }
}
