//! Builders for the parts of the chart tree
//!
//! Each builder is a pure function of the series and its [`ScaleModel`](crate::ScaleModel).

pub mod plot;
pub mod tooltip;
pub mod x_axis;
pub mod y_axis;

pub const SVG_ID: &str = "svg";
pub const X_AXIS_ID: &str = "xAxis";
pub const Y_AXIS_ID: &str = "yAxis";
pub const LINE_ID: &str = "line";
pub const GUIDE_LINE_ID: &str = "lineHover";
pub const HOVER_ID: &str = "hover";
pub const HOVER_LABEL_ID: &str = "hoverLabel";
