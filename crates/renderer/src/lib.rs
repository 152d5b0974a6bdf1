//! Line chart renderer for pollchart
//!
//! Turns a [`Series`](pollchart_shared::Series) into a retained SVG tree:
//! auto-ranged axes, one hover hit-region per point and a floating value
//! label. The tree is mounted into a [`Surface`].

pub mod drawables;
pub mod line_graph;
pub mod scale;
pub mod surface;
pub mod visual;

pub use line_graph::LineGraph;
pub use scale::{compute_scale, format_tick, nice_tick_step, ChartCoord, PixelPoint, ScaleModel};
pub use surface::{Document, Surface};
pub use visual::{Element, Tag};
