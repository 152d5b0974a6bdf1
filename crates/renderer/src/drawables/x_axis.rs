//! Horizontal axis: one label and one hit-region per data point

use pollchart_shared::{DataPoint, Series};

use super::X_AXIS_ID;
use crate::scale::{ChartCoord, ScaleModel};
use crate::visual::{Element, Tag};

/// Distance from the top of the plot area to the label baseline
pub const LABEL_OFFSET: f64 = 40.0;

pub fn x_axis_group(series: &Series, scale: &ScaleModel) -> Element {
    let columns = series
        .iter()
        .zip(&scale.coords)
        .enumerate()
        .map(|(index, (point, coord))| point_column(index, point, coord, scale));

    Element::new(Tag::G)
        .with_attr("id", X_AXIS_ID)
        .with_children(columns)
}

fn point_column(index: usize, point: &DataPoint, coord: &ChartCoord, scale: &ScaleModel) -> Element {
    let label = Element::new(Tag::Text)
        .with_px("x", coord.x)
        .with_px("y", scale.plot_height() + LABEL_OFFSET)
        .with_attr("class", "text")
        .with_text(point.x.as_str());

    // Full plot height, one step wide, centered on the point
    let hit_region = Element::new(Tag::Rect)
        .with_px("x", coord.x - scale.step_x / 2.0)
        .with_px("y", scale.margin_top())
        .with_attr("class", "rect")
        .with_px("width", scale.step_x)
        .with_px("height", scale.plot_height())
        .with_attr("data-index", index);

    Element::new(Tag::G).with_child(label).with_child(hit_region)
}
