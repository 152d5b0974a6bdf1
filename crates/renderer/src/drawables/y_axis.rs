//! Vertical axis tick labels

use super::Y_AXIS_ID;
use crate::scale::ScaleModel;
use crate::visual::{Element, Tag};

/// Gap between the tick label and the plot area
pub const LABEL_GAP: f64 = 10.0;

pub fn y_axis_group(scale: &ScaleModel) -> Element {
    let x = scale.layout.margins.left - LABEL_GAP;
    let labels = scale.ticks().into_iter().map(|tick| {
        Element::new(Tag::Text)
            .with_px("x", x)
            .with_px("y", scale.value_to_y(tick))
            .with_attr("class", "text")
            .with_attr("text-anchor", "end")
            .with_text(scale.tick_label(tick))
    });

    Element::new(Tag::G)
        .with_attr("id", Y_AXIS_ID)
        .with_children(labels)
}
