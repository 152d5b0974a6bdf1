//! Hover overlay: a vertical guide line plus a marker with a value label.
//! Both start hidden and are moved rather than rebuilt on hover.

use super::{GUIDE_LINE_ID, HOVER_ID, HOVER_LABEL_ID};
use crate::scale::ScaleModel;
use crate::visual::{format_px, Element, Tag};

pub const MARKER_RADIUS: f64 = 5.0;

pub fn guide_line(scale: &ScaleModel) -> Element {
    Element::new(Tag::Rect)
        .with_attr("id", GUIDE_LINE_ID)
        .with_attr("class", "lineHover")
        .with_px("x", 0.0)
        .with_px("y", scale.margin_top())
        .with_px("width", 1.0)
        .with_px("height", scale.plot_height())
        .with_attr("visibility", "hidden")
}

pub fn hover_group() -> Element {
    let marker = Element::new(Tag::Circle)
        .with_px("cx", 0.0)
        .with_px("cy", 0.0)
        .with_px("r", MARKER_RADIUS)
        .with_attr("class", "circle");
    let label_box = Element::new(Tag::Rect)
        .with_px("x", 5.0)
        .with_px("y", 10.0)
        .with_attr("class", "graphLabel");
    let label = Element::new(Tag::Text)
        .with_px("x", 30.0)
        .with_px("y", 20.0)
        .with_attr("class", "labelText")
        .with_attr("id", HOVER_LABEL_ID)
        .with_text("");

    Element::new(Tag::G)
        .with_attr("id", HOVER_ID)
        .with_attr("visibility", "hidden")
        .with_child(marker)
        .with_child(label_box)
        .with_child(label)
}

/// Move the overlay to `(x, y)` and show `label`
pub fn show(root: &mut Element, x: f64, y: f64, label: &str) {
    if let Some(guide) = root.find_by_id_mut(GUIDE_LINE_ID) {
        guide.set_px("x", x);
        guide.set_visible(true);
    }
    if let Some(group) = root.find_by_id_mut(HOVER_ID) {
        group.set_attr("transform", format!("translate({}, {})", format_px(x), format_px(y)));
        group.set_visible(true);
    }
    if let Some(text) = root.find_by_id_mut(HOVER_LABEL_ID) {
        text.set_text(label);
    }
}

pub fn hide(root: &mut Element) {
    for id in [GUIDE_LINE_ID, HOVER_ID] {
        if let Some(el) = root.find_by_id_mut(id) {
            el.set_visible(false);
        }
    }
}
