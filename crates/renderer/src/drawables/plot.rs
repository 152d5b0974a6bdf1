//! Background and data line

use super::LINE_ID;
use crate::scale::ScaleModel;
use crate::visual::{format_px, Element, Tag};

/// Shaded area behind the plot, extending half a step past the outer points
pub fn background(scale: &ScaleModel) -> Element {
    let first = scale.coords.first().map_or(scale.layout.margins.left, |c| c.x);
    let last = scale.coords.last().map_or(first, |c| c.x);

    Element::new(Tag::Rect)
        .with_px("x", first - scale.step_x / 2.0)
        .with_px("y", 0.0)
        .with_attr("class", "colorBackground")
        .with_px("width", last - first + scale.step_x)
        .with_px("height", scale.plot_height() + scale.margin_top())
}

/// Polyline through the numeric points; non-numeric points are skipped
pub fn line(scale: &ScaleModel) -> Element {
    let points = scale
        .polyline_points()
        .iter()
        .map(|p| format!("{},{}", format_px(p.x), format_px(p.y)))
        .collect::<Vec<_>>()
        .join(" ");

    Element::new(Tag::Polyline)
        .with_attr("id", LINE_ID)
        .with_attr("class", "line")
        .with_attr("points", points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::compute_scale;
    use pollchart_config::ChartLayout;
    use pollchart_shared::{DataPoint, Series};

    #[test]
    fn test_line_points() {
        let scale = compute_scale(&Series::from_values([0.0, 100.0]), &ChartLayout::default()).unwrap();
        assert_eq!(line(&scale).attr("points"), Some("60,370 606,20"));
    }

    #[test]
    fn test_line_skips_invalid_points() {
        let series = Series::new(vec![
            DataPoint::new("a", 0.0),
            DataPoint::new("b", "n/a"),
            DataPoint::new("c", 100.0),
        ]);
        let scale = compute_scale(&series, &ChartLayout::default()).unwrap();
        assert_eq!(line(&scale).attr("points"), Some("60,370 606,20"));
    }

    #[test]
    fn test_background_covers_hit_regions() {
        let scale = compute_scale(&Series::from_values([1.0, 2.0, 3.0]), &ChartLayout::default()).unwrap();
        let bg = background(&scale);
        assert_eq!(bg.attr("x"), Some("-76.5"));
        assert_eq!(bg.attr("width"), Some("819"));
        assert_eq!(bg.attr("height"), Some("370"));

        let single = compute_scale(&Series::from_values([7.0]), &ChartLayout::default()).unwrap();
        let bg = background(&single);
        assert_eq!(bg.attr("x"), Some("60"));
        assert_eq!(bg.attr("width"), Some("546"));
    }
}
