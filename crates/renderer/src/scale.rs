//! Axis bounds, tick step and pixel coordinates for one render pass
//!
//! The vertical axis is auto-ranged: the tick step is a round number scaled to
//! the order of magnitude of the data spread, and the axis is snapped outwards
//! to whole ticks.

use pollchart_config::ChartLayout;
use pollchart_shared::{DegenerateSeries, Series};
use serde::Serialize;

/// Absorbs representation error before flooring, e.g. 2.9999999999999996
const FLOOR_EPSILON: f64 = 1e-9;

/// Upper bound on vertical axis labels
pub const MAX_TICKS: usize = 1000;

/// Most decimals a tick label is printed with
pub const MAX_TICK_DECIMALS: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Pixel position of one data point; `y` is `None` for non-numeric values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartCoord {
    pub x: f64,
    pub y: Option<f64>,
}

/// Geometry derived from one series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleModel {
    pub layout: ChartLayout,
    pub y_min: f64,
    pub y_max: f64,
    pub step_x: f64,
    pub step_y: f64,
    pub min_val: f64,
    pub max_val: f64,
    pub range: f64,
    /// Aligned by index with the series
    pub coords: Vec<ChartCoord>,
    /// Set when the series needed fallback geometry
    pub fallback: Option<DegenerateSeries>,
}

impl ScaleModel {
    pub fn plot_width(&self) -> f64 {
        self.layout.plot_width()
    }

    pub fn plot_height(&self) -> f64 {
        self.layout.plot_height()
    }

    pub fn margin_top(&self) -> f64 {
        self.layout.margins.top
    }

    /// Bottom edge of the plot area
    pub fn baseline_y(&self) -> f64 {
        self.layout.margins.top + self.plot_height()
    }

    /// Higher values map to smaller y, SVG y grows downward
    pub fn value_to_y(&self, value: f64) -> f64 {
        let plot_height = self.plot_height();
        plot_height - (value - self.min_val) * plot_height / self.range + self.layout.margins.top
    }

    pub fn coord(&self, index: usize) -> Option<ChartCoord> {
        self.coords.get(index).copied()
    }

    /// Tick values from `min_val` to `max_val` inclusive, at most [`MAX_TICKS`] + 1
    pub fn ticks(&self) -> Vec<f64> {
        let count = (self.range / self.step_y).round().clamp(0.0, MAX_TICKS as f64) as usize;
        (0..=count)
            .map(|k| self.min_val + k as f64 * self.step_y)
            .collect()
    }

    pub fn tick_label(&self, value: f64) -> String {
        format_tick(value, self.step_y)
    }

    /// Coordinates of the numeric points, in series order
    pub fn polyline_points(&self) -> Vec<PixelPoint> {
        self.coords
            .iter()
            .filter_map(|c| c.y.map(|y| PixelPoint { x: c.x, y }))
            .collect()
    }
}

/// Compute the geometry of `series` inside `layout`.
///
/// Empty series and series without a single numeric value cannot be laid
/// out, nor can values whose spread or pixel scale does not fit in an `f64`
/// ([`DegenerateSeries::Unrepresentable`]). A single point is centered
/// horizontally and a constant series gets a tick step derived from the
/// magnitude of its value; both are flagged in [`ScaleModel::fallback`].
pub fn compute_scale(
    series: &Series,
    layout: &ChartLayout,
) -> Result<ScaleModel, DegenerateSeries> {
    if series.is_empty() {
        return Err(DegenerateSeries::Empty);
    }
    let (y_min, y_max) = series
        .value_bounds()
        .ok_or(DegenerateSeries::NoNumericValues)?;

    if !(y_max - y_min).is_finite() {
        return Err(DegenerateSeries::Unrepresentable);
    }

    let count = series.len();
    let plot_width = layout.plot_width();
    let plot_height = layout.plot_height();
    let mut fallback = None;

    let step_x = if count > 1 {
        plot_width / (count - 1) as f64
    } else {
        fallback = Some(DegenerateSeries::SinglePoint);
        plot_width
    };

    let step_y = match nice_tick_step(y_max - y_min) {
        Some(step) => step,
        None => {
            fallback.get_or_insert(DegenerateSeries::ZeroVariance);
            magnitude_step(y_max)
        }
    };

    let mut max_val = (y_max / step_y).ceil() * step_y;
    let mut min_val = (y_min / step_y).floor() * step_y;
    if max_val - min_val <= 0.0 {
        // Constant series sitting exactly on a tick
        min_val -= step_y;
        max_val += step_y;
    }
    let range = max_val - min_val;
    let pixels_per_unit = plot_height / range;
    if !(step_y.is_finite() && step_y > 0.0 && range.is_finite() && pixels_per_unit.is_finite()) {
        return Err(DegenerateSeries::Unrepresentable);
    }

    let coords: Vec<ChartCoord> = series
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = if count > 1 {
                i as f64 * step_x + layout.margins.left
            } else {
                layout.margins.left + plot_width / 2.0
            };
            let y = point
                .value
                .as_f64()
                .map(|v| plot_height - (v - min_val) * pixels_per_unit + layout.margins.top);
            ChartCoord { x, y }
        })
        .collect();
    if coords.iter().any(|c| c.y.is_some_and(|y| !y.is_finite())) {
        return Err(DegenerateSeries::Unrepresentable);
    }

    Ok(ScaleModel {
        layout: *layout,
        y_min,
        y_max,
        step_x,
        step_y,
        min_val,
        max_val,
        range,
        coords,
        fallback,
    })
}

/// Round tick interval for a data spread.
///
/// `digits = ceil(log10(spread))`, step = `floor(spread / 10^(digits-1)) * 10^(digits-2)`,
/// which gives roughly ten ticks across the spread. `None` for a spread that
/// is zero, negative or not finite.
pub fn nice_tick_step(spread: f64) -> Option<f64> {
    if !spread.is_finite() || spread <= 0.0 {
        return None;
    }

    let digits = spread.log10().ceil() as i32;
    let leading = (spread / 10f64.powi(digits - 1) + FLOOR_EPSILON).floor();
    let step = leading * 10f64.powi(digits - 2);

    (step.is_finite() && step > 0.0).then_some(step)
}

/// Tick step for a constant series: one tenth of the value's order of magnitude
fn magnitude_step(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return 1.0;
    }
    10f64.powi(value.abs().log10().floor() as i32 - 1)
}

/// Format a tick value with as many decimals as the step needs
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        ((-step.log10() - FLOOR_EPSILON).ceil().max(0.0) as usize).min(MAX_TICK_DECIMALS)
    } else {
        0
    };
    let text = format!("{value:.decimals$}");
    // Values that round to zero print without a sign
    match text.strip_prefix('-') {
        Some(unsigned) if unsigned.bytes().all(|b| b == b'0' || b == b'.') => unsigned.to_string(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollchart_shared::DataPoint;

    fn layout() -> ChartLayout {
        ChartLayout::default()
    }

    #[test]
    fn test_two_point_scenario() {
        let series = Series::from_values([0.0, 100.0]);
        let scale = compute_scale(&series, &layout()).unwrap();

        assert_eq!(scale.y_min, 0.0);
        assert_eq!(scale.y_max, 100.0);
        assert_eq!(scale.step_x, 546.0);
        assert_eq!(scale.step_y, 10.0);
        assert_eq!(scale.min_val, 0.0);
        assert_eq!(scale.max_val, 100.0);
        assert_eq!(scale.range, 100.0);
        assert_eq!(
            scale.coords,
            vec![
                ChartCoord { x: 60.0, y: Some(370.0) },
                ChartCoord { x: 606.0, y: Some(20.0) },
            ]
        );
        assert_eq!(scale.polyline_points().len(), 2);
        assert_eq!(scale.fallback, None);
    }

    #[test]
    fn test_nice_tick_steps() {
        assert_eq!(nice_tick_step(100.0), Some(10.0));
        assert_eq!(nice_tick_step(1000.0), Some(100.0));
        assert_eq!(nice_tick_step(987.0), Some(90.0));
        assert_eq!(nice_tick_step(155.0), Some(10.0));
        assert_eq!(nice_tick_step(0.0), None);
        assert_eq!(nice_tick_step(-3.0), None);
        assert_eq!(nice_tick_step(f64::NAN), None);

        let small = nice_tick_step(0.5).unwrap();
        assert!((small - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_contain_data() {
        let cases: [&[f64]; 5] = [
            &[3.0, 17.0, 9.0],
            &[-35.0, 120.0, 4.0],
            &[0.001, 0.0042, 0.003],
            &[987.0, 12.0, 450.0, 999.0],
            &[-5.5, -1.25],
        ];
        for values in cases {
            let series = Series::from_values(values.iter().copied());
            let scale = compute_scale(&series, &layout()).unwrap();
            assert!(scale.min_val <= scale.y_min, "{values:?}");
            assert!(scale.max_val >= scale.y_max, "{values:?}");
            assert!(scale.range > 0.0);
        }
    }

    #[test]
    fn test_higher_values_are_higher_on_screen() {
        let series = Series::from_values([5.0, 40.0, 12.0, 87.0, 60.0]);
        let scale = compute_scale(&series, &layout()).unwrap();

        let mut pairs: Vec<(f64, f64)> = series
            .numeric_values()
            .zip(scale.coords.iter().map(|c| c.y.unwrap()))
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        for window in pairs.windows(2) {
            assert!(window[1].1 < window[0].1);
        }
    }

    #[test]
    fn test_x_strictly_increasing() {
        let series = Series::from_values([1.0, 1.0, 2.0, 3.0, 5.0, 8.0]);
        let scale = compute_scale(&series, &layout()).unwrap();
        for window in scale.coords.windows(2) {
            assert!(window[1].x > window[0].x);
            assert!((window[1].x - window[0].x - scale.step_x).abs() < 1e-9);
        }
        assert_eq!(scale.coords.last().unwrap().x, 606.0);
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(
            compute_scale(&Series::default(), &layout()),
            Err(DegenerateSeries::Empty)
        );
    }

    #[test]
    fn test_all_non_numeric() {
        let series = Series::new(vec![DataPoint::new("a", "x"), DataPoint::new("b", "y")]);
        assert_eq!(
            compute_scale(&series, &layout()),
            Err(DegenerateSeries::NoNumericValues)
        );
    }

    #[test]
    fn test_single_point_is_centered() {
        let series = Series::from_values([42.0]);
        let scale = compute_scale(&series, &layout()).unwrap();

        assert_eq!(scale.fallback, Some(DegenerateSeries::SinglePoint));
        assert_eq!(scale.step_x, 546.0);
        assert_eq!(scale.coords[0].x, 333.0);
        let y = scale.coords[0].y.unwrap();
        assert!(y.is_finite());
        assert!(y > 20.0 && y < 370.0);
    }

    #[test]
    fn test_constant_series() {
        let series = Series::from_values([500.0, 500.0, 500.0]);
        let scale = compute_scale(&series, &layout()).unwrap();

        assert_eq!(scale.fallback, Some(DegenerateSeries::ZeroVariance));
        assert_eq!(scale.step_y, 10.0);
        assert_eq!(scale.min_val, 490.0);
        assert_eq!(scale.max_val, 510.0);
        for coord in &scale.coords {
            assert_eq!(coord.y, Some(195.0));
        }
    }

    #[test]
    fn test_constant_zero_series() {
        let series = Series::from_values([0.0, 0.0]);
        let scale = compute_scale(&series, &layout()).unwrap();
        assert_eq!(scale.step_y, 1.0);
        assert_eq!(scale.min_val, -1.0);
        assert_eq!(scale.max_val, 1.0);
        assert_eq!(scale.coords[0].y, Some(195.0));
    }

    #[test]
    fn test_non_numeric_points_keep_their_slot() {
        let series = Series::new(vec![
            DataPoint::new("0", 10.0),
            DataPoint::new("1", "missing"),
            DataPoint::new("2", 30.0),
        ]);
        let scale = compute_scale(&series, &layout()).unwrap();

        assert_eq!(scale.y_min, 10.0);
        assert_eq!(scale.y_max, 30.0);
        assert_eq!(scale.coords.len(), 3);
        assert_eq!(scale.coords[1].x, 333.0);
        assert_eq!(scale.coords[1].y, None);
        assert_eq!(scale.polyline_points().len(), 2);
    }

    #[test]
    fn test_ticks_and_labels() {
        let scale = compute_scale(&Series::from_values([0.0, 100.0]), &layout()).unwrap();
        let labels: Vec<String> = scale.ticks().iter().map(|t| scale.tick_label(*t)).collect();
        assert_eq!(
            labels,
            vec!["0", "10", "20", "30", "40", "50", "60", "70", "80", "90", "100"]
        );

        let scale = compute_scale(&Series::from_values([0.0, 0.5]), &layout()).unwrap();
        let labels: Vec<String> = scale.ticks().iter().map(|t| scale.tick_label(*t)).collect();
        assert_eq!(labels.len(), 11);
        assert_eq!(labels[1], "0.05");
        assert_eq!(labels[10], "0.50");
    }

    #[test]
    fn test_negative_range() {
        let scale = compute_scale(&Series::from_values([-35.0, 120.0]), &layout()).unwrap();
        assert_eq!(scale.step_y, 10.0);
        assert_eq!(scale.min_val, -40.0);
        assert_eq!(scale.max_val, 120.0);
        assert_eq!(scale.ticks().len(), 17);
        assert_eq!(scale.tick_label(-40.0), "-40");
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(-0.0, 10.0), "0");
        assert_eq!(format_tick(-0.01, 0.1), "0.0");
        assert_eq!(format_tick(-0.2, 0.1), "-0.2");
        assert_eq!(format_tick(0.30000000000000004, 0.1), "0.3");
        assert_eq!(format_tick(250.0, 90.0), "250");
    }

    #[test]
    fn test_format_tick_tiny_step() {
        let label = format_tick(0.0, 1e-311);
        assert_eq!(label, format!("0.{}", "0".repeat(MAX_TICK_DECIMALS)));
        assert_ne!(format_tick(1e-311, 1e-311), "NaN");
    }

    #[test]
    fn test_overflowing_spread_is_rejected() {
        let series = Series::from_values([-1e308, 1e308]);
        assert_eq!(
            compute_scale(&series, &layout()),
            Err(DegenerateSeries::Unrepresentable)
        );
    }

    #[test]
    fn test_subnormal_spread_is_rejected() {
        let series = Series::from_values([0.0, 1e-310]);
        assert_eq!(
            compute_scale(&series, &layout()),
            Err(DegenerateSeries::Unrepresentable)
        );
    }

    #[test]
    fn test_huge_values_with_small_spread() {
        let series = Series::from_values([1e300, 2e300]);
        let scale = compute_scale(&series, &layout()).unwrap();
        assert!(scale.range.is_finite());
        assert!(scale.coords.iter().all(|c| c.y.unwrap().is_finite()));
        assert!(scale.ticks().len() <= MAX_TICKS + 1);
    }

    #[test]
    fn test_tick_count_is_capped() {
        let mut scale = compute_scale(&Series::from_values([0.0, 100.0]), &layout()).unwrap();
        scale.step_y = 1e-6;
        assert_eq!(scale.ticks().len(), MAX_TICKS + 1);
    }
}
