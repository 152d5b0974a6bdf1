//! Integration tests for the line chart renderer

use pollchart_config::{ChartLayout, SurfaceConfig};
use pollchart_renderer::{Document, Element, LineGraph, Surface, Tag};
use pollchart_shared::{DataPoint, DegenerateSeries, HoverState, PointerEvent, Series, SeriesPayload};

fn payload(json: &str) -> Series {
    serde_json::from_str::<SeriesPayload>(json).unwrap().data
}

#[test]
fn test_two_point_chart() {
    let mut graph = LineGraph::new(ChartLayout::default());
    graph
        .on_data_changed(payload(
            r#"{"data":[{"x":"0","value":0},{"x":"1","value":100}]}"#,
        ))
        .unwrap();

    let scale = graph.scale().unwrap();
    assert_eq!(scale.step_x, 546.0);
    assert_eq!(scale.step_y, 10.0);

    let tree = graph.tree().unwrap();
    let y_labels = tree.find_by_id("yAxis").unwrap().children().len();
    assert_eq!(y_labels, 11);
    assert_eq!(tree.find_all(Tag::Polyline).len(), 1);
    assert_eq!(tree.hit_regions().len(), 2);
}

#[test]
fn test_hover_round_trip_through_pointer_events() {
    let mut graph = LineGraph::new(ChartLayout::default());
    graph
        .on_data_changed(Series::new(vec![
            DataPoint::new("Mon", 12.5),
            DataPoint::new("Tue", 40.0),
            DataPoint::new("Wed", 33.0),
        ]))
        .unwrap();

    assert!(graph.handle_pointer(PointerEvent::Enter { region: 2 }));
    assert!(!graph.handle_pointer(PointerEvent::Enter { region: 2 }));
    assert_eq!(graph.hover_state(), HoverState::Shown(2));

    let svg = graph.to_svg().unwrap();
    assert!(svg.contains(">33</text>"));
    assert!(svg.contains(">Wed</text>"));

    assert!(graph.handle_pointer(PointerEvent::Leave));
    assert_eq!(graph.hover_state(), HoverState::Hidden);
}

#[test]
fn test_mount_into_document() {
    let config = SurfaceConfig::default();
    let mut doc = Document::from_config(&config);
    let mut graph = LineGraph::new(ChartLayout::default());

    graph.on_data_changed(Series::from_values([1.0, 5.0, 3.0])).unwrap();
    doc.mount(&config.container_id, graph.tree()).unwrap();
    let content: &Element = doc.content().unwrap();
    assert_eq!(content.id(), Some("svg"));
    assert!(doc.to_html().contains("class=\"chartSvg\""));

    // An empty response clears the container
    let _ = graph.on_data_changed(Series::default());
    doc.mount(&config.container_id, graph.tree()).unwrap();
    assert!(doc.content().is_none());
}

#[test]
fn test_custom_layout() {
    let layout = ChartLayout {
        box_width: 300.0,
        box_height: 200.0,
        ..ChartLayout::default()
    };
    let mut graph = LineGraph::new(layout);
    graph.on_data_changed(Series::from_values([2.0, 4.0, 8.0])).unwrap();

    let tree = graph.tree().unwrap();
    assert_eq!(tree.attr("viewBox"), Some("0 0 300 200"));
    let scale = graph.scale().unwrap();
    assert_eq!(scale.plot_width(), 190.0);
    assert_eq!(scale.coords[2].x, 250.0);
}

#[test]
fn test_scale_serializes() {
    let mut graph = LineGraph::new(ChartLayout::default());
    graph.on_data_changed(Series::from_values([7.0])).unwrap();

    let json = serde_json::to_value(graph.scale().unwrap()).unwrap();
    assert_eq!(json["fallback"], "SinglePoint");
    assert_eq!(json["coords"][0]["x"], 333.0);
}

#[test]
fn test_extreme_payload_renders_nothing() {
    let mut graph = LineGraph::new(ChartLayout::default());
    let result = graph.on_data_changed(payload(
        r#"{"data":[{"x":"0","value":-1e308},{"x":"1","value":1e308}]}"#,
    ));

    assert_eq!(result, Err(DegenerateSeries::Unrepresentable));
    assert!(graph.tree().is_none());
    assert!(graph.to_svg().is_none());
}

#[test]
fn test_tiny_spread_never_labels_nan() {
    let mut graph = LineGraph::new(ChartLayout::default());
    let result = graph.on_data_changed(payload(
        r#"{"data":[{"x":"0","value":0},{"x":"1","value":1e-310}]}"#,
    ));

    match result {
        Ok(()) => assert!(!graph.to_svg().unwrap().contains("NaN")),
        Err(reason) => assert_eq!(reason, DegenerateSeries::Unrepresentable),
    }
}
