//! Line chart component
//!
//! Owns the current series, its scale and the retained visual tree. Every
//! data change rebuilds the tree from scratch; hover only mutates the overlay.

use pollchart_config::ChartLayout;
use pollchart_shared::{
    ChartError, DataListener, DegenerateSeries, HoverState, PointerEvent, Series,
};

use crate::drawables::{plot, tooltip, x_axis, y_axis, SVG_ID};
use crate::scale::{compute_scale, ScaleModel};
use crate::visual::{Element, Tag, SVG_NAMESPACE};

pub struct LineGraph {
    layout: ChartLayout,
    series: Series,
    scale: Option<ScaleModel>,
    hover: HoverState,
    tree: Option<Element>,
}

impl LineGraph {
    pub fn new(layout: ChartLayout) -> Self {
        Self {
            layout,
            series: Series::default(),
            scale: None,
            hover: HoverState::Hidden,
            tree: None,
        }
    }

    /// Replace the series and rebuild the chart.
    ///
    /// A series that cannot be laid out clears the chart and reports why.
    /// The hover overlay is always reset to hidden.
    pub fn on_data_changed(&mut self, series: Series) -> Result<(), DegenerateSeries> {
        self.hover = HoverState::Hidden;

        let result = match compute_scale(&series, &self.layout) {
            Ok(scale) => {
                if let Some(fallback) = scale.fallback {
                    log::warn!("Laying out {} points with fallback: {fallback}", series.len());
                }
                self.tree = Some(build_tree(&series, &scale));
                self.scale = Some(scale);
                Ok(())
            }
            Err(reason) => {
                log::warn!("Nothing to draw for {} points: {reason}", series.len());
                self.tree = None;
                self.scale = None;
                Err(reason)
            }
        };

        self.series = series;
        result
    }

    /// Pointer entered the hit-region of point `index`. Unknown regions are
    /// ignored. Returns true if the hover state changed.
    pub fn on_hit_region_enter(&mut self, index: usize) -> bool {
        let (Some(scale), Some(tree)) = (&self.scale, &mut self.tree) else {
            return false;
        };
        let (Some(coord), Some(point)) = (scale.coord(index), self.series.get(index)) else {
            log::debug!("Ignoring hover on unknown region {index}");
            return false;
        };

        let y = coord.y.unwrap_or_else(|| scale.baseline_y());
        tooltip::show(tree, coord.x, y, &point.value.to_string());
        self.hover.enter(index)
    }

    /// Pointer left the chart. Returns true if the hover state changed.
    pub fn on_container_leave(&mut self) -> bool {
        if let Some(tree) = &mut self.tree {
            tooltip::hide(tree);
        }
        self.hover.leave()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Enter { region } => self.on_hit_region_enter(region),
            PointerEvent::Leave => self.on_container_leave(),
        }
    }

    pub fn hover_state(&self) -> HoverState {
        self.hover
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn scale(&self) -> Option<&ScaleModel> {
        self.scale.as_ref()
    }

    /// Root `svg` element, `None` while nothing can be drawn
    pub fn tree(&self) -> Option<&Element> {
        self.tree.as_ref()
    }

    pub fn to_svg(&self) -> Option<String> {
        self.tree.as_ref().map(Element::to_svg)
    }
}

impl DataListener for LineGraph {
    fn data_changed(&mut self, series: Series) -> Result<(), DegenerateSeries> {
        self.on_data_changed(series)
    }

    fn poll_failed(&mut self, error: &ChartError) {
        log::debug!("Keeping {} points on screen after failed poll: {error}", self.series.len());
    }
}

fn build_tree(series: &Series, scale: &ScaleModel) -> Element {
    let layout = &scale.layout;
    Element::new(Tag::Svg)
        .with_attr("xmlns", SVG_NAMESPACE)
        .with_attr("viewBox", format!("0 0 {} {}", layout.box_width, layout.box_height))
        .with_attr("class", "chartSvg")
        .with_attr("id", SVG_ID)
        .with_child(plot::background(scale))
        .with_child(x_axis::x_axis_group(series, scale))
        .with_child(y_axis::y_axis_group(scale))
        .with_child(plot::line(scale))
        .with_child(tooltip::guide_line(scale))
        .with_child(tooltip::hover_group())
}
