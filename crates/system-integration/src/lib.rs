//! Chart application wiring
//!
//! Connects the data poller, the line graph and the host surface: poll results
//! are rendered and mounted, pointer events drive the hover overlay, and the
//! URL input retargets the poller.

pub mod bridge;

use bridge::{Delivery, PollBridge};
use pollchart_config::AppConfig;
use pollchart_data::{http_source, SeriesSource};
use pollchart_renderer::{LineGraph, Surface};
use pollchart_shared::{ChartError, DataListener, DegenerateSeries, PointerEvent, PollEvent};
use std::sync::Arc;
use thiserror::Error;

pub use bridge::SequenceGate;

/// Application errors
#[derive(Error, Debug)]
pub enum IntegrationError {
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),
}

pub type Result<T> = std::result::Result<T, IntegrationError>;

/// What happened to one poll result
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// New chart mounted
    Rendered { sequence: u64 },
    /// Series could not be drawn, container emptied
    Cleared {
        sequence: u64,
        reason: DegenerateSeries,
    },
    /// Older than the chart on screen, ignored
    Stale { sequence: u64 },
    /// Fetch or mount failed, previous chart kept
    Failed { sequence: u64, error: ChartError },
}

pub struct ChartApp<S: Surface> {
    config: AppConfig,
    bridge: PollBridge,
    graph: LineGraph,
    surface: S,
}

impl<S: Surface> ChartApp<S> {
    pub fn new(config: AppConfig, source: Arc<dyn SeriesSource>, surface: S) -> Self {
        let bridge = PollBridge::new(source, &config.poller);
        let graph = LineGraph::new(config.layout);
        Self {
            config,
            bridge,
            graph,
            surface,
        }
    }

    /// App fetching over HTTP with the configured timeout
    pub fn with_http(config: AppConfig, surface: S) -> Result<Self> {
        let source = http_source(&config.poller)?;
        Ok(Self::new(config, Arc::new(source), surface))
    }

    /// Poll the configured source URL
    pub fn start(&mut self) -> Result<u64> {
        let url = self.config.poller.source_url.clone();
        self.change_url(&url)
    }

    /// Point the poller at `url`: fetch now, then every poll period.
    /// Responses to earlier URLs that are still in flight may still arrive.
    pub fn change_url(&mut self, url: &str) -> Result<u64> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ChartError::invalid_config("poller.source_url", "URL is empty").into());
        }
        Ok(self.bridge.set_source(url))
    }

    /// Read the URL input of the surface and poll it
    pub fn update_url_from_input(&mut self) -> Result<u64> {
        let url = self.surface.input_value(&self.config.surface.input_id)?;
        self.change_url(&url)
    }

    /// Wait for the next poll result and apply it. `None` once polling ended.
    pub async fn pump(&mut self) -> Option<Dispatch> {
        let dispatch = match self.bridge.next().await? {
            Delivery::Stale(event) => Dispatch::Stale {
                sequence: event.sequence(),
            },
            Delivery::Apply(PollEvent::DataChanged(change)) => {
                let sequence = change.sequence;
                let rendered = self.graph.data_changed(change.series);
                match (self.mount(), rendered) {
                    (Err(error), _) => Dispatch::Failed { sequence, error },
                    (Ok(()), Ok(())) => Dispatch::Rendered { sequence },
                    (Ok(()), Err(reason)) => Dispatch::Cleared { sequence, reason },
                }
            }
            Delivery::Apply(PollEvent::Failed {
                sequence, error, ..
            }) => {
                self.graph.poll_failed(&error);
                Dispatch::Failed { sequence, error }
            }
        };

        log::debug!("Poll result: {dispatch:?}");
        Some(dispatch)
    }

    /// Forward a pointer event to the chart; remounts if the hover changed
    pub fn pointer(&mut self, event: PointerEvent) -> Result<bool> {
        let changed = self.graph.handle_pointer(event);
        if changed {
            self.mount()?;
        }
        Ok(changed)
    }

    fn mount(&mut self) -> std::result::Result<(), ChartError> {
        self.surface
            .mount(&self.config.surface.container_id, self.graph.tree())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn graph(&self) -> &LineGraph {
        &self.graph
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn bridge(&self) -> &PollBridge {
        &self.bridge
    }

    /// Stop polling; results already in flight are still delivered
    pub fn stop(&mut self) {
        self.bridge.poller_mut().stop();
    }
}
