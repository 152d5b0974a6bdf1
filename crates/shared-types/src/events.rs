//! Events exchanged between the poller, the renderer and the surface

use crate::{ChartError, DegenerateSeries, Series};

/// Pointer interaction on the chart surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer entered the hit-region of the point at `region`
    Enter { region: usize },
    /// Pointer left the whole chart area
    Leave,
}

/// A freshly fetched series
#[derive(Clone, Debug, PartialEq)]
pub struct DataChanged {
    /// Request sequence number, increasing in the order requests were issued
    pub sequence: u64,
    pub url: String,
    pub series: Series,
}

/// Outcome of one fetch, published by the poller
#[derive(Clone, Debug, PartialEq)]
pub enum PollEvent {
    DataChanged(DataChanged),
    Failed {
        sequence: u64,
        url: String,
        error: ChartError,
    },
}

impl PollEvent {
    pub fn sequence(&self) -> u64 {
        match self {
            PollEvent::DataChanged(change) => change.sequence,
            PollEvent::Failed { sequence, .. } => *sequence,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            PollEvent::DataChanged(change) => &change.url,
            PollEvent::Failed { url, .. } => url,
        }
    }
}

/// Observer of poll results
pub trait DataListener {
    /// New series arrived. `Err` when it cannot be drawn.
    fn data_changed(&mut self, series: Series) -> Result<(), DegenerateSeries>;

    /// A fetch failed; the previous series stays current
    fn poll_failed(&mut self, _error: &ChartError) {}
}
