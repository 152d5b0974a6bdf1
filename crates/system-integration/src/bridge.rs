//! Bridge between the poller and the chart
//!
//! Fetches complete in any order. The bridge numbers nothing itself; it
//! compares the request sequence of each result against the newest one that
//! was already applied and can drop results that would roll the chart back.

use pollchart_config::PollerConfig;
use pollchart_data::{DataPoller, SeriesSource};
use pollchart_shared::PollEvent;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Tracks the newest applied request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceGate {
    latest: Option<u64>,
    discard_stale: bool,
}

impl SequenceGate {
    pub fn new(discard_stale: bool) -> Self {
        Self {
            latest: None,
            discard_stale,
        }
    }

    pub fn latest(&self) -> Option<u64> {
        self.latest
    }

    /// True if a newer request has already been applied
    pub fn is_stale(&self, sequence: u64) -> bool {
        self.discard_stale && self.latest.is_some_and(|latest| sequence < latest)
    }

    /// Record `sequence` as applied unless it is stale. Returns false for stale results.
    pub fn admit(&mut self, sequence: u64) -> bool {
        if self.is_stale(sequence) {
            return false;
        }
        self.latest = Some(self.latest.map_or(sequence, |latest| latest.max(sequence)));
        true
    }
}

/// What the bridge hands to the chart
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Apply(PollEvent),
    /// Result of an outdated request, dropped
    Stale(PollEvent),
}

/// Owns the poller and filters its results through a [`SequenceGate`]
pub struct PollBridge {
    poller: DataPoller,
    events: UnboundedReceiver<PollEvent>,
    gate: SequenceGate,
}

impl PollBridge {
    pub fn new(source: Arc<dyn SeriesSource>, config: &PollerConfig) -> Self {
        let (poller, events) = DataPoller::from_config(source, config);
        Self {
            poller,
            events,
            gate: SequenceGate::new(config.discard_stale_responses),
        }
    }

    /// Must be called from within a tokio runtime
    pub fn set_source(&mut self, url: impl Into<String>) -> u64 {
        self.poller.set_source(url)
    }

    pub fn poller(&self) -> &DataPoller {
        &self.poller
    }

    pub fn poller_mut(&mut self) -> &mut DataPoller {
        &mut self.poller
    }

    pub fn gate(&self) -> SequenceGate {
        self.gate
    }

    /// Wait for the next fetch result. `None` once the poller is gone.
    ///
    /// Failures never advance the gate, so a failing request cannot make an
    /// older successful one stale.
    pub async fn next(&mut self) -> Option<Delivery> {
        let event = self.events.recv().await?;
        let sequence = event.sequence();

        let fresh = match &event {
            PollEvent::DataChanged(_) => self.gate.admit(sequence),
            PollEvent::Failed { .. } => !self.gate.is_stale(sequence),
        };

        if fresh {
            Some(Delivery::Apply(event))
        } else {
            log::debug!(
                "Dropping response #{sequence} from {}, #{} already applied",
                event.url(),
                self.gate.latest().unwrap_or_default()
            );
            Some(Delivery::Stale(event))
        }
    }
}
