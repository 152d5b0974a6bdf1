//! Periodic polling of a series endpoint
//!
//! Every fetch gets a request sequence number and its outcome is published on
//! an unbounded channel as a [`PollEvent`]. Fetches are fire-and-forget: a tick
//! never waits for the previous fetch, and switching URLs only stops the timer,
//! it does not cancel requests already in flight. Consumers that care about
//! ordering compare sequence numbers.

use pollchart_config::PollerConfig;
use pollchart_shared::{ChartError, ChartResult, DataChanged, PollEvent, Series};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::fetcher::SeriesSource;

pub struct DataPoller {
    source: Arc<dyn SeriesSource>,
    period: Duration,
    url: Option<String>,
    timer: Option<JoinHandle<()>>,
    sequence: Arc<AtomicU64>,
    events: UnboundedSender<PollEvent>,
}

/// Everything a spawned fetch needs
#[derive(Clone)]
struct FetchTask {
    source: Arc<dyn SeriesSource>,
    url: String,
    sequence: Arc<AtomicU64>,
    events: UnboundedSender<PollEvent>,
}

impl FetchTask {
    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn spawn(&self) -> u64 {
        let sequence = self.next_sequence();
        let task = self.clone();
        tokio::spawn(async move {
            let result = task.source.fetch(&task.url).await;
            task.publish(sequence, result);
        });
        sequence
    }

    fn publish(&self, sequence: u64, result: ChartResult<Series>) {
        let event = match result {
            Ok(series) => {
                log::debug!(
                    "Fetched {} points from {} (request #{sequence})",
                    series.len(),
                    self.url
                );
                PollEvent::DataChanged(DataChanged {
                    sequence,
                    url: self.url.clone(),
                    series,
                })
            }
            Err(error) => {
                log::warn!("Fetch #{sequence} from {} failed: {error}", self.url);
                PollEvent::Failed {
                    sequence,
                    url: self.url.clone(),
                    error,
                }
            }
        };

        if self.events.send(event).is_err() {
            log::debug!("No listener for poll results, dropping request #{sequence}");
        }
    }
}

impl DataPoller {
    pub fn new(
        source: Arc<dyn SeriesSource>,
        period: Duration,
    ) -> (Self, UnboundedReceiver<PollEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let poller = Self {
            source,
            period,
            url: None,
            timer: None,
            sequence: Arc::new(AtomicU64::new(0)),
            events,
        };
        (poller, receiver)
    }

    pub fn from_config(
        source: Arc<dyn SeriesSource>,
        config: &PollerConfig,
    ) -> (Self, UnboundedReceiver<PollEvent>) {
        Self::new(source, Duration::from_millis(config.poll_interval_ms))
    }

    pub fn current_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_polling(&self) -> bool {
        self.timer.is_some()
    }

    /// Switch to a new URL: stop the old timer, fetch now, then every period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_source(&mut self, url: impl Into<String>) -> u64 {
        self.stop();

        let url = url.into();
        log::info!("Polling {url} every {:?}", self.period);

        let task = self.task_for(url.clone());
        let sequence = task.spawn();

        let period = self.period;
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                task.spawn();
            }
        }));
        self.url = Some(url);

        sequence
    }

    /// Fetch the current URL once, publish the result and return it
    pub async fn fetch_once(&self) -> ChartResult<Series> {
        let url = self.url.clone().ok_or_else(|| {
            ChartError::invalid_config("poller.source_url", "No source URL has been set")
        })?;

        let task = self.task_for(url);
        let sequence = task.next_sequence();
        let result = task.source.fetch(&task.url).await;
        task.publish(sequence, result.clone());
        result
    }

    /// Stop the recurring timer. Requests already in flight still complete.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
            log::debug!("Stopped polling {}", self.url.as_deref().unwrap_or("<none>"));
        }
    }

    fn task_for(&self, url: String) -> FetchTask {
        FetchTask {
            source: Arc::clone(&self.source),
            url,
            sequence: Arc::clone(&self.sequence),
            events: self.events.clone(),
        }
    }
}

impl Drop for DataPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
