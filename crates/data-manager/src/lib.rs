//! Data Manager crate for pollchart
//! Fetches series from the data endpoint and publishes them to listeners

pub mod fetcher;
pub mod parser;
pub mod poller;

pub use fetcher::{HttpSource, SeriesSource};
pub use parser::{parse_series, DATA_FIELD};
pub use poller::DataPoller;

use pollchart_config::PollerConfig;
use pollchart_shared::ChartResult;
use std::time::Duration;

/// HTTP source configured from the poller settings
pub fn http_source(config: &PollerConfig) -> ChartResult<HttpSource> {
    HttpSource::new(config.request_timeout_ms.map(Duration::from_millis))
}
