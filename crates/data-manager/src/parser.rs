//! Parsing of the data endpoint's JSON body

use pollchart_shared::{ChartError, ChartResult, Series};
use serde_json::Value;

/// Field of the response object holding the point array
pub const DATA_FIELD: &str = "data";

/// Parse a response body into a series.
///
/// The body must be a JSON object whose `data` field is an array of
/// `{x, value}` objects. Anything else is a parse failure.
pub fn parse_series(body: &[u8]) -> ChartResult<Series> {
    let mut document: Value = serde_json::from_slice(body)?;

    let field = match document.get_mut(DATA_FIELD) {
        Some(field) => field.take(),
        None => {
            return Err(ChartError::parse(format!(
                "missing `{DATA_FIELD}` field in response"
            )))
        }
    };

    let series: Series = serde_json::from_value(field)
        .map_err(|e| ChartError::parse(format!("invalid `{DATA_FIELD}` field: {e}")))?;

    log::debug!("Parsed series with {} points", series.len());
    Ok(series)
}
