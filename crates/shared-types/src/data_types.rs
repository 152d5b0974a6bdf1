//! Common data types used across the system

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::PointValue;

/// A labelled data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(deserialize_with = "label_from_json")]
    pub x: String,
    pub value: PointValue,
}

impl DataPoint {
    pub fn new(x: impl Into<String>, value: impl Into<PointValue>) -> Self {
        Self {
            x: x.into(),
            value: value.into(),
        }
    }
}

/// Labels are strings on the wire, but numbers are accepted and stringified
fn label_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}

/// Ordered sequence of data points; index defines horizontal position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series(Vec<DataPoint>);

impl Series {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self(points)
    }

    /// Build a series labelled "0", "1", ... from plain values
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PointValue>,
    {
        Self(
            values
                .into_iter()
                .enumerate()
                .map(|(i, v)| DataPoint::new(i.to_string(), v))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&DataPoint> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.0.iter()
    }

    pub fn numeric_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().filter_map(|p| p.value.as_f64())
    }

    /// (min, max) over numeric values, `None` when there are none
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.numeric_values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
    }
}

impl From<Vec<DataPoint>> for Series {
    fn from(points: Vec<DataPoint>) -> Self {
        Self(points)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Response body of the data endpoint: `{"data": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPayload {
    pub data: Series,
}
