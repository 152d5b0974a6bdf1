//! Shared types for the pollchart workspace
//!
//! This crate contains the types passed between the data-manager, renderer
//! and system-integration crates, plus the wire format spoken by the mock
//! server.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

pub mod data_types;
pub mod errors;
pub mod events;
pub mod tooltip;

pub use data_types::{DataPoint, Series, SeriesPayload};
pub use errors::{ChartError, ChartResult, DegenerateSeries};
pub use events::{DataChanged, DataListener, PointerEvent, PollEvent};
pub use tooltip::HoverState;

/// Value of a single data point.
///
/// Anything that is not a finite number (after the same string coercion a
/// browser applies) is kept as `Invalid` with its raw text so it can still be
/// labelled and hovered.
#[derive(Debug, Clone, PartialEq)]
pub enum PointValue {
    Number(f64),
    Invalid(String),
}

impl PointValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PointValue::Number(v) => Some(*v),
            PointValue::Invalid(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, PointValue::Number(_))
    }

    /// Interpret a raw JSON value.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(v) if v.is_finite() => PointValue::Number(v),
                _ => PointValue::Invalid(n.to_string()),
            },
            Value::String(s) => {
                let trimmed = s.trim();
                match trimmed.parse::<f64>() {
                    Ok(v) if v.is_finite() && !trimmed.is_empty() => PointValue::Number(v),
                    _ => PointValue::Invalid(s.clone()),
                }
            }
            other => PointValue::Invalid(other.to_string()),
        }
    }
}

impl From<f64> for PointValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            PointValue::Number(value)
        } else {
            PointValue::Invalid(value.to_string())
        }
    }
}

impl From<i64> for PointValue {
    fn from(value: i64) -> Self {
        PointValue::Number(value as f64)
    }
}

impl From<&str> for PointValue {
    fn from(value: &str) -> Self {
        PointValue::from_json(&Value::String(value.to_string()))
    }
}

impl fmt::Display for PointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointValue::Number(v) => write!(f, "{}", v),
            PointValue::Invalid(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for PointValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Whole numbers go out as integers, the way the server generates them
            PointValue::Number(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*v as i64)
            }
            PointValue::Number(v) => serializer.serialize_f64(*v),
            PointValue::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for PointValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(PointValue::from_json(&raw))
    }
}
