//! Point and series data model.
//!
//! The codec itself only ever looks at a slice of [`Point`]s. [`TimeSeries`]
//! is the shape storage collaborators hand around, and [`RecordBounds`] is
//! the range metadata they persist next to each blob.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::encode::{EncodeOptions, EncodedBlob, encode};
use crate::error::Result;

/// A single time-series sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// The sample value.
    pub value: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// A named series of points with free-form attributes.
///
/// Points are expected to be sorted by non-decreasing timestamp.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Metric name.
    pub name: String,
    /// Series type, e.g. `metric`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Attributes identifying the series (host, process, ...).
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// The samples, ordered by timestamp.
    #[serde(default)]
    pub points: Vec<Point>,
}

impl TimeSeries {
    /// Creates an empty series.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            attributes: HashMap::new(),
            points: Vec::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Encodes this series' points into a gzip blob.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Encode` if serialization or compression fails.
    pub fn encode_points(&self, options: &EncodeOptions) -> Result<EncodedBlob> {
        encode(&self.points, options)
    }
}

/// First and last timestamp of an encoded point sequence.
///
/// An empty sequence is represented by [`RecordBounds::EMPTY`], an inverted
/// range (`start > end`) that no non-empty sorted sequence can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordBounds {
    /// Timestamp of the first point.
    pub start: i64,
    /// Timestamp of the last point.
    pub end: i64,
}

impl RecordBounds {
    /// Sentinel bounds recorded for an empty point sequence.
    pub const EMPTY: RecordBounds = RecordBounds {
        start: i64::MAX,
        end: i64::MIN,
    };

    /// Creates bounds from explicit start and end timestamps.
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Computes the bounds of a point sequence from its first and last point.
    pub fn of(points: &[Point]) -> Self {
        match (points.first(), points.last()) {
            (Some(first), Some(last)) => Self::new(first.timestamp, last.timestamp),
            _ => Self::EMPTY,
        }
    }

    /// Returns `true` if these are the bounds of an empty sequence.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Returns `true` if the inclusive window `[query_start, query_end]` can
    /// contain any point inside these bounds.
    ///
    /// An inverted window (`query_start > query_end`) selects nothing.
    pub fn intersects(&self, query_start: i64, query_end: i64) -> bool {
        query_start <= query_end && query_end >= self.start && query_start <= self.end
    }
}
