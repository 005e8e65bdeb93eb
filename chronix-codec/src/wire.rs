//! Protobuf payload layout and the timestamp delta transform.
//!
//! The payload is the Chronix "Kassiopeia simple" point message. Timestamps
//! are stored relative to the record start: each point carries the delta to
//! its predecessor, and a point with no delta field repeats the current
//! *base* delta. Regularly sampled series therefore cost only the value per
//! point. Values are stored as raw IEEE-754 doubles.
//!
//! Deltas are the wrapping 64-bit difference of consecutive timestamps, and
//! reconstruction uses the matching wrapping sum, so any `i64` sequence
//! round-trips exactly.

use prost::Message;

use crate::point::Point;

/// Chronix point message types.
///
/// Hand-written types matching Chronix' `Point.proto`.
/// Using prost derives avoids the need for protoc and proto file management.
pub mod proto {
    /// All points of one encoded series.
    #[derive(Clone, PartialEq, prost::Message)]
    pub struct Points {
        /// The points, in timestamp order.
        #[prost(message, repeated, tag = "1")]
        pub p: Vec<Point>,
        /// Almost-equals threshold the writer used for deltas.
        #[prost(uint32, optional, tag = "2")]
        pub ddc: Option<u32>,
    }

    /// A single point: an optional timestamp delta and the value.
    #[derive(Clone, PartialEq, prost::Message)]
    pub struct Point {
        /// One-off delta that does not fit in 32 bits.
        #[prost(uint64, optional, tag = "1")]
        pub tlong: Option<u64>,
        /// One-off delta.
        #[prost(uint32, optional, tag = "2")]
        pub tint: Option<u32>,
        /// Delta that becomes the new base delta, 64-bit.
        #[prost(uint64, optional, tag = "3")]
        pub tlong_bp: Option<u64>,
        /// Delta that becomes the new base delta.
        #[prost(uint32, optional, tag = "4")]
        pub tint_bp: Option<u32>,
        /// The sample value.
        #[prost(double, optional, tag = "5")]
        pub v: Option<f64>,
    }
}

/// Threshold written into every payload. Zero means deltas are exact.
const EXACT_DDC: u32 = 0;

/// How a point's timestamp relates to its predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Offset {
    /// No delta stored: repeat the current base delta.
    Repeat,
    /// Delta for this point only.
    Once(u64),
    /// Delta for this point that also replaces the base delta.
    Base(u64),
}

impl proto::Point {
    fn with_value(value: f64) -> Self {
        Self {
            v: Some(value),
            ..Self::default()
        }
    }

    fn set_offset(&mut self, offset: Offset) {
        match offset {
            Offset::Repeat => {}
            Offset::Once(delta) => match u32::try_from(delta) {
                Ok(small) => self.tint = Some(small),
                Err(_) => self.tlong = Some(delta),
            },
            Offset::Base(delta) => match u32::try_from(delta) {
                Ok(small) => self.tint_bp = Some(small),
                Err(_) => self.tlong_bp = Some(delta),
            },
        }
    }

    fn offset(&self) -> Offset {
        if let Some(delta) = self.tlong_bp {
            Offset::Base(delta)
        } else if let Some(delta) = self.tint_bp {
            Offset::Base(u64::from(delta))
        } else if let Some(delta) = self.tlong {
            Offset::Once(delta)
        } else if let Some(delta) = self.tint {
            Offset::Once(u64::from(delta))
        } else {
            Offset::Repeat
        }
    }
}

fn delta(from: i64, to: i64) -> u64 {
    to.wrapping_sub(from).cast_unsigned()
}

/// Converts points into the protobuf message.
///
/// A delta equal to the base delta is omitted, except on the last point,
/// which always carries its delta. A changed delta is stored as the new base
/// when the following point repeats it, otherwise as a one-off.
pub(crate) fn to_message(points: &[Point]) -> proto::Points {
    let mut message = proto::Points {
        p: Vec::with_capacity(points.len()),
        ddc: Some(EXACT_DDC),
    };
    let mut base_delta = 0u64;

    for (i, point) in points.iter().enumerate() {
        let mut entry = proto::Point::with_value(point.value);

        if i > 0 {
            let current = delta(points[i - 1].timestamp, point.timestamp);
            let is_last = i + 1 == points.len();

            if current != base_delta || is_last {
                let next_repeats = points
                    .get(i + 1)
                    .is_some_and(|next| delta(point.timestamp, next.timestamp) == current);

                if next_repeats {
                    base_delta = current;
                    entry.set_offset(Offset::Base(current));
                } else {
                    entry.set_offset(Offset::Once(current));
                }
            }
        }

        message.p.push(entry);
    }

    message
}

/// Reconstructs points from the protobuf message.
///
/// The first point sits at `record_start` plus its own delta, if it carries
/// one. Values missing from the message decode as `0.0`.
pub(crate) fn from_message(message: &proto::Points, record_start: i64) -> Vec<Point> {
    let mut points = Vec::with_capacity(message.p.len());
    let mut timestamp = record_start;
    let mut base_delta = 0u64;

    for entry in &message.p {
        let step = match entry.offset() {
            Offset::Repeat => base_delta,
            Offset::Once(delta) => delta,
            Offset::Base(delta) => {
                base_delta = delta;
                delta
            }
        };
        timestamp = timestamp.wrapping_add_unsigned(step);
        points.push(Point::new(timestamp, entry.v.unwrap_or_default()));
    }

    points
}

/// Serializes points to protobuf bytes.
pub(crate) fn serialize(points: &[Point]) -> Result<Vec<u8>, prost::EncodeError> {
    let message = to_message(points);
    let mut buf = Vec::with_capacity(message.encoded_len());
    message.encode(&mut buf)?;
    Ok(buf)
}

/// Parses protobuf bytes into the point message.
pub(crate) fn deserialize(payload: &[u8]) -> Result<proto::Points, prost::DecodeError> {
    proto::Points::decode(payload)
}
