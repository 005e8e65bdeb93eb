//! Encoder: points in, compressed blob plus record bounds out.

use serde::{Deserialize, Serialize};

use crate::compress::{Compressor, DEFAULT_GZIP_LEVEL, Gzip};
use crate::error::{EncodeError, Result};
use crate::point::{Point, RecordBounds};
use crate::wire;

/// Encoder configuration.
///
/// Plain data, so callers can embed it in their own configuration files.
/// Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Gzip compression level, 0 (store) to 9 (best). Higher values are clamped.
    pub level: u32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_GZIP_LEVEL,
        }
    }
}

impl EncodeOptions {
    /// Sets the compression level.
    #[must_use]
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// The gzip compressor these options describe.
    pub fn compressor(&self) -> Gzip {
        Gzip::new(self.level)
    }
}

/// An encoded blob together with the bounds the caller must persist with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlob {
    /// The compressed payload.
    pub data: Vec<u8>,
    /// First and last timestamp of the encoded points,
    /// or [`RecordBounds::EMPTY`] for an empty sequence.
    pub bounds: RecordBounds,
}

impl EncodedBlob {
    /// Timestamp of the first encoded point.
    pub fn start(&self) -> i64 {
        self.bounds.start
    }

    /// Timestamp of the last encoded point.
    pub fn end(&self) -> i64 {
        self.bounds.end
    }
}

/// Encodes points into a gzip-wrapped Chronix blob.
///
/// Points must already be sorted by non-decreasing timestamp; the encoder
/// neither sorts nor checks.
///
/// # Errors
///
/// Returns `CodecError::Encode` if serialization or compression fails.
pub fn encode(points: &[Point], options: &EncodeOptions) -> Result<EncodedBlob> {
    encode_with(&options.compressor(), points)
}

/// Encodes points using an arbitrary container format.
///
/// The blob can only be read back by [`decode_with`](crate::decode_with)
/// with a compressor of the same format.
///
/// # Errors
///
/// Returns `CodecError::Encode` if serialization or compression fails.
pub fn encode_with<C: Compressor + ?Sized>(compressor: &C, points: &[Point]) -> Result<EncodedBlob> {
    let payload =
        wire::serialize(points).map_err(|e| EncodeError::Serialization { source: e })?;
    let data = compressor
        .compress(&payload)
        .map_err(|e| EncodeError::Compression {
            codec: compressor.name(),
            source: e,
        })?;

    Ok(EncodedBlob {
        data,
        bounds: RecordBounds::of(points),
    })
}
