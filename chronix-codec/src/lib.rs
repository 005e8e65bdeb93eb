//! # chronix-codec
//!
//! Point codec for Chronix time-series blobs.
//!
//! Chronix stores each chunk of a time series as a document in a search
//! engine (Solr, Elasticsearch): the series identity, numeric `start`/`end`
//! fields, and an opaque compressed blob holding the points. This crate is
//! the part that turns points into that blob and back.
//!
//! ## Key Properties
//!
//! - Exact round trip: timestamps and `f64` bit patterns come back unchanged
//! - Regularly sampled series cost roughly one value per point before compression
//! - Blobs are gzip containers readable by any Chronix client
//! - Decoding validates the blob against the stored `start`/`end`
//! - Queries that miss the stored range never touch the blob
//! - Pure functions, no shared state, no background work
//!
//! ## Quick Start
//!
//! ```rust
//! use chronix_codec::{EncodeOptions, Point, decode, encode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let points: Vec<Point> = (0..100)
//!     .map(|i| Point::new(i + 15, (i * 100) as f64))
//!     .collect();
//!
//! // Encode and persist `blob.data`, `blob.start()` and `blob.end()`
//! let blob = encode(&points, &EncodeOptions::default())?;
//! assert_eq!((blob.start(), blob.end()), (15, 114));
//!
//! // Read back everything
//! let all = decode(&blob.data, blob.start(), blob.end(), 15, 114)?;
//! assert_eq!(all, points);
//!
//! // Or only a window
//! let window = decode(&blob.data, blob.start(), blob.end(), 20, 24)?;
//! assert_eq!(window.len(), 5);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`encode`](fn@encode) / [`decode`](fn@decode): gzip-wrapped blobs, the Chronix default
//! - [`encode_with`] / [`decode_with`]: same transform over any [`Compressor`]
//! - [`RecordBounds`]: the `start`/`end` metadata stored beside a blob
//!
//! ## Modules
//!
//! - [`point`]: Point, series, and record bounds
//! - [`encode`](mod@encode): Encoder and its options
//! - [`decode`](mod@decode): Decoder with fast-reject and validation
//! - [`wire`]: Protobuf payload layout and the delta transform
//! - [`compress`]: Container formats behind the `Compressor` trait
//! - [`error`]: Error types

pub mod compress;
pub mod decode;
pub mod encode;
pub mod error;
pub mod point;
pub mod wire;

// Re-export primary API types at crate root for convenience.
#[cfg(feature = "snappy")]
pub use compress::Snappy;
pub use compress::{Compressor, Gzip};
pub use decode::{decode, decode_with};
pub use encode::{EncodeOptions, EncodedBlob, encode, encode_with};
pub use error::{CodecError, CorruptBlobError, DecompressError, EncodeError, Result};
pub use point::{Point, RecordBounds, TimeSeries};
