//! General-purpose compressors wrapping the serialized point payload.
//!
//! The point transform never looks inside the container: it hands raw
//! payload bytes to a [`Compressor`] and gets them back the same way. Any
//! metadata a container format embeds (gzip's modification time, OS byte,
//! ...) is therefore invisible to decoding.

use std::io::{self, Read, Write};

use flate2::Compression;
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;

/// Default gzip level, the same default Go's and Java's gzip writers use.
pub const DEFAULT_GZIP_LEVEL: u32 = 6;

/// Narrow byte-in/byte-out compression interface.
///
/// Implementations must be lossless and must detect malformed or truncated
/// input by returning an error, never by producing short output.
pub trait Compressor: Send + Sync {
    /// Human-readable name used in error messages.
    fn name(&self) -> &'static str;

    /// Wraps `raw` in a compressed container.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying encoder fails.
    fn compress(&self, raw: &[u8]) -> io::Result<Vec<u8>>;

    /// Recovers the raw bytes from a container produced by [`compress`](Self::compress)
    /// or by any other producer of the same container format.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the container is malformed, truncated, or
    /// fails its integrity check.
    fn decompress(&self, compressed: &[u8]) -> io::Result<Vec<u8>>;
}

/// Single-member gzip container (RFC 1952).
///
/// This is what Chronix stores. The trailing CRC-32 and length make any
/// corruption of the deflate stream surface as an error. The member must end
/// exactly at the end of the blob: trailing bytes, including a second member,
/// are rejected.
#[derive(Debug, Clone, Copy)]
pub struct Gzip {
    level: u32,
}

impl Gzip {
    /// Creates a gzip compressor. Levels above 9 are clamped to 9.
    pub fn new(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }

    /// The effective compression level.
    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Default for Gzip {
    fn default() -> Self {
        Self::new(DEFAULT_GZIP_LEVEL)
    }
}

impl Compressor for Gzip {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn compress(&self, raw: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(
            Vec::with_capacity(raw.len() / 2),
            Compression::new(self.level),
        );
        encoder.write_all(raw)?;
        encoder.finish()
    }

    fn decompress(&self, compressed: &[u8]) -> io::Result<Vec<u8>> {
        let mut decoder = GzDecoder::new(compressed);
        let mut raw = Vec::with_capacity(compressed.len() * 4);
        decoder.read_to_end(&mut raw)?;

        let trailing = decoder.into_inner();
        if !trailing.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} unexpected bytes after gzip member", trailing.len()),
            ));
        }
        Ok(raw)
    }
}

/// Snappy framed container.
///
/// Each frame chunk carries a masked CRC-32C of its uncompressed data, so
/// bit flips are detected just like with gzip.
#[cfg(feature = "snappy")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Snappy;

#[cfg(feature = "snappy")]
impl Compressor for Snappy {
    fn name(&self) -> &'static str {
        "snappy"
    }

    fn compress(&self, raw: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoder = snap::write::FrameEncoder::new(Vec::with_capacity(raw.len() / 2));
        encoder.write_all(raw)?;
        encoder
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }

    fn decompress(&self, compressed: &[u8]) -> io::Result<Vec<u8>> {
        let mut decoder = snap::read::FrameDecoder::new(compressed);
        let mut raw = Vec::with_capacity(compressed.len() * 2);
        decoder.read_to_end(&mut raw)?;
        Ok(raw)
    }
}
