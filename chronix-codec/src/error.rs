//! Error types for the Chronix point codec.

use thiserror::Error;

/// The main error type for all codec operations.
///
/// Every failure is reported once, to the immediate caller. The codec never
/// retries and never returns a partial point sequence alongside an error.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Error while serializing or compressing points.
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),

    /// The blob is not a valid, complete compressed container.
    #[error("decompress error: {0}")]
    Decompress(#[from] DecompressError),

    /// The blob decompressed, but its content cannot be trusted.
    #[error("corrupt blob: {0}")]
    CorruptBlob(#[from] CorruptBlobError),
}

/// Errors that can occur while encoding a point sequence.
///
/// These are internal failures; valid input never produces them in normal
/// operation.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Failed to serialize the points to protobuf.
    #[error("failed to serialize points: {source}")]
    Serialization {
        /// The protobuf encoding error.
        #[source]
        source: prost::EncodeError,
    },

    /// The compressor failed to produce a container.
    #[error("failed to compress payload with {codec}: {source}")]
    Compression {
        /// Name of the compressor that failed.
        codec: &'static str,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while unwrapping the compressed container.
#[derive(Error, Debug)]
pub enum DecompressError {
    /// The container is malformed, truncated, or fails its checksum.
    #[error("invalid {codec} container: {source}")]
    Container {
        /// Name of the compressor that rejected the blob.
        codec: &'static str,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised when a decompressed blob disagrees with what the caller
/// says it contains.
#[derive(Error, Debug)]
pub enum CorruptBlobError {
    /// The decompressed payload is not a valid point message.
    #[error("payload is not a valid point message: {source}")]
    Malformed {
        /// The protobuf decoding error.
        #[source]
        source: prost::DecodeError,
    },

    /// The reconstructed first/last timestamps differ from the record bounds.
    #[error(
        "reconstructed range {actual_start}..={actual_end} does not match record bounds {expected_start}..={expected_end}"
    )]
    BoundsMismatch {
        /// Record start supplied by the caller.
        expected_start: i64,
        /// Record end supplied by the caller.
        expected_end: i64,
        /// First timestamp found in the blob.
        actual_start: i64,
        /// Last timestamp found in the blob.
        actual_end: i64,
    },

    /// The blob holds no points, but the record bounds describe a non-empty series.
    #[error("blob holds no points but record bounds are {start}..={end}")]
    MissingPoints {
        /// Record start supplied by the caller.
        start: i64,
        /// Record end supplied by the caller.
        end: i64,
    },
}

/// Type alias for `Result<T, CodecError>`.
pub type Result<T> = std::result::Result<T, CodecError>;
