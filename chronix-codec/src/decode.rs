//! Decoder: blob plus record bounds in, points of a query window out.
//!
//! Decoding runs in four steps:
//!
//! 1. **Fast-reject**: a window that cannot meet the record bounds returns
//!    nothing before the blob is touched, so even an undecompressable blob
//!    yields an empty result.
//! 2. **Decompress** the container.
//! 3. **Reconstruct** every point from the payload and check that the first
//!    and last timestamps match the record bounds.
//! 4. **Filter** to the inclusive query window, keeping order.
//!
//! Validation always looks at the full sequence, so a blob that has drifted
//! out of sync with its stored bounds is reported no matter which window
//! the caller asks for.

use crate::compress::{Compressor, Gzip};
use crate::error::{CorruptBlobError, DecompressError, Result};
use crate::point::{Point, RecordBounds};
use crate::wire;

/// Decodes a gzip-wrapped Chronix blob and returns the points whose
/// timestamps fall in `[query_start, query_end]`.
///
/// `record_start` and `record_end` are the bounds persisted with the blob
/// at encode time. For a blob of an empty sequence pass
/// [`RecordBounds::EMPTY`].
///
/// # Errors
///
/// Returns `CodecError::Decompress` if the blob is not a valid gzip
/// container, and `CodecError::CorruptBlob` if its payload cannot be parsed
/// or does not span exactly `record_start..=record_end`.
///
/// The first timestamp is not stored in the blob; it is taken from
/// `record_start`. Bounds shifted by the same amount on both ends therefore
/// pass validation and shift every returned timestamp by that amount.
pub fn decode(
    blob: &[u8],
    record_start: i64,
    record_end: i64,
    query_start: i64,
    query_end: i64,
) -> Result<Vec<Point>> {
    decode_with(
        &Gzip::default(),
        blob,
        RecordBounds::new(record_start, record_end),
        query_start,
        query_end,
    )
}

/// Decodes a blob written with an arbitrary container format.
///
/// # Errors
///
/// Same as [`decode`], including its blind spot: a uniform shift of both
/// bounds is not detected.
pub fn decode_with<C: Compressor + ?Sized>(
    compressor: &C,
    blob: &[u8],
    bounds: RecordBounds,
    query_start: i64,
    query_end: i64,
) -> Result<Vec<Point>> {
    if !bounds.intersects(query_start, query_end) {
        return Ok(Vec::new());
    }

    let payload = compressor
        .decompress(blob)
        .map_err(|e| DecompressError::Container {
            codec: compressor.name(),
            source: e,
        })?;
    let message =
        wire::deserialize(&payload).map_err(|e| CorruptBlobError::Malformed { source: e })?;
    let points = wire::from_message(&message, bounds.start);
    validate(&points, bounds)?;

    Ok(points
        .into_iter()
        .skip_while(|p| p.timestamp < query_start)
        .take_while(|p| p.timestamp <= query_end)
        .collect())
}

/// Checks the reconstructed sequence against the caller's record bounds.
fn validate(points: &[Point], bounds: RecordBounds) -> Result<()> {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            if first.timestamp != bounds.start || last.timestamp != bounds.end {
                return Err(CorruptBlobError::BoundsMismatch {
                    expected_start: bounds.start,
                    expected_end: bounds.end,
                    actual_start: first.timestamp,
                    actual_end: last.timestamp,
                }
                .into());
            }
            Ok(())
        }
        _ if bounds.is_empty() => Ok(()),
        _ => Err(CorruptBlobError::MissingPoints {
            start: bounds.start,
            end: bounds.end,
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{EncodeOptions, encode};
    use crate::error::CodecError;

    #[allow(clippy::cast_precision_loss)]
    fn points_at(timestamps: &[i64]) -> Vec<Point> {
        timestamps
            .iter()
            .map(|&t| Point::new(t, t as f64 / 2.0))
            .collect()
    }

    #[test]
    fn test_decode_full_window() {
        let points = points_at(&[10, 20, 30, 40]);
        let blob = encode(&points, &EncodeOptions::default()).unwrap();

        let decoded = decode(&blob.data, 10, 40, 10, 40).unwrap();
        assert_eq!(decoded, points);
    }

    #[test]
    fn test_decode_inner_window() {
        let points = points_at(&[10, 20, 20, 30, 40]);
        let blob = encode(&points, &EncodeOptions::default()).unwrap();

        let decoded = decode(&blob.data, 10, 40, 15, 30).unwrap();
        assert_eq!(decoded, points[1..4].to_vec());

        let decoded = decode(&blob.data, 10, 40, 21, 29).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_fast_reject_skips_decompression() {
        let garbage = b"not a container";

        assert!(decode(garbage, 100, 200, 0, 99).unwrap().is_empty());
        assert!(decode(garbage, 100, 200, 201, 300).unwrap().is_empty());
        assert!(decode(garbage, 100, 200, 150, 120).unwrap().is_empty());
    }

    #[test]
    fn test_overlapping_window_reaches_decompression() {
        let result = decode(b"not a container", 100, 200, 200, 300);
        assert!(matches!(result, Err(CodecError::Decompress(_))));
    }

    #[test]
    fn test_payload_garbage_is_corrupt_blob() {
        let blob = Gzip::default().compress(&[0x0a, 0xff, 0xff]).unwrap();
        let result = decode(&blob, 0, 10, 0, 10);
        assert!(matches!(
            result,
            Err(CodecError::CorruptBlob(CorruptBlobError::Malformed { .. }))
        ));
    }

    #[test]
    fn test_wrong_record_end_is_corrupt_blob() {
        let points = points_at(&[10, 20, 30]);
        let blob = encode(&points, &EncodeOptions::default()).unwrap();

        let err = decode(&blob.data, 10, 31, 10, 31).unwrap_err();
        match err {
            CodecError::CorruptBlob(CorruptBlobError::BoundsMismatch {
                actual_start,
                actual_end,
                ..
            }) => {
                assert_eq!(actual_start, 10);
                assert_eq!(actual_end, 30);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_record_start_shifts_and_fails() {
        let points = points_at(&[10, 20, 30]);
        let blob = encode(&points, &EncodeOptions::default()).unwrap();

        let result = decode(&blob.data, 11, 30, 0, 100);
        assert!(matches!(
            result,
            Err(CodecError::CorruptBlob(CorruptBlobError::BoundsMismatch { .. }))
        ));
    }

    #[test]
    fn test_mismatch_detected_outside_query_window() {
        let points = points_at(&[10, 20, 30]);
        let blob = encode(&points, &EncodeOptions::default()).unwrap();

        // Window only covers the first point; the bad end must still be caught.
        let result = decode(&blob.data, 10, 35, 10, 10);
        assert!(matches!(
            result,
            Err(CodecError::CorruptBlob(CorruptBlobError::BoundsMismatch {
                expected_end: 35,
                actual_end: 30,
                ..
            }))
        ));
    }

    #[test]
    fn test_uniformly_shifted_bounds_shift_timestamps() {
        let points = points_at(&[10, 20, 30]);
        let blob = encode(&points, &EncodeOptions::default()).unwrap();

        // Both bounds moved by the same amount: every delta still lines up.
        let decoded = decode(&blob.data, 1010, 1030, 0, 5000).unwrap();
        let timestamps: Vec<i64> = decoded.iter().map(|p| p.timestamp).collect();
        let values: Vec<f64> = decoded.iter().map(|p| p.value).collect();
        assert_eq!(timestamps, vec![1010, 1020, 1030]);
        assert_eq!(values, vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn test_empty_blob_with_non_empty_bounds() {
        let blob = encode(&[], &EncodeOptions::default()).unwrap();

        let result = decode(&blob.data, 15, 114, 15, 114);
        assert!(matches!(
            result,
            Err(CodecError::CorruptBlob(CorruptBlobError::MissingPoints { start: 15, end: 114 }))
        ));
    }

    #[test]
    fn test_empty_blob_full_window() {
        let blob = encode(&[], &EncodeOptions::default()).unwrap();

        let decoded = decode(
            &blob.data,
            blob.start(),
            blob.end(),
            i64::MIN,
            i64::MAX,
        )
        .unwrap();
        assert!(decoded.is_empty());
    }
}
