//! Flat `f32` sample files.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use ndarray::{Array2, ArrayView2};
use std::fs;
use std::path::Path;

use crate::error::{Result, WrfJsonError};

const SAMPLE_SIZE: usize = std::mem::size_of::<f32>();

/// Encode a field as little-endian `f32`, row-major
pub fn encode(field: ArrayView2<'_, f32>) -> Bytes {
    let mut buf = BytesMut::with_capacity(field.len() * SAMPLE_SIZE);
    // iter() walks in logical row-major order whatever the memory layout
    for &value in field.iter() {
        buf.put_f32_le(value);
    }
    buf.freeze()
}

/// Decode little-endian `f32` samples into a `shape` field
pub fn decode(mut raw: Bytes, shape: (usize, usize)) -> Result<Array2<f32>> {
    let expected = shape.0 * shape.1 * SAMPLE_SIZE;
    if raw.len() != expected {
        return Err(WrfJsonError::ShapeMismatch {
            message: format!(
                "binary holds {} bytes, expected {} for a {}x{} field",
                raw.len(),
                expected,
                shape.0,
                shape.1
            ),
        });
    }

    let mut values = Vec::with_capacity(shape.0 * shape.1);
    while raw.has_remaining() {
        values.push(raw.get_f32_le());
    }
    Ok(Array2::from_shape_vec(shape, values)?)
}

pub fn write_field(path: &Path, field: ArrayView2<'_, f32>) -> Result<()> {
    fs::write(path, encode(field))?;
    Ok(())
}

pub fn read_field(path: &Path, shape: (usize, usize)) -> Result<Array2<f32>> {
    let raw = fs::read(path)?;
    decode(Bytes::from(raw), shape)
}

/// Minimum and maximum over all cells, skipping NaN.
///
/// Returns `None` when the field has no non-NaN values.
pub fn min_max(field: ArrayView2<'_, f32>) -> Option<(f32, f32)> {
    field
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
