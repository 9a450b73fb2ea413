//! Wind speed and direction from the 10 m u/v components.

use ndarray::{Array2, Zip};

use crate::artifact::round2;
use crate::dataset::GridDataset;
use crate::error::{Result, WrfJsonError};
use crate::extract::{extract_frame, SourceVariable};
use crate::grid::SpatialGrid;

/// Magnitude of the wind vector in m/s
pub fn speed(u: f32, v: f32) -> f32 {
    u.hypot(v)
}

/// Bearing the wind blows toward, in degrees within `[0, 360)`.
///
/// 0 is north and 90 is east. Calm air (`u == v == 0`) maps to 0. Bearings
/// that would be written as 360.00 wrap to north, so the range also holds
/// after the JSON output rounds to two decimals.
pub fn direction_to(u: f32, v: f32) -> f32 {
    if u == 0.0 && v == 0.0 {
        return 0.0;
    }
    let degrees = u.atan2(v).to_degrees().rem_euclid(360.0);
    if round2(degrees as f64) >= 360.0 {
        0.0
    } else {
        degrees
    }
}

/// Per-cell wind speed field
pub fn wind_speed(u: &Array2<f32>, v: &Array2<f32>) -> Result<Array2<f32>> {
    check_shapes(u, v)?;
    Ok(Zip::from(u).and(v).map_collect(|&u, &v| speed(u, v)))
}

/// Per-cell wind direction field ("to" convention)
pub fn wind_direction(u: &Array2<f32>, v: &Array2<f32>) -> Result<Array2<f32>> {
    check_shapes(u, v)?;
    Ok(Zip::from(u).and(v).map_collect(|&u, &v| direction_to(u, v)))
}

/// The level-0 `(u, v)` frames for one timestep
pub fn wind_components(
    dataset: &GridDataset,
    timestep: usize,
) -> Result<(Array2<f32>, Array2<f32>)> {
    let u = extract_frame(dataset, SourceVariable::WindU, timestep)?;
    let v = extract_frame(dataset, SourceVariable::WindV, timestep)?;
    check_shapes(&u, &v)?;
    Ok((u, v))
}

/// Raw wind components alongside the coordinate meshes they sit on
#[derive(Debug, Clone)]
pub struct WindMap {
    pub lon: Array2<f64>,
    pub lat: Array2<f64>,
    pub u: Array2<f32>,
    pub v: Array2<f32>,
}

/// Assemble a [`WindMap`] for one timestep
pub fn wind_map(dataset: &GridDataset, timestep: usize) -> Result<WindMap> {
    let grid = SpatialGrid::from_dataset(dataset)?;
    let (u, v) = wind_components(dataset, timestep)?;
    if u.dim() != grid.shape() {
        return Err(WrfJsonError::ShapeMismatch {
            message: format!(
                "wind frame {:?} does not match grid {:?}",
                u.dim(),
                grid.shape()
            ),
        });
    }

    let (lon, lat) = grid.mesh();
    Ok(WindMap { lon, lat, u, v })
}

fn check_shapes(u: &Array2<f32>, v: &Array2<f32>) -> Result<()> {
    if u.dim() != v.dim() {
        return Err(WrfJsonError::ShapeMismatch {
            message: format!("u component {:?} vs v component {:?}", u.dim(), v.dim()),
        });
    }
    Ok(())
}
