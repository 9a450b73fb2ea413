//! Spatial grid geometry derived from the IOAPI grid attributes.
//!
//! The grid is regular: the lower-left corner sits at (`XORIG`, `YORIG`) and
//! cells are `XCELL` x `YCELL` degrees, `NCOLS` across and `NROWS` up.

use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::dataset::GridDataset;
use crate::error::Result;

/// Geographic bounds of the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoExtent {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl GeoExtent {
    /// Corner ring (closed polygon) starting at the south-west corner
    pub fn corners(&self) -> [(f64, f64); 5] {
        [
            (self.west, self.south),
            (self.west, self.north),
            (self.east, self.north),
            (self.east, self.south),
            (self.west, self.south),
        ]
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }
}

/// Regular lon/lat grid of one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialGrid {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    /// Cell width (`XCELL`)
    pub x_cell: f64,
    /// Cell height (`YCELL`)
    pub y_cell: f64,
    /// `NCOLS`
    pub ncols: usize,
    /// `NROWS`
    pub nrows: usize,
}

impl SpatialGrid {
    /// Build a grid from its origin, cell sizes and counts
    pub fn new(x_min: f64, y_min: f64, x_cell: f64, y_cell: f64, ncols: usize, nrows: usize) -> Self {
        Self {
            x_min,
            y_min,
            x_max: x_min + x_cell * ncols as f64,
            y_max: y_min + y_cell * nrows as f64,
            x_cell,
            y_cell,
            ncols,
            nrows,
        }
    }

    /// Read `XORIG`, `YORIG`, `XCELL`, `YCELL`, `NCOLS` and `NROWS` from a dataset
    pub fn from_dataset(dataset: &GridDataset) -> Result<Self> {
        Ok(Self::new(
            dataset.attribute_f64("XORIG")?,
            dataset.attribute_f64("YORIG")?,
            dataset.attribute_f64("XCELL")?,
            dataset.attribute_f64("YCELL")?,
            dataset.attribute_usize("NCOLS")?,
            dataset.attribute_usize("NROWS")?,
        ))
    }

    /// `(x_min, y_min, x_max, y_max)`
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.y_min, self.x_max, self.y_max)
    }

    pub fn extent(&self) -> GeoExtent {
        GeoExtent {
            west: self.x_min,
            south: self.y_min,
            east: self.x_max,
            north: self.y_max,
        }
    }

    /// `(nrows, ncols)`, the shape every field frame must have
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    pub fn cell_count(&self) -> usize {
        self.nrows * self.ncols
    }

    /// Coordinate meshes of shape `NROWS x NCOLS`.
    ///
    /// Both axes are sampled endpoint-inclusive from min to max, so the last
    /// column sits on `x_max` rather than on the last cell's origin.
    pub fn mesh(&self) -> (Array2<f64>, Array2<f64>) {
        let x = Array1::linspace(self.x_min, self.x_max, self.ncols);
        let y = Array1::linspace(self.y_min, self.y_max, self.nrows);

        let xv = Array2::from_shape_fn((self.nrows, self.ncols), |(_, col)| x[col]);
        let yv = Array2::from_shape_fn((self.nrows, self.ncols), |(row, _)| y[row]);
        (xv, yv)
    }
}
