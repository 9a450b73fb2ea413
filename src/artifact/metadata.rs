//! The JSON metadata/payload record written for every artifact.

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::Result;
use crate::grid::SpatialGrid;

/// Region tag written into every record and JSON file name
pub const DEFAULT_REGION_NAME: &str = "isc";

/// Display color attached to every record
pub const DEFAULT_COLOR: Color = Color {
    red: 153,
    green: 0,
    blue: 0,
};

/// Decimal places kept for every float in the JSON output
pub const JSON_DECIMALS: i32 = 2;

/// RGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Default for Color {
    fn default() -> Self {
        DEFAULT_COLOR
    }
}

/// One artifact's metadata plus its full data payload.
///
/// Field order is the key order of the written JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub region_name: String,
    /// Lower-left latitude (`YORIG`)
    pub ll_lat: f64,
    /// Lower-left longitude (`XORIG`)
    pub ll_lon: f64,
    pub ny: usize,
    pub nx: usize,
    pub resolution_gridx: f64,
    pub resolution_gridy: f64,
    /// `None` (JSON null) when every cell is NaN
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit: String,
    pub name: String,
    pub label: String,
    /// `YYYYMMDD`
    pub date: String,
    /// `HH`
    pub hour: String,
    pub color: Color,
    pub data_array: Vec<Vec<f64>>,
}

impl MetadataRecord {
    /// Copy the grid description into a new record; text fields start empty.
    pub fn from_grid(grid: &SpatialGrid, region_name: &str, color: Color) -> Self {
        Self {
            region_name: region_name.to_string(),
            ll_lat: grid.y_min,
            ll_lon: grid.x_min,
            ny: grid.nrows,
            nx: grid.ncols,
            resolution_gridx: grid.x_cell,
            resolution_gridy: grid.y_cell,
            min: None,
            max: None,
            unit: String::new(),
            name: String::new(),
            label: String::new(),
            date: String::new(),
            hour: String::new(),
            color,
            data_array: Vec::new(),
        }
    }

    pub fn with_stats(mut self, stats: Option<(f32, f32)>) -> Self {
        self.min = stats.map(|(lo, _)| lo as f64);
        self.max = stats.map(|(_, hi)| hi as f64);
        self
    }

    pub fn with_data(mut self, field: ArrayView2<'_, f32>) -> Self {
        self.data_array = field
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&v| v as f64).collect())
            .collect();
        self
    }

    /// The record as JSON with every float rounded to two decimals
    pub fn to_json_value(&self) -> Result<Value> {
        Ok(round_floats(serde_json::to_value(self)?))
    }
}

/// Round a float to two decimals, ties to even.
///
/// Fields are `f32`, so `value * 100` is exact and a tie here is a true tie
/// of the stored value: 0.125 becomes 0.12 and 0.375 becomes 0.38.
pub fn round2(value: f64) -> f64 {
    let scale = 10f64.powi(JSON_DECIMALS);
    (value * scale).round_ties_even() / scale
}

/// Round every float reachable in `value`, leaving integers and strings alone
pub fn round_floats(value: Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64().map(round2).and_then(Number::from_f64) {
            Some(rounded) => Value::Number(rounded),
            None => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(round_floats).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, round_floats(v)))
                .collect(),
        ),
        other => other,
    }
}
