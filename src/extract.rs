//! Field extraction from 4-D model variables.
//!
//! Every source variable is shaped `(time, level, row, col)`. Extraction keeps
//! level 0 only and applies the variable's unit conversion.

use ndarray::{Array2, Array3, ArrayView4, ArrayViewD, Axis, Ix4};

use crate::dataset::GridDataset;
use crate::error::{Result, WrfJsonError};
use crate::time_axis::TimeAxis;

/// The vertical level every field is taken from
pub const LEVEL_INDEX: usize = 0;

const KELVIN_OFFSET: f32 = 273.15;

/// Unit conversion applied while extracting a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitConversion {
    /// Values are used as stored
    None,
    /// Kelvin to degrees Celsius
    KelvinToCelsius,
}

impl UnitConversion {
    pub fn apply(self, value: f32) -> f32 {
        match self {
            UnitConversion::None => value,
            UnitConversion::KelvinToCelsius => value - KELVIN_OFFSET,
        }
    }
}

/// Model variables the exporter knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceVariable {
    /// 2 m temperature, Kelvin
    Temperature,
    /// Precipitation rate, mm/h
    PrecipitationRate,
    /// Cloud optical depth
    CloudOpticalDepth,
    /// Convective available potential energy (lightning proxy)
    Cape,
    /// 10 m eastward wind, m/s
    WindU,
    /// 10 m northward wind, m/s
    WindV,
}

impl SourceVariable {
    /// Variable name inside the NetCDF file
    pub fn nc_name(self) -> &'static str {
        match self {
            SourceVariable::Temperature => "T2_K",
            SourceVariable::PrecipitationRate => "PRATE_MMpH",
            SourceVariable::CloudOpticalDepth => "CLOUD_OD",
            SourceVariable::Cape => "CAPE",
            SourceVariable::WindU => "U10_MpS",
            SourceVariable::WindV => "V10_MpS",
        }
    }

    pub fn conversion(self) -> UnitConversion {
        match self {
            SourceVariable::Temperature => UnitConversion::KelvinToCelsius,
            _ => UnitConversion::None,
        }
    }
}

/// Full time series of a variable at level 0, shaped `(time, row, col)`,
/// together with its time axis.
pub fn extract_series(
    dataset: &GridDataset,
    variable: SourceVariable,
) -> Result<(Array3<f32>, TimeAxis)> {
    let axis = TimeAxis::from_dataset(dataset)?;
    let data = level_view(dataset, variable)?;
    check_steps(&data, variable, axis.len())?;

    let series = data.index_axis(Axis(1), LEVEL_INDEX);
    let conversion = variable.conversion();
    let series = series.mapv(|v| conversion.apply(v));
    Ok((series, axis))
}

/// Check that a variable has exactly `expected` timesteps
pub fn check_time_steps(
    dataset: &GridDataset,
    variable: SourceVariable,
    expected: usize,
) -> Result<()> {
    let data = level_view(dataset, variable)?;
    check_steps(&data, variable, expected)
}

fn check_steps(
    data: &ArrayView4<'_, f32>,
    variable: SourceVariable,
    expected: usize,
) -> Result<()> {
    let actual = data.len_of(Axis(0));
    if actual != expected {
        return Err(WrfJsonError::TimeAxisMismatch {
            variable: variable.nc_name().to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// A single `(row, col)` frame of a variable at level 0
pub fn extract_frame(
    dataset: &GridDataset,
    variable: SourceVariable,
    timestep: usize,
) -> Result<Array2<f32>> {
    let data = level_view(dataset, variable)?;

    let steps = data.len_of(Axis(0));
    if timestep >= steps {
        return Err(WrfJsonError::InvalidParameter {
            param: "timestep".to_string(),
            message: format!(
                "Timestep {} out of range for {} ({} steps)",
                timestep,
                variable.nc_name(),
                steps
            ),
        });
    }

    let conversion = variable.conversion();
    let frame = data
        .index_axis(Axis(0), timestep)
        .index_axis(Axis(0), LEVEL_INDEX)
        .mapv(|v| conversion.apply(v));
    Ok(frame)
}

/// View a variable as 4-D, checking that the level axis has an entry at `LEVEL_INDEX`
fn level_view(
    dataset: &GridDataset,
    variable: SourceVariable,
) -> Result<ArrayView4<'_, f32>> {
    let name = variable.nc_name();
    let data: ArrayViewD<'_, f32> = dataset.get_variable_checked(name)?.view();

    let data = data
        .into_dimensionality::<Ix4>()
        .map_err(|_| WrfJsonError::ShapeMismatch {
            message: format!(
                "{} must be shaped (time, level, row, col), found {:?}",
                name,
                dataset.get_variable(name).map(|a| a.shape().to_vec()).unwrap_or_default()
            ),
        })?;

    if data.len_of(Axis(1)) <= LEVEL_INDEX {
        return Err(WrfJsonError::ShapeMismatch {
            message: format!("{} has no vertical level {}", name, LEVEL_INDEX),
        });
    }

    Ok(data)
}
