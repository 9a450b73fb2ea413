//! # wrfjson
//!
//! Exports WRF forecast fields from a NetCDF file into per-hour JSON artifacts.
//!
//! For every hourly timestep of a 96-hour run, and for each of temperature,
//! precipitation, lightning (CAPE), wind speed and wind direction, the field is
//! written as a flat `f32` binary, read back for its min/max, and published as
//! `{YYYYMMDDHH}_isc.json` under `{output_folder}/{variable}/{run}/`.
//!
//! ## Architecture
//!
//! - **Data Layer**: [`data_loader`] reads NetCDF into a [`GridDataset`]
//! - **Derivation**: [`time_axis`], [`grid`], [`extract`] and [`wind`]
//! - **Output**: [`artifact`] writes the file pair, [`export`] drives the run

pub mod artifact;
pub mod config;
#[cfg(feature = "netcdf")]
pub mod data_loader;
pub mod dataset;
pub mod error;
pub mod export;
pub mod extract;
pub mod grid;
pub mod logging;
pub mod time_axis;
pub mod wind;

pub use config::{Config, ExportConfig};
pub use dataset::{AttributeValue, GridDataset};
pub use error::{Result, WrfJsonError};
pub use export::{
    export_dataset, ExportParameters, ExportSummary, ExportVariable, Exporter, FieldSource,
};
pub use grid::{GeoExtent, SpatialGrid};
pub use logging::{
    generate_operation_id, init_tracing, log_dataset_stats, log_error, log_export_stats,
    log_operation_end, log_operation_start, log_timed_operation,
};
pub use time_axis::TimeAxis;
