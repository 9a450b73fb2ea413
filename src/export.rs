//! The export driver: every timestep, every variable, one artifact each.

use ndarray::{Array2, Array3, Axis};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::artifact::{write_artifact, Color};
use crate::config::ExportConfig;
use crate::dataset::GridDataset;
use crate::error::{Result, WrfJsonError};
use crate::extract::{check_time_steps, extract_series, SourceVariable};
use crate::grid::SpatialGrid;
use crate::time_axis::TimeAxis;
use crate::wind::{wind_components, wind_direction, wind_speed};

/// Exported quantities, in export order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportVariable {
    Temperature,
    Precipitation,
    Lightning,
    WindSpeed,
    WindDirection,
}

impl ExportVariable {
    pub const ALL: [ExportVariable; 5] = [
        ExportVariable::Temperature,
        ExportVariable::Precipitation,
        ExportVariable::Lightning,
        ExportVariable::WindSpeed,
        ExportVariable::WindDirection,
    ];

    /// Output directory name and record `name`
    pub fn varname(self) -> &'static str {
        match self {
            ExportVariable::Temperature => "temperature",
            ExportVariable::Precipitation => "precipitation",
            ExportVariable::Lightning => "lightning",
            ExportVariable::WindSpeed => "windspeed",
            ExportVariable::WindDirection => "winddirection",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportVariable::Temperature => "Temperature",
            ExportVariable::Precipitation => "Precipitation",
            ExportVariable::Lightning => "Lightning",
            ExportVariable::WindSpeed => "Wind speed",
            ExportVariable::WindDirection => "Wind direction",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ExportVariable::Temperature => "Degree Celsius",
            ExportVariable::Precipitation => "mm/hr",
            ExportVariable::Lightning => "ppmV",
            ExportVariable::WindSpeed => "m/sec",
            ExportVariable::WindDirection => "angle in 360 degree",
        }
    }

    /// How the exported field is produced
    pub fn field_source(self) -> FieldSource {
        match self {
            ExportVariable::Temperature => FieldSource::Series(SourceVariable::Temperature),
            ExportVariable::Precipitation => FieldSource::Series(SourceVariable::PrecipitationRate),
            ExportVariable::Lightning => FieldSource::Series(SourceVariable::Cape),
            ExportVariable::WindSpeed => FieldSource::WindSpeed,
            ExportVariable::WindDirection => FieldSource::WindDirection,
        }
    }

    /// The model variable a scalar export reads directly; `None` for wind products
    pub fn source(self) -> Option<SourceVariable> {
        match self.field_source() {
            FieldSource::Series(source) => Some(source),
            FieldSource::WindSpeed | FieldSource::WindDirection => None,
        }
    }
}

/// Where an exported field comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// Read straight from a cached level-0 series
    Series(SourceVariable),
    /// Derived from the u/v components of the timestep
    WindSpeed,
    WindDirection,
}

/// Everything the artifact writer needs to label and place one artifact.
///
/// Built fresh for every (variable, timestep) and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportParameters {
    pub date: String,
    pub run: String,
    pub varname: String,
    pub label: String,
    pub unit: String,
    /// Template with one `{}` slot for `date`
    pub output_folder: String,
    pub region_name: String,
    pub color: Color,
    pub bucket: String,
    pub output_bucket: String,
}

impl ExportParameters {
    pub fn for_variable(config: &ExportConfig, variable: ExportVariable) -> Self {
        Self {
            date: config.date.clone(),
            run: config.run.clone(),
            varname: variable.varname().to_string(),
            label: variable.label().to_string(),
            unit: variable.unit().to_string(),
            output_folder: config.output_folder.clone(),
            region_name: config.region_name.clone(),
            color: config.color,
            bucket: config.bucket.clone(),
            output_bucket: config.output_bucket.clone(),
        }
    }

    /// `{output_folder(date)}/{varname}/{run}`
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(self.output_folder.replacen("{}", &self.date, 1))
            .join(&self.varname)
            .join(&self.run)
    }

    /// Object key prefix of the model output this run reads
    pub fn source_prefix(&self) -> String {
        format!("{}/wrfindia-{}-{}Z", self.bucket, self.date, self.run)
    }

    /// Object key prefix this artifact would be published under
    pub fn remote_prefix(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.output_bucket, self.date, self.varname, self.run
        )
    }
}

/// Outcome of a full export run
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// JSON files written, in write order
    pub artifacts: Vec<PathBuf>,
    pub timesteps: usize,
    pub variables: usize,
    pub elapsed: Duration,
}

/// Drives the export of one dataset.
///
/// The time axis, grid and scalar series are derived once up front; wind
/// products are computed per timestep.
pub struct Exporter<'a> {
    dataset: &'a GridDataset,
    config: &'a ExportConfig,
    time_axis: TimeAxis,
    grid: SpatialGrid,
    series: HashMap<SourceVariable, Array3<f32>>,
}

impl<'a> Exporter<'a> {
    pub fn new(dataset: &'a GridDataset, config: &'a ExportConfig) -> Result<Self> {
        let time_axis = TimeAxis::from_dataset(dataset)?;
        let grid = SpatialGrid::from_dataset(dataset)?;

        let mut series = HashMap::new();
        for source in ExportVariable::ALL.iter().filter_map(|v| v.source()) {
            let (data, _) = extract_series(dataset, source)?;
            debug!(variable = source.nc_name(), shape = ?data.shape(), "Extracted series");
            series.insert(source, data);
        }

        // wind is read per timestep, so its time axis is checked here
        for source in [SourceVariable::WindU, SourceVariable::WindV] {
            check_time_steps(dataset, source, time_axis.len())?;
        }

        Ok(Self {
            dataset,
            config,
            time_axis,
            grid,
            series,
        })
    }

    pub fn time_axis(&self) -> &TimeAxis {
        &self.time_axis
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// The field of one exported variable at one timestep
    pub fn field(&self, variable: ExportVariable, timestep: usize) -> Result<Array2<f32>> {
        match variable.field_source() {
            FieldSource::Series(source) => {
                let series = self.series.get(&source).ok_or_else(|| WrfJsonError::DataNotFound {
                    message: format!("Series not loaded: {}", source.nc_name()),
                })?;
                if timestep >= series.len_of(Axis(0)) {
                    return Err(WrfJsonError::InvalidParameter {
                        param: "timestep".to_string(),
                        message: format!("Timestep {} out of range", timestep),
                    });
                }
                Ok(series.index_axis(Axis(0), timestep).to_owned())
            }
            FieldSource::WindSpeed => {
                let (u, v) = wind_components(self.dataset, timestep)?;
                wind_speed(&u, &v)
            }
            FieldSource::WindDirection => {
                let (u, v) = wind_components(self.dataset, timestep)?;
                wind_direction(&u, &v)
            }
        }
    }

    /// Write all variables of one timestep, returning the JSON paths
    pub fn export_timestep(&self, timestep: usize) -> Result<Vec<PathBuf>> {
        let timestamp = self.time_axis.get(timestep)?;

        ExportVariable::ALL
            .iter()
            .map(|&variable| {
                let params = ExportParameters::for_variable(self.config, variable);
                let field = self.field(variable, timestep)?;
                write_artifact(&params, &self.grid, field.view(), timestamp)
            })
            .collect()
    }

    /// Export every timestep; the first failure aborts the run
    pub fn run(&self) -> Result<ExportSummary> {
        let start = Instant::now();
        let mut artifacts = Vec::with_capacity(self.time_axis.len() * ExportVariable::ALL.len());

        info!(
            source = %ExportParameters::for_variable(self.config, ExportVariable::Temperature).source_prefix(),
            timesteps = self.time_axis.len(),
            "Exporting forecast"
        );

        for timestep in 0..self.time_axis.len() {
            let written = self.export_timestep(timestep)?;
            debug!(timestep = timestep, artifacts = written.len(), "Timestep exported");
            artifacts.extend(written);
        }

        Ok(ExportSummary {
            artifacts,
            timesteps: self.time_axis.len(),
            variables: ExportVariable::ALL.len(),
            elapsed: start.elapsed(),
        })
    }
}

/// Export a dataset with the given settings
pub fn export_dataset(dataset: &GridDataset, config: &ExportConfig) -> Result<ExportSummary> {
    Exporter::new(dataset, config)?.run()
}
