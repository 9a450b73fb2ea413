//! Forecast time axis derived from the `SDATE` attribute.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::dataset::GridDataset;
use crate::error::{Result, WrfJsonError};

/// Number of hourly timesteps in one forecast run
pub const FORECAST_HOURS: usize = 96;

/// Hour of day of the first timestep
pub const FORECAST_START_HOUR: u32 = 6;

/// Name of the start-date attribute
pub const SDATE_ATTRIBUTE: &str = "SDATE";

/// Ordered hourly timestamps of one forecast run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeAxis {
    timestamps: Vec<NaiveDateTime>,
}

impl TimeAxis {
    /// Build the axis from a `YYYYDDD` string (year + day of year)
    pub fn from_sdate(sdate: &str) -> Result<Self> {
        let date = parse_sdate(sdate)?;
        let base = date
            .and_hms_opt(FORECAST_START_HOUR, 0, 0)
            .ok_or_else(|| WrfJsonError::Parse {
                message: format!("Invalid start hour {}", FORECAST_START_HOUR),
            })?;

        let timestamps = (0..FORECAST_HOURS)
            .map(|hour| base + Duration::hours(hour as i64))
            .collect();

        Ok(Self { timestamps })
    }

    /// Build the axis from the dataset's `SDATE` attribute
    pub fn from_dataset(dataset: &GridDataset) -> Result<Self> {
        let sdate = dataset.attribute_text(SDATE_ATTRIBUTE)?;
        Self::from_sdate(&sdate)
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Timestamp of a timestep, or `InvalidParameter` when out of range
    pub fn get(&self, timestep: usize) -> Result<NaiveDateTime> {
        self.timestamps
            .get(timestep)
            .copied()
            .ok_or_else(|| WrfJsonError::InvalidParameter {
                param: "timestep".to_string(),
                message: format!(
                    "Timestep {} is outside the forecast horizon (0..{})",
                    timestep,
                    self.timestamps.len()
                ),
            })
    }

    pub fn first(&self) -> Option<NaiveDateTime> {
        self.timestamps.first().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NaiveDateTime> {
        self.timestamps.iter()
    }
}

/// Parse `YYYYDDD` into a calendar date
fn parse_sdate(sdate: &str) -> Result<NaiveDate> {
    let sdate = sdate.trim();
    if sdate.len() != 7 || !sdate.chars().all(|c| c.is_ascii_digit()) {
        return Err(WrfJsonError::Parse {
            message: format!("SDATE '{}' is not in YYYYDDD format", sdate),
        });
    }

    let (year, ordinal) = sdate.split_at(4);
    let year: i32 = year.parse().map_err(|e| WrfJsonError::Parse {
        message: format!("SDATE '{}' has an invalid year: {}", sdate, e),
    })?;
    let ordinal: u32 = ordinal.parse().map_err(|e| WrfJsonError::Parse {
        message: format!("SDATE '{}' has an invalid day of year: {}", sdate, e),
    })?;

    NaiveDate::from_yo_opt(year, ordinal).ok_or_else(|| WrfJsonError::Parse {
        message: format!("SDATE '{}': day {} does not exist in {}", sdate, ordinal, year),
    })
}
