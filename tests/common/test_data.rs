//! Test data generation utilities.
//!
//! This module writes small IOAPI-style WRF NetCDF files with known values so
//! the exporter's output can be checked exactly.

#![allow(dead_code)]

use netcdf::Error;
use std::path::Path;

type Result<T> = std::result::Result<T, Error>;

/// Shape and start date of a synthetic WRF file
#[derive(Debug, Clone)]
pub struct WrfFixture {
    pub sdate: i32,
    pub timesteps: usize,
    pub layers: usize,
    pub nrows: usize,
    pub ncols: usize,
}

impl Default for WrfFixture {
    fn default() -> Self {
        Self {
            sdate: 2020248,
            timesteps: 96,
            layers: 1,
            nrows: 3,
            ncols: 4,
        }
    }
}

impl WrfFixture {
    /// 2 m temperature: 300 K at timestep 0, one kelvin warmer every hour
    pub fn temperature(&self, t: usize, _row: usize, _col: usize) -> f32 {
        300.0 + t as f32
    }

    /// Precipitation grows left to right, bottom to top
    pub fn precipitation(&self, _t: usize, row: usize, col: usize) -> f32 {
        (row * self.ncols + col) as f32 * 0.5
    }

    pub fn cape(&self, t: usize, _row: usize, _col: usize) -> f32 {
        1000.0 + t as f32
    }

    /// Air moving due south at 1 m/s everywhere
    pub fn wind(&self) -> (f32, f32) {
        (0.0, -1.0)
    }
}

/// Creates a WRF-like NetCDF file with the IOAPI global attributes.
///
/// Variables are shaped `(TSTEP, LAY, ROW, COL)`. Layers above the first hold
/// a sentinel value the exporter must never read.
pub fn create_wrf_nc(path: &Path, fixture: &WrfFixture) -> Result<()> {
    let mut file = netcdf::create(path)?;

    file.add_dimension("TSTEP", fixture.timesteps)?;
    file.add_dimension("LAY", fixture.layers)?;
    file.add_dimension("ROW", fixture.nrows)?;
    file.add_dimension("COL", fixture.ncols)?;

    file.add_attribute("SDATE", fixture.sdate)?;
    file.add_attribute("STIME", 0i32)?;
    file.add_attribute("XORIG", 70.0f64)?;
    file.add_attribute("YORIG", 5.0f64)?;
    file.add_attribute("XCELL", 0.1f64)?;
    file.add_attribute("YCELL", 0.1f64)?;
    file.add_attribute("NCOLS", fixture.ncols as i32)?;
    file.add_attribute("NROWS", fixture.nrows as i32)?;
    file.add_attribute("GDNAM", "ISC")?;

    let (u, v) = fixture.wind();
    let variables: [(&str, &str, Box<dyn Fn(usize, usize, usize) -> f32 + '_>); 6] = [
        ("T2_K", "K", Box::new(|t, r, c| fixture.temperature(t, r, c))),
        ("PRATE_MMpH", "mm/h", Box::new(|t, r, c| fixture.precipitation(t, r, c))),
        ("CLOUD_OD", "1", Box::new(|_, _, _| 2.0)),
        ("CAPE", "J/kg", Box::new(|t, r, c| fixture.cape(t, r, c))),
        ("U10_MpS", "m/s", Box::new(move |_, _, _| u)),
        ("V10_MpS", "m/s", Box::new(move |_, _, _| v)),
    ];

    for (name, units, value) in variables.iter() {
        let mut data = Vec::with_capacity(
            fixture.timesteps * fixture.layers * fixture.nrows * fixture.ncols,
        );
        for t in 0..fixture.timesteps {
            for layer in 0..fixture.layers {
                for row in 0..fixture.nrows {
                    for col in 0..fixture.ncols {
                        data.push(if layer == 0 { value(t, row, col) } else { -9999.0 });
                    }
                }
            }
        }

        let mut var = file.add_variable::<f32>(name, &["TSTEP", "LAY", "ROW", "COL"])?;
        var.put_attribute("units", *units)?;
        var.put_values(&data, &[.., .., .., ..])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_wrf_nc() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("wrf.nc");

        assert!(create_wrf_nc(&file_path, &WrfFixture::default()).is_ok());
        assert!(file_path.exists());

        let nc_file = netcdf::open(&file_path).unwrap();
        assert!(nc_file.variable("T2_K").is_some());
        assert_eq!(nc_file.dimension("TSTEP").unwrap().len(), 96);
        assert_eq!(nc_file.dimension("COL").unwrap().len(), 4);
    }
}
