//! NetCDF data loading functionality.
//!
//! This module reads an IOAPI-style WRF NetCDF file into a [`GridDataset`]:
//! every global attribute, and every variable that converts to `f32`.

use ndarray::{Array, IxDyn};
use netcdf::{self, Attribute, Variable as NetCDFVariable};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::dataset::{AttributeValue, GridDataset};
use crate::error::{Result, WrfJsonError};

/// Load a NetCDF file into memory and check it has what an export needs
pub fn load_netcdf(path: &Path) -> Result<GridDataset> {
    let dataset = load_netcdf_file(path)?;
    dataset.validate()?;
    Ok(dataset)
}

/// Load a NetCDF file into memory without schema validation
pub fn load_netcdf_file(path: &Path) -> Result<GridDataset> {
    // Check if the file exists
    if !path.exists() {
        return Err(WrfJsonError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }

    let file = netcdf::open(path)?;

    info!("Opened NetCDF file: {}", path.display());
    debug!("File has {} variables", file.variables().count());
    debug!("File has {} dimensions", file.dimensions().count());

    let mut attributes = HashMap::new();
    for attr in file.attributes() {
        let value = convert_attribute(&attr)?;
        attributes.insert(attr.name().to_string(), value);
    }

    let mut variables = HashMap::new();
    for var in file.variables() {
        match convert_variable_to_array(&var) {
            Ok(array) => {
                variables.insert(var.name().to_string(), array);
            }
            Err(e) => warn!("Skipping unsupported variable {}: {}", var.name(), e),
        }
    }

    Ok(GridDataset::new(attributes, variables))
}

/// Convert a NetCDF attribute to our AttributeValue enum
fn convert_attribute(attr: &Attribute) -> Result<AttributeValue> {
    use netcdf::AttributeValue as NcAttributeValue;

    let value = attr.value()?;

    match value {
        // String types
        NcAttributeValue::Str(s) => Ok(AttributeValue::Text(s)),

        // Numeric types - store as f64 for simplicity
        NcAttributeValue::Uchar(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Schar(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Short(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Int(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Float(v) => Ok(AttributeValue::Number(v as f64)),
        NcAttributeValue::Double(v) => Ok(AttributeValue::Number(v)),

        // IOAPI files carry a few array attributes (VGLVLS, ...)
        NcAttributeValue::Shorts(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Ints(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Floats(v) => Ok(AttributeValue::NumberArray(
            v.into_iter().map(|x| x as f64).collect(),
        )),
        NcAttributeValue::Doubles(v) => Ok(AttributeValue::NumberArray(v)),

        other => Ok(AttributeValue::Text(format!("{:?}", other))),
    }
}

/// Read a NetCDF variable as `f32`; the library converts other numeric types
fn convert_variable_to_array(var: &NetCDFVariable) -> Result<Array<f32, IxDyn>> {
    let shape: Vec<usize> = var.dimensions().iter().map(|dim| dim.len()).collect();
    let data: Vec<f32> = var.get_values::<f32, _>(&[] as &[netcdf::Extent])?;
    Ok(Array::from_shape_vec(IxDyn(&shape), data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Create a small IOAPI-like file: 2 timesteps, 1 layer, 3 rows, 4 cols
    fn create_test_netcdf_file(path: &Path, sdate: i32) -> Result<()> {
        let mut file = netcdf::create(path)?;

        file.add_dimension("TSTEP", 2)?;
        file.add_dimension("LAY", 1)?;
        file.add_dimension("ROW", 3)?;
        file.add_dimension("COL", 4)?;

        file.add_attribute("SDATE", sdate)?;
        file.add_attribute("XORIG", 70.0f64)?;
        file.add_attribute("YORIG", 5.0f64)?;
        file.add_attribute("XCELL", 0.1f64)?;
        file.add_attribute("YCELL", 0.1f64)?;
        file.add_attribute("NCOLS", 4i32)?;
        file.add_attribute("NROWS", 3i32)?;
        file.add_attribute("GDNAM", "ISC")?;

        let data: Vec<f32> = (0..24).map(|i| 270.0 + i as f32).collect();
        for name in ["T2_K", "PRATE_MMpH", "CAPE", "U10_MpS", "V10_MpS"] {
            let mut var = file.add_variable::<f32>(name, &["TSTEP", "LAY", "ROW", "COL"])?;
            var.put_attribute("units", "arbitrary")?;
            var.put_values(&data, &[.., .., .., ..])?;
        }

        Ok(())
    }

    #[test]
    fn test_file_not_found() {
        let result = load_netcdf_file(Path::new("/nonexistent/file.nc"));
        assert!(result.is_err());
        match result.unwrap_err() {
            WrfJsonError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            _ => panic!("Expected IO error"),
        }
    }

    #[test]
    fn test_netcdf_loading() -> Result<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.nc");
        create_test_netcdf_file(&file_path, 2020248)?;

        let dataset = load_netcdf_file(&file_path)?;

        assert_eq!(dataset.attribute_text("SDATE")?, "2020248");
        assert_eq!(dataset.attribute_f64("XORIG")?, 70.0);
        assert_eq!(dataset.attribute_usize("NCOLS")?, 4);
        assert_eq!(dataset.attribute_text("GDNAM")?, "ISC");

        let t2 = dataset.get_variable_checked("T2_K")?;
        assert_eq!(t2.shape(), &[2, 1, 3, 4]);
        assert_eq!(t2[[0, 0, 0, 0]], 270.0);
        assert_eq!(t2[[0, 0, 0, 1]], 271.0);
        assert_eq!(t2[[1, 0, 2, 3]], 293.0);

        Ok(())
    }

    #[test]
    fn test_validation() -> Result<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.nc");
        create_test_netcdf_file(&file_path, 2020248)?;

        assert!(load_netcdf(&file_path).is_ok());
        Ok(())
    }
}
