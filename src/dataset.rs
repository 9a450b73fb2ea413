//! In-memory representation of a gridded model output.
//!
//! A [`GridDataset`] holds the global attributes of an IOAPI-style WRF file
//! together with its data variables, each shaped `(time, level, row, col)`.

use ndarray::{Array, IxDyn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, WrfJsonError};

/// Possible attribute values in NetCDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// String attribute
    Text(String),
    /// Numeric attribute (stored as f64 for simplicity)
    Number(f64),
    /// Array of numbers
    NumberArray(Vec<f64>),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Number(value as f64)
    }
}

/// A gridded dataset: global attributes plus named `f32` arrays.
#[derive(Debug, Clone, Default)]
pub struct GridDataset {
    /// File-level attributes (`SDATE`, `XORIG`, `NCOLS`, ...)
    pub attributes: HashMap<String, AttributeValue>,
    /// Loaded data arrays keyed by variable name
    pub variables: HashMap<String, Array<f32, IxDyn>>,
}

impl GridDataset {
    /// Create a new dataset
    pub fn new(
        attributes: HashMap<String, AttributeValue>,
        variables: HashMap<String, Array<f32, IxDyn>>,
    ) -> Self {
        Self {
            attributes,
            variables,
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Builder-style variable setter
    pub fn with_variable(mut self, name: &str, data: Array<f32, IxDyn>) -> Self {
        self.variables.insert(name.to_string(), data);
        self
    }

    /// Get an attribute, failing if it is absent
    pub fn attribute(&self, name: &str) -> Result<&AttributeValue> {
        self.attributes
            .get(name)
            .ok_or_else(|| WrfJsonError::MissingAttribute {
                name: name.to_string(),
            })
    }

    /// Get a numeric attribute as f64.
    ///
    /// Single-element arrays are accepted, as are text values that parse as numbers.
    pub fn attribute_f64(&self, name: &str) -> Result<f64> {
        match self.attribute(name)? {
            AttributeValue::Number(v) => Ok(*v),
            AttributeValue::NumberArray(values) if values.len() == 1 => Ok(values[0]),
            AttributeValue::Text(s) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|e| WrfJsonError::InvalidAttribute {
                        name: name.to_string(),
                        message: format!("'{}' is not numeric: {}", s, e),
                    })
            }
            other => Err(WrfJsonError::InvalidAttribute {
                name: name.to_string(),
                message: format!("expected a scalar number, found {:?}", other),
            }),
        }
    }

    /// Get a count attribute (`NCOLS`, `NROWS`) as usize
    pub fn attribute_usize(&self, name: &str) -> Result<usize> {
        let value = self.attribute_f64(name)?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(WrfJsonError::InvalidAttribute {
                name: name.to_string(),
                message: format!("expected a non-negative integer, found {}", value),
            });
        }
        Ok(value as usize)
    }

    /// Render an attribute as text. Integral numbers print without a fractional part,
    /// so an integer `SDATE` of 2020248 becomes "2020248".
    pub fn attribute_text(&self, name: &str) -> Result<String> {
        match self.attribute(name)? {
            AttributeValue::Text(s) => Ok(s.trim().to_string()),
            AttributeValue::Number(v) if v.fract() == 0.0 => Ok(format!("{}", *v as i64)),
            AttributeValue::Number(v) => Ok(v.to_string()),
            other => Err(WrfJsonError::InvalidAttribute {
                name: name.to_string(),
                message: format!("expected text, found {:?}", other),
            }),
        }
    }

    /// Get a variable's data array
    pub fn get_variable(&self, name: &str) -> Option<&Array<f32, IxDyn>> {
        self.variables.get(name)
    }

    /// Get a variable's data array with error handling
    pub fn get_variable_checked(&self, name: &str) -> Result<&Array<f32, IxDyn>> {
        self.variables
            .get(name)
            .ok_or_else(|| WrfJsonError::DataNotFound {
                message: format!("Variable not found: {}", name),
            })
    }

    /// Check if a variable exists
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Sorted variable names
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Approximate memory held by the data arrays, in bytes
    pub fn memory_usage(&self) -> usize {
        self.variables
            .values()
            .map(|a| a.len() * std::mem::size_of::<f32>())
            .sum()
    }

    /// Check that the dataset carries the attribute schema and variables an export reads
    pub fn validate(&self) -> Result<()> {
        for name in REQUIRED_ATTRIBUTES {
            self.attribute(name)?;
        }

        let nrows = self.attribute_usize("NROWS")?;
        let ncols = self.attribute_usize("NCOLS")?;

        for name in REQUIRED_VARIABLES {
            let data = self.get_variable_checked(name)?;
            let shape = data.shape();
            if shape.len() != 4 {
                return Err(WrfJsonError::ShapeMismatch {
                    message: format!(
                        "Variable {} must be shaped (time, level, row, col), found {:?}",
                        name, shape
                    ),
                });
            }
            if shape[2] != nrows || shape[3] != ncols {
                return Err(WrfJsonError::ShapeMismatch {
                    message: format!(
                        "Variable {} grid is {}x{}, attributes say {}x{}",
                        name, shape[2], shape[3], nrows, ncols
                    ),
                });
            }
        }

        Ok(())
    }
}

/// Global attributes every export needs
pub const REQUIRED_ATTRIBUTES: [&str; 7] =
    ["SDATE", "XORIG", "YORIG", "XCELL", "YCELL", "NCOLS", "NROWS"];

/// Variables every export reads
pub const REQUIRED_VARIABLES: [&str; 5] = ["T2_K", "PRATE_MMpH", "CAPE", "U10_MpS", "V10_MpS"];

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ArrayD;

    fn sample() -> GridDataset {
        GridDataset::default()
            .with_attribute("SDATE", 2020248)
            .with_attribute("XORIG", 70.0)
            .with_attribute("NCOLS", 100)
            .with_attribute("GDNAM", "  ISC_GRID ")
            .with_variable("T2_K", ArrayD::zeros(IxDyn(&[2, 1, 3, 4])))
    }

    #[test]
    fn test_attribute_value_serialization() {
        let text = AttributeValue::Text("test".to_string());
        let json = serde_json::to_string(&text).unwrap();
        assert_eq!(json, r#""test""#);

        let number = AttributeValue::Number(42.0);
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "42.0");

        let array = AttributeValue::NumberArray(vec![1.0, 2.0, 3.0]);
        let json = serde_json::to_string(&array).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0]");
    }

    #[test]
    fn test_numeric_attributes() {
        let ds = sample();
        assert_eq!(ds.attribute_f64("XORIG").unwrap(), 70.0);
        assert_eq!(ds.attribute_usize("NCOLS").unwrap(), 100);
        assert!(matches!(
            ds.attribute_f64("GDNAM"),
            Err(WrfJsonError::InvalidAttribute { .. })
        ));
    }

    #[test]
    fn test_fractional_count_rejected() {
        let ds = GridDataset::default().with_attribute("NROWS", 2.5);
        assert!(ds.attribute_usize("NROWS").is_err());
    }

    #[test]
    fn test_missing_attribute() {
        let ds = sample();
        match ds.attribute_f64("YCELL") {
            Err(WrfJsonError::MissingAttribute { name }) => assert_eq!(name, "YCELL"),
            other => panic!("Expected MissingAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_attribute_text() {
        let ds = sample();
        assert_eq!(ds.attribute_text("SDATE").unwrap(), "2020248");
        assert_eq!(ds.attribute_text("GDNAM").unwrap(), "ISC_GRID");
    }

    #[test]
    fn test_variable_lookup() {
        let ds = sample();
        assert!(ds.has_variable("T2_K"));
        assert!(ds.get_variable("CAPE").is_none());
        assert!(matches!(
            ds.get_variable_checked("CAPE"),
            Err(WrfJsonError::DataNotFound { .. })
        ));
        assert_eq!(ds.variable_names(), vec!["T2_K"]);
        assert_eq!(ds.memory_usage(), 24 * 4);
    }

    fn complete(shape: &[usize]) -> GridDataset {
        let mut ds = GridDataset::default()
            .with_attribute("SDATE", 2020248)
            .with_attribute("XORIG", 70.0)
            .with_attribute("YORIG", 5.0)
            .with_attribute("XCELL", 0.1)
            .with_attribute("YCELL", 0.1)
            .with_attribute("NCOLS", 4)
            .with_attribute("NROWS", 3);
        for name in REQUIRED_VARIABLES {
            ds = ds.with_variable(name, ArrayD::zeros(IxDyn(shape)));
        }
        ds
    }

    #[test]
    fn test_validate() {
        assert!(complete(&[2, 1, 3, 4]).validate().is_ok());
        assert!(matches!(
            complete(&[2, 1, 4, 3]).validate(),
            Err(WrfJsonError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            complete(&[2, 3, 4]).validate(),
            Err(WrfJsonError::ShapeMismatch { .. })
        ));

        let mut ds = complete(&[2, 1, 3, 4]);
        ds.attributes.remove("SDATE");
        assert!(matches!(
            ds.validate(),
            Err(WrfJsonError::MissingAttribute { .. })
        ));

        let mut ds = complete(&[2, 1, 3, 4]);
        ds.variables.remove("V10_MpS");
        assert!(matches!(ds.validate(), Err(WrfJsonError::DataNotFound { .. })));
    }
}
