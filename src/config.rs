//! Configuration management for wrfjson.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::artifact::{Color, DEFAULT_COLOR, DEFAULT_REGION_NAME};
use crate::error::{Result, WrfJsonError};

/// Command-line arguments for wrfjson
#[derive(Parser, Debug)]
#[command(name = "wrfjson")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the WRF NetCDF file to export
    pub netcdf_file: PathBuf,

    /// Run date (YYYYMMDD), substituted into the output folder template
    #[arg(short, long, env = "WRFJSON_DATE")]
    pub date: Option<String>,

    /// Model run cycle (00-23)
    #[arg(short, long, env = "WRFJSON_RUN")]
    pub run: Option<String>,

    /// Output folder template; `{}` is replaced by the run date
    #[arg(short, long, env = "WRFJSON_OUTPUT_FOLDER")]
    pub output_folder: Option<String>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "WRFJSON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "WRFJSON_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Run date, YYYYMMDD
    #[serde(default = "default_date")]
    pub date: String,

    /// Run cycle, two digits
    #[serde(default = "default_run")]
    pub run: String,

    /// Output folder template with one `{}` slot for the date
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Region tag written into records and JSON file names
    #[serde(default = "default_region_name")]
    pub region_name: String,

    /// Display color written into every record
    #[serde(default)]
    pub color: Color,

    /// Bucket the model output is fetched from
    #[serde(default = "default_bucket")]
    pub bucket: String,

    /// Bucket the artifacts are published to
    #[serde(default = "default_output_bucket")]
    pub output_bucket: String,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        let args = Args::parse();
        Self::from_args(args)
    }

    /// Resolve configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(date) = args.date {
            config.export.date = date;
        }
        if let Some(run) = args.run {
            config.export.run = run;
        }
        if let Some(output_folder) = args.output_folder {
            config.export.output_folder = output_folder;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok((config, args.netcdf_file))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.export = other.export;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.export.validate()?;

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(WrfJsonError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl ExportConfig {
    /// Validate the export settings
    pub fn validate(&self) -> Result<()> {
        if self.date.len() != 8 || NaiveDate::parse_from_str(&self.date, "%Y%m%d").is_err() {
            return Err(WrfJsonError::Config {
                message: format!("Invalid run date: {}. Expected YYYYMMDD", self.date),
            });
        }

        let run_ok = self.run.len() == 2
            && self.run.parse::<u8>().map(|h| h < 24).unwrap_or(false);
        if !run_ok {
            return Err(WrfJsonError::Config {
                message: format!("Invalid run: {}. Expected 00-23", self.run),
            });
        }

        if self.output_folder.trim().is_empty() {
            return Err(WrfJsonError::Config {
                message: "Output folder cannot be empty".to_string(),
            });
        }
        if self.output_folder.matches("{}").count() > 1 {
            return Err(WrfJsonError::Config {
                message: format!(
                    "Output folder template {} has more than one {{}} slot",
                    self.output_folder
                ),
            });
        }

        if self.region_name.trim().is_empty() {
            return Err(WrfJsonError::Config {
                message: "Region name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: ExportConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            date: default_date(),
            run: default_run(),
            output_folder: default_output_folder(),
            region_name: default_region_name(),
            color: DEFAULT_COLOR,
            bucket: default_bucket(),
            output_bucket: default_output_bucket(),
        }
    }
}

// Default value functions for serde
fn default_date() -> String {
    "20200904".to_string()
}

fn default_run() -> String {
    "00".to_string()
}

fn default_output_folder() -> String {
    "/tmp/{}".to_string()
}

fn default_region_name() -> String {
    DEFAULT_REGION_NAME.to_string()
}

fn default_bucket() -> String {
    "wrf-daily-output-dump".to_string()
}

fn default_output_bucket() -> String {
    "ofish-data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
