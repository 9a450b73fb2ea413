//! Prints the schema of a WRF NetCDF file as the exporter sees it:
//! global attributes, variables, time axis and grid geometry.

use anyhow::{Context, Result};
use std::path::PathBuf;

use wrfjson::data_loader::load_netcdf_file;
use wrfjson::{SpatialGrid, TimeAxis};

fn main() -> Result<()> {
    let file_path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("usage: inspect_wrf <NETCDF_FILE>")?;

    println!("Inspecting NetCDF file: {}", file_path.display());

    let dataset = load_netcdf_file(&file_path)
        .with_context(|| format!("failed to load {}", file_path.display()))?;

    println!("\nGlobal Attributes:");
    let mut names: Vec<&String> = dataset.attributes.keys().collect();
    names.sort();
    for name in names {
        println!("  {}: {:?}", name, dataset.attributes[name]);
    }

    println!("\nVariables:");
    for name in dataset.variable_names() {
        let data = &dataset.variables[name];
        let (lo, hi) = data
            .iter()
            .filter(|v| !v.is_nan())
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        println!("  {} {:?} range [{}, {}]", name, data.shape(), lo, hi);
    }

    println!("\nTime Axis:");
    match TimeAxis::from_dataset(&dataset) {
        Ok(axis) => {
            let first = axis.first().context("empty time axis")?;
            let last = axis.get(axis.len() - 1)?;
            println!("  {} steps, {} .. {}", axis.len(), first, last);
        }
        Err(e) => println!("  unavailable: {}", e),
    }

    println!("\nGrid:");
    match SpatialGrid::from_dataset(&dataset) {
        Ok(grid) => {
            let extent = grid.extent();
            println!("  {} rows x {} cols", grid.nrows, grid.ncols);
            println!("  cell {} x {}", grid.x_cell, grid.y_cell);
            println!(
                "  extent W {} S {} E {} N {}",
                extent.west, extent.south, extent.east, extent.north
            );
        }
        Err(e) => println!("  unavailable: {}", e),
    }

    match dataset.validate() {
        Ok(()) => println!("\nDataset is ready for export"),
        Err(e) => println!("\nDataset cannot be exported: {}", e),
    }

    Ok(())
}
