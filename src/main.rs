//! wrfjson - exports WRF forecast fields into per-hour JSON artifacts
//!
//! This is the main entry point for the wrfjson command-line tool.

use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

use wrfjson::data_loader::load_netcdf;
use wrfjson::{
    init_tracing, log_dataset_stats, log_error, log_export_stats, log_operation_end,
    log_operation_start, log_timed_operation, Config, Exporter, Result,
};

fn main() -> ExitCode {
    // Load configuration before tracing so the configured level applies
    let (config, netcdf_path) = match Config::load() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log_level);
    info!("Starting wrfjson v{}", env!("CARGO_PKG_VERSION"));

    match run(&config, &netcdf_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&e, "export");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, netcdf_path: &std::path::Path) -> Result<()> {
    config.validate()?;

    let dataset = log_timed_operation("load_netcdf", || load_netcdf(netcdf_path))?;
    log_dataset_stats(&netcdf_path.display().to_string(), &dataset);

    let start = Instant::now();
    let details = format!("run {} {}Z", config.export.date, config.export.run);
    log_operation_start("export", Some(details.as_str()));

    let result = Exporter::new(&dataset, &config.export).and_then(|exporter| exporter.run());
    log_operation_end("export", start, result.is_ok());

    let summary = result?;
    log_export_stats(&summary);
    Ok(())
}
