//! Logging utilities for wrfjson.
//!
//! This module provides structured logging functionality so export runs leave
//! searchable, per-operation records.

use std::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::dataset::GridDataset;
use crate::export::ExportSummary;

/// Initialize the tracing subscriber with the given log level
pub fn init_tracing(log_level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(val) => val,
        Err(_) => log_level.to_string(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Log a start message for a significant operation
pub fn log_operation_start(operation: &str, details: Option<&str>) {
    if let Some(details) = details {
        info!(
            operation = operation,
            details = details,
            "Starting operation"
        );
    } else {
        info!(operation = operation, "Starting operation");
    }
}

/// Log the completion of a significant operation
pub fn log_operation_end(operation: &str, start_time: Instant, success: bool) {
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;

    if success {
        info!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation completed successfully"
        );
    } else {
        warn!(
            operation = operation,
            duration_ms = duration_ms,
            "Operation failed"
        );
    }
}

/// Log an operation with timing and result in a single statement
pub fn log_timed_operation<F, R>(operation: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let operation_id = generate_operation_id();

    debug!(
        operation = operation,
        operation_id = %operation_id,
        "Starting operation"
    );

    let result = f();

    info!(
        operation = operation,
        operation_id = %operation_id,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Operation completed"
    );

    result
}

/// Log detailed information about the loaded dataset
pub fn log_dataset_stats(file_path: &str, dataset: &GridDataset) {
    let var_names = dataset.variable_names();
    info!(
        operation = "data_load",
        file_path = file_path,
        var_count = var_names.len(),
        vars = %var_names.join(", "),
        attr_count = dataset.attributes.len(),
        memory_mb = dataset.memory_usage() / (1024 * 1024),
        "Dataset loaded successfully"
    );
}

/// Log the outcome of an export run
pub fn log_export_stats(summary: &ExportSummary) {
    info!(
        operation = "export",
        artifacts = summary.artifacts.len(),
        timesteps = summary.timesteps,
        variables = summary.variables,
        duration_ms = summary.elapsed.as_secs_f64() * 1000.0,
        "Export finished"
    );
}

/// Log an error with context
pub fn log_error(error: &crate::error::WrfJsonError, context: &str) {
    error!(
        error = %error,
        context = context,
        error_type = std::any::type_name_of_val(error),
        "Error occurred"
    );
}

/// Generate a unique operation ID
pub fn generate_operation_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_generate_operation_id() {
        let id1 = generate_operation_id();
        let id2 = generate_operation_id();

        assert!(!id1.is_empty());
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_log_timed_operation() {
        let result = log_timed_operation("test_operation", || {
            std::thread::sleep(Duration::from_millis(1));
            42
        });

        assert_eq!(result, 42);
    }

    #[test]
    fn test_log_stats_do_not_panic() {
        let dataset = GridDataset::default().with_attribute("SDATE", 2020248);
        log_dataset_stats("memory", &dataset);

        let summary = ExportSummary {
            artifacts: Vec::new(),
            timesteps: 96,
            variables: 5,
            elapsed: Duration::from_millis(3),
        };
        log_export_stats(&summary);
        log_error(
            &crate::error::WrfJsonError::Config {
                message: "bad".to_string(),
            },
            "test",
        );
    }
}
