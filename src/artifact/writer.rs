//! Writes the binary + JSON artifact pair for one (variable, timestep).

use chrono::NaiveDateTime;
use ndarray::ArrayView2;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::binary::{min_max, read_field, write_field};
use super::metadata::MetadataRecord;
use crate::error::{Result, WrfJsonError};
use crate::export::ExportParameters;
use crate::grid::SpatialGrid;

/// Binary file that is removed when dropped unless already removed explicitly
struct TransientFile {
    path: PathBuf,
    armed: bool,
}

impl TransientFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now, reporting failure
    fn remove(mut self) -> std::io::Result<()> {
        self.armed = false;
        fs::remove_file(&self.path)
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed orphaned binary"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove orphaned binary"
            ),
        }
    }
}

/// Write one artifact and return the path of the JSON file.
///
/// The field goes to `{stamp}.bin` under the parameters' output directory, is
/// read back for its statistics, and the record lands in `{stamp}_{region}.json`.
/// The binary never outlives this call, whether it succeeds or fails.
pub fn write_artifact(
    params: &ExportParameters,
    grid: &SpatialGrid,
    field: ArrayView2<'_, f32>,
    timestamp: NaiveDateTime,
) -> Result<PathBuf> {
    if field.dim() != grid.shape() {
        return Err(WrfJsonError::ShapeMismatch {
            message: format!(
                "{} field is {:?}, grid is {:?}",
                params.varname,
                field.dim(),
                grid.shape()
            ),
        });
    }

    let dir = params.output_dir();
    fs::create_dir_all(&dir)?;

    let stamp = timestamp.format("%Y%m%d%H").to_string();
    let binary = TransientFile::new(dir.join(format!("{}.bin", stamp)));
    write_field(binary.path(), field)?;

    let stored = read_field(binary.path(), grid.shape())?;
    let stats = min_max(stored.view());

    let mut record = MetadataRecord::from_grid(grid, &params.region_name, params.color)
        .with_stats(stats)
        .with_data(stored.view());
    record.unit = params.unit.clone();
    record.name = params.varname.clone();
    record.label = params.label.clone();
    record.date = timestamp.format("%Y%m%d").to_string();
    record.hour = timestamp.format("%H").to_string();

    debug!(
        variable = %record.name,
        date = %record.date,
        hour = %record.hour,
        min = ?record.min,
        max = ?record.max,
        remote_prefix = %params.remote_prefix(),
        "Assembled artifact metadata"
    );

    let json_path = dir.join(format!("{}_{}.json", stamp, params.region_name));
    write_json(&json_path, &record)?;

    binary.remove()?;
    Ok(json_path)
}

fn write_json(path: &Path, record: &MetadataRecord) -> Result<()> {
    let value = record.to_json_value()?;
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, &value)?;
    writer.flush()?;
    Ok(())
}
