//! Per-timestep artifacts: a transient binary sample file and a persistent
//! JSON metadata/payload file.
//!
//! The binary is flat little-endian `f32` in row-major order. It only lives
//! long enough for the statistics to be read back from it.

pub mod binary;
pub mod metadata;
pub mod writer;

pub use binary::{min_max, read_field, write_field};
pub use metadata::{round2, round_floats, Color, MetadataRecord, DEFAULT_COLOR, DEFAULT_REGION_NAME};
pub use writer::write_artifact;
