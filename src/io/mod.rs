//! I/O utilities for dataset snapshots.
//!
//! Generated datasets can be written to and replayed from NDJSON files so a
//! demo session can be reproduced.

pub mod ndjson;

// Re-export commonly used types and functions
pub use ndjson::{load_dataset, parse_ndjson_file, save_dataset, write_ndjson, DatasetRecord, NdjsonError};
