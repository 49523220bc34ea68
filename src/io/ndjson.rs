//! NDJSON (Newline Delimited JSON) file processing utilities.
//!
//! A dataset snapshot stores one record per line, agents first, tagged with
//! a `kind` field.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::data::{Agent, Dataset, DatasetError, Interaction};

/// Error types for snapshot I/O and parsing.
#[derive(Error, Debug)]
pub enum NdjsonError {
    /// I/O error when reading or writing files
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error at line {line}: {source}")]
    JsonParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Empty or invalid data
    #[error("No valid data found: {context}")]
    NoData { context: String },

    /// Records do not form a consistent dataset
    #[error("Invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
}

impl NdjsonError {
    /// Create a no data error
    pub fn no_data(context: impl Into<String>) -> Self {
        Self::NoData {
            context: context.into(),
        }
    }
}

/// One line of a dataset snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetRecord {
    Agent(Agent),
    Interaction(Interaction),
}

/// Parse an NDJSON file, one `T` per non-empty line.
pub fn parse_ndjson_file<T>(path: impl AsRef<Path>) -> Result<Vec<T>, NdjsonError>
where
    T: for<'de> Deserialize<'de>,
{
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut entries = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let entry: T = serde_json::from_str(&line).map_err(|e| NdjsonError::JsonParse {
            line: line_number + 1,
            source: e,
        })?;
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(NdjsonError::no_data(format!(
            "No valid entries found in file '{}'",
            path.display()
        )));
    }

    Ok(entries)
}

/// Write items as NDJSON, replacing the file.
pub fn write_ndjson<'a, T, I>(path: impl AsRef<Path>, items: I) -> Result<usize, NdjsonError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    let mut written = 0;
    for item in items {
        let line = serde_json::to_string(item).map_err(NdjsonError::Serialize)?;
        writeln!(writer, "{}", line)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

/// Save a dataset snapshot.
pub fn save_dataset(path: impl AsRef<Path>, dataset: &Dataset) -> Result<usize, NdjsonError> {
    let records: Vec<DatasetRecord> = dataset
        .agents()
        .iter()
        .cloned()
        .map(DatasetRecord::Agent)
        .chain(dataset.interactions().iter().cloned().map(DatasetRecord::Interaction))
        .collect();

    let written = write_ndjson(path.as_ref(), &records)?;
    info!(
        path = %path.as_ref().display(),
        records = written,
        "💾 Dataset snapshot saved"
    );
    Ok(written)
}

/// Load a dataset snapshot, validating agent references.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, NdjsonError> {
    let records: Vec<DatasetRecord> = parse_ndjson_file(path.as_ref())?;

    let mut agents = Vec::new();
    let mut interactions = Vec::new();
    for record in records {
        match record {
            DatasetRecord::Agent(agent) => agents.push(agent),
            DatasetRecord::Interaction(interaction) => interactions.push(interaction),
        }
    }

    let dataset = Dataset::from_parts(agents, interactions)?;
    info!(
        path = %path.as_ref().display(),
        agents = dataset.agents().len(),
        interactions = dataset.interactions().len(),
        "📂 Dataset snapshot loaded"
    );
    Ok(dataset)
}
