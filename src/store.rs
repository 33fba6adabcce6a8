use serde_json::Value;
use std::path::Path;
use tracing::info;

use crate::error::LoadError;
use crate::record::{Record, Table};

pub const DEFAULT_DATA_PATH: &str = "q-vercel-latency.json";

pub fn load(data_path: impl AsRef<Path>) -> Result<Table, LoadError> {
    let path = data_path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let table = from_slice(&bytes)?;
    info!(path = %path.display(), records = table.len(), "Dataset loaded");
    Ok(table)
}

pub fn from_json_str(json: &str) -> Result<Table, LoadError> {
    from_slice(json.as_bytes())
}

//Parse a JSON array of objects into a table, keeping the array order
pub fn from_slice(bytes: &[u8]) -> Result<Table, LoadError> {
    let items = match serde_json::from_slice::<Value>(bytes)? {
        Value::Array(items) => items,
        _ => return Err(LoadError::NotAnArray),
    };

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(Record::new(fields)),
            _ => Err(LoadError::NotAnObject { index }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Table::new(records))
}
