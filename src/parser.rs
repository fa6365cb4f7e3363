use crate::error::{PlanError, PlanResult};
use crate::types::{MappingDocument, MappingRecord};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Load and shape-check `Mapping.json`
pub fn load_mapping(path: &Path) -> PlanResult<MappingDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => PlanError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => PlanError::InputMalformed {
            path: path.to_path_buf(),
            reason: format!("unable to read file: {}", e),
        },
    })?;

    let document = parse_mapping(&content).map_err(|reason| PlanError::InputMalformed {
        path: path.to_path_buf(),
        reason,
    })?;

    debug!(
        records = document.data.len(),
        "loaded mapping from {}",
        path.display()
    );
    Ok(document)
}

/// Parse mapping JSON text
///
/// The top level must be an object whose `data` field is an array of objects.
/// Fields missing inside a record are tolerated and materialize as blanks.
pub fn parse_mapping(content: &str) -> Result<MappingDocument, String> {
    let root: Value = serde_json::from_str(content).map_err(|e| format!("invalid JSON: {}", e))?;

    let data = match root.get("data") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err("'data' must be an array".to_string()),
        None => return Err("missing top-level 'data' array".to_string()),
    };

    let mut records = Vec::with_capacity(data.len());
    for (idx, item) in data.iter().enumerate() {
        if !item.is_object() {
            return Err(format!("record {} is not an object", idx));
        }
        let record: MappingRecord = serde_json::from_value(item.clone())
            .map_err(|e| format!("record {}: {}", idx, e))?;
        records.push(record);
    }

    Ok(MappingDocument::new(records))
}
