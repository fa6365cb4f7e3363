use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

//==============================================================================
// Input Records
//==============================================================================

/// One device mapping entry from `Mapping.json`
///
/// Every present field is a literal cell value: text, number or boolean.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MappingRecord {
    /// Custom device label shown in the "machine" column
    #[serde(default, deserialize_with = "scalar_value")]
    pub client_name: Option<CellValue>,
    /// Canonical device name
    #[serde(default, deserialize_with = "scalar_value")]
    pub engine: Option<CellValue>,
    /// Reserved by the input schema, never written to a cell
    #[serde(default, deserialize_with = "scalar_value")]
    pub dev: Option<CellValue>,
    #[serde(default, deserialize_with = "scalar_value")]
    pub sip_device_id: Option<CellValue>,
    #[serde(default, deserialize_with = "scalar_value")]
    pub mac_address: Option<CellValue>,
    #[serde(default, deserialize_with = "scalar_value")]
    pub device_local_id: Option<CellValue>,
}

impl MappingRecord {
    /// Convenience constructor used by tests and callers building records in code
    pub fn new(client_name: Option<&str>, engine: Option<&str>) -> Self {
        Self {
            client_name: client_name.map(CellValue::from),
            engine: engine.map(CellValue::from),
            ..Default::default()
        }
    }

    pub fn with_identifiers(mut self, sip_device_id: &str, mac_address: &str, local_id: &str) -> Self {
        self.sip_device_id = Some(sip_device_id.into());
        self.mac_address = Some(mac_address.into());
        self.device_local_id = Some(local_id.into());
        self
    }
}

/// Top-level shape of `Mapping.json`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MappingDocument {
    pub data: Vec<MappingRecord>,
}

impl MappingDocument {
    pub fn new(data: Vec<MappingRecord>) -> Self {
        Self { data }
    }
}

/// Accepts strings, numbers and booleans.
///
/// Falsy values (`null`, `""`, `0`, `false`) are blank; everything else keeps
/// its JSON type, so `42` stays a number and `"  "` stays text.
fn scalar_value<'de, D>(deserializer: D) -> Result<Option<CellValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(CellValue::Text(s))),
        Some(Value::Number(n)) => {
            let number = n.as_f64().ok_or_else(|| {
                <D::Error as serde::de::Error>::custom(format!(
                    "number {} is not representable as f64",
                    n
                ))
            })?;
            Ok((number != 0.0).then_some(CellValue::Number(number)))
        }
        Some(Value::Bool(true)) => Ok(Some(CellValue::Boolean(true))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string, number or boolean, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//==============================================================================
// Cell Values
//==============================================================================

/// Content of a single worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Boolean(bool),
    /// Formula text without the leading `=`
    Formula(String),
}

impl CellValue {
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula(_))
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

/// Rendered form used for headers, e.g. a numeric label `42` → `42`
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Formula(s) => write!(f, "={}", s),
        }
    }
}

//==============================================================================
// Custom Device Set
//==============================================================================

/// A distinct custom device label and the devices mapped under it
#[derive(Debug, Clone, PartialEq)]
pub struct CustomDevice {
    pub label: CellValue,
    pub devices: Vec<CellValue>,
}

/// Deduplicated custom device labels in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomDeviceSet {
    entries: Vec<CustomDevice>,
}

impl CustomDeviceSet {
    /// Derive the set from the input records, skipping absent labels
    pub fn from_records(records: &[MappingRecord]) -> Self {
        let mut entries: Vec<CustomDevice> = Vec::new();

        for record in records {
            let Some(label) = record.client_name.as_ref() else {
                continue;
            };

            let idx = match entries.iter().position(|e| &e.label == label) {
                Some(idx) => idx,
                None => {
                    entries.push(CustomDevice {
                        label: label.clone(),
                        devices: Vec::new(),
                    });
                    entries.len() - 1
                }
            };

            if let Some(engine) = record.engine.as_ref() {
                let devices = &mut entries[idx].devices;
                if !devices.contains(engine) {
                    devices.push(engine.clone());
                }
            }
        }

        Self { entries }
    }

    pub fn labels(&self) -> impl Iterator<Item = &CellValue> {
        self.entries.iter().map(|e| &e.label)
    }

    pub fn entries(&self) -> &[CustomDevice] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
