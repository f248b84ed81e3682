use serde::{Deserialize, Serialize};

/// A single key/value record as it appears on disk, one JSON object per line.
/// Field names are capitalized because the map side and the output merger
/// agree on `{"Key":..,"Value":..}`. Decoding also takes lowercase field
/// names, and a record without a value carries an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    #[serde(rename = "Key", alias = "key")]
    pub key: String,
    #[serde(rename = "Value", alias = "value", default)]
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        KeyValue {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Encodes a record as one line, newline included.
pub fn encode_line(kv: &KeyValue) -> serde_json::Result<String> {
    let mut line = serde_json::to_string(kv)?;
    line.push('\n');
    Ok(line)
}

/// Decodes one line (without its terminator). The whole line must be one record.
pub fn decode_line(line: &[u8]) -> serde_json::Result<KeyValue> {
    serde_json::from_slice(line)
}
