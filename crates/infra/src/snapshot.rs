//! Versioned JSON envelope for persisted collections.
//!
//! Current layout: `{"schemaVersion": 1, "records": [...]}`. A bare JSON
//! array (written before versioning existed) decodes as version 0.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::blob_store::StorageError;

pub const SCHEMA_VERSION: u64 = 1;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a, T> {
    schema_version: u64,
    records: &'a [T],
}

pub fn encode<T: Serialize>(key: &str, records: &[T]) -> Result<String, StorageError> {
    serde_json::to_string(&Envelope {
        schema_version: SCHEMA_VERSION,
        records,
    })
    .map_err(|e| StorageError::Encode {
        key: key.to_string(),
        message: e.to_string(),
    })
}

pub fn decode<T: DeserializeOwned>(key: &str, text: &str) -> Result<Vec<T>, StorageError> {
    let decode_err = |message: String| StorageError::Decode {
        key: key.to_string(),
        message,
    };

    let value: Value = serde_json::from_str(text).map_err(|e| decode_err(e.to_string()))?;
    let records = match value {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => {
            let version = map
                .get("schemaVersion")
                .and_then(Value::as_u64)
                .ok_or_else(|| decode_err("missing schemaVersion".to_string()))?;
            if version > SCHEMA_VERSION {
                return Err(StorageError::UnsupportedVersion {
                    key: key.to_string(),
                    found: version,
                    supported: SCHEMA_VERSION,
                });
            }
            map.remove("records")
                .ok_or_else(|| decode_err("missing records".to_string()))?
        }
        _ => return Err(decode_err("expected an object or array".to_string())),
    };

    serde_json::from_value(records).map_err(|e| decode_err(e.to_string()))
}
