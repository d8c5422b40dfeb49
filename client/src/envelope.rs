//! Response-unwrapping adapter
//!
//! The backend returns payloads either bare or nested under a resource-named
//! field. Every response goes through this module before it is deserialized;
//! no call site inspects the envelope itself.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::endpoints::ResourceKind;
use crate::error::{ClientError, ClientResult};

/// Generic wrapper keys seen on both entity and list responses
const DATA_KEYS: [&str; 2] = ["data", "rows"];

/// Update/create handlers of the legacy console nest every entity under
/// `produit`, whatever the resource
const LEGACY_ENTITY_KEY: &str = "produit";

/// Parse a raw response body as JSON; an empty body becomes `null`
pub fn parse_body(body: &str) -> ClientResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}

/// Extract a single entity from a create/update response
pub fn unwrap_entity<T: DeserializeOwned>(value: Value, kind: ResourceKind) -> ClientResult<T> {
    let keys = [kind.singular_key(), LEGACY_ENTITY_KEY, DATA_KEYS[0], DATA_KEYS[1]];
    let inner = match value {
        Value::Object(mut map) => {
            match keys
                .iter()
                .find(|key| map.get(**key).map(Value::is_object).unwrap_or(false))
            {
                Some(key) => map.remove(*key).unwrap_or(Value::Null),
                None => Value::Object(map),
            }
        }
        other => other,
    };
    serde_json::from_value(inner)
        .map_err(|e| ClientError::Decode(format!("{} entity: {}", kind, e)))
}

/// Extract a list from a list response
pub fn unwrap_list<T: DeserializeOwned>(value: Value, kind: ResourceKind) -> ClientResult<Vec<T>> {
    unwrap_list_with_keys(value, &[kind.plural_key(), kind.singular_key()])
        .map_err(|e| ClientError::Decode(format!("{} list: {}", kind, e)))
}

/// Extract a list nested under one of `keys`, `data`, `rows`, or bare
pub fn unwrap_list_with_keys<T: DeserializeOwned>(
    value: Value,
    keys: &[&str],
) -> Result<Vec<T>, String> {
    let inner = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => {
            let key = keys
                .iter()
                .chain(DATA_KEYS.iter())
                .find(|key| map.get(**key).map(Value::is_array).unwrap_or(false))
                .copied();
            match key {
                Some(key) => map.remove(key).unwrap_or(Value::Null),
                None => return Err("expected an array or an object wrapping one".to_string()),
            }
        }
        Value::Null => return Ok(Vec::new()),
        _ => return Err("expected an array".to_string()),
    };
    serde_json::from_value(inner).map_err(|e| e.to_string())
}
