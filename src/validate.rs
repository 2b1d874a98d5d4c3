//! Response validator: ordered shape checks over the parsed model reply.
//! Fails fast on the first violation; each failure is logged so the caller
//! can abort with context already on the console.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

const REQUIRED_ENTRY_KEYS: [&str; 3] = ["content_type", "content_type_description", "post_ids"];

/// A model-proposed category of posts. Order is as returned by the model;
/// the dashboard consumes at most the first two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentType {
    pub content_type: String,
    pub content_type_description: String,
    pub post_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShapeError {
    #[error("reply is not an object")]
    NotAnObject,
    #[error("reply missing 'post_types' key")]
    MissingPostTypes,
    #[error("'post_types' is not a list")]
    PostTypesNotAList,
    #[error("post type entry missing keys: {missing:?}")]
    MissingKeys { missing: Vec<String> },
}

/// Check the reply shape and lift it into typed `ContentType` records.
/// Non-string labels and non-integer ids are tolerated (coerced to empty /
/// dropped) once the required keys are present; key presence is the contract.
pub fn validate_post_types(value: &Value) -> Result<Vec<ContentType>, ShapeError> {
    let Some(obj) = value.as_object() else {
        warn!("model reply is not an object");
        return Err(ShapeError::NotAnObject);
    };

    let Some(post_types) = obj.get("post_types") else {
        warn!("model reply missing 'post_types' key");
        return Err(ShapeError::MissingPostTypes);
    };

    let Some(entries) = post_types.as_array() else {
        warn!("'post_types' is not a list");
        return Err(ShapeError::PostTypesNotAList);
    };

    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        let missing: Vec<String> = REQUIRED_ENTRY_KEYS
            .iter()
            .filter(|key| entry.get(**key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            warn!(?missing, "post type entry missing required keys");
            return Err(ShapeError::MissingKeys { missing });
        }

        out.push(ContentType {
            content_type: entry["content_type"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            content_type_description: entry["content_type_description"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            post_ids: entry["post_ids"]
                .as_array()
                .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
                .unwrap_or_default(),
        });
    }

    Ok(out)
}
