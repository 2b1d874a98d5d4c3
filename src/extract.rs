//! Response extractor: models rarely return bare JSON, so after a strict
//! parse fails we take the greedy first-`{`-to-last-`}` substring and try
//! again. A second failure is terminal for the run.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static EMBEDDED_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid embedded-object regex"));

/// The original reply is retained for diagnostics.
#[derive(Debug, thiserror::Error)]
#[error("no parseable JSON object in model reply ({} chars)", .raw.len())]
pub struct ParseError {
    pub raw: String,
}

pub fn extract_json(text: &str) -> Result<Value, ParseError> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }
    if let Some(m) = EMBEDDED_OBJECT.find(text) {
        if let Ok(value) = serde_json::from_str::<Value>(m.as_str()) {
            return Ok(value);
        }
    }
    Err(ParseError {
        raw: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_json_parses_directly() {
        let v = extract_json(r#"{"post_types": []}"#).unwrap();
        assert_eq!(v, json!({ "post_types": [] }));
    }

    #[test]
    fn object_embedded_in_prose_is_recovered() {
        let obj = json!({ "post_types": [{ "content_type": "memes" }] });
        let text = format!("Here is the grouping you asked for:\n{obj}\nLet me know!");
        assert_eq!(extract_json(&text).unwrap(), obj);
    }

    #[test]
    fn no_braces_is_a_parse_error() {
        let err = extract_json("sorry, I cannot help with that").unwrap_err();
        assert!(err.raw.contains("sorry"));
    }

    #[test]
    fn unbalanced_braces_is_a_parse_error() {
        assert!(extract_json("{ this is not json }").is_err());
    }
}
