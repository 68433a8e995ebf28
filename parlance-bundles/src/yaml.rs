//! YAML bundle parsing. Nested mappings flatten into dotted keys:
//!
//! ```yaml
//! greeting: Hello
//! errors:
//!   not_found: "Nothing named {0}"
//! ```
//!
//! yields `greeting` and `errors.not_found`.

use indexmap::IndexMap;
use parlance_core::SourceError;
use serde_yaml_ng::Value;

pub fn parse_yaml_bundle(bundle: &str, text: &str) -> Result<IndexMap<String, String>, SourceError> {
    let document: Value = serde_yaml_ng::from_str(text).map_err(|e| SourceError::Yaml {
        bundle: bundle.to_string(),
        reason: e.to_string(),
    })?;

    let mut messages = IndexMap::new();
    match document {
        Value::Null => {}
        Value::Mapping(_) => flatten(bundle, "", &document, &mut messages)?,
        _ => {
            return Err(SourceError::Yaml {
                bundle: bundle.to_string(),
                reason: "top level must be a mapping of keys to messages".to_string(),
            })
        }
    }
    Ok(messages)
}

fn flatten(
    bundle: &str,
    prefix: &str,
    value: &Value,
    out: &mut IndexMap<String, String>,
) -> Result<(), SourceError> {
    let Value::Mapping(mapping) = value else {
        out.insert(prefix.to_string(), scalar(bundle, prefix, value)?);
        return Ok(());
    };

    for (key, child) in mapping {
        let segment = scalar(bundle, prefix, key)?;
        let full_key = if prefix.is_empty() {
            segment
        } else {
            format!("{prefix}.{segment}")
        };
        flatten(bundle, &full_key, child, out)?;
    }
    Ok(())
}

fn scalar(bundle: &str, key: &str, value: &Value) -> Result<String, SourceError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err(SourceError::Yaml {
            bundle: bundle.to_string(),
            reason: format!("value under '{key}' is not a string, number or boolean"),
        }),
    }
}
