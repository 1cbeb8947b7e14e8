//! `{key}` placeholder substitution for labels, tooltips and popups.
//!
//! Mirrors Leaflet's `Util.template`: a placeholder is a run of word
//! characters, spaces or dashes between braces. Anything else between braces
//! is left untouched.

use crate::data::geojson::Properties;
use crate::{Error, Result};
use serde_json::Value;

/// Renders `template` against a feature's properties
pub fn render(template: &str, properties: &Properties) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            output.push_str(&rest[open..]);
            return Ok(output);
        };

        let inner = &after_open[..close];
        match placeholder_key(inner) {
            Some(key) => {
                let value = properties
                    .get(key)
                    .ok_or_else(|| Error::Template { key: key.to_string() })?;
                output.push_str(&value_text(value));
                rest = &after_open[close + 1..];
            }
            None => {
                output.push('{');
                rest = after_open;
            }
        }
    }

    output.push_str(rest);
    Ok(output)
}

fn placeholder_key(inner: &str) -> Option<&str> {
    let valid = inner
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == ' ' || c == '-');
    let key = inner.trim_matches(' ');
    (valid && !key.is_empty()).then_some(key)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        // Whole floats print without a fraction, `3.0` reads `3`
        Value::Number(number) => match number.as_f64() {
            Some(n) if number.is_f64() && n.fract() == 0.0 && n.abs() < 1e15 => {
                (n as i64).to_string()
            }
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Properties {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_simple_substitution() {
        let properties = props(json!({ "name": "Bo", "value": 12.5 }));
        assert_eq!(
            render("{name}: { value }", &properties).unwrap(),
            "Bo: 12.5"
        );
    }

    #[test]
    fn test_non_placeholders_are_kept() {
        let properties = props(json!({ "name": "Bo" }));
        assert_eq!(
            render("{name} {a.b} {", &properties).unwrap(),
            "Bo {a.b} {"
        );
    }

    #[test]
    fn test_missing_key_errors() {
        let properties = props(json!({}));
        let err = render("{name}", &properties).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_non_string_values() {
        let properties = props(json!({ "count": 3, "ok": true, "none": null }));
        assert_eq!(
            render("{count}/{ok}/{none}", &properties).unwrap(),
            "3/true/null"
        );
    }

    #[test]
    fn test_whole_floats_drop_fraction() {
        let properties = props(json!({ "cases": 3.0, "deaths": -2.0, "rate": 0.25 }));
        assert_eq!(
            render("{cases} {deaths} {rate}", &properties).unwrap(),
            "3 -2 0.25"
        );
    }
}
