use serde_json::Value;

use crate::models::FormData;

/// Parse a form post into a field mapping based on its Content-Type.
/// HTML forms post urlencoded bodies; the scripted form posts JSON.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<FormData, String> {
    let ct = content_type.unwrap_or("application/json");

    let value = if ct.contains("application/json") {
        serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))?
    } else if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)?
    } else {
        // Try JSON first, then form-urlencoded
        match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(_) => parse_form_urlencoded(body)
                .map_err(|e| format!("Unable to parse body: {e}"))?,
        }
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err("Form data must be an object".to_string()),
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Value, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut map = FormData::new();
    for (k, v) in form_urlencoded::parse(body_str.as_bytes()) {
        map.insert(k.into_owned(), Value::String(v.into_owned()));
    }
    Ok(Value::Object(map))
}
