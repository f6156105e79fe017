use serde_json::Value;

/// Pulls the reply text out of a `/chat` payload.
///
/// Numbers and booleans are shown as their JSON text. `None` when there is
/// no usable `response`; callers render that as a blank bubble.
pub fn extract_reply(payload: &Value) -> Option<String> {
    match payload.get("response")? {
        Value::String(s) => Some(s.clone()),
        v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_string_response() {
        assert_eq!(
            extract_reply(&json!({ "response": "hello" })),
            Some("hello".to_string())
        );
    }

    #[test]
    fn scalar_response_is_stringified() {
        assert_eq!(extract_reply(&json!({ "response": 42 })), Some("42".to_string()));
        assert_eq!(extract_reply(&json!({ "response": 2.5 })), Some("2.5".to_string()));
        assert_eq!(extract_reply(&json!({ "response": true })), Some("true".to_string()));
    }

    #[test]
    fn other_shapes_are_absent() {
        assert_eq!(extract_reply(&json!({})), None);
        assert_eq!(extract_reply(&json!({ "response": null })), None);
        assert_eq!(extract_reply(&json!({ "response": ["a"] })), None);
        assert_eq!(extract_reply(&json!(["response"])), None);
    }
}
