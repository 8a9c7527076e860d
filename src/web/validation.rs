use serde_json::Value;

use crate::error::{AppError, Result};
use crate::web::models::ChatMessage;

fn parse_object(body: &[u8]) -> Result<serde_json::Map<String, Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::invalid("body is not a JSON object")),
        Err(e) => Err(AppError::invalid(format!("body is not valid JSON: {}", e))),
    }
}

/// Pulls a non-empty `messages` array of `{role, content}` objects out of a
/// chat request body.
pub fn chat_messages(body: &[u8]) -> Result<Vec<ChatMessage>> {
    let mut map = parse_object(body)?;
    let messages = match map.remove("messages") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(AppError::invalid("messages is not an array")),
        None => return Err(AppError::invalid("messages is missing")),
    };
    if messages.is_empty() {
        return Err(AppError::invalid("messages is empty"));
    }

    messages
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item)
                .map_err(|e| AppError::invalid(format!("messages[{}] is malformed: {}", i, e)))
        })
        .collect()
}

/// Pulls the non-empty `data_url` string out of a prediction request body.
pub fn data_url(body: &[u8]) -> Result<String> {
    let mut map = parse_object(body)?;
    match map.remove("data_url") {
        Some(Value::String(url)) if !url.is_empty() => Ok(url),
        Some(Value::String(_)) => Err(AppError::invalid("data_url is empty")),
        Some(_) => Err(AppError::invalid("data_url is not a string")),
        None => Err(AppError::invalid("data_url is missing")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::models::Role;

    fn invalid<T: std::fmt::Debug>(result: Result<T>) -> bool {
        matches!(result, Err(AppError::InvalidRequest(_)))
    }

    #[test]
    fn accepts_well_formed_transcript() {
        let body = br#"{"messages":[{"role":"assistant","content":"hi"},{"role":"user","content":"help"}]}"#;
        let messages = chat_messages(body).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(messages[1].content, "help");
    }

    #[test]
    fn rejects_missing_or_mistyped_messages() {
        assert!(invalid(chat_messages(br#"{}"#)));
        assert!(invalid(chat_messages(br#"{"messages":"hi"}"#)));
        assert!(invalid(chat_messages(br#"{"messages":null}"#)));
        assert!(invalid(chat_messages(br#"{"messages":[]}"#)));
        assert!(invalid(chat_messages(br#"[]"#)));
        assert!(invalid(chat_messages(b"not json")));
    }

    #[test]
    fn rejects_malformed_elements() {
        assert!(invalid(chat_messages(br#"{"messages":[{"role":"user"}]}"#)));
        assert!(invalid(chat_messages(br#"{"messages":[{"role":"user","content":3}]}"#)));
        assert!(invalid(chat_messages(br#"{"messages":["hello"]}"#)));
    }

    #[test]
    fn data_url_must_be_a_non_empty_string() {
        assert_eq!(
            data_url(br#"{"data_url":"data:image/png;base64,AAAA"}"#).unwrap(),
            "data:image/png;base64,AAAA"
        );
        assert!(invalid(data_url(br#"{}"#)));
        assert!(invalid(data_url(br#"{"data_url":""}"#)));
        assert!(invalid(data_url(br#"{"data_url":42}"#)));
        assert!(invalid(data_url(b"")));
    }
}
