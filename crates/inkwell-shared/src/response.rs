//! Error body returned by the backend on non-2xx responses.

use serde::{Deserialize, Serialize};

/// `{"error": ...}` as emitted by the post and upload endpoints.
///
/// The payload is either a plain message or a field -> messages map from
/// schema validation, so it is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: serde_json::Value,
}

impl ErrorBody {
    /// Best-effort parse of a response body. Empty or non-JSON bodies yield `None`.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// Flatten the payload into one human-readable line.
    pub fn message(&self) -> String {
        match &self.error {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Object(fields) => fields
                .iter()
                .map(|(field, detail)| format!("{}: {}", field, flatten(detail)))
                .collect::<Vec<_>>()
                .join("; "),
            other => flatten(other),
        }
    }
}

fn flatten(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items.iter().map(flatten).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_message() {
        let body = ErrorBody::parse(br#"{"error": "Post has been modified since last load"}"#)
            .unwrap();
        assert_eq!(body.message(), "Post has been modified since last load");
    }

    #[test]
    fn validation_map_is_flattened() {
        let body =
            ErrorBody::parse(br#"{"error": {"title": ["Missing data for required field."]}}"#)
                .unwrap();
        assert_eq!(body.message(), "title: Missing data for required field.");
    }

    #[test]
    fn non_json_body_is_none() {
        assert!(ErrorBody::parse(b"<html>oops</html>").is_none());
        assert!(ErrorBody::parse(b"").is_none());
    }
}
