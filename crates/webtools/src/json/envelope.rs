use serde::{Deserialize, Serialize};

/// Standard envelope for JSON responses: `{ "error": bool, "message": string, "data"?: any }`.
///
/// `data` is left out of the serialized form when it is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonResponse<D = serde_json::Value> {
    pub error: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<D>,
}

impl<D> JsonResponse<D> {
    /// Success envelope (`error: false`).
    pub fn ok(message: impl Into<String>) -> Self {
        Self { error: false, message: message.into(), data: None }
    }

    /// Failure envelope (`error: true`).
    pub fn error(message: impl Into<String>) -> Self {
        Self { error: true, message: message.into(), data: None }
    }

    #[must_use]
    pub fn with_data(mut self, data: D) -> Self {
        self.data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_is_omitted_when_absent() {
        let envelope: JsonResponse = JsonResponse::ok("done");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({ "error": false, "message": "done" }));
    }

    #[test]
    fn data_is_serialized_when_present() {
        let envelope = JsonResponse::error("nope").with_data(vec![1, 2]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({ "error": true, "message": "nope", "data": [1, 2] }));
    }

    #[test]
    fn missing_data_deserializes_to_none() {
        let envelope: JsonResponse =
            serde_json::from_str(r#"{"error": true, "message": "x"}"#).unwrap();
        assert!(envelope.error);
        assert!(envelope.data.is_none());
    }
}
