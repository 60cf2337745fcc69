use serde::{Deserialize, Serialize};

/// Path of the question endpoint relative to the configured API URL.
pub const CHAT_ENDPOINT: &str = "api/v1/chat";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub question: String,
    pub conversation_id: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AskResponse {
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_request_uses_wire_field_names() {
        let request = AskRequest {
            question: "How many deficiencies?".to_string(),
            conversation_id: "1700000000000".to_string(),
        };
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "question": "How many deficiencies?",
                "conversation_id": "1700000000000"
            })
        );
    }

    #[test]
    fn ask_response_ignores_extra_fields() {
        let response: AskResponse =
            serde_json::from_str(r#"{"answer":"42","sources":[]}"#).expect("deserialize");
        assert_eq!(response.answer, "42");
    }
}
