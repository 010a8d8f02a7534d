#![forbid(unsafe_code)]

//! Wire types for the prediction service's JSON API.
//!
//! The service accepts `POST /predict` with a text prefix and a suggestion
//! count, and answers with the most likely next word plus a ranked list of
//! alternatives. All response fields are treated as optional so that a
//! sparse reply still renders.

use serde::{Deserialize, Serialize};

/// Upper bound the service accepts for `k`; requests are clamped to it.
pub const MAX_SUGGESTIONS: u32 = 20;

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictRequest {
    /// free-form prefix to complete
    pub text: String,
    /// number of suggestions wanted, always within `1..=MAX_SUGGESTIONS`
    pub k: u32,
}

impl PredictRequest {
    /// Build a request, forcing `k` into the range the service accepts.
    /// Zero (a cleared or unset count) becomes 1.
    pub fn new(text: impl Into<String>, k: u32) -> Self {
        Self {
            text: text.into(),
            k: k.clamp(1, MAX_SUGGESTIONS),
        }
    }
}

/// Successful response of `POST /predict`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Prediction {
    /// input echoed back by the service after cleaning; logged, not rendered
    #[serde(default)]
    pub input: Option<String>,
    /// single most likely next word, when the service produced one
    #[serde(default)]
    pub next_word: Option<String>,
    /// ranked alternatives, best first; empty when the service sent none
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    /// service-reported state, `"ok"` when ready
    pub status: String,
}

impl Health {
    /// True when the service reports itself ready.
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_text_and_k() {
        let request = PredictRequest::new("the quick brown", 3);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"text": "the quick brown", "k": 3}));
    }

    #[test]
    fn k_is_clamped_into_the_accepted_range() {
        assert_eq!(PredictRequest::new("a", 0).k, 1);
        assert_eq!(PredictRequest::new("a", 1).k, 1);
        assert_eq!(PredictRequest::new("a", 7).k, 7);
        assert_eq!(PredictRequest::new("a", MAX_SUGGESTIONS).k, MAX_SUGGESTIONS);
        assert_eq!(PredictRequest::new("a", 999).k, MAX_SUGGESTIONS);
    }

    #[test]
    fn full_response_decodes() {
        let raw = r#"{"input":"hello","next_word":"world","suggestions":["world","there"]}"#;
        let prediction: Prediction = serde_json::from_str(raw).unwrap();
        assert_eq!(prediction.input.as_deref(), Some("hello"));
        assert_eq!(prediction.next_word.as_deref(), Some("world"));
        assert_eq!(prediction.suggestions.len(), 2);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let prediction: Prediction = serde_json::from_str("{}").unwrap();
        assert_eq!(prediction.input, None);
        assert_eq!(prediction.next_word, None);
        assert!(prediction.suggestions.is_empty());
    }

    #[test]
    fn null_next_word_is_treated_as_absent() {
        let raw = r#"{"next_word":null,"suggestions":[]}"#;
        let prediction: Prediction = serde_json::from_str(raw).unwrap();
        assert_eq!(prediction.next_word, None);
        assert!(prediction.suggestions.is_empty());
    }

    #[test]
    fn health_reports_readiness() {
        let health: Health = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(health.is_ok());
        let health: Health = serde_json::from_str(r#"{"status":"starting"}"#).unwrap();
        assert!(!health.is_ok());
    }
}
