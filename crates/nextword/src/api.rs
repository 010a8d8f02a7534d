#![forbid(unsafe_code)]

//! Base-URL normalization and the blocking HTTP client.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::protocol::{Health, PredictRequest, Prediction};

/// Normalized service root: surrounding whitespace and trailing slashes
/// stripped, guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    /// Parse a user-entered base URL.
    ///
    /// Fails with [`ApiError::MissingBaseUrl`] when nothing is left after
    /// trimming; that check happens before any network activity.
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let trimmed = raw
            .trim_end_matches(|c: char| c.is_whitespace() || c == '/')
            .trim_start();
        if trimmed.is_empty() {
            return Err(ApiError::MissingBaseUrl);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Full URL for a service route, e.g. `endpoint("predict")`.
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.0, route)
    }

    /// The normalized base as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApiBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Blocking HTTP client for the prediction service.
///
/// Calls block until the service answers, so the front end runs them on a
/// worker thread and feeds the returned `Result` back into its view-model.
pub struct PredictClient {
    http: reqwest::blocking::Client,
    base: ApiBase,
}

impl PredictClient {
    /// Build a client for the given service root.
    pub fn new(base: ApiBase) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self { http, base })
    }

    /// The service root this client talks to.
    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    /// `POST /predict`: one request, one decoded response, no retries.
    pub fn predict(&self, request: &PredictRequest) -> Result<Prediction, ApiError> {
        let url = self.base.endpoint("predict");
        debug!(%url, k = request.k, "requesting prediction");
        let response = self.http.post(&url).json(request).send()?;
        let prediction: Prediction = decode(response)?;
        if let Some(echo) = &prediction.input {
            debug!(%echo, "service echoed cleaned input");
        }
        Ok(prediction)
    }

    /// `GET /health`: cheap reachability probe.
    pub fn health(&self) -> Result<Health, ApiError> {
        let url = self.base.endpoint("health");
        debug!(%url, "checking service health");
        let response = self.http.get(&url).send()?;
        decode(response)
    }
}

// Shared response handling: a non-success status carries the body text
// verbatim, a success body must decode as JSON.
fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        warn!(status = status.as_u16(), "service returned an error");
        return Err(ApiError::Http {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_trims_whitespace_and_trailing_slashes() {
        let base = ApiBase::parse("  http://127.0.0.1:8000/  ").unwrap();
        assert_eq!(base.as_str(), "http://127.0.0.1:8000");
        let base = ApiBase::parse("http://api.local///").unwrap();
        assert_eq!(base.as_str(), "http://api.local");
    }

    #[test]
    fn parse_keeps_interior_path_segments() {
        let base = ApiBase::parse("http://host/v1/").unwrap();
        assert_eq!(base.as_str(), "http://host/v1");
        assert_eq!(base.endpoint("predict"), "http://host/v1/predict");
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(matches!(ApiBase::parse(""), Err(ApiError::MissingBaseUrl)));
        assert!(matches!(
            ApiBase::parse("   "),
            Err(ApiError::MissingBaseUrl)
        ));
        assert!(matches!(
            ApiBase::parse(" /// "),
            Err(ApiError::MissingBaseUrl)
        ));
    }

    #[test]
    fn endpoint_joins_with_a_single_slash() {
        let base = ApiBase::parse("http://127.0.0.1:8000").unwrap();
        assert_eq!(base.endpoint("predict"), "http://127.0.0.1:8000/predict");
        assert_eq!(base.endpoint("health"), "http://127.0.0.1:8000/health");
    }

    #[test]
    fn display_shows_the_normalized_form() {
        let base = ApiBase::parse("http://host/ ").unwrap();
        assert_eq!(base.to_string(), "http://host");
    }

    #[test]
    fn client_keeps_the_normalized_root() {
        let base = ApiBase::parse("http://host/v1//").unwrap();
        let client = PredictClient::new(base).unwrap();
        assert_eq!(client.base().as_str(), "http://host/v1");
    }

    proptest! {
        // Normalization is a fixed point: feeding a parsed base back in
        // changes nothing, and the result never ends with a slash.
        #[test]
        fn parse_is_idempotent(raw in "[ /a-z0-9:.]{0,40}") {
            if let Ok(base) = ApiBase::parse(&raw) {
                prop_assert!(!base.as_str().is_empty());
                prop_assert!(!base.as_str().ends_with('/'));
                prop_assert!(!base.as_str().ends_with(char::is_whitespace));
                let again = ApiBase::parse(base.as_str());
                prop_assert_eq!(again.ok(), Some(base));
            }
        }
    }
}
