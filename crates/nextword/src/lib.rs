#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]
#![deny(missing_docs, unused_must_use)]

//! Nextword: client core for a remote next-word prediction service.
//!
//! The service side is a small HTTP API: `POST /predict` takes a text
//! prefix and a suggestion count, `GET /health` reports readiness. This
//! crate owns everything in front of it: the wire types, the blocking
//! client and the view-model the desktop front end renders.
//!
//! Layout:
//! - [`protocol`]: request and response types for the JSON API
//! - [`error`]: one error type, whose `Display` is the status-line text
//! - [`api`]: base-URL normalization and the blocking HTTP client
//! - [`session`]: view-model with the full request lifecycle

/// Base-URL handling and the blocking HTTP client.
pub mod api;
/// Typed errors for configuration, HTTP and transport failures.
pub mod error;
/// Wire types shared with the prediction service.
pub mod protocol;
/// View-model driving the front end.
pub mod session;

pub use api::{ApiBase, PredictClient};
pub use error::ApiError;
pub use protocol::{Health, PredictRequest, Prediction, MAX_SUGGESTIONS};
pub use session::{Session, StartedRequest, Status, DEFAULT_API_BASE, PLACEHOLDER};

/// One-shot convenience: parse the base, build a client, run one request.
///
/// Headless callers and tests use this; the GUI drives [`session::Session`]
/// instead so it can render intermediate state.
pub fn predict_once(base: &str, text: &str, k: u32) -> Result<Prediction, ApiError> {
    let client = PredictClient::new(ApiBase::parse(base)?)?;
    client.predict(&PredictRequest::new(text, k))
}
