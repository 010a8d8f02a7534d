#![forbid(unsafe_code)]

//! Error type shared by the client and the view-model.

use thiserror::Error;

/// Failures surfaced by the prediction client.
///
/// Every variant's `Display` text is exactly what the front end shows in
/// the status line, so callers render errors with `to_string()` and
/// nothing else.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API base field was empty after trimming. Raised before any
    /// request is made.
    #[error("Please set the API base URL.")]
    MissingBaseUrl,

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// numeric HTTP status code
        status: u16,
        /// response body, verbatim
        body: String,
    },

    /// Network-level failure, or a success body that did not decode.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_status_line_wording() {
        assert_eq!(
            ApiError::MissingBaseUrl.to_string(),
            "Please set the API base URL."
        );
        let err = ApiError::Http {
            status: 503,
            body: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: overloaded");
    }

    #[test]
    fn empty_body_keeps_the_status_prefix() {
        let err = ApiError::Http {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 404: ");
    }
}
