#![forbid(unsafe_code)]

//! View-model for the prediction front end.
//!
//! [`Session`] owns everything the window binds to: the editable inputs,
//! the rendered outputs and the request lifecycle. Transitions are plain
//! methods so the whole surface can be exercised without a GUI. Requests
//! themselves run elsewhere; the session hands out a [`StartedRequest`]
//! and later consumes its outcome through [`Session::finish`].

use tracing::{debug, warn};

use crate::api::ApiBase;
use crate::error::ApiError;
use crate::protocol::{PredictRequest, Prediction};

/// Glyph shown in place of a missing next word or an empty suggestion list.
pub const PLACEHOLDER: &str = "—";

/// Service root prefilled when the app starts.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

const STATUS_BUSY: &str = "Predicting…";
const STATUS_DONE: &str = "Done.";

/// Status line content plus its styling flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// display text; empty means the line is hidden
    pub text: String,
    /// when set the front end styles the text as an error
    pub is_error: bool,
}

impl Status {
    fn note(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Request lifecycle as seen by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Requesting,
}

/// A request the session has handed off for execution: the sequence token
/// its completion must present, plus everything the worker needs.
#[derive(Debug, Clone)]
pub struct StartedRequest {
    /// token to pass back to [`Session::finish`]
    pub seq: u64,
    /// normalized service root
    pub base: ApiBase,
    /// wire request, `k` already clamped
    pub request: PredictRequest,
}

/// State behind the prediction window.
///
/// The editable fields are public so the GUI can bind widgets to them
/// directly; the rendered outputs stay private and change only through
/// the lifecycle methods, which keeps stale completions out of the view.
#[derive(Debug)]
pub struct Session {
    /// text being completed
    pub input: String,
    /// user-editable service root
    pub api_base: String,
    /// requested number of suggestions
    pub k: u32,
    phase: Phase,
    status: Status,
    next_word: Option<String>,
    suggestions: Vec<String>,
    seq: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            input: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            k: 1,
            phase: Phase::Idle,
            status: Status::default(),
            next_word: None,
            suggestions: Vec::new(),
            seq: 0,
        }
    }
}

impl Session {
    /// Fresh session with the default service root and `k = 1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a prediction for the current input.
    ///
    /// The base URL is validated first: when it is empty the configuration
    /// error lands in the status line and nothing is started. Otherwise the
    /// view enters the busy phase, the status reads "Predicting…" and the
    /// caller receives the request to execute. Its outcome, whatever it is,
    /// must be fed back through [`Session::finish`].
    pub fn start(&mut self) -> Option<StartedRequest> {
        let base = match ApiBase::parse(&self.api_base) {
            Ok(base) => base,
            Err(err) => {
                warn!("prediction not started: {err}");
                self.status = Status::error(err.to_string());
                return None;
            }
        };
        self.seq += 1;
        self.phase = Phase::Requesting;
        self.status = Status::note(STATUS_BUSY);
        debug!(seq = self.seq, "prediction started");
        Some(StartedRequest {
            seq: self.seq,
            base,
            request: PredictRequest::new(self.input.clone(), self.k),
        })
    }

    /// Apply a completed request.
    ///
    /// Only the most recently started request may render: a completion
    /// carrying an older token returns `false` and leaves the view alone.
    /// The winning completion returns the view to idle, so the trigger is
    /// re-enabled after success and failure alike. On success the next
    /// word and suggestions are replaced and the status reads "Done."; on
    /// failure both outputs are cleared and the error text takes the
    /// status line.
    pub fn finish(&mut self, seq: u64, outcome: Result<Prediction, ApiError>) -> bool {
        if seq != self.seq {
            debug!(seq, latest = self.seq, "dropping stale completion");
            return false;
        }
        self.phase = Phase::Idle;
        match outcome {
            Ok(prediction) => {
                self.next_word = prediction.next_word;
                self.suggestions = prediction.suggestions;
                self.status = Status::note(STATUS_DONE);
            }
            Err(err) => {
                warn!("prediction failed: {err}");
                self.next_word = None;
                self.suggestions.clear();
                self.status = Status::error(err.to_string());
            }
        }
        true
    }

    /// Append a suggested word to the input: trailing whitespace is
    /// trimmed and a single space inserted when the input is non-empty.
    pub fn append_word(&mut self, word: &str) {
        let joined = {
            let trimmed = self.input.trim_end();
            if trimmed.is_empty() {
                word.to_string()
            } else {
                format!("{trimmed} {word}")
            }
        };
        self.input = joined;
    }

    /// Clear input, next word, suggestions and status. Idempotent. Also
    /// invalidates an in-flight request, so its late completion is
    /// dropped by [`Session::finish`].
    pub fn reset(&mut self) {
        if self.phase == Phase::Requesting {
            self.seq += 1;
            self.phase = Phase::Idle;
        }
        self.input.clear();
        self.next_word = None;
        self.suggestions.clear();
        self.status = Status::default();
    }

    /// True while a request is outstanding; the trigger stays disabled.
    pub fn busy(&self) -> bool {
        self.phase == Phase::Requesting
    }

    /// Current status line.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Next-word text ready for display, placeholder included.
    pub fn next_word_display(&self) -> &str {
        self.next_word.as_deref().unwrap_or(PLACEHOLDER)
    }

    /// Suggestions in service order; empty means the placeholder shows.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}
