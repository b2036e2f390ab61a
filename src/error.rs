//! Error types for route registration and request dispatch.
//!
//! Two taxa, deliberately separate:
//!
//! - [`RouteError`] — registration-time failures. Malformed targets fail
//!   fast when a route is added, never at request time.
//! - [`HttpError`] — the typed HTTP error a handler or middleware may return
//!   through the dispatch chain. It is converted into a response exactly once,
//!   at the pipeline boundary; it never escapes below it.

use thiserror::Error;

use crate::message::Response;

/// A failure while registering a route target.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A template segment held something other than exactly one `{name}`
    /// variable expression.
    #[error("invalid template `{target}`: segment `{segment}` must contain exactly one variable name")]
    InvalidTemplate { target: String, segment: String },

    /// The target (or a caller-supplied variable pattern) did not compile.
    #[error("invalid pattern `{target}`")]
    InvalidPattern {
        target: String,
        #[source]
        source: regex::Error,
    },

    /// A verb in a method map was empty or not a valid HTTP token.
    #[error("invalid HTTP verb `{0}`")]
    InvalidVerb(String),

    /// The same verb was mapped twice on one target.
    #[error("duplicate handler for verb `{0}`")]
    DuplicateVerb(String),
}

/// Typed HTTP error carried through the dispatch chain.
///
/// Any handler or middleware may return this instead of a response; the
/// pipeline converts it into a response with the error's status code and a
/// JSON body carrying its message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HTTP {status}: {message}")]
pub struct HttpError {
    pub status: u16,
    pub message: String,
}

impl HttpError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Convert into the error response the client sees.
    pub fn into_response(self) -> Response {
        Response::error(self.status, &self.message)
    }
}
