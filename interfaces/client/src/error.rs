//! Error definitions and mappings
use awc::error::{JsonPayloadError, PayloadError, SendRequestError};
use awc::http::StatusCode;
use thiserror::Error;

use crate::token::TokenError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The {role} must be authenticated before {action}")]
    NotAuthenticated {
        role: &'static str,
        action: &'static str,
    },
    #[error("The offering must be registered before {action}")]
    NotRegistered { action: &'static str },
    #[error("Offering {offering_id} has no endpoint to access")]
    MissingEndpoint { offering_id: String },
    #[error("Authentication failed with {code}: {reason}")]
    AuthenticationError { code: StatusCode, reason: String },
    #[error("GraphQL operation {operation} failed: {message}")]
    GraphQlError {
        operation: &'static str,
        message: String,
    },
    #[error("Provider failed with {code}: {reason}")]
    ProviderAccessError {
        code: StatusCode,
        reason: String,
        url: String,
    },
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("AWC error requesting {url}: {e}")]
    SendRequestError { e: String, url: String },
    #[error("AWC timeout requesting {url}: {e}")]
    TimeoutError { e: String, url: String },
    #[error("AWC payload error: {0}")]
    PayloadError(String),
    #[error("AWC JSON payload error: {0}")]
    JsonPayloadError(String),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("request for {url} resulted in HTTP status code: {code}: {msg}")]
    HttpStatusCode {
        code: StatusCode,
        url: String,
        msg: String,
    },
    #[error("Url parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
}

impl Error {
    /// True for errors raised locally because a required step was skipped.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::NotAuthenticated { .. }
                | Error::NotRegistered { .. }
                | Error::MissingEndpoint { .. }
        )
    }
}

impl From<(SendRequestError, String)> for Error {
    fn from((e, url): (SendRequestError, String)) -> Self {
        match e {
            SendRequestError::Timeout => Error::TimeoutError {
                e: format!("{}", e),
                url,
            },
            e => Error::SendRequestError {
                e: format!("{}", e),
                url,
            },
        }
    }
}

impl From<PayloadError> for Error {
    fn from(e: PayloadError) -> Self {
        Error::PayloadError(e.to_string())
    }
}

impl From<JsonPayloadError> for Error {
    fn from(e: JsonPayloadError) -> Self {
        Error::JsonPayloadError(e.to_string())
    }
}

pub(crate) fn status_reason(code: StatusCode) -> String {
    code.canonical_reason().unwrap_or_default().to_string()
}
