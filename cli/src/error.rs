//! Diagnostics printed by the `posts` binary.
//!
//! Each `Failure` variant renders as exactly the one-line diagnostic the
//! program prints before exiting with status 1.

use posts_core::{ApiError, HttpMethod};
use thiserror::Error;

/// A request/response exchange that could not be completed.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("sending request failed: {0}")]
    Send(String),

    #[error("reading response body failed: {0}")]
    ReadBody(String),
}

#[derive(Debug, Error)]
pub enum Failure {
    #[error("error GETing end point")]
    GetEndpoint(String),

    #[error("error POSTing end point")]
    PostEndpoint(String),

    #[error("error reading body")]
    ReadBody(String),

    #[error("error unmarshalling {0}")]
    Unmarshal(String),

    #[error("error marshalling {0}")]
    Marshal(String),

    #[error("error creating post {0}")]
    CreatePost(u16),

    #[error("error no posts returned")]
    NoPosts,

    #[error("error writing output: {0}")]
    Output(#[from] std::io::Error),
}

impl Failure {
    /// Attribute a transport failure to the request method that caused it.
    pub fn transport(err: TransportError, method: HttpMethod) -> Self {
        match (err, method) {
            (TransportError::Send(cause), HttpMethod::Get) => Failure::GetEndpoint(cause),
            (TransportError::Send(cause), HttpMethod::Post) => Failure::PostEndpoint(cause),
            (TransportError::ReadBody(cause), _) => Failure::ReadBody(cause),
        }
    }
}

impl From<ApiError> for Failure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Deserialization(msg) => Failure::Unmarshal(msg),
            ApiError::Serialization(msg) => Failure::Marshal(msg),
            ApiError::Http { status, .. } => Failure::CreatePost(status),
            ApiError::NotFound => Failure::CreatePost(404),
            ApiError::EmptyCollection => Failure::NoPosts,
        }
    }
}
