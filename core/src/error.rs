//! Error types for the posts API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers distinguish "the post
//! does not exist" from "the server returned an unexpected status." All other
//! unexpected statuses land in `Http` with the raw status code and body.

use thiserror::Error;

/// Errors returned by `PostsClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested post does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the one the operation expects.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The server returned an empty post collection where one post was needed.
    #[error("no posts returned")]
    EmptyCollection,
}
