//! Domain DTOs for the posts API.
//!
//! # Design
//! `Post` mirrors the mock-server's schema but is defined independently.
//! Field names are snake_case in Rust and camelCase on the wire.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single post, as returned by `GET /posts` or sent to `POST /posts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

impl Post {
    /// The fixed post the demo sequence creates.
    pub fn sample() -> Self {
        Self {
            user_id: 1,
            id: 1,
            title: "New Post".to_string(),
            body: "New Post Body".to_string(),
        }
    }
}
