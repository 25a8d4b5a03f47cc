//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `PostsClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Post;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Custom header attached by `build_custom_create_post`.
pub const CUSTOM_HEADER: (&str, &str) = ("X-My-Header", "my value");

/// Synchronous, stateless client for the posts API.
#[derive(Debug, Clone)]
pub struct PostsClient {
    base_url: String,
}

impl Default for PostsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PostsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.posts_url())
    }

    pub fn build_get_post(&self, id: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}/{id}", self.posts_url()))
    }

    /// Serialize `post` into a plain JSON POST.
    pub fn build_create_post(&self, post: &Post) -> Result<HttpRequest, ApiError> {
        let body = encode_post(post)?;
        Ok(HttpRequest::new(HttpMethod::Post, self.posts_url())
            .with_header("content-type", JSON_CONTENT_TYPE)
            .with_body(body))
    }

    /// Build a POST by hand from an already-encoded body, with the JSON
    /// content type and the custom header set explicitly.
    pub fn build_custom_create_post(&self, body: &str) -> HttpRequest {
        let mut req = HttpRequest::new(HttpMethod::Post, self.posts_url()).with_body(body);
        req.set_header("Content-Type", JSON_CONTENT_TYPE);
        req.set_header(CUSTOM_HEADER.0, CUSTOM_HEADER.1);
        req
    }

    /// Decode the post collection. The status code is not consulted: any body
    /// that is not a JSON array of posts is a deserialization error.
    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Returns the raw response body when the post was created.
    pub fn parse_create_post(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, 201)?;
        Ok(response.body)
    }
}

/// Serialize a post to its JSON wire form.
pub fn encode_post(post: &Post) -> Result<String, ApiError> {
    serde_json::to_string(post).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Title of the first post in the collection.
pub fn first_title(posts: &[Post]) -> Result<&str, ApiError> {
    posts
        .first()
        .map(|p| p.title.as_str())
        .ok_or(ApiError::EmptyCollection)
}

/// Map unexpected status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
