//! The fixed fetch / create / create-with-headers sequence.
//!
//! Every step returns a `Result`; the first failure ends the run and is
//! handed back to the caller, which owns the process exit.

use std::io::Write;

use posts_core::{first_title, HttpRequest, Post, PostsClient};

use crate::config::{Config, CustomBody};
use crate::error::Failure;
use crate::transport::Transport;

/// Run the whole sequence, writing the first title and both create
/// responses to `out`, one per line.
pub fn run<T: Transport, W: Write>(config: &Config, transport: &T, out: &mut W) -> Result<(), Failure> {
    let client = PostsClient::new(&config.base_url);

    let title = fetch_first_title(&client, transport)?;
    writeln!(out, "{title}")?;

    let request = client.build_create_post(&Post::sample())?;
    let payload = request.body.clone().unwrap_or_default();
    let created = create(&client, transport, &request)?;
    writeln!(out, "{created}")?;

    let custom_body = match config.custom_body {
        CustomBody::Payload => payload.as_str(),
        CustomBody::Drained => "",
    };
    let request = client.build_custom_create_post(custom_body);
    let created = create(&client, transport, &request)?;
    writeln!(out, "{created}")?;

    Ok(())
}

/// GET the post collection and return the first title.
pub fn fetch_first_title<T: Transport>(client: &PostsClient, transport: &T) -> Result<String, Failure> {
    let request = client.build_list_posts();
    tracing::info!(url = %request.url, "fetching posts");
    let response = transport
        .execute(&request)
        .map_err(|e| Failure::transport(e, request.method))?;
    let posts = client.parse_list_posts(response)?;
    tracing::info!(count = posts.len(), "posts decoded");
    Ok(first_title(&posts)?.to_string())
}

/// Send a create request and return the raw body of the 201 response.
pub fn create<T: Transport>(
    client: &PostsClient,
    transport: &T,
    request: &HttpRequest,
) -> Result<String, Failure> {
    tracing::info!(url = %request.url, headers = request.headers.len(), "creating post");
    let response = transport
        .execute(request)
        .map_err(|e| Failure::transport(e, request.method))?;
    let status = response.status;
    let body = client.parse_create_post(response).inspect_err(|_| {
        tracing::warn!(status, "unexpected status creating post");
    })?;
    Ok(body)
}
