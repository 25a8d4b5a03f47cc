//! Command-line and environment configuration.

use std::time::Duration;

use clap::Parser;
use posts_core::DEFAULT_BASE_URL;

/// Fetch posts, then create one twice: once as a plain JSON POST and once as a
/// hand-built request with custom headers.
#[derive(Debug, Parser)]
#[command(name = "posts", version)]
pub struct Args {
    /// Service root; `/posts` is appended
    #[arg(long, env = "POSTS_BASE_URL", default_value = DEFAULT_BASE_URL, value_parser = parse_base_url)]
    pub base_url: String,

    /// Give up on a request after this many seconds (default: wait forever)
    #[arg(long, env = "POSTS_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Send an empty body on the custom-header POST, as if its buffer had
    /// already been drained by the first POST
    #[arg(long)]
    pub drained_body: bool,
}

/// Body sent by the custom-header POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomBody {
    /// The same encoded post the plain POST sent.
    #[default]
    Payload,
    /// Nothing.
    Drained,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub custom_body: CustomBody,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            custom_body: CustomBody::Payload,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            base_url: args.base_url,
            timeout: args.timeout_secs.map(Duration::from_secs),
            custom_body: if args.drained_body {
                CustomBody::Drained
            } else {
                CustomBody::Payload
            },
        }
    }
}

fn parse_base_url(s: &str) -> Result<String, String> {
    if s.starts_with("http://") || s.starts_with("https://") {
        Ok(s.to_string())
    } else {
        Err(format!("`{s}` must start with http:// or https://"))
    }
}
