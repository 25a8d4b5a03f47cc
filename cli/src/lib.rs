//! The `posts` demo program as a library.
//!
//! # Overview
//! Drives `posts-core` over a real transport: fetch the post collection and
//! print the first title, then create a post twice (a plain JSON POST and a
//! hand-built POST with custom headers) and print each raw response.
//!
//! # Design
//! - `Transport` is the only seam that touches the network; `UreqTransport`
//!   is the production implementation.
//! - Steps return `Failure`; only the binary prints it and exits.

pub mod config;
pub mod error;
pub mod sequence;
pub mod transport;

pub use config::{Args, Config, CustomBody};
pub use error::{Failure, TransportError};
pub use sequence::run;
pub use transport::{Transport, UreqTransport};
