//! Slack Web API client.

mod client;
mod error;
mod types;

pub use client::{ChatClient, SlackClient, DEFAULT_API_URL};
pub use error::SlackError;
pub use types::*;
