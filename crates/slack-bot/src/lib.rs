//! Slack image bot.
//!
//! Receives Slack Events API callbacks, authenticates them with the signing
//! secret and answers chat commands backed by the image registry:
//! - `hello` replies `world`
//! - `image [name]` shows a named or random image
//! - `imageList` lists every stored image
//! - `updateImage NAME URL` saves a new image

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod signature;

pub use config::Config;
pub use error::{AppError, AppResult};
