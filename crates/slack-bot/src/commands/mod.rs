//! Chat command routing.

mod image;
mod list;
mod parser;
mod save;

pub use list::format_list;
pub use parser::{unwrap_link, Command};

use crate::error::AppResult;
use image_registry::ImageStore;
use std::sync::Arc;
use tracing::debug;

/// Routes message text to the registry and builds the reply.
pub struct CommandRouter {
    images: Arc<dyn ImageStore>,
}

impl CommandRouter {
    pub fn new(images: Arc<dyn ImageStore>) -> Self {
        Self { images }
    }

    /// Parse and execute `text`. `None` means no reply should be sent.
    pub async fn route(&self, text: &str) -> AppResult<Option<String>> {
        let command = Command::parse(text);
        debug!(?command, "Parsed command");
        self.execute(command).await
    }

    pub async fn execute(&self, command: Command) -> AppResult<Option<String>> {
        let images = self.images.as_ref();

        let reply = match command {
            Command::Hello => "world".to_string(),
            Command::ShowImage { name } => image::show(images, name.as_deref()).await?,
            Command::ListImages => list::list(images).await?,
            Command::SaveImage { name, url } => save::save(images, &name, &url).await?,
            Command::InvalidSaveImage => save::USAGE.to_string(),
            Command::Unknown => return Ok(None),
        };

        Ok(Some(reply))
    }
}
