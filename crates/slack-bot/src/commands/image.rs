//! `image` command - shows a named or random image.

use crate::error::AppResult;
use image_registry::{Image, ImageStore, RegistryError};
use tracing::debug;

pub const EMPTY_REGISTRY: &str = "画像が登録されていません";

pub fn not_found(name: &str) -> String {
    format!("指定された名前の画像が見つかりません: {}", name)
}

pub async fn show(images: &dyn ImageStore, name: Option<&str>) -> AppResult<String> {
    let result = match name {
        Some(name) => images.get_by_name(name).await,
        None => images.get_random().await,
    };

    match result {
        Ok(image) => Ok(format_image(&image)),
        Err(RegistryError::NotFound(missing)) if name.is_some() => {
            debug!("No image named {}", missing);
            Ok(not_found(&missing))
        }
        // A row removed between count and fetch also lands here
        Err(e) if e.is_not_found() => Ok(EMPTY_REGISTRY.into()),
        Err(e) => Err(e.into()),
    }
}

fn format_image(image: &Image) -> String {
    format!("{}\n{}", image.display_name(), image.url)
}
