//! `updateImage` command - stores a new image under a name.

use crate::error::AppResult;
use image_registry::{ImageStore, RegistryError};
use tracing::{info, warn};

pub const SAVED: &str = "画像を保存しました :white_check_mark:";
pub const USAGE: &str = "不正なコマンド形式です。使用方法: updateImage NAME URL";

pub async fn save(images: &dyn ImageStore, name: &str, url: &str) -> AppResult<String> {
    match images.insert(Some(name), url).await {
        Ok(id) => {
            info!(id, name, "Image saved");
            Ok(SAVED.into())
        }
        Err(RegistryError::InvalidImage(reason)) => {
            warn!("Rejected image {}: {}", name, reason);
            Ok(USAGE.into())
        }
        Err(e) => Err(e.into()),
    }
}
