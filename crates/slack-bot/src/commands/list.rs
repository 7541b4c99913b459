//! `imageList` command.

use crate::error::AppResult;
use image_registry::{Image, ImageStore};

pub const LIST_HEADER: &str = "登録されている画像一覧:\n";
pub const NO_IMAGES: &str = "登録されている画像はありません";

pub async fn list(images: &dyn ImageStore) -> AppResult<String> {
    Ok(format_list(&images.list().await?))
}

/// Numbered listing in registry order, one `n. name: url` line per image.
pub fn format_list(images: &[Image]) -> String {
    if images.is_empty() {
        return NO_IMAGES.into();
    }

    let mut out = String::from(LIST_HEADER);
    for (i, image) in images.iter().enumerate() {
        let name = image.display_name();
        out.push_str(&format!("{}. {}: {}\n", i + 1, name, image.url));
    }
    out
}
