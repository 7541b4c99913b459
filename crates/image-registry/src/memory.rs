//! In-memory image registry.

use crate::error::{RegistryError, RegistryResult};
use crate::store::ImageStore;
use crate::types::{normalize_name, validate_url, Image};
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct Inner {
    images: Vec<Image>,
    last_id: i64,
}

/// Image registry held in process memory.
///
/// Rows are kept in insertion order, which is also ascending id order.
#[derive(Clone, Default)]
pub struct MemoryImageStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryImageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn insert(&self, name: Option<&str>, url: &str) -> RegistryResult<i64> {
        validate_url(url)?;

        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.images.push(Image {
            id,
            name: normalize_name(name),
            url: url.trim().to_string(),
        });

        debug!("Inserted image {} (total: {})", id, inner.images.len());
        Ok(id)
    }

    async fn get_by_name(&self, name: &str) -> RegistryResult<Image> {
        let inner = self.inner.read().await;
        inner
            .images
            .iter()
            .find(|img| img.name.as_deref() == Some(name))
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    async fn get_random(&self) -> RegistryResult<Image> {
        let count = self.count().await?;
        if count == 0 {
            return Err(RegistryError::Empty);
        }

        let offset = rand::thread_rng().gen_range(0..count);

        // Lock released between the count and the fetch, same as the SQL backend
        let inner = self.inner.read().await;
        inner
            .images
            .get(offset)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(format!("offset {}", offset)))
    }

    async fn list(&self) -> RegistryResult<Vec<Image>> {
        Ok(self.inner.read().await.images.clone())
    }

    async fn delete(&self, id: i64) -> RegistryResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.images.len();
        inner.images.retain(|img| img.id != id);
        Ok(inner.images.len() != before)
    }

    async fn count(&self) -> RegistryResult<usize> {
        Ok(self.inner.read().await.images.len())
    }
}
