//! Registry capability shared by all backends.

use crate::error::RegistryResult;
use crate::types::Image;
use async_trait::async_trait;

/// Persisted image registry.
///
/// Implementations are shared across concurrently handled requests, so every
/// method takes `&self` and the backend owns its own synchronization.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Append a new image and return its id. Never deduplicates by name.
    async fn insert(&self, name: Option<&str>, url: &str) -> RegistryResult<i64>;

    /// Exact name match. When several rows share the name, the lowest id wins.
    async fn get_by_name(&self, name: &str) -> RegistryResult<Image>;

    /// Uniformly random image.
    ///
    /// Reads the row count, draws an offset in `[0, count)` and fetches the row
    /// at that position in ascending id order. The two reads are not atomic
    /// against other writers, so a concurrent delete can surface as
    /// [`RegistryError::NotFound`](crate::RegistryError::NotFound).
    async fn get_random(&self) -> RegistryResult<Image>;

    /// All images in ascending id order.
    async fn list(&self) -> RegistryResult<Vec<Image>>;

    /// Remove an image by id. Returns whether a row was deleted.
    async fn delete(&self, id: i64) -> RegistryResult<bool>;

    /// Number of stored images.
    async fn count(&self) -> RegistryResult<usize>;
}
