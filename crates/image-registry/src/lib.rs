//! Image registry backing the Slack bot.
//!
//! Images are flat rows of `(id, name, url)`. Names are not unique: saving an
//! image under an existing name appends a new row, and name lookups resolve to
//! the lowest id. Two backends share the [`ImageStore`] trait:
//! - [`SqliteImageStore`] for the deployed bot and the admin CLI
//! - [`MemoryImageStore`] for tests and throwaway runs

mod error;
mod memory;
mod sqlite;
mod store;
mod types;

pub use error::{RegistryError, RegistryResult};
pub use memory::MemoryImageStore;
pub use sqlite::SqliteImageStore;
pub use store::ImageStore;
pub use types::*;
