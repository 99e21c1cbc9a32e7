use std::sync::Arc;

pub use crate::structs::{Mapping, SerializableMapping};

use crate::errors::Result;
use async_trait::async_trait;

/// The durable mapping store collaborator.
///
/// Single-key read/write atomicity only; no ordering or transaction
/// guarantees are assumed beyond that.
#[async_trait]
pub trait MappingStore: Send + Sync {
    async fn get(&self, code: &str) -> Result<Option<Mapping>>;

    /// Atomically insert the mapping if no entry exists for its code.
    ///
    /// Returns `false` and leaves the store untouched when the code is
    /// already taken. Code allocation relies on this instead of a separate
    /// read followed by a write.
    async fn insert_if_absent(&self, mapping: Mapping) -> Result<bool>;

    /// Upsert an existing mapping (target/expiry updates).
    async fn set(&self, mapping: Mapping) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

pub mod file;
pub mod memory;

pub struct StorageFactory;

impl StorageFactory {
    pub fn create(backend: &str) -> Result<Arc<dyn MappingStore>> {
        let boxed: Box<dyn MappingStore> = match backend {
            "file" => Box::new(file::FileStorage::new()?),
            _ => Box::new(memory::MemoryStorage::new()),
        };

        Ok(Arc::from(boxed))
    }
}
