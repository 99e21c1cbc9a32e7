use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::{Mapping, MappingStore};
use crate::errors::Result;
use async_trait::async_trait;

/// In-process store backed by a concurrent map. The default backend.
pub struct MemoryStorage {
    links: DashMap<String, Mapping>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            links: DashMap::new(),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MappingStore for MemoryStorage {
    async fn get(&self, code: &str) -> Result<Option<Mapping>> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn insert_if_absent(&self, mapping: Mapping) -> Result<bool> {
        // entry() 持有分片锁，检查和插入是原子的
        match self.links.entry(mapping.code.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(mapping);
                Ok(true)
            }
        }
    }

    async fn set(&self, mapping: Mapping) -> Result<()> {
        self.links.insert(mapping.code.clone(), mapping);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
