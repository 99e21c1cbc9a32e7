use std::collections::HashMap;
use std::env;
use std::fs;
use std::sync::RwLock;

use tracing::{error, info};

use super::{Mapping, MappingStore, SerializableMapping};
use crate::errors::{Result, ShortlinkError};
use async_trait::async_trait;

/// JSON-file store. Keeps the full map in memory and writes it back on
/// every mutation; the write lock covers check, insert and save, which is
/// what makes `insert_if_absent` atomic for this backend.
pub struct FileStorage {
    file_path: String,
    cache: RwLock<HashMap<String, Mapping>>,
}

impl FileStorage {
    pub fn new() -> Result<Self> {
        let file_path = env::var("LINKS_FILE").unwrap_or_else(|_| "links.json".to_string());
        Self::with_path(file_path)
    }

    pub fn with_path<P: Into<String>>(path: P) -> Result<Self> {
        let storage = FileStorage {
            file_path: path.into(),
            cache: RwLock::new(HashMap::new()),
        };

        let links = storage.load_from_file()?;
        {
            let mut cache_guard = storage.cache.write().unwrap();
            *cache_guard = links;
            info!("FileStorage initialized with {} mappings", cache_guard.len());
        }

        Ok(storage)
    }

    fn load_from_file(&self) -> Result<HashMap<String, Mapping>> {
        match fs::read_to_string(&self.file_path) {
            Ok(content) => match serde_json::from_str::<Vec<SerializableMapping>>(&content) {
                Ok(mappings) => {
                    let mut map = HashMap::new();
                    for mapping in mappings {
                        // 时间戳损坏时报错，不能悄悄改写 created_at
                        let created_at =
                            chrono::DateTime::parse_from_rfc3339(&mapping.created_at)
                                .map_err(|e| {
                                    ShortlinkError::serialization(format!(
                                        "Invalid created_at for '{}': {}",
                                        mapping.short_code, e
                                    ))
                                })?
                                .with_timezone(&chrono::Utc);
                        let expires_at =
                            chrono::DateTime::parse_from_rfc3339(&mapping.expires_at)
                                .map_err(|e| {
                                    ShortlinkError::serialization(format!(
                                        "Invalid expires_at for '{}': {}",
                                        mapping.short_code, e
                                    ))
                                })?
                                .with_timezone(&chrono::Utc);

                        map.insert(
                            mapping.short_code.clone(),
                            Mapping {
                                code: mapping.short_code,
                                target: mapping.target_url,
                                created_at,
                                expires_at,
                            },
                        );
                    }
                    Ok(map)
                }
                Err(e) => {
                    error!("Failed to parse links file: {}", e);
                    Err(ShortlinkError::serialization(format!(
                        "Failed to parse links file: {}",
                        e
                    )))
                }
            },
            Err(_) => {
                info!("Links file not found, creating empty store");
                if let Err(e) = fs::write(&self.file_path, "[]") {
                    error!("Failed to create links file: {}", e);
                    return Err(ShortlinkError::storage(format!(
                        "Failed to create links file: {}",
                        e
                    )));
                }
                Ok(HashMap::new())
            }
        }
    }

    fn save_to_file(&self, links: &HashMap<String, Mapping>) -> Result<()> {
        let mappings: Vec<SerializableMapping> = links
            .values()
            .map(|mapping| SerializableMapping {
                short_code: mapping.code.clone(),
                target_url: mapping.target.clone(),
                created_at: mapping.created_at.to_rfc3339(),
                expires_at: mapping.expires_at.to_rfc3339(),
            })
            .collect();

        let json = serde_json::to_string_pretty(&mappings)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}

#[async_trait]
impl MappingStore for FileStorage {
    async fn get(&self, code: &str) -> Result<Option<Mapping>> {
        let cache_guard = self.cache.read().unwrap();
        Ok(cache_guard.get(code).cloned())
    }

    async fn insert_if_absent(&self, mapping: Mapping) -> Result<bool> {
        let mut cache_guard = self.cache.write().unwrap();
        if cache_guard.contains_key(&mapping.code) {
            return Ok(false);
        }
        cache_guard.insert(mapping.code.clone(), mapping);
        self.save_to_file(&cache_guard)?;
        Ok(true)
    }

    async fn set(&self, mapping: Mapping) -> Result<()> {
        let mut cache_guard = self.cache.write().unwrap();
        cache_guard.insert(mapping.code.clone(), mapping);
        self.save_to_file(&cache_guard)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
