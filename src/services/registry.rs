//! Short-link registry
//!
//! The core allocator and lifecycle manager: generates collision-free
//! short codes, persists and retrieves mappings, and applies target and
//! expiry updates. Everything else (HTTP, storage mechanics) is a
//! collaborator.

use std::sync::Arc;

use chrono::{Duration, Months, Utc};
use tracing::{debug, info};

use crate::errors::{Result, ShortlinkError};
use crate::storages::{Mapping, MappingStore};
use crate::utils::generate_random_code;
use crate::utils::url_validator::validate_url;

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 8;

/// New mappings expire this many calendar months after creation.
const EXPIRY_MONTHS: u32 = 10;

/// Collision-retry ceiling. With 62^8 possible codes this cannot fire
/// under honest load; it turns a misbehaving store into a clean error
/// instead of a wedged request.
const MAX_CODE_ATTEMPTS: u32 = 64;

/// Source of candidate short codes.
///
/// An explicit collaborator rather than a shared global generator so tests
/// can inject scripted sequences.
pub trait CodeSource: Send + Sync {
    fn next_code(&self, length: usize) -> String;
}

/// Production code source: draws each character independently and
/// uniformly at random from the 62-character alphabet.
pub struct RandomCodeSource;

impl CodeSource for RandomCodeSource {
    fn next_code(&self, length: usize) -> String {
        generate_random_code(length)
    }
}

/// Strict percent-decoding.
///
/// `urlencoding::decode` passes malformed escapes like `%zz` through
/// verbatim and only fails on invalid UTF-8, so every `%` is checked for
/// two trailing hex digits first.
fn percent_decode(raw: &str) -> Result<String> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let complete = i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !complete {
                return Err(ShortlinkError::decode(format!(
                    "Malformed percent-escape at byte {}",
                    i
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let decoded = urlencoding::decode(raw)
        .map_err(|e| ShortlinkError::decode(format!("Failed to decode URL: {}", e)))?;
    Ok(decoded.into_owned())
}

pub struct ShortLinkRegistry {
    storage: Arc<dyn MappingStore>,
    codes: Arc<dyn CodeSource>,
}

impl ShortLinkRegistry {
    pub fn new(storage: Arc<dyn MappingStore>, codes: Arc<dyn CodeSource>) -> Self {
        Self { storage, codes }
    }

    /// Allocate a short code for a percent-encoded URL.
    ///
    /// The raw input is percent-decoded as UTF-8, validated as an absolute
    /// URL, and stored under a freshly drawn 8-character code. Collisions
    /// are expected control flow: the candidate is discarded and a new one
    /// drawn. Uniqueness is enforced by the store's atomic
    /// `insert_if_absent`, not by a separate read.
    pub async fn shorten(&self, raw_url: &str) -> Result<String> {
        let decoded = percent_decode(raw_url)?;

        validate_url(&decoded).map_err(|e| ShortlinkError::invalid_url(e.to_string()))?;

        let created_at = Utc::now();
        let expires_at = created_at + Months::new(EXPIRY_MONTHS);

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = self.codes.next_code(CODE_LENGTH);
            let mapping = Mapping {
                code: code.clone(),
                target: decoded.to_string(),
                created_at,
                expires_at,
            };

            if self.storage.insert_if_absent(mapping).await? {
                info!("Registry: allocated '{}' -> '{}'", code, decoded);
                return Ok(code);
            }

            debug!("Code collision on '{}' (attempt {}), regenerating", code, attempt);
        }

        Err(ShortlinkError::code_exhausted(format!(
            "No free code found after {} attempts",
            MAX_CODE_ATTEMPTS
        )))
    }

    /// Look up the target URL for a code. Exact, case-sensitive match.
    ///
    /// Expired mappings still resolve; expiry is metadata, not access
    /// control.
    pub async fn resolve(&self, code: &str) -> Result<String> {
        match self.storage.get(code).await? {
            Some(mapping) => Ok(mapping.target),
            None => Err(ShortlinkError::not_found(format!(
                "Short code not found: {}",
                code
            ))),
        }
    }

    /// Point an existing code at a new target URL.
    ///
    /// `new_target` is an already-extracted URL string; any form decoding
    /// belongs to the transport layer. Code and timestamps are untouched.
    pub async fn update_target(&self, code: &str, new_target: &str) -> Result<bool> {
        let existing = self.storage.get(code).await?.ok_or_else(|| {
            ShortlinkError::not_found(format!("Short code not found: {}", code))
        })?;

        validate_url(new_target).map_err(|e| ShortlinkError::invalid_url(e.to_string()))?;

        let updated = Mapping {
            code: existing.code,
            target: new_target.to_string(),
            created_at: existing.created_at,
            expires_at: existing.expires_at,
        };
        self.storage.set(updated).await?;

        info!("Registry: updated target of '{}'", code);
        Ok(true)
    }

    /// Shift the expiry forward by whole days.
    ///
    /// Negative values are accepted and move the expiry backward; no lower
    /// bound is enforced.
    pub async fn extend_expiry(&self, code: &str, days_to_add: i64) -> Result<bool> {
        let existing = self.storage.get(code).await?.ok_or_else(|| {
            ShortlinkError::not_found(format!("Short code not found: {}", code))
        })?;

        let delta = Duration::try_days(days_to_add).ok_or_else(|| {
            ShortlinkError::validation(format!("Day count out of range: {}", days_to_add))
        })?;
        let expires_at = existing.expires_at.checked_add_signed(delta).ok_or_else(|| {
            ShortlinkError::validation(format!(
                "Expiry overflow when adding {} days",
                days_to_add
            ))
        })?;

        let updated = Mapping {
            expires_at,
            ..existing
        };
        self.storage.set(updated).await?;

        info!("Registry: extended expiry of '{}' by {} days", code, days_to_add);
        Ok(true)
    }
}
