use serde::{Deserialize, Serialize};

/// A short-code to target-URL mapping.
///
/// `created_at` is set once at creation and never changes. `expires_at`
/// starts at `created_at + 10 months` and moves in whole-day steps; it is
/// advisory metadata and is not checked on lookup.
#[derive(Debug, Clone)]
pub struct Mapping {
    pub code: String,
    pub target: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// On-disk form of a [`Mapping`], timestamps as RFC 3339 strings.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SerializableMapping {
    pub short_code: String,
    pub target_url: String,
    pub created_at: String,
    pub expires_at: String,
}
