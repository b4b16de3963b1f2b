//! In-memory response cache keyed by canonical payload serialization.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Cache key derived from the caller-supplied payload fields.
///
/// The key is a sha256 over the canonical (field-name-sorted) JSON
/// serialization of the payload, computed before the model identifier and the
/// JSON-mode response format are injected. Two payloads with the same fields
/// produce the same key regardless of insertion order.
///
/// The model is deliberately excluded: one client instance is bound to one
/// model, so keys cannot collide in context. Sharing a single cache across
/// models would collide silently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let canonical: BTreeMap<&String, &Value> = payload.iter().collect();
        let serialized = serde_json::to_string(&canonical).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(serialized.as_bytes());
        let hash: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Map from cache key to the last successful response body.
///
/// No expiry and no size bound: entries live for the lifetime of the owning
/// client, which is the accepted trade-off for a short-lived process. Races
/// between concurrent misses on the same key are benign; both dispatch and
/// the last write wins.
#[derive(Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<CacheKey, Value>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: &CacheKey) -> Option<Value> {
        let hit = self.entries.read().unwrap().get(key).cloned();
        if hit.is_some() {
            debug!(key = %key, "response cache hit");
        }
        hit
    }

    pub fn store(&self, key: CacheKey, response: Value) {
        debug!(key = %key, "storing response in cache");
        self.entries.write().unwrap().insert(key, response);
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
