//! Name service response cache with LRU eviction.
//!
//! Entries are keyed by a hash of the name list and the palette values and
//! expire after the configured TTL.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use farbe::Color;

use crate::services::name_service::NameResponse;

/// Default maximum number of entries in the cache
const DEFAULT_MAX_ENTRIES: usize = 256;

struct CachedNames {
    response: NameResponse,
    cached_at: Instant,
    ttl: Duration,
}

impl CachedNames {
    fn is_expired(&self) -> bool {
        self.cached_at.elapsed() > self.ttl
    }
}

struct Entries {
    cache: HashMap<String, CachedNames>,
    /// Order of keys by last use (oldest first)
    insertion_order: Vec<String>,
}

/// Resolved names shared across requests
pub struct NameCache {
    entries: Mutex<Entries>,
    max_entries: usize,
    ttl: Duration,
}

impl NameCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(ttl, DEFAULT_MAX_ENTRIES)
    }

    pub fn with_capacity(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(Entries {
                cache: HashMap::new(),
                insertion_order: Vec::new(),
            }),
            max_entries: max_entries.max(1),
            ttl,
        }
    }

    /// Get cached names if present and not expired
    pub fn get(&self, key: &str) -> Option<NameResponse> {
        let mut entries = self.entries.lock().ok()?;
        let expired = entries.cache.get(key)?.is_expired();

        if expired {
            entries.cache.remove(key);
            entries.insertion_order.retain(|k| k != key);
            return None;
        }

        // Mark as recently used
        entries.insertion_order.retain(|k| k != key);
        entries.insertion_order.push(key.to_string());

        tracing::debug!(cache_key = %key, "Name cache hit");
        entries.cache.get(key).map(|e| e.response.clone())
    }

    pub fn store(&self, key: String, response: NameResponse) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };

        if entries.cache.contains_key(&key) {
            entries.insertion_order.retain(|k| k != &key);
        }

        while entries.cache.len() >= self.max_entries && !entries.insertion_order.is_empty() {
            let oldest_key = entries.insertion_order.remove(0);
            entries.cache.remove(&oldest_key);
            tracing::debug!(
                key = %oldest_key,
                cache_size = entries.cache.len(),
                "Name cache: evicted oldest entry"
            );
        }

        entries.cache.insert(
            key.clone(),
            CachedNames {
                response,
                cached_at: Instant::now(),
                ttl: self.ttl,
            },
        );
        entries.insertion_order.push(key);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache key for a name request.
///
/// A SHA256 hash of the list and the ordered hex values.
pub fn compute_cache_key(list: &str, colors: &[Color]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(list.as_bytes());
    hasher.update(b"|");
    for color in colors {
        hasher.update(color.hex_digits().as_bytes());
        hasher.update(b",");
    }
    let result = hasher.finalize();
    // Use first 16 bytes of hash, encoded as 32 hex characters
    hex::encode(&result[..16])
}
