/// Redis caching layer for API responses.
///
/// All operations return `Option<T>` for graceful degradation: with Redis
/// down, callers fall through to fetch and score from source.
///
/// Key schema (namespaced to avoid collisions):
/// - `aroma:v1:search:{sha256(query|limit)}` — JSON Vec<ScoredOil> (TTL: 3600s)
/// - `aroma:v1:oils` — JSON Vec<OilRecord> (TTL: 300s)
use sha2::{Digest, Sha256};
use tracing::warn;

use aroma_common::catalog::OilRecord;
use aroma_common::redis::RedisCache;

use crate::model::ScoredOil;

const KEY_PREFIX: &str = "aroma:v1:";
const SEARCH_TTL_SECS: u64 = 3600;
const OILS_TTL_SECS: u64 = 300;

pub struct ResponseCache {
    redis: RedisCache,
}

impl ResponseCache {
    pub fn new(redis: RedisCache) -> Self {
        Self { redis }
    }

    // --- Search results ---

    /// `query` must already be normalized so accent/case variants share one entry.
    pub async fn get_search(&self, query: &str, limit: usize) -> Option<Vec<ScoredOil>> {
        let key = search_key(query, limit);
        let json = self.redis.get(&key).await?;
        serde_json::from_str(&json)
            .inspect_err(|e| warn!(error = %e, key, "cache deserialization failed"))
            .ok()
    }

    pub async fn set_search(&self, query: &str, limit: usize, results: &[ScoredOil]) {
        let key = search_key(query, limit);
        if let Ok(json) = serde_json::to_string(results) {
            self.redis.set_with_ttl(&key, &json, SEARCH_TTL_SECS).await;
        }
    }

    // --- Oil list ---

    pub async fn get_oils(&self) -> Option<Vec<OilRecord>> {
        let key = format!("{KEY_PREFIX}oils");
        let json = self.redis.get(&key).await?;
        serde_json::from_str(&json)
            .inspect_err(|e| warn!(error = %e, key, "cache deserialization failed"))
            .ok()
    }

    pub async fn set_oils(&self, oils: &[OilRecord]) {
        let key = format!("{KEY_PREFIX}oils");
        if let Ok(json) = serde_json::to_string(oils) {
            self.redis.set_with_ttl(&key, &json, OILS_TTL_SECS).await;
        }
    }
}

/// Deterministic cache key for a search query using SHA-256.
fn search_key(query: &str, limit: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(query.as_bytes());
    hasher.update(b"|");
    hasher.update(limit.to_string().as_bytes());
    let hash = hasher.finalize();
    format!("{KEY_PREFIX}search:{:x}", hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_key_is_deterministic_and_distinct() {
        assert_eq!(search_key("ansiedade", 10), search_key("ansiedade", 10));
        assert_ne!(search_key("ansiedade", 10), search_key("ansiedade", 5));
        assert_ne!(search_key("ansiedade", 10), search_key("calma", 10));
        assert!(search_key("ansiedade", 10).starts_with("aroma:v1:search:"));
    }
}
