//! Response cache for the reader.
//! Keeps serialized API responses keyed by request, bounded by total size.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cache entry with expiration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Vec<u8>,
    pub content_type: String,
    pub stored_at: DateTime<Utc>,
    pub expiry_secs: i64,
}

impl CacheEntry {
    pub fn new(data: Vec<u8>, content_type: impl Into<String>, expiry: Duration) -> Self {
        Self {
            data,
            content_type: content_type.into(),
            stored_at: Utc::now(),
            expiry_secs: expiry.num_seconds(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.stored_at > Duration::seconds(self.expiry_secs)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len() + self.content_type.len() + std::mem::size_of::<DateTime<Utc>>()
    }
}

/// Size-bounded cache; the oldest entries are evicted first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleCache {
    entries: HashMap<String, CacheEntry>,
    max_size_bytes: usize,
    current_size_bytes: usize,
}

impl SimpleCache {
    pub fn new(max_size_mb: u32) -> Self {
        Self {
            entries: HashMap::new(),
            max_size_bytes: (max_size_mb as usize) * 1024 * 1024,
            current_size_bytes: 0,
        }
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key).filter(|entry| !entry.is_expired())
    }

    pub fn put(&mut self, key: String, entry: CacheEntry) {
        self.clean_expired();

        if let Some(old_entry) = self.entries.remove(&key) {
            self.current_size_bytes = self.current_size_bytes.saturating_sub(old_entry.size_bytes());
        }

        let entry_size = entry.size_bytes();
        self.evict_until_fits(entry_size);

        self.entries.insert(key, entry);
        self.current_size_bytes += entry_size;
    }

    fn evict_until_fits(&mut self, incoming: usize) {
        while self.current_size_bytes + incoming > self.max_size_bytes && !self.entries.is_empty() {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            let Some(oldest) = oldest else {
                break;
            };
            self.remove(&oldest);
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        if let Some(entry) = self.entries.remove(key) {
            self.current_size_bytes = self.current_size_bytes.saturating_sub(entry.size_bytes());
            true
        } else {
            false
        }
    }

    pub fn remove_prefix(&mut self, prefix: &str) -> usize {
        let keys: Vec<String> = self
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.iter().filter(|key| self.remove(key)).count()
    }

    pub fn resize_max_size_mb(&mut self, max_size_mb: u32) {
        self.max_size_bytes = (max_size_mb as usize) * 1024 * 1024;
        self.evict_until_fits(0);
    }

    pub fn clean_expired(&mut self) {
        let now = Utc::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in expired_keys {
            self.remove(&key);
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.current_size_bytes
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entries.len(),
            total_size_bytes: self.size_bytes(),
            max_size_bytes: self.max_size_bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entry_count: usize,
    pub total_size_bytes: usize,
    pub max_size_bytes: usize,
}

impl Default for SimpleCache {
    fn default() -> Self {
        Self::new(25)
    }
}

/// Cache key generation utilities
pub mod keys {
    use base64::{engine::general_purpose, Engine as _};

    pub fn api_response(endpoint: &str, params: &str) -> String {
        let combined = format!("{endpoint}:{params}");
        format!("api:{}", general_purpose::URL_SAFE_NO_PAD.encode(combined))
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_impl {
    use super::*;
    use web_sys::{window, Storage};

    const STORAGE_KEY: &str = "quranreader_cache";

    impl SimpleCache {
        pub fn load_from_storage() -> Option<Self> {
            let data = Self::get_local_storage()?.get_item(STORAGE_KEY).ok()??;
            serde_json::from_str::<SimpleCache>(&data).ok()
        }

        pub fn save_to_storage(&self) {
            if let Ok(data) = serde_json::to_string(self) {
                if let Some(storage) = Self::get_local_storage() {
                    let _ = storage.set_item(STORAGE_KEY, &data);
                }
            }
        }

        fn get_local_storage() -> Option<Storage> {
            window()?.local_storage().ok()?
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_impl {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    impl SimpleCache {
        pub fn load_from_storage() -> Option<Self> {
            Self::get_cache_file_path()
                .and_then(|path| fs::read_to_string(path).ok())
                .and_then(|data| serde_json::from_str::<SimpleCache>(&data).ok())
        }

        pub fn save_to_storage(&self) {
            let Some(path) = Self::get_cache_file_path() else {
                return;
            };
            match serde_json::to_string(self) {
                Ok(data) => {
                    if let Err(err) = fs::write(&path, data) {
                        tracing::warn!(path = %path.display(), %err, "failed to write cache file");
                    }
                }
                Err(err) => tracing::warn!(%err, "failed to serialize cache"),
            }
        }

        fn get_cache_file_path() -> Option<PathBuf> {
            dirs::cache_dir()
                .map(|dir: PathBuf| dir.join("quranreader"))
                .map(|dir: PathBuf| {
                    let _ = fs::create_dir_all(&dir);
                    dir.join("cache.json")
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(bytes: usize, stored_at: DateTime<Utc>) -> CacheEntry {
        CacheEntry {
            data: vec![0; bytes],
            content_type: "application/json".to_string(),
            stored_at,
            expiry_secs: 3600,
        }
    }

    #[test]
    fn expired_entries_are_not_returned() {
        let mut cache = SimpleCache::new(1);
        let mut stale = entry(10, Utc::now() - Duration::hours(2));
        stale.expiry_secs = 60;
        cache.entries.insert("stale".to_string(), stale);
        assert!(cache.get("stale").is_none());
    }

    #[test]
    fn evicts_oldest_entry_when_full() {
        let mut cache = SimpleCache::new(1);
        let half = 600 * 1024;
        let now = Utc::now();
        cache.put("old".to_string(), entry(half, now - Duration::minutes(5)));
        cache.put("new".to_string(), entry(half, now));

        assert!(cache.get("old").is_none());
        assert!(cache.get("new").is_some());
        assert_eq!(cache.stats().entry_count, 1);
    }

    #[test]
    fn replacing_a_key_keeps_size_accounting() {
        let mut cache = SimpleCache::new(1);
        cache.put("k".to_string(), entry(100, Utc::now()));
        cache.put("k".to_string(), entry(50, Utc::now()));
        assert_eq!(cache.size_bytes(), entry(50, Utc::now()).size_bytes());
    }

    #[test]
    fn remove_prefix_only_touches_matching_keys() {
        let mut cache = SimpleCache::new(1);
        cache.put("api:a".to_string(), entry(1, Utc::now()));
        cache.put("api:b".to_string(), entry(1, Utc::now()));
        cache.put("view:c".to_string(), entry(1, Utc::now()));

        assert_eq!(cache.remove_prefix("api:"), 2);
        assert!(cache.get("view:c").is_some());
    }

    #[test]
    fn shrinking_evicts_down_to_new_limit() {
        let mut cache = SimpleCache::new(2);
        let now = Utc::now();
        cache.put("a".to_string(), entry(900 * 1024, now - Duration::minutes(1)));
        cache.put("b".to_string(), entry(900 * 1024, now));
        cache.resize_max_size_mb(1);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
    }
}
