use crate::cache::{CacheEntry, CacheStats, SimpleCache};
use crate::db::ReaderSettings;
use chrono::Duration;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Mutex;

const MAX_EXPIRY_HOURS: u32 = 24 * 30;

#[derive(Debug, Clone, Copy)]
struct RuntimeCacheConfig {
    enabled: bool,
    cache_expiry_hours: u32,
}

impl Default for RuntimeCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_expiry_hours: 24,
        }
    }
}

static CACHE: Lazy<Mutex<SimpleCache>> = Lazy::new(|| {
    let loaded = SimpleCache::load_from_storage().unwrap_or_default();
    Mutex::new(loaded)
});
static CACHE_CONFIG: Lazy<Mutex<RuntimeCacheConfig>> =
    Lazy::new(|| Mutex::new(RuntimeCacheConfig::default()));

fn effective_expiry_hours(override_hours: Option<u32>) -> u32 {
    let config = CACHE_CONFIG.lock().unwrap_or_else(|e| e.into_inner());
    override_hours
        .unwrap_or(config.cache_expiry_hours)
        .clamp(1, MAX_EXPIRY_HOURS)
}

fn can_cache() -> bool {
    CACHE_CONFIG.lock().unwrap_or_else(|e| e.into_inner()).enabled
}

pub fn apply_settings(settings: &ReaderSettings) {
    {
        let mut config = CACHE_CONFIG.lock().unwrap_or_else(|e| e.into_inner());
        config.enabled = settings.cache_enabled;
        config.cache_expiry_hours = settings.cache_expiry_hours.clamp(1, MAX_EXPIRY_HOURS);
    }

    let mut cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.resize_max_size_mb(settings.cache_size_mb.clamp(5, 512));
    cache.save_to_storage();
}

pub fn get_json<T>(key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    if !can_cache() {
        return None;
    }

    let cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    let bytes = cache.get(key)?.data.clone();
    drop(cache);
    serde_json::from_slice::<T>(&bytes).ok()
}

pub fn put_json<T>(key: impl Into<String>, value: &T, expiry_hours: Option<u32>) -> bool
where
    T: Serialize,
{
    if !can_cache() {
        return false;
    }

    let Ok(bytes) = serde_json::to_vec(value) else {
        return false;
    };
    let expiry = Duration::hours(effective_expiry_hours(expiry_hours) as i64);
    let entry = CacheEntry::new(bytes, "application/json", expiry);

    let mut cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.put(key.into(), entry);
    cache.save_to_storage();
    true
}

pub fn remove_by_prefix(prefix: &str) -> usize {
    let mut cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    let removed = cache.remove_prefix(prefix);
    if removed > 0 {
        cache.save_to_storage();
    }
    removed
}

pub fn stats() -> CacheStats {
    let cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.stats()
}
