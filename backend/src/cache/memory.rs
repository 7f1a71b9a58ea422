//! In-process cache with per-entry expiry and a bounded entry count.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::{CacheError, CacheResult, CacheStore};

/// Expiry used when `now + ttl` is not representable.
const MAX_ENTRY_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 3600);

struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// Thread-safe in-memory [`CacheStore`].
///
/// When full, expired entries are purged first; if that frees nothing the
/// entry closest to expiry is evicted.
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    max_entries: usize,
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl InMemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    /// Number of stored entries, including not-yet-purged expired ones.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    fn make_room(entries: &mut HashMap<String, CacheEntry>, max_entries: usize, now: Instant) {
        if entries.len() < max_entries {
            return;
        }
        entries.retain(|_, entry| entry.expires_at > now);
        if entries.len() < max_entries {
            return;
        }
        if let Some(oldest) = entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone())
        {
            entries.remove(&oldest);
        }
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()> {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .or_else(|| now.checked_add(MAX_ENTRY_TTL))
            .ok_or_else(|| CacheError::Backend(format!("ttl of {:?} overflows", ttl)))?;
        let mut entries = self.entries.lock();
        if !entries.contains_key(key) {
            Self::make_room(&mut entries, self.max_entries, now);
        }
        entries.insert(
            key.to_string(),
            CacheEntry { value, expires_at },
        );
        Ok(())
    }
}
