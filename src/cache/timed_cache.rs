//! Time-based single-value cache with TTL (Time To Live) support.
//!
//! The contact list is the only cached read in this crate, so the cache
//! holds one value. It is thread-safe and can be cloned cheaply (uses Arc
//! internally); clones share the underlying slot.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// A cached value with a timestamp.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// A thread-safe single-slot cache with time-based expiration.
///
/// The value expires after the configured TTL and can be invalidated
/// explicitly after a mutation so the next read refetches.
#[derive(Clone)]
pub struct TimedCache<V>
where
    V: Clone,
{
    slot: Arc<RwLock<Option<CacheEntry<V>>>>,
    ttl: Duration,
}

impl<V> TimedCache<V>
where
    V: Clone,
{
    /// Create a new TimedCache with the specified TTL in seconds.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            ttl: Duration::from_secs(ttl_seconds),
        }
    }

    /// Store a value, replacing any previous one.
    pub fn insert(&self, value: V) {
        let entry = CacheEntry {
            value,
            inserted_at: Instant::now(),
        };

        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(entry);
        }
    }

    /// Get the cached value if it exists and hasn't expired.
    pub fn get(&self) -> Option<V> {
        let now = Instant::now();

        if let Ok(slot) = self.slot.read() {
            if let Some(entry) = slot.as_ref() {
                if now.duration_since(entry.inserted_at) < self.ttl {
                    return Some(entry.value.clone());
                }
            }
        }

        None
    }

    /// Drop the cached value so the next read refetches.
    pub fn invalidate(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    /// Whether a live (non-expired) value is cached.
    pub fn is_fresh(&self) -> bool {
        self.get().is_some()
    }

    /// Get the TTL duration for this cache.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<V> std::fmt::Debug for TimedCache<V>
where
    V: Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache")
            .field("ttl", &self.ttl)
            .field("fresh", &self.is_fresh())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_insert_and_get() {
        let cache = TimedCache::new(60);
        assert_eq!(cache.get(), None);

        cache.insert("value1");
        assert_eq!(cache.get(), Some("value1"));
    }

    #[test]
    fn test_ttl_expiration() {
        let cache = TimedCache::new(1); // 1 second TTL
        cache.insert("value1");

        // Should exist immediately
        assert_eq!(cache.get(), Some("value1"));

        // Wait for expiration
        thread::sleep(Duration::from_millis(1100));

        // Should be expired
        assert_eq!(cache.get(), None);
        assert!(!cache.is_fresh());
    }

    #[test]
    fn test_invalidate() {
        let cache = TimedCache::new(60);
        cache.insert("value1");
        assert!(cache.is_fresh());

        cache.invalidate();

        assert_eq!(cache.get(), None);
        assert!(!cache.is_fresh());
    }

    #[test]
    fn test_replace_value() {
        let cache = TimedCache::new(60);
        cache.insert("value1");
        cache.insert("value2");
        assert_eq!(cache.get(), Some("value2"));
    }

    #[test]
    fn test_clone_shares_slot() {
        let cache1 = TimedCache::new(60);
        cache1.insert("value1");

        let cache2 = cache1.clone();
        assert_eq!(cache2.get(), Some("value1"));

        // Invalidation through one handle is visible through the other
        cache2.invalidate();
        assert_eq!(cache1.get(), None);
    }

    #[test]
    fn test_debug_format() {
        let cache: TimedCache<&str> = TimedCache::new(60);
        let debug_str = format!("{:?}", cache);
        assert!(debug_str.contains("TimedCache"));
        assert!(debug_str.contains("ttl"));
    }
}
