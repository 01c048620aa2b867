//! TTL caching with an injectable clock.
//!
//! Both resolver caches (book listings, single-book content) sit on this
//! type. The clock is a trait so tests drive expiry deterministically
//! instead of sleeping through wall time.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock advanced by hand; for tests.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    /// Create a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = *self.offset.lock().unwrap_or_else(|e| e.into_inner());
        self.base + offset
    }
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// A keyed cache whose entries expire after a fixed TTL.
///
/// Concurrent misses that both populate the same key are an idempotent
/// overwrite, not a race worth guarding against.
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache with the given TTL on the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create a cache with the given TTL and clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Look up a live entry; expired entries count as misses.
    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.expires_at > self.clock.now() {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Insert a value, stamping it with the TTL. Drops any expired entries
    /// on the way.
    pub async fn insert(&self, key: K, value: V) {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key,
            Entry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Remove one entry.
    pub async fn invalidate(&self, key: &K) {
        self.entries.write().await.remove(key);
    }

    /// Remove everything.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hit_within_ttl() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("a".to_string(), 1).await;
        assert_eq!(cache.get(&"a".to_string()).await, Some(1));
    }

    #[tokio::test]
    async fn miss_after_expiry() {
        let clock = Arc::new(ManualClock::new());
        let cache: TtlCache<String, u32> =
            TtlCache::with_clock(Duration::from_secs(60), clock.clone());
        cache.insert("a".to_string(), 1).await;

        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get(&"a".to_string()).await, Some(1));

        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get(&"a".to_string()).await, None);
    }

    #[tokio::test]
    async fn insert_refreshes_ttl() {
        let clock = Arc::new(ManualClock::new());
        let cache: TtlCache<String, u32> =
            TtlCache::with_clock(Duration::from_secs(60), clock.clone());
        cache.insert("a".to_string(), 1).await;
        clock.advance(Duration::from_secs(45));
        cache.insert("a".to_string(), 2).await;
        clock.advance(Duration::from_secs(45));
        assert_eq!(cache.get(&"a".to_string()).await, Some(2));
    }

    #[tokio::test]
    async fn invalidate_removes_entry() {
        let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60));
        cache.insert("a".to_string(), 1).await;
        cache.invalidate(&"a".to_string()).await;
        assert_eq!(cache.get(&"a".to_string()).await, None);
    }

    #[tokio::test]
    async fn double_population_is_idempotent() {
        // Two tasks miss and both populate; the second write wins and the
        // entry stays live either way.
        let cache: Arc<TtlCache<String, u32>> =
            Arc::new(TtlCache::new(Duration::from_secs(60)));
        let a = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.insert("k".to_string(), 7).await })
        };
        let b = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.insert("k".to_string(), 7).await })
        };
        a.await.unwrap();
        b.await.unwrap();
        assert_eq!(cache.get(&"k".to_string()).await, Some(7));
    }

    #[tokio::test]
    async fn expired_entries_swept_on_insert() {
        let clock = Arc::new(ManualClock::new());
        let cache: TtlCache<String, u32> =
            TtlCache::with_clock(Duration::from_secs(10), clock.clone());
        cache.insert("old".to_string(), 1).await;
        clock.advance(Duration::from_secs(20));
        cache.insert("new".to_string(), 2).await;
        assert!(cache.entries.read().await.len() == 1);
    }
}
