use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

type Slot<V> = Arc<Mutex<Option<Entry<V>>>>;

/// A key-value cache whose entries expire a fixed time after insertion.
///
/// Each key has its own slot lock. Concurrent callers asking for the same key
/// wait on that slot, so only the first computes the value; callers for other
/// keys are not blocked. Failed computations are not stored.
pub struct TtlCache<K, V> {
    ttl: Duration,
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value for `key` if it has not expired.
    pub async fn get(&self, key: &K) -> Option<V> {
        let slot = self.slots.lock().await.get(key).cloned()?;
        let entry = slot.lock().await;
        entry
            .as_ref()
            .filter(|e| e.inserted_at.elapsed() < self.ttl)
            .map(|e| e.value.clone())
    }

    /// Returns the fresh cached value for `key`, or runs `compute` and caches its result.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.entry(key.clone()).or_default().clone()
        };

        let mut entry = slot.lock().await;
        if let Some(cached) = entry.as_ref() {
            if cached.inserted_at.elapsed() < self.ttl {
                tracing::debug!(?key, "Cache hit.");
                return Ok(cached.value.clone());
            }
            tracing::debug!(?key, "Cache entry expired.");
        }

        let value = compute().await?;
        *entry = Some(Entry {
            value: value.clone(),
            inserted_at: Instant::now(),
        });
        Ok(value)
    }

    /// Drops every expired entry.
    pub async fn purge_expired(&self) {
        let mut slots = self.slots.lock().await;
        let mut expired = Vec::new();
        for (key, slot) in slots.iter() {
            // A slot that is locked is being filled right now, so it is not stale.
            if let Ok(entry) = slot.try_lock() {
                let stale = entry
                    .as_ref()
                    .is_none_or(|e| e.inserted_at.elapsed() >= self.ttl);
                if stale {
                    expired.push(key.clone());
                }
            }
        }
        for key in expired {
            slots.remove(&key);
        }
    }

    /// Number of keys currently holding a slot, fresh or not.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }
}
