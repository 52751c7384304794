use std::hash::Hash;
use std::sync::{Arc, RwLock};

use ahash::AHashMap;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone)]
struct Value<T> {
    value: Arc<T>,
    expires: DateTime<Utc>,
}

/// Small TTL cache for upstream responses, shared between handlers.
/// Writers take the lock one key-write at a time.
#[derive(Debug)]
pub struct RequestCache<K, T> {
    map: Arc<RwLock<AHashMap<K, Value<T>>>>,
    timeout: Duration,
}

impl<K, T> Clone for RequestCache<K, T> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
            timeout: self.timeout,
        }
    }
}

impl<K, T> Default for RequestCache<K, T> {
    fn default() -> Self {
        Self {
            timeout: Duration::minutes(1),
            map: Arc::<RwLock<AHashMap<K, Value<T>>>>::default(),
        }
    }
}

impl<K, T> RequestCache<K, T>
where
    K: Eq + Hash,
{
    #[must_use]
    pub fn new(timeout: Duration) -> RequestCache<K, T> {
        RequestCache {
            timeout,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<Arc<T>> {
        if let Some(v) = self
            .map
            .read()
            .expect("RWLock should never be poisoned")
            .get(key)
        {
            if v.expires >= Utc::now() {
                return Some(v.value.clone());
            }
        }
        None
    }

    pub fn insert(&self, key: K, value: T, expires: DateTime<Utc>) {
        if expires <= Utc::now() {
            return;
        }
        let value = Value {
            value: Arc::new(value),
            expires,
        };
        self.map
            .write()
            .expect("RWLock should never be poisoned")
            .insert(key, value);
    }

    pub fn insert_with_timeout(&self, key: K, value: T, timeout: Duration) {
        self.insert(key, value, Utc::now() + timeout);
    }

    pub fn insert_with_default_timeout(&self, key: K, value: T) {
        self.insert_with_timeout(key, value, self.timeout);
    }

    pub fn invalidate(&self, key: &K) {
        self.map
            .write()
            .expect("RWLock should never be poisoned")
            .remove(key);
    }

    pub fn invalidate_all(&self) {
        self.map
            .write()
            .expect("RWLock should never be poisoned")
            .clear();
    }

    pub fn invalidate_expired(&self) {
        let mut map = self.map.write().expect("RWLock should never be poisoned");
        let now = Utc::now();
        map.retain(|_, v| v.expires > now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_inserted_value_until_expiry() {
        let cache = RequestCache::<&str, u32>::new(Duration::minutes(1));
        cache.insert_with_default_timeout("answer", 42);

        assert_eq!(cache.get(&"answer").as_deref(), Some(&42));
        assert!(cache.get(&"missing").is_none());
    }

    #[test]
    fn test_expired_values_are_not_served() {
        let cache = RequestCache::<&str, u32>::default();
        cache.insert("stale", 1, Utc::now() - Duration::seconds(1));

        assert!(cache.get(&"stale").is_none());
    }

    #[test]
    fn test_invalidate_removes_a_single_key() {
        let cache = RequestCache::<u32, String>::new(Duration::minutes(5));
        cache.insert_with_default_timeout(1, "one".into());
        cache.insert_with_default_timeout(2, "two".into());

        cache.invalidate(&1);

        assert!(cache.get(&1).is_none());
        assert!(cache.get(&2).is_some());
    }

    #[test]
    fn test_invalidate_expired_retains_live_entries() {
        let cache = RequestCache::<u32, u32>::default();
        cache.insert(1, 10, Utc::now() + Duration::minutes(5));
        cache.insert(2, 20, Utc::now() + Duration::milliseconds(5));
        std::thread::sleep(std::time::Duration::from_millis(20));

        cache.invalidate_expired();

        assert!(cache.get(&1).is_some());
        assert!(cache.get(&2).is_none());
    }
}
