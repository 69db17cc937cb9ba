//! Bounded least-recently-used cache.
//!
//! # Design Decisions
//! - One `parking_lot::Mutex` around a `LinkedHashMap`; insertion order is
//!   access order, the front is the least recently used entry
//! - A hit moves the entry to the back
//! - `get` and `insert` each hold the lock for their whole operation, so a
//!   single key's lookup and store are atomic; nothing spans several keys

use std::hash::Hash;
use std::num::NonZeroUsize;

use hashlink::LinkedHashMap;
use parking_lot::Mutex;

/// Fixed-capacity LRU map.
pub struct LruCache<K, V> {
    capacity: NonZeroUsize,
    map: Mutex<LinkedHashMap<K, V>>,
}

impl<K: Hash + Eq, V: Clone> LruCache<K, V> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            map: Mutex::new(LinkedHashMap::new()),
        }
    }

    /// Look up `key`, marking it most recently used on a hit.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut map = self.map.lock();
        let value = map.get(key).cloned()?;
        map.to_back(key);
        Some(value)
    }

    /// Insert `key`, evicting least recently used entries past capacity.
    pub fn insert(&self, key: K, value: V) {
        let mut map = self.map.lock();
        map.insert(key, value);
        while map.len() > self.capacity.get() {
            map.pop_front();
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

impl<K, V> std::fmt::Debug for LruCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("len", &self.map.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn cache(capacity: usize) -> LruCache<String, u32> {
        LruCache::new(NonZeroUsize::new(capacity).unwrap())
    }

    #[test]
    fn test_get_and_insert() {
        let cache = cache(4);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a".to_string()), None);

        cache.insert("a".into(), 1);
        cache.insert("b".into(), 2);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
        assert_eq!(cache.get(&"b".to_string()), Some(2));
        assert_eq!(cache.len(), 2);

        cache.insert("a".into(), 3);
        assert_eq!(cache.get(&"a".to_string()), Some(3));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = cache(2);
        cache.insert("A".into(), 1);
        cache.insert("B".into(), 2);
        assert_eq!(cache.get(&"A".to_string()), Some(1));
        cache.insert("C".into(), 3);

        assert!(cache.contains(&"A".to_string()));
        assert!(!cache.contains(&"B".to_string()));
        assert!(cache.contains(&"C".to_string()));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let cache = cache(3);
        for i in 0..100u32 {
            cache.insert(i.to_string(), i);
            assert!(cache.len() <= cache.capacity());
        }
        // The three most recent survive.
        for i in 97..100u32 {
            assert_eq!(cache.get(&i.to_string()), Some(i));
        }
    }

    #[test]
    fn test_concurrent_access_keeps_keys_consistent() {
        let cache = Arc::new(cache(16));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    for i in 0..500u32 {
                        let key = (i % 32).to_string();
                        if let Some(v) = cache.get(&key) {
                            assert_eq!(v.to_string(), key);
                        }
                        cache.insert(key, i % 32);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= 16);
    }
}
