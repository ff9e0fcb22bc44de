//! Unified cache builder for all eviction policies.
//!
//! Provides one entry point for constructing any policy, either from a
//! [`CachePolicy`] value or from its string identifier, and a [`Cache`]
//! wrapper that dispatches the read/write contract to the chosen policy.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::{CacheBuilder, CachePolicy};
//! use evictkit::traits::CoreCache;
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lru);
//! cache.write(1, "hello".to_string());
//! assert_eq!(cache.read(&1), Some("hello".to_string()));
//!
//! let named = CacheBuilder::new(100).build_named::<u64, u64>("cache-arc");
//! assert!(named.is_ok());
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::policy::arc::ArcCache;
use crate::policy::lfru::LfruCache;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::mru::MruCache;
use crate::policy::slru::SlruCache;
use crate::traits::{CoreCache, ReadOnlyCache};

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CachePolicy {
    /// Least Recently Used eviction.
    Lru,
    /// Most Recently Used eviction with self-consuming reads.
    Mru,
    /// Least Frequently Used eviction.
    Lfu,
    /// Segmented LRU: probation and protected recency segments.
    Slru,
    /// Privileged recency segment over an unprivileged LFU segment.
    Lfru,
    /// Adaptive Replacement Cache.
    Arc,
}

impl CachePolicy {
    /// Every policy, in a stable order.
    pub const ALL: [CachePolicy; 6] = [
        CachePolicy::Lru,
        CachePolicy::Mru,
        CachePolicy::Lfu,
        CachePolicy::Slru,
        CachePolicy::Lfru,
        CachePolicy::Arc,
    ];

    /// Short lowercase identifier (`"lru"`, `"arc"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            CachePolicy::Lru => "lru",
            CachePolicy::Mru => "mru",
            CachePolicy::Lfu => "lfu",
            CachePolicy::Slru => "slru",
            CachePolicy::Lfru => "lfru",
            CachePolicy::Arc => "arc",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_ascii_uppercase())
    }
}

impl FromStr for CachePolicy {
    type Err = ConfigError;

    /// Accepts `lru`, `mru`, `lfu`, `slru`, `lfru`, `arc`, case-insensitive,
    /// optionally prefixed with `cache-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let name = lowered.strip_prefix("cache-").unwrap_or(&lowered);
        CachePolicy::ALL
            .into_iter()
            .find(|policy| policy.name() == name)
            .ok_or_else(|| ConfigError::UnknownPolicy(s.to_string()))
    }
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
#[derive(Debug)]
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

#[derive(Debug)]
enum CacheInner<K, V> {
    Lru(LruCache<K, V>),
    Mru(MruCache<K, V>),
    Lfu(LfuCache<K, V>),
    Slru(SlruCache<K, V>),
    Lfru(LfruCache<K, V>),
    Arc(ArcCache<K, V>),
}

impl<K, V> Cache<K, V> {
    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Mru(_) => CachePolicy::Mru,
            CacheInner::Lfu(_) => CachePolicy::Lfu,
            CacheInner::Slru(_) => CachePolicy::Slru,
            CacheInner::Lfru(_) => CachePolicy::Lfru,
            CacheInner::Arc(_) => CachePolicy::Arc,
        }
    }
}

impl<K, V> ReadOnlyCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lru(lru) => lru.contains(key),
            CacheInner::Mru(mru) => mru.contains(key),
            CacheInner::Lfu(lfu) => lfu.contains(key),
            CacheInner::Slru(slru) => slru.contains(key),
            CacheInner::Lfru(lfru) => lfru.contains(key),
            CacheInner::Arc(arc) => arc.contains(key),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Mru(mru) => mru.len(),
            CacheInner::Lfu(lfu) => lfu.len(),
            CacheInner::Slru(slru) => slru.len(),
            CacheInner::Lfru(lfru) => lfru.len(),
            CacheInner::Arc(arc) => arc.len(),
        }
    }

    fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Mru(mru) => mru.capacity(),
            CacheInner::Lfu(lfu) => lfu.capacity(),
            CacheInner::Slru(slru) => slru.capacity(),
            CacheInner::Lfru(lfru) => lfru.capacity(),
            CacheInner::Arc(arc) => arc.capacity(),
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn read(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.read(key),
            CacheInner::Mru(mru) => mru.read(key),
            CacheInner::Lfu(lfu) => lfu.read(key),
            CacheInner::Slru(slru) => slru.read(key),
            CacheInner::Lfru(lfru) => lfru.read(key),
            CacheInner::Arc(arc) => arc.read(key),
        }
    }

    fn write(&mut self, key: K, value: V) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.write(key, value),
            CacheInner::Mru(mru) => mru.write(key, value),
            CacheInner::Lfu(lfu) => lfu.write(key, value),
            CacheInner::Slru(slru) => slru.write(key, value),
            CacheInner::Lfru(lfru) => lfru.write(key, value),
            CacheInner::Arc(arc) => arc.write(key, value),
        }
    }

    fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Mru(mru) => mru.clear(),
            CacheInner::Lfu(lfu) => lfu.clear(),
            CacheInner::Slru(slru) => slru.clear(),
            CacheInner::Lfru(lfru) => lfru.clear(),
            CacheInner::Arc(arc) => arc.clear(),
        }
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy.
    ///
    /// A capacity of 0 is passed through; the resulting cache admits
    /// nothing. Use [`try_build`](Self::try_build) to reject it instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::{CacheBuilder, CachePolicy};
    /// use evictkit::traits::ReadOnlyCache;
    ///
    /// let cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Slru);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        let inner = match policy {
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(self.capacity)),
            CachePolicy::Mru => CacheInner::Mru(MruCache::new(self.capacity)),
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::new(self.capacity)),
            CachePolicy::Slru => CacheInner::Slru(SlruCache::new(self.capacity)),
            CachePolicy::Lfru => CacheInner::Lfru(LfruCache::new(self.capacity)),
            CachePolicy::Arc => CacheInner::Arc(ArcCache::new(self.capacity)),
        };

        Cache { inner }
    }

    /// Like [`build`](Self::build) but rejects a zero capacity.
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(self.build(policy))
    }

    /// Builds from a policy identifier such as `"lru"` or `"cache-arc"`.
    ///
    /// ```rust
    /// use evictkit::builder::CacheBuilder;
    /// use evictkit::error::ConfigError;
    ///
    /// let err = CacheBuilder::new(8).build_named::<u64, u64>("clock").unwrap_err();
    /// assert_eq!(err, ConfigError::UnknownPolicy("clock".into()));
    /// ```
    pub fn build_named<K, V>(self, name: &str) -> Result<Cache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        let policy = name.parse::<CachePolicy>()?;
        self.try_build(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_policies_basic_ops() {
        for policy in CachePolicy::ALL {
            let mut cache = CacheBuilder::new(10).build::<u64, String>(policy);
            assert_eq!(cache.policy(), policy);

            cache.write(1, "one".to_string());
            cache.write(2, "two".to_string());

            assert!(cache.len() <= 2, "{policy}");
            assert_eq!(cache.read(&3), None, "{policy}");
            assert!(!cache.contains(&99));
            assert_eq!(cache.capacity(), 10);

            cache.clear();
            assert!(cache.is_empty(), "{policy}");
        }
    }

    #[test]
    fn test_capacity_enforcement() {
        let mut cache = CacheBuilder::new(2).build::<u64, String>(CachePolicy::Lru);

        cache.write(1, "one".to_string());
        cache.write(2, "two".to_string());
        cache.write(3, "three".to_string()); // evicts key 1

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn test_parse_policy_names() {
        assert_eq!("lru".parse::<CachePolicy>(), Ok(CachePolicy::Lru));
        assert_eq!("ARC".parse::<CachePolicy>(), Ok(CachePolicy::Arc));
        assert_eq!("cache-lfru".parse::<CachePolicy>(), Ok(CachePolicy::Lfru));
        assert_eq!("Cache-SLRU".parse::<CachePolicy>(), Ok(CachePolicy::Slru));
        assert_eq!(
            "fifo".parse::<CachePolicy>(),
            Err(ConfigError::UnknownPolicy("fifo".to_string()))
        );
        assert!("".parse::<CachePolicy>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for policy in CachePolicy::ALL {
            assert_eq!(policy.to_string().parse::<CachePolicy>(), Ok(policy));
        }
        assert_eq!(CachePolicy::Lfru.to_string(), "LFRU");
    }

    #[test]
    fn test_try_build_rejects_zero_capacity() {
        for policy in CachePolicy::ALL {
            let err = CacheBuilder::new(0).try_build::<u64, u64>(policy).unwrap_err();
            assert_eq!(err, ConfigError::ZeroCapacity);
        }
        let cache = CacheBuilder::new(0).build::<u64, u64>(CachePolicy::Lru);
        assert_eq!(cache.capacity(), 0);
    }

    #[test]
    fn test_build_named() {
        let cache = CacheBuilder::new(4).build_named::<u64, u64>("cache-mru").unwrap();
        assert_eq!(cache.policy(), CachePolicy::Mru);
        assert_eq!(
            CacheBuilder::new(0).build_named::<u64, u64>("lru").unwrap_err(),
            ConfigError::ZeroCapacity
        );
    }
}
