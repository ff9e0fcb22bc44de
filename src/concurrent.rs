//! Thread-safe wrapper for any policy.
//!
//! Every policy mutates ordering state on `read`, so sharing one requires a
//! lock around each call. [`ConcurrentCache`] packages that lock: it holds the
//! policy behind `Arc<parking_lot::Mutex<_>>`, and clones share the same cache.
//!
//! ```text
//!   thread A ──┐
//!   thread B ──┼──► Arc<Mutex<C>> ──► C: CoreCache<K, V>
//!   thread C ──┘        one call holds the lock at a time
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use std::thread;
//!
//! use evictkit::concurrent::ConcurrentCache;
//! use evictkit::policy::arc::ArcCache;
//!
//! let cache = ConcurrentCache::new(ArcCache::new(64));
//! let handles: Vec<_> = (0..4u64)
//!     .map(|t| {
//!         let cache = cache.clone();
//!         thread::spawn(move || {
//!             for i in 0..16 {
//!                 cache.write(t * 100 + i, i);
//!             }
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert!(cache.len() <= 64);
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::traits::CoreCache;

/// Shared handle to a policy guarded by a mutex.
#[derive(Debug)]
pub struct ConcurrentCache<C, K, V> {
    inner: Arc<Mutex<C>>,
    _marker: PhantomData<fn(K, V)>,
}

impl<C, K, V> Clone for ConcurrentCache<C, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<C, K, V> ConcurrentCache<C, K, V>
where
    C: CoreCache<K, V>,
{
    /// Wraps `cache` for sharing across threads.
    pub fn new(cache: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
            _marker: PhantomData,
        }
    }

    pub fn read(&self, key: &K) -> Option<V> {
        self.inner.lock().read(key)
    }

    pub fn write(&self, key: K, value: V) {
        self.inner.lock().write(key, value);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Runs `f` with exclusive access, for multi-step operations that must
    /// not interleave with other threads.
    ///
    /// ```
    /// use evictkit::concurrent::ConcurrentCache;
    /// use evictkit::policy::lru::LruCache;
    /// use evictkit::traits::CoreCache;
    ///
    /// let cache = ConcurrentCache::new(LruCache::new(4));
    /// let value = cache.with_lock(|c| match c.read(&1) {
    ///     Some(v) => v,
    ///     None => {
    ///         c.write(1, 10);
    ///         10
    ///     },
    /// });
    /// assert_eq!(value, 10);
    /// ```
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}
