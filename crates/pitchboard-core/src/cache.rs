//! Memoizing fetch cache scoped to a single render pass.
//!
//! [`FetchCache::get_or_fetch`] issues the wrapped lookup at most once per
//! distinct key. The lookup is spawned onto the runtime immediately, so it is
//! in flight before anyone awaits it; every caller of the same key receives a
//! clone of the same [`PendingFetch`] and observes the same value or failure.
//! Failures are recorded like values and never retried within the cache's
//! lifetime.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::{Error, Result, TRACING_TARGET_CACHE};

/// A recorded lookup: in flight until its task settles, then immutable.
///
/// Cloning is cheap and every clone resolves to the same outcome. Successful
/// values are shared through `Arc`, so all callers see the same allocation.
pub type PendingFetch<V> = Shared<BoxFuture<'static, Result<Arc<V>>>>;

type FetchFn<K, V> = dyn Fn(K) -> BoxFuture<'static, Result<V>> + Send + Sync;

/// A recorded lookup and whether its task has finished.
struct Entry<V> {
    pending: PendingFetch<V>,
    settled: Arc<AtomicBool>,
}

impl<V> Entry<V> {
    fn is_settled(&self) -> bool {
        self.settled.load(Ordering::Acquire) || self.pending.peek().is_some()
    }
}

/// Keys accepted by [`FetchCache`].
pub trait CacheKey: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Returns `true` when the key lacks its required identifier.
    ///
    /// Lookups for such keys fail with
    /// [`ErrorKind::MissingIdentifier`](crate::ErrorKind::MissingIdentifier)
    /// before any remote call, and nothing is recorded.
    fn is_missing(&self) -> bool {
        false
    }
}

impl CacheKey for String {
    fn is_missing(&self) -> bool {
        self.trim().is_empty()
    }
}

/// Per-pass memoization of an asynchronous lookup.
pub struct FetchCache<K, V> {
    name: &'static str,
    fetch: Box<FetchFn<K, V>>,
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> fmt::Debug for FetchCache<K, V>
where
    K: CacheKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchCache")
            .field("name", &self.name)
            .field("keys", &self.lock().keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<K, V> FetchCache<K, V>
where
    K: CacheKey,
    V: Send + Sync + 'static,
{
    /// Wraps `fetch`; `name` identifies the cache in logs.
    pub fn new<F, Fut>(name: &'static str, fetch: F) -> Self
    where
        F: Fn(K) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<V>> + Send + 'static,
    {
        Self {
            name,
            fetch: Box::new(move |key| fetch(key).boxed()),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the recorded lookup for `key`, issuing it on first request.
    ///
    /// Must be called within a Tokio runtime.
    pub fn get_or_fetch(&self, key: K) -> PendingFetch<V> {
        if key.is_missing() {
            tracing::warn!(
                target: TRACING_TARGET_CACHE,
                cache = self.name,
                key = ?key,
                "Lookup requested without an identifier"
            );

            let error = Error::missing_identifier().with_context(self.name);
            return futures::future::ready(Err(error)).boxed().shared();
        }

        let mut entries = self.lock();
        if let Some(entry) = entries.get(&key) {
            tracing::trace!(
                target: TRACING_TARGET_CACHE,
                cache = self.name,
                key = ?key,
                settled = entry.is_settled(),
                "Cache hit"
            );

            return entry.pending.clone();
        }

        tracing::debug!(
            target: TRACING_TARGET_CACHE,
            cache = self.name,
            key = ?key,
            "Cache miss, issuing fetch"
        );

        let entry = self.spawn(key.clone());
        let pending = entry.pending.clone();
        entries.insert(key, entry);
        pending
    }

    /// Returns `true` if a lookup for `key` has been recorded.
    pub fn contains(&self, key: &K) -> bool {
        self.lock().contains_key(key)
    }

    /// Returns `true` if the lookup for `key` was recorded and has settled,
    /// whether or not anyone awaited it.
    pub fn is_settled(&self, key: &K) -> bool {
        self.lock().get(key).is_some_and(Entry::is_settled)
    }

    /// Number of recorded lookups.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been requested yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn spawn(&self, key: K) -> Entry<V> {
        let name = self.name;
        let fetch = (self.fetch)(key);
        let settled = Arc::new(AtomicBool::new(false));

        let flag = settled.clone();
        let handle = tokio::spawn(async move {
            let result = fetch.await;
            flag.store(true, Ordering::Release);
            result
        });

        let pending = async move {
            match handle.await {
                Ok(result) => result.map(Arc::new),
                Err(join_error) => Err(Error::internal_error()
                    .with_message("Fetch task did not complete")
                    .with_context(name)
                    .with_source(join_error)),
            }
        }
        .boxed()
        .shared();

        Entry { pending, settled }
    }
}

impl<K, V> FetchCache<K, V> {
    fn lock(&self) -> MutexGuard<'_, HashMap<K, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
