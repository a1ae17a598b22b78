//! Single-flight call coalescing.
//!
//! While a call for a key is in flight, further calls for the same key
//! attach to it and receive a clone of its output. The entry is removed as
//! soon as the call settles, so the next call after that starts a fresh one.
//! There is no time-based caching.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

type InFlight<V> = Shared<BoxFuture<'static, V>>;
type InFlightMap<K, V> = Arc<Mutex<HashMap<K, InFlight<V>>>>;

/// Coalesces concurrent calls that share a key.
pub struct SingleFlight<K, V> {
    inflight: InFlightMap<K, V>,
}

impl<K, V> SingleFlight<K, V>
where
    K: Eq + Hash + Clone + Send + std::fmt::Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty group.
    pub fn new() -> Self {
        Self {
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Runs `make()` for `key`, or joins the call already in flight for it.
    ///
    /// `make` is only invoked when no call is in flight.
    pub async fn run<F, Fut>(&self, key: K, make: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let call = {
            let mut map = lock(&self.inflight);
            if let Some(existing) = map.get(&key) {
                debug!(key = ?key, "Joining in-flight call");
                existing.clone()
            } else {
                debug!(key = ?key, "Starting call");
                let registry = Arc::clone(&self.inflight);
                let settled_key = key.clone();
                let fut = make();
                let call = async move {
                    let value = fut.await;
                    lock(&registry).remove(&settled_key);
                    value
                }
                .boxed()
                .shared();
                map.insert(key, call.clone());
                call
            }
        };
        call.await
    }

    /// Returns true if a call for `key` is in flight.
    pub fn is_in_flight(&self, key: &K) -> bool {
        lock(&self.inflight).contains_key(key)
    }

    /// Number of keys with a call in flight.
    pub fn in_flight(&self) -> usize {
        lock(&self.inflight).len()
    }
}

impl<K, V> Default for SingleFlight<K, V>
where
    K: Eq + Hash + Clone + Send + std::fmt::Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

fn lock<K, V>(map: &InFlightMap<K, V>) -> std::sync::MutexGuard<'_, HashMap<K, InFlight<V>>> {
    map.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Tests
// ============================================================================
