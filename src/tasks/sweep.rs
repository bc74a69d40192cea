//! Expiry Sweep Task
//!
//! Background task that periodically removes entries older than the
//! configured maximum age.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{BoundedExpiringCache, Clock};

/// Cache type shared between the sweep task and the HTTP handlers.
pub type SharedCache<C> = Arc<RwLock<BoundedExpiringCache<String, String, C>>>;

/// Spawns a background task that periodically sweeps stale entries.
///
/// The task sleeps for `interval` between runs and takes the write lock only
/// for the duration of one `remove_expired` call.
///
/// # Arguments
/// * `cache` - shared reference to the cache
/// * `max_age` - entries strictly older than this are removed
/// * `interval` - time between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it on shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(BoundedExpiringCache::new(5)?));
/// let handle = spawn_sweep_task(cache.clone(), Duration::from_secs(300), Duration::from_secs(1));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task<C>(
    cache: SharedCache<C>,
    max_age: Duration,
    interval: Duration,
) -> JoinHandle<()>
where
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(
            max_age_secs = max_age.as_secs_f64(),
            interval_secs = interval.as_secs_f64(),
            "Starting expiry sweep task"
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut guard = cache.write().await;
                let removed = guard.remove_expired(max_age);
                (removed, guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "Expiry sweep removed stale entries");
            } else {
                debug!(remaining, "Expiry sweep found no stale entries");
            }
        }
    })
}
