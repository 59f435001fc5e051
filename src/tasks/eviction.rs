//! Eviction Task
//!
//! Background task that periodically removes expired cache entries.
//! Reads never depend on it for correctness, since every read path checks
//! expiry itself; the task only reclaims memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::{CacheStore, StatsRecorder};

/// Interval used when the configured one is zero.
pub const DEFAULT_EVICTION_INTERVAL: Duration = Duration::from_secs(60);

/// Longest accepted interval. Larger values are clamped so the first tick
/// deadline stays representable as an `Instant`.
pub const MAX_EVICTION_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Returns `interval`, [`DEFAULT_EVICTION_INTERVAL`] when it is zero, or
/// [`MAX_EVICTION_INTERVAL`] when it is longer than that.
pub fn effective_interval(interval: Duration) -> Duration {
    if interval.is_zero() {
        DEFAULT_EVICTION_INTERVAL
    } else {
        interval.min(MAX_EVICTION_INTERVAL)
    }
}

/// Spawns a background task that evicts expired entries every `interval`.
///
/// The first sweep runs one full interval after spawning. Each sweep holds
/// the store's write lock for the whole scan-and-delete, so no writer can
/// refresh a key between the expiry check and its removal.
///
/// The loop exits once `shutdown` is cancelled. A sweep that has already
/// started runs to completion first.
///
/// # Panics
/// Must be called from within a tokio runtime.
pub fn spawn_eviction_task(
    store: Arc<RwLock<CacheStore>>,
    stats: Arc<StatsRecorder>,
    interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    let interval = effective_interval(interval);

    tokio::spawn(async move {
        info!("Starting eviction task with interval of {:?}", interval);

        let mut ticker = interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = {
                        let mut store = store.write().await;
                        store.evict_expired()
                    };

                    if removed > 0 {
                        stats.record_evictions(removed);
                        info!("Eviction: removed {} expired entries", removed);
                    } else {
                        debug!("Eviction: no expired entries found");
                    }
                }
            }
        }

        info!("Eviction task stopped");
    })
}
