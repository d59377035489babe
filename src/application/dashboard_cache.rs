// Client-side cache of the full dashboard read, keyed by user
use crate::application::layout_gateway::DashboardSource;
use crate::domain::dashboard::DashboardData;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub const DEFAULT_REFETCH_INTERVAL: Duration = Duration::from_secs(30);

struct Entry {
    data: Option<DashboardData>,
    fetched_at: Instant,
    stale: bool,
}

#[derive(Default)]
struct Entries {
    cached: HashMap<i32, Entry>,
    /// Bumped on every invalidate, so a fetch that overlaps one is never fresh
    epochs: HashMap<i32, u64>,
}

impl Entries {
    fn epoch(&self, user_id: i32) -> u64 {
        self.epochs.get(&user_id).copied().unwrap_or(0)
    }
}

pub struct DashboardCache {
    source: Arc<dyn DashboardSource>,
    refetch_interval: Duration,
    entries: Mutex<Entries>,
}

impl DashboardCache {
    pub fn new(source: Arc<dyn DashboardSource>, refetch_interval: Duration) -> Self {
        Self {
            source,
            refetch_interval,
            entries: Mutex::new(Entries::default()),
        }
    }

    /// Return the cached dashboard, fetching when missing, invalidated or
    /// older than the refetch interval
    pub async fn get(&self, user_id: i32) -> anyhow::Result<Option<DashboardData>> {
        let epoch = {
            let entries = self.entries.lock().await;
            if let Some(entry) = entries.cached.get(&user_id) {
                if !self.is_expired(entry) {
                    return Ok(entry.data.clone());
                }
            }
            entries.epoch(user_id)
        };

        let data = self.source.fetch_dashboard(user_id).await?;
        let mut entries = self.entries.lock().await;
        let stale = entries.epoch(user_id) != epoch;
        if stale {
            tracing::debug!("Dashboard for user {} was invalidated during the fetch", user_id);
        }
        entries.cached.insert(
            user_id,
            Entry {
                data: data.clone(),
                fetched_at: Instant::now(),
                stale,
            },
        );
        Ok(data)
    }

    /// Mark the user's entry stale so the next `get` goes to the source,
    /// including any fetch already in flight
    pub async fn invalidate(&self, user_id: i32) {
        let mut entries = self.entries.lock().await;
        *entries.epochs.entry(user_id).or_default() += 1;
        if let Some(entry) = entries.cached.get_mut(&user_id) {
            tracing::debug!("Invalidating cached dashboard for user {}", user_id);
            entry.stale = true;
        }
    }

    /// True when there is no usable entry for the user
    pub async fn is_stale(&self, user_id: i32) -> bool {
        match self.entries.lock().await.cached.get(&user_id) {
            Some(entry) => self.is_expired(entry),
            None => true,
        }
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        entry.stale || entry.fetched_at.elapsed() >= self.refetch_interval
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Notify, Semaphore};

    /// Counts fetches and always reports a missing user
    #[derive(Default)]
    pub(crate) struct CountingSource {
        pub fetches: AtomicUsize,
    }

    #[async_trait]
    impl DashboardSource for CountingSource {
        async fn fetch_dashboard(&self, _user_id: i32) -> anyhow::Result<Option<DashboardData>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    /// Holds every fetch until the test releases a permit
    struct GatedSource {
        started: Notify,
        gate: Semaphore,
        fetches: AtomicUsize,
    }

    impl GatedSource {
        fn new() -> Self {
            Self {
                started: Notify::new(),
                gate: Semaphore::new(0),
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DashboardSource for GatedSource {
        async fn fetch_dashboard(&self, _user_id: i32) -> anyhow::Result<Option<DashboardData>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.started.notify_one();
            self.gate.acquire().await?.forget();
            Ok(None)
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_get_caches_until_invalidated() {
        let source = Arc::new(CountingSource::default());
        let cache = DashboardCache::new(source.clone(), DEFAULT_REFETCH_INTERVAL);

        cache.get(1).await.unwrap();
        cache.get(1).await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert!(!cache.is_stale(1).await);

        cache.invalidate(1).await;
        assert!(cache.is_stale(1).await);
        cache.get(1).await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_entries_expire_after_refetch_interval() {
        let source = Arc::new(CountingSource::default());
        let cache = DashboardCache::new(source.clone(), Duration::from_secs(30));

        cache.get(1).await.unwrap();
        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(cache.is_stale(1).await);
        cache.get(1).await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_unknown_user_is_noop() {
        let cache = DashboardCache::new(Arc::new(CountingSource::default()), DEFAULT_REFETCH_INTERVAL);
        cache.invalidate(9).await;
        assert!(cache.is_stale(9).await);
    }

    #[tokio::test]
    async fn test_invalidate_during_fetch_leaves_entry_stale() {
        let source = Arc::new(GatedSource::new());
        let cache = Arc::new(DashboardCache::new(source.clone(), DEFAULT_REFETCH_INTERVAL));

        let in_flight = tokio::spawn({
            let cache = cache.clone();
            async move { cache.get(1).await }
        });
        source.started.notified().await;

        // A layout write lands while the older read is still out
        cache.invalidate(1).await;
        source.gate.add_permits(1);
        in_flight.await.unwrap().unwrap();
        assert!(cache.is_stale(1).await);

        source.gate.add_permits(1);
        cache.get(1).await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
        assert!(!cache.is_stale(1).await);
    }
}
