// Layout sync controller - Keeps the client's layout in step with the layout endpoint
//
// Changes are adopted immediately and written after a quiet period. A write
// that fails is logged and dropped; the next change writes again.
use crate::application::dashboard_cache::DashboardCache;
use crate::application::layout_gateway::LayoutGateway;
use crate::domain::default_layout::default_layouts;
use crate::domain::layout::LayoutSnapshot;
use futures::future::BoxFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    /// A write is scheduled or in flight
    PendingWrite,
}

pub struct LayoutSyncController {
    user_id: i32,
    current: LayoutSnapshot,
    gateway: Arc<dyn LayoutGateway>,
    cache: Arc<DashboardCache>,
    debounce: Duration,
    /// The one scheduled write, if any. Replaced on every change.
    pending: Option<JoinHandle<()>>,
    generation: Arc<AtomicU64>,
    state: Arc<watch::Sender<SyncState>>,
}

impl LayoutSyncController {
    /// Initial render state for `user_id`: the previously persisted snapshot
    /// if the caller fetched one, otherwise the built-in default. Makes no
    /// network call.
    pub fn initialize(user_id: i32, seed: Option<LayoutSnapshot>) -> LayoutSnapshot {
        match seed {
            Some(snapshot) => snapshot,
            None => {
                tracing::debug!("No saved layout for user {}, using the default", user_id);
                default_layouts()
            }
        }
    }

    pub fn new(
        user_id: i32,
        seed: Option<LayoutSnapshot>,
        gateway: Arc<dyn LayoutGateway>,
        cache: Arc<DashboardCache>,
    ) -> Self {
        let (state, _) = watch::channel(SyncState::Idle);
        Self {
            user_id,
            current: Self::initialize(user_id, seed),
            gateway,
            cache,
            debounce: DEFAULT_DEBOUNCE,
            pending: None,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(state),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    /// Current render state
    pub fn layouts(&self) -> &LayoutSnapshot {
        &self.current
    }

    pub fn state(&self) -> SyncState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Adopt a snapshot emitted by the grid and schedule its write after the
    /// quiet period, replacing any write still waiting
    pub fn on_layout_changed(&mut self, snapshot: LayoutSnapshot) {
        self.current = snapshot;
        self.cancel_scheduled();

        let deadline = tokio::time::Instant::now() + self.debounce;
        let write = self.write(self.current.clone());
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // Detached: cancelling the schedule must not cancel a sent write
            tokio::spawn(write);
        }));
    }

    /// Restore the default arrangement and write it without waiting
    pub fn reset_layout(&mut self) {
        self.current = default_layouts();
        self.cancel_scheduled();

        tracing::info!("Resetting layout for user {}", self.user_id);
        tokio::spawn(self.write(self.current.clone()));
    }

    fn cancel_scheduled(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Build the write for `snapshot` and move the state machine to
    /// `PendingWrite`. Only the newest write may return it to `Idle`.
    fn write(&self, snapshot: LayoutSnapshot) -> BoxFuture<'static, ()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(SyncState::PendingWrite);

        let user_id = self.user_id;
        let gateway = self.gateway.clone();
        let cache = self.cache.clone();
        let latest = self.generation.clone();
        let state = self.state.clone();

        Box::pin(async move {
            match gateway.save_layout(user_id, &snapshot).await {
                Ok(record) => {
                    tracing::debug!("Persisted layout {} for user {}", record.id, user_id);
                    cache.invalidate(user_id).await;
                }
                Err(e) => {
                    tracing::warn!("Dropping layout write for user {}: {:#}", user_id, e);
                }
            }

            if latest.load(Ordering::SeqCst) == generation {
                state.send_replace(SyncState::Idle);
            }
        })
    }
}
