// Client-side seams to the remote dashboard API
use crate::domain::dashboard::DashboardData;
use crate::domain::fitness::DashboardLayoutRecord;
use crate::domain::layout::LayoutSnapshot;
use async_trait::async_trait;

/// Remote store for a user's layout snapshot
#[async_trait]
pub trait LayoutGateway: Send + Sync {
    /// Fetch the persisted record, `None` when the user has never saved one
    async fn fetch_layout(&self, user_id: i32) -> anyhow::Result<Option<DashboardLayoutRecord>>;

    async fn save_layout(&self, user_id: i32, snapshot: &LayoutSnapshot) -> anyhow::Result<DashboardLayoutRecord>;
}

/// Source of the full dashboard read
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn fetch_dashboard(&self, user_id: i32) -> anyhow::Result<Option<DashboardData>>;
}
