// Layout service - Use case for reading and upserting dashboard layouts
use crate::application::fitness_repository::FitnessRepository;
use crate::domain::fitness::DashboardLayoutRecord;
use crate::domain::layout::WIDGET_CONSTRAINTS;
use std::sync::Arc;

#[derive(Clone)]
pub struct LayoutService {
    repository: Arc<dyn FitnessRepository>,
}

impl LayoutService {
    pub fn new(repository: Arc<dyn FitnessRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_layout(&self, user_id: i32) -> anyhow::Result<Option<DashboardLayoutRecord>> {
        self.repository.get_dashboard_layout(user_id).await
    }

    pub async fn save_layout(
        &self,
        user_id: i32,
        layout_data: serde_json::Value,
    ) -> anyhow::Result<DashboardLayoutRecord> {
        let record = self.repository.save_dashboard_layout(user_id, layout_data).await?;

        // Out-of-bounds layouts are stored as submitted; the grid engine owns placement
        match record.layout_data.as_snapshot() {
            Some(snapshot) => {
                let violations = snapshot.violations(&WIDGET_CONSTRAINTS);
                if !violations.is_empty() {
                    tracing::warn!(
                        "Layout for user {} has {} constraint violations: {:?}",
                        user_id,
                        violations.len(),
                        violations
                    );
                }
            }
            None => tracing::info!("Stored fallback widget list for user {}", user_id),
        }

        tracing::debug!("Saved layout {} for user {}", record.id, user_id);
        Ok(record)
    }
}
