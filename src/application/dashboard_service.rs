// Dashboard service - Use case for the full dashboard read
use crate::application::fitness_repository::FitnessRepository;
use crate::domain::dashboard::DashboardData;
use std::sync::Arc;

const RECENT_WORKOUTS: usize = 5;
const RECENT_RECOMMENDATIONS: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn FitnessRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn FitnessRepository>) -> Self {
        Self { repository }
    }

    /// Assemble the dashboard for a user. `Ok(None)` when the user does not exist.
    pub async fn get_dashboard(&self, user_id: i32) -> anyhow::Result<Option<DashboardData>> {
        let repo = &self.repository;

        // Fetch all parts concurrently
        let (user, metrics, workouts, nutrition, goals, recommendations, layout) = futures::try_join!(
            repo.get_user(user_id),
            repo.get_latest_fitness_metrics(user_id),
            repo.get_workouts(user_id, RECENT_WORKOUTS),
            repo.get_latest_nutrition(user_id),
            repo.get_goals(user_id),
            repo.get_recommendations(user_id, RECENT_RECOMMENDATIONS),
            repo.get_dashboard_layout(user_id),
        )?;

        let Some(user) = user else {
            tracing::debug!("Dashboard requested for unknown user {}", user_id);
            return Ok(None);
        };

        Ok(Some(DashboardData::new(
            user,
            metrics,
            workouts,
            nutrition,
            goals,
            recommendations,
            layout,
        )))
    }
}
