// Repository trait for fitness data access
use crate::domain::fitness::{
    AiRecommendation, DashboardLayoutRecord, FitnessMetrics, Goal, GoalPatch, NewAiRecommendation,
    NewFitnessMetrics, NewGoal, NewNutrition, NewWorkout, Nutrition, User, Workout,
};
use async_trait::async_trait;

#[async_trait]
pub trait FitnessRepository: Send + Sync {
    async fn get_user(&self, id: i32) -> anyhow::Result<Option<User>>;

    /// Metrics recorded within the last `days` days, newest first
    async fn get_fitness_metrics(&self, user_id: i32, days: i64) -> anyhow::Result<Vec<FitnessMetrics>>;

    async fn create_fitness_metrics(&self, metrics: NewFitnessMetrics) -> anyhow::Result<FitnessMetrics>;

    async fn get_latest_fitness_metrics(&self, user_id: i32) -> anyhow::Result<Option<FitnessMetrics>>;

    /// Most recent workouts first, at most `limit`
    async fn get_workouts(&self, user_id: i32, limit: usize) -> anyhow::Result<Vec<Workout>>;

    async fn create_workout(&self, workout: NewWorkout) -> anyhow::Result<Workout>;

    async fn get_nutrition(&self, user_id: i32, days: i64) -> anyhow::Result<Vec<Nutrition>>;

    async fn create_nutrition(&self, nutrition: NewNutrition) -> anyhow::Result<Nutrition>;

    async fn get_latest_nutrition(&self, user_id: i32) -> anyhow::Result<Option<Nutrition>>;

    /// Active goals only, newest first
    async fn get_goals(&self, user_id: i32) -> anyhow::Result<Vec<Goal>>;

    async fn create_goal(&self, goal: NewGoal) -> anyhow::Result<Goal>;

    async fn update_goal(&self, id: i32, patch: GoalPatch) -> anyhow::Result<Option<Goal>>;

    async fn get_recommendations(&self, user_id: i32, limit: usize) -> anyhow::Result<Vec<AiRecommendation>>;

    async fn create_recommendation(&self, recommendation: NewAiRecommendation) -> anyhow::Result<AiRecommendation>;

    async fn get_dashboard_layout(&self, user_id: i32) -> anyhow::Result<Option<DashboardLayoutRecord>>;

    /// Insert or update the layout record keyed by `user_id`
    async fn save_dashboard_layout(
        &self,
        user_id: i32,
        layout_data: serde_json::Value,
    ) -> anyhow::Result<DashboardLayoutRecord>;
}
