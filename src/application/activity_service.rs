// Activity service - Use cases for metrics, workouts, nutrition, goals and recommendations
use crate::application::fitness_repository::FitnessRepository;
use crate::domain::fitness::{
    AiRecommendation, FitnessMetrics, Goal, GoalPatch, NewAiRecommendation, NewFitnessMetrics, NewGoal,
    NewNutrition, NewWorkout, Nutrition, Workout,
};
use std::sync::Arc;

pub const DEFAULT_DAYS: i64 = 7;
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Clone)]
pub struct ActivityService {
    repository: Arc<dyn FitnessRepository>,
}

impl ActivityService {
    pub fn new(repository: Arc<dyn FitnessRepository>) -> Self {
        Self { repository }
    }

    pub async fn fitness_metrics(&self, user_id: i32, days: Option<i64>) -> anyhow::Result<Vec<FitnessMetrics>> {
        self.repository
            .get_fitness_metrics(user_id, days.unwrap_or(DEFAULT_DAYS))
            .await
    }

    pub async fn record_fitness_metrics(&self, metrics: NewFitnessMetrics) -> anyhow::Result<FitnessMetrics> {
        let created = self.repository.create_fitness_metrics(metrics).await?;
        tracing::debug!("Recorded fitness metrics {} for user {}", created.id, created.user_id);
        Ok(created)
    }

    pub async fn workouts(&self, user_id: i32, limit: Option<usize>) -> anyhow::Result<Vec<Workout>> {
        self.repository
            .get_workouts(user_id, limit.unwrap_or(DEFAULT_LIMIT))
            .await
    }

    pub async fn record_workout(&self, workout: NewWorkout) -> anyhow::Result<Workout> {
        let created = self.repository.create_workout(workout).await?;
        tracing::debug!("Recorded workout {} for user {}", created.id, created.user_id);
        Ok(created)
    }

    pub async fn nutrition(&self, user_id: i32, days: Option<i64>) -> anyhow::Result<Vec<Nutrition>> {
        self.repository
            .get_nutrition(user_id, days.unwrap_or(DEFAULT_DAYS))
            .await
    }

    pub async fn record_nutrition(&self, nutrition: NewNutrition) -> anyhow::Result<Nutrition> {
        self.repository.create_nutrition(nutrition).await
    }

    pub async fn goals(&self, user_id: i32) -> anyhow::Result<Vec<Goal>> {
        self.repository.get_goals(user_id).await
    }

    pub async fn create_goal(&self, goal: NewGoal) -> anyhow::Result<Goal> {
        self.repository.create_goal(goal).await
    }

    pub async fn update_goal(&self, id: i32, patch: GoalPatch) -> anyhow::Result<Option<Goal>> {
        self.repository.update_goal(id, patch).await
    }

    pub async fn recommendations(&self, user_id: i32, limit: Option<usize>) -> anyhow::Result<Vec<AiRecommendation>> {
        self.repository
            .get_recommendations(user_id, limit.unwrap_or(DEFAULT_LIMIT))
            .await
    }

    pub async fn create_recommendation(
        &self,
        recommendation: NewAiRecommendation,
    ) -> anyhow::Result<AiRecommendation> {
        self.repository.create_recommendation(recommendation).await
    }
}
