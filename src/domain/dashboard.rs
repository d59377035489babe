// Dashboard domain model
use super::fitness::{AiRecommendation, DashboardLayoutRecord, FitnessMetrics, Goal, Nutrition, User, Workout};
use serde::{Deserialize, Serialize};

/// Everything the dashboard page renders for one user, in a single read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub user: User,
    pub metrics: Option<FitnessMetrics>,
    pub workouts: Vec<Workout>,
    pub nutrition: Option<Nutrition>,
    pub goals: Vec<Goal>,
    pub recommendations: Vec<AiRecommendation>,
    pub layout: Option<DashboardLayoutRecord>,
}

impl DashboardData {
    pub fn new(
        user: User,
        metrics: Option<FitnessMetrics>,
        workouts: Vec<Workout>,
        nutrition: Option<Nutrition>,
        goals: Vec<Goal>,
        recommendations: Vec<AiRecommendation>,
        layout: Option<DashboardLayoutRecord>,
    ) -> Self {
        Self {
            user,
            metrics,
            workouts,
            nutrition,
            goals,
            recommendations,
            layout,
        }
    }
}
