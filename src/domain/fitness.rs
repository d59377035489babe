// Fitness tracking domain models
use super::layout::LayoutData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub profile_image: Option<String>,
    pub membership_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessMetrics {
    pub id: i32,
    pub user_id: i32,
    pub date: Option<DateTime<Utc>>,
    pub steps: Option<i32>,
    pub calories_burned: Option<i32>,
    pub hrv_score: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<f64>,
    pub weight: Option<f64>,
    pub body_fat_percentage: Option<f64>,
    pub resting_heart_rate: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFitnessMetrics {
    pub user_id: i32,
    #[serde(default)]
    pub steps: Option<i32>,
    #[serde(default)]
    pub calories_burned: Option<i32>,
    #[serde(default)]
    pub hrv_score: Option<f64>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub sleep_quality: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub body_fat_percentage: Option<f64>,
    #[serde(default)]
    pub resting_heart_rate: Option<i32>,
}

impl FitnessMetrics {
    pub fn from_new(id: i32, date: DateTime<Utc>, new: NewFitnessMetrics) -> Self {
        Self {
            id,
            user_id: new.user_id,
            date: Some(date),
            steps: new.steps,
            calories_burned: new.calories_burned,
            hrv_score: new.hrv_score,
            sleep_hours: new.sleep_hours,
            sleep_quality: new.sleep_quality,
            weight: new.weight,
            body_fat_percentage: new.body_fat_percentage,
            resting_heart_rate: new.resting_heart_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    /// strength, cardio, hiit, mobility
    #[serde(rename = "type")]
    pub kind: String,
    /// Minutes
    pub duration: Option<i32>,
    pub calories_burned: Option<i32>,
    pub exercises: Option<serde_json::Value>,
    /// Rate of perceived exertion, 1-10
    pub rpe: Option<i32>,
    pub notes: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    pub user_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub calories_burned: Option<i32>,
    #[serde(default)]
    pub exercises: Option<serde_json::Value>,
    #[serde(default)]
    pub rpe: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Workout {
    pub fn from_new(id: i32, completed_at: DateTime<Utc>, new: NewWorkout) -> Self {
        Self {
            id,
            user_id: new.user_id,
            name: new.name,
            kind: new.kind,
            duration: new.duration,
            calories_burned: new.calories_burned,
            exercises: new.exercises,
            rpe: new.rpe,
            notes: new.notes,
            completed_at: Some(completed_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nutrition {
    pub id: i32,
    pub user_id: i32,
    pub date: Option<DateTime<Utc>>,
    pub calories: Option<i32>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    /// Liters
    pub water: Option<f64>,
    pub meals: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNutrition {
    pub user_id: i32,
    #[serde(default)]
    pub calories: Option<i32>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fats: Option<f64>,
    #[serde(default)]
    pub water: Option<f64>,
    #[serde(default)]
    pub meals: Option<serde_json::Value>,
}

impl Nutrition {
    pub fn from_new(id: i32, date: DateTime<Utc>, new: NewNutrition) -> Self {
        Self {
            id,
            user_id: new.user_id,
            date: Some(date),
            calories: new.calories,
            protein: new.protein,
            carbs: new.carbs,
            fats: new.fats,
            water: new.water,
            meals: new.meals,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    /// weight_loss, muscle_gain, strength, endurance
    #[serde(rename = "type")]
    pub kind: String,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub unit: Option<String>,
    pub target_date: Option<DateTime<Utc>>,
    /// Estimated likelihood of reaching the goal, 0-1
    pub probability: Option<f64>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub user_id: i32,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub target_value: Option<f64>,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub target_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: Option<bool>,
}

fn default_true() -> Option<bool> {
    Some(true)
}

/// Partial update for a goal. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GoalPatch {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub unit: Option<String>,
    pub target_date: Option<DateTime<Utc>>,
    pub probability: Option<f64>,
    pub is_active: Option<bool>,
}

impl Goal {
    pub fn from_new(id: i32, created_at: DateTime<Utc>, new: NewGoal) -> Self {
        Self {
            id,
            user_id: new.user_id,
            title: new.title,
            kind: new.kind,
            target_value: new.target_value,
            current_value: new.current_value,
            unit: new.unit,
            target_date: new.target_date,
            probability: new.probability,
            is_active: new.is_active,
            created_at: Some(created_at),
        }
    }

    pub fn apply(&mut self, patch: GoalPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if patch.target_value.is_some() {
            self.target_value = patch.target_value;
        }
        if patch.current_value.is_some() {
            self.current_value = patch.current_value;
        }
        if patch.unit.is_some() {
            self.unit = patch.unit;
        }
        if patch.target_date.is_some() {
            self.target_date = patch.target_date;
        }
        if patch.probability.is_some() {
            self.probability = patch.probability;
        }
        if patch.is_active.is_some() {
            self.is_active = patch.is_active;
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRecommendation {
    pub id: i32,
    pub user_id: i32,
    /// recovery, nutrition, workout, sleep
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    pub priority: Option<String>,
    pub is_read: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAiRecommendation {
    pub user_id: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    #[serde(default = "default_priority")]
    pub priority: Option<String>,
    #[serde(default = "default_false")]
    pub is_read: Option<bool>,
}

fn default_priority() -> Option<String> {
    Some("medium".to_string())
}

fn default_false() -> Option<bool> {
    Some(false)
}

impl AiRecommendation {
    pub fn from_new(id: i32, created_at: DateTime<Utc>, new: NewAiRecommendation) -> Self {
        Self {
            id,
            user_id: new.user_id,
            kind: new.kind,
            title: new.title,
            message: new.message,
            priority: new.priority,
            is_read: new.is_read,
            created_at: Some(created_at),
        }
    }
}

/// Stored dashboard arrangement, one per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLayoutRecord {
    pub id: i32,
    pub user_id: i32,
    pub layout_data: LayoutData,
    pub updated_at: Option<DateTime<Utc>>,
}
