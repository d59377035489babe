// In-memory repository implementation
use crate::application::fitness_repository::FitnessRepository;
use crate::domain::fitness::{
    AiRecommendation, DashboardLayoutRecord, FitnessMetrics, Goal, GoalPatch, NewAiRecommendation,
    NewFitnessMetrics, NewGoal, NewNutrition, NewWorkout, Nutrition, User, Workout,
};
use crate::domain::layout::LayoutData;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

/// What saving a layout does when the user already has a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutUpsert {
    /// Replace `layoutData` and refresh `updatedAt`
    #[default]
    Overwrite,
    /// Refresh `updatedAt` only, keeping the first saved layout
    TimestampOnly,
}

impl LayoutUpsert {
    pub fn from_legacy_flag(legacy: bool) -> Self {
        if legacy {
            LayoutUpsert::TimestampOnly
        } else {
            LayoutUpsert::Overwrite
        }
    }
}

#[derive(Default)]
struct Tables {
    users: HashMap<i32, User>,
    fitness_metrics: HashMap<i32, FitnessMetrics>,
    workouts: HashMap<i32, Workout>,
    nutrition: HashMap<i32, Nutrition>,
    goals: HashMap<i32, Goal>,
    recommendations: HashMap<i32, AiRecommendation>,
    layouts: HashMap<i32, DashboardLayoutRecord>,
}

struct IdSequence(AtomicI32);

impl IdSequence {
    fn new() -> Self {
        Self(AtomicI32::new(1))
    }

    fn next(&self) -> i32 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

struct Ids {
    user: IdSequence,
    metrics: IdSequence,
    workout: IdSequence,
    nutrition: IdSequence,
    goal: IdSequence,
    recommendation: IdSequence,
    layout: IdSequence,
}

impl Ids {
    fn new() -> Self {
        Self {
            user: IdSequence::new(),
            metrics: IdSequence::new(),
            workout: IdSequence::new(),
            nutrition: IdSequence::new(),
            goal: IdSequence::new(),
            recommendation: IdSequence::new(),
            layout: IdSequence::new(),
        }
    }
}

/// Process-wide store. Constructed once at startup and shared behind `Arc`.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    ids: Ids,
    layout_upsert: LayoutUpsert,
}

impl MemoryStore {
    pub fn new(layout_upsert: LayoutUpsert) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            ids: Ids::new(),
            layout_upsert,
        }
    }

    /// A store holding the demo user and a week of sample data
    pub fn with_demo_data(layout_upsert: LayoutUpsert) -> Self {
        let ids = Ids::new();
        let mut tables = Tables::default();
        seed_demo_data(&mut tables, &ids, Utc::now());
        Self {
            tables: RwLock::new(tables),
            ids,
            layout_upsert,
        }
    }
}

fn seed_demo_data(tables: &mut Tables, ids: &Ids, now: DateTime<Utc>) {
    let mut rng = rand::rng();

    let user = User {
        id: ids.user.next(),
        username: "demo".to_string(),
        email: "demo@example.com".to_string(),
        password: "hashed_password".to_string(),
        first_name: "Demo".to_string(),
        last_name: "User".to_string(),
        profile_image: Some("https://example.com/avatar.jpg".to_string()),
        membership_type: Some("premium".to_string()),
        created_at: Some(now),
    };
    let user_id = user.id;
    tables.users.insert(user.id, user);

    for days_ago in (0..7).rev() {
        let metrics = FitnessMetrics {
            id: ids.metrics.next(),
            user_id,
            date: Some(now - Duration::days(days_ago)),
            steps: Some(8000 + rng.random_range(0..3000)),
            calories_burned: Some(2200 + rng.random_range(0..400)),
            hrv_score: Some(40.0 + f64::from(rng.random_range(0u8..20))),
            sleep_hours: Some(7.5 + rng.random::<f64>() * 1.5),
            sleep_quality: Some(0.7 + rng.random::<f64>() * 0.3),
            weight: Some(175.0 - days_ago as f64 * 0.2),
            body_fat_percentage: Some(15.0 + rng.random::<f64>() * 2.0),
            resting_heart_rate: Some(60 + rng.random_range(0..10)),
        };
        tables.fitness_metrics.insert(metrics.id, metrics);
    }

    let workout = Workout {
        id: ids.workout.next(),
        user_id,
        name: "Morning Run".to_string(),
        kind: "cardio".to_string(),
        duration: Some(45),
        calories_burned: Some(420),
        exercises: Some(json!([
            { "name": "Running", "sets": 1, "reps": null, "weight": null, "duration": 45 }
        ])),
        rpe: Some(7),
        notes: Some("Felt good today!".to_string()),
        completed_at: Some(now),
    };
    tables.workouts.insert(workout.id, workout);

    let nutrition = Nutrition {
        id: ids.nutrition.next(),
        user_id,
        date: Some(now),
        calories: Some(1800),
        protein: Some(150.0),
        carbs: Some(200.0),
        fats: Some(60.0),
        water: Some(8.0),
        meals: Some(json!([
            {
                "name": "Breakfast",
                "items": [
                    { "name": "Oatmeal", "calories": 300, "protein": 10, "carbs": 50, "fats": 5 },
                    { "name": "Eggs", "calories": 140, "protein": 12, "carbs": 1, "fats": 10 }
                ]
            }
        ])),
    };
    tables.nutrition.insert(nutrition.id, nutrition);

    let goal = Goal {
        id: ids.goal.next(),
        user_id,
        title: "Lose 10 lbs".to_string(),
        kind: "weight".to_string(),
        target_value: Some(10.0),
        current_value: Some(0.0),
        unit: Some("lbs".to_string()),
        target_date: Some(now + Duration::days(30)),
        probability: Some(0.75),
        is_active: Some(true),
        created_at: Some(now),
    };
    tables.goals.insert(goal.id, goal);

    let recommendation = AiRecommendation {
        id: ids.recommendation.next(),
        user_id,
        kind: "nutrition".to_string(),
        title: "Increase Protein Intake".to_string(),
        message: "Consider increasing protein intake to support muscle recovery.".to_string(),
        priority: Some("medium".to_string()),
        is_read: Some(false),
        created_at: Some(now),
    };
    tables.recommendations.insert(recommendation.id, recommendation);
}

/// Start of a `days` long window ending at `now`. Windows reaching past the
/// representable range saturate, so a negative window is always empty.
fn window_start(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    Duration::try_days(days)
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(if days > 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// Rows matching `keep`, newest first by `stamp`
fn newest_first<T: Clone>(
    rows: &HashMap<i32, T>,
    keep: impl Fn(&T) -> bool,
    stamp: impl Fn(&T) -> Option<DateTime<Utc>>,
) -> Vec<T> {
    let mut selected: Vec<T> = rows.values().filter(|row| keep(row)).cloned().collect();
    selected.sort_by(|a, b| stamp(b).cmp(&stamp(a)));
    selected
}

#[async_trait]
impl FitnessRepository for MemoryStore {
    async fn get_user(&self, id: i32) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn get_fitness_metrics(&self, user_id: i32, days: i64) -> Result<Vec<FitnessMetrics>> {
        let cutoff = window_start(Utc::now(), days);
        let tables = self.tables.read().await;
        Ok(newest_first(
            &tables.fitness_metrics,
            |m| m.user_id == user_id && m.date.is_some_and(|d| d >= cutoff),
            |m| m.date,
        ))
    }

    async fn create_fitness_metrics(&self, new: NewFitnessMetrics) -> Result<FitnessMetrics> {
        let metrics = FitnessMetrics::from_new(self.ids.metrics.next(), Utc::now(), new);
        self.tables
            .write()
            .await
            .fitness_metrics
            .insert(metrics.id, metrics.clone());
        Ok(metrics)
    }

    async fn get_latest_fitness_metrics(&self, user_id: i32) -> Result<Option<FitnessMetrics>> {
        let tables = self.tables.read().await;
        Ok(tables
            .fitness_metrics
            .values()
            .filter(|m| m.user_id == user_id && m.date.is_some())
            .max_by_key(|m| m.date)
            .cloned())
    }

    async fn get_workouts(&self, user_id: i32, limit: usize) -> Result<Vec<Workout>> {
        let tables = self.tables.read().await;
        let mut workouts = newest_first(&tables.workouts, |w| w.user_id == user_id, |w| w.completed_at);
        workouts.truncate(limit);
        Ok(workouts)
    }

    async fn create_workout(&self, new: NewWorkout) -> Result<Workout> {
        let workout = Workout::from_new(self.ids.workout.next(), Utc::now(), new);
        self.tables.write().await.workouts.insert(workout.id, workout.clone());
        Ok(workout)
    }

    async fn get_nutrition(&self, user_id: i32, days: i64) -> Result<Vec<Nutrition>> {
        let cutoff = window_start(Utc::now(), days);
        let tables = self.tables.read().await;
        Ok(newest_first(
            &tables.nutrition,
            |n| n.user_id == user_id && n.date.is_some_and(|d| d >= cutoff),
            |n| n.date,
        ))
    }

    async fn create_nutrition(&self, new: NewNutrition) -> Result<Nutrition> {
        let nutrition = Nutrition::from_new(self.ids.nutrition.next(), Utc::now(), new);
        self.tables
            .write()
            .await
            .nutrition
            .insert(nutrition.id, nutrition.clone());
        Ok(nutrition)
    }

    async fn get_latest_nutrition(&self, user_id: i32) -> Result<Option<Nutrition>> {
        let tables = self.tables.read().await;
        Ok(tables
            .nutrition
            .values()
            .filter(|n| n.user_id == user_id && n.date.is_some())
            .max_by_key(|n| n.date)
            .cloned())
    }

    async fn get_goals(&self, user_id: i32) -> Result<Vec<Goal>> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            &tables.goals,
            |g| g.user_id == user_id && g.is_active(),
            |g| g.created_at,
        ))
    }

    async fn create_goal(&self, new: NewGoal) -> Result<Goal> {
        let goal = Goal::from_new(self.ids.goal.next(), Utc::now(), new);
        self.tables.write().await.goals.insert(goal.id, goal.clone());
        Ok(goal)
    }

    async fn update_goal(&self, id: i32, patch: GoalPatch) -> Result<Option<Goal>> {
        let mut tables = self.tables.write().await;
        let Some(goal) = tables.goals.get_mut(&id) else {
            return Ok(None);
        };
        goal.apply(patch);
        Ok(Some(goal.clone()))
    }

    async fn get_recommendations(&self, user_id: i32, limit: usize) -> Result<Vec<AiRecommendation>> {
        let tables = self.tables.read().await;
        let mut recommendations = newest_first(
            &tables.recommendations,
            |r| r.user_id == user_id,
            |r| r.created_at,
        );
        recommendations.truncate(limit);
        Ok(recommendations)
    }

    async fn create_recommendation(&self, new: NewAiRecommendation) -> Result<AiRecommendation> {
        let recommendation = AiRecommendation::from_new(self.ids.recommendation.next(), Utc::now(), new);
        self.tables
            .write()
            .await
            .recommendations
            .insert(recommendation.id, recommendation.clone());
        Ok(recommendation)
    }

    async fn get_dashboard_layout(&self, user_id: i32) -> Result<Option<DashboardLayoutRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.layouts.values().find(|l| l.user_id == user_id).cloned())
    }

    async fn save_dashboard_layout(
        &self,
        user_id: i32,
        layout_data: serde_json::Value,
    ) -> Result<DashboardLayoutRecord> {
        let layout_data = LayoutData::from_submitted(layout_data);
        let now = Utc::now();
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables.layouts.values_mut().find(|l| l.user_id == user_id) {
            if self.layout_upsert == LayoutUpsert::Overwrite {
                existing.layout_data = layout_data;
            }
            existing.updated_at = Some(now);
            return Ok(existing.clone());
        }

        let record = DashboardLayoutRecord {
            id: self.ids.layout.next(),
            user_id,
            layout_data,
            updated_at: Some(now),
        };
        tables.layouts.insert(record.id, record.clone());
        Ok(record)
    }
}
