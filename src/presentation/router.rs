// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    create_fitness_metrics, create_goal, create_nutrition, create_recommendation, create_workout,
    get_dashboard, get_dashboard_layout, health_check, list_fitness_metrics, list_goals, list_nutrition,
    list_recommendations, list_workouts, save_dashboard_layout, update_goal,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/dashboard/:user_id", get(get_dashboard))
        .route("/api/fitness-metrics", post(create_fitness_metrics))
        .route("/api/fitness-metrics/:user_id", get(list_fitness_metrics))
        .route("/api/workouts", post(create_workout))
        .route("/api/workouts/:user_id", get(list_workouts))
        .route("/api/nutrition", post(create_nutrition))
        .route("/api/nutrition/:user_id", get(list_nutrition))
        .route("/api/goals", post(create_goal))
        // GET takes a user id, PATCH a goal id
        .route("/api/goals/:id", get(list_goals).patch(update_goal))
        .route("/api/recommendations", post(create_recommendation))
        .route("/api/recommendations/:user_id", get(list_recommendations))
        .route("/api/dashboard-layout", post(save_dashboard_layout))
        .route("/api/dashboard-layout/:user_id", get(get_dashboard_layout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve a demo-seeded store on an ephemeral port and return its base URL
#[cfg(test)]
pub(crate) async fn spawn_test_server(
    layout_upsert: crate::infrastructure::memory_store::LayoutUpsert,
) -> String {
    use crate::infrastructure::memory_store::MemoryStore;

    let state = AppState::new(Arc::new(MemoryStore::with_demo_data(layout_upsert)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });
    format!("http://{}", addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::default_layout::default_layouts;
    use crate::domain::layout::Breakpoint;
    use crate::infrastructure::memory_store::LayoutUpsert;
    use reqwest::StatusCode;
    use serde_json::{Value, json};

    async fn server() -> (String, reqwest::Client) {
        (spawn_test_server(LayoutUpsert::Overwrite).await, reqwest::Client::new())
    }

    #[tokio::test]
    async fn test_health_check() {
        let (base, client) = server().await;
        let response = client.get(format!("{}/healthz", base)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_dashboard_unknown_user_is_404() {
        let (base, client) = server().await;
        for id in ["99", "abc"] {
            let response = client.get(format!("{}/api/dashboard/{}", base, id)).send().await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
            let body: Value = response.json().await.unwrap();
            assert_eq!(body, json!({ "message": "User not found" }));
        }
    }

    #[tokio::test]
    async fn test_dashboard_shape() {
        let (base, client) = server().await;
        let body: Value = client
            .get(format!("{}/api/dashboard/1", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["user"]["username"], "demo");
        assert_eq!(body["user"]["firstName"], "Demo");
        assert!(body["metrics"]["steps"].is_number());
        assert_eq!(body["workouts"][0]["type"], "cardio");
        assert_eq!(body["nutrition"]["calories"], 1800);
        assert_eq!(body["goals"][0]["title"], "Lose 10 lbs");
        assert_eq!(body["recommendations"][0]["title"], "Increase Protein Intake");
        assert!(body["layout"].is_null());
    }

    #[tokio::test]
    async fn test_layout_get_absent_is_null() {
        let (base, client) = server().await;
        let response = client
            .get(format!("{}/api/dashboard-layout/1", base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_layout_post_round_trip() {
        let (base, client) = server().await;
        let snapshot = serde_json::to_value(default_layouts()).unwrap();

        let response = client
            .post(format!("{}/api/dashboard-layout", base))
            .json(&json!({ "userId": 1, "layoutData": snapshot }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let record: Value = response.json().await.unwrap();
        assert_eq!(record["userId"], 1);
        assert!(record["id"].is_number());
        assert!(record["updatedAt"].is_string());
        assert_eq!(record["layoutData"], snapshot);

        let fetched: Value = client
            .get(format!("{}/api/dashboard-layout/1", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(fetched["layoutData"], snapshot);
        assert_eq!(fetched["id"], record["id"]);
    }

    #[tokio::test]
    async fn test_layout_post_rejects_bad_user_id() {
        let (base, client) = server().await;
        let payloads = [
            json!({ "layoutData": {} }),
            json!({ "userId": "1", "layoutData": {} }),
            json!({ "userId": 1.5, "layoutData": {} }),
        ];
        for payload in payloads {
            let response = client
                .post(format!("{}/api/dashboard-layout", base))
                .json(&payload)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body: Value = response.json().await.unwrap();
            assert_eq!(body, json!({ "message": "Invalid layout data" }));
        }
    }

    #[tokio::test]
    async fn test_layout_post_non_snapshot_stores_fallback() {
        let (base, client) = server().await;
        let record: Value = client
            .post(format!("{}/api/dashboard-layout", base))
            .json(&json!({ "userId": 3, "layoutData": [1, 2] }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(
            record["layoutData"],
            json!({ "widgets": ["fitness", "nutrition", "goals", "recommendations"] })
        );
    }

    #[tokio::test]
    async fn test_layout_post_far_right_widget_is_stored() {
        let (base, client) = server().await;
        let layout = json!({ "lg": [{ "i": "stats-hrv", "x": u32::MAX, "y": 0, "w": 3, "h": 2 }] });
        let response = client
            .post(format!("{}/api/dashboard-layout", base))
            .json(&json!({ "userId": 1, "layoutData": layout }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let record: Value = response.json().await.unwrap();
        assert_eq!(record["layoutData"], layout);
    }

    #[tokio::test]
    async fn test_legacy_upsert_keeps_first_layout() {
        let base = spawn_test_server(LayoutUpsert::TimestampOnly).await;
        let client = reqwest::Client::new();
        let first = serde_json::to_value(default_layouts()).unwrap();
        let second = serde_json::to_value(
            default_layouts()
                .with_moved(Breakpoint::Lg, "stats-hrv", 0, 4)
                .unwrap(),
        )
        .unwrap();

        for layout in [&first, &second] {
            client
                .post(format!("{}/api/dashboard-layout", base))
                .json(&json!({ "userId": 1, "layoutData": layout }))
                .send()
                .await
                .unwrap();
        }
        let fetched: Value = client
            .get(format!("{}/api/dashboard-layout/1", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(fetched["layoutData"], first);
    }

    #[tokio::test]
    async fn test_create_and_list_workouts() {
        let (base, client) = server().await;
        let response = client
            .post(format!("{}/api/workouts", base))
            .json(&json!({ "userId": 1, "name": "Deadlifts", "type": "strength", "duration": 50 }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = response.json().await.unwrap();
        assert_eq!(created["id"], 2);

        let listed: Value = client
            .get(format!("{}/api/workouts/1?limit=1", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["name"], "Deadlifts");
    }

    #[tokio::test]
    async fn test_invalid_bodies_are_400() {
        let (base, client) = server().await;
        let cases = [
            ("/api/fitness-metrics", json!({ "steps": 100 }), "Invalid fitness metrics data"),
            ("/api/workouts", json!({ "userId": 1 }), "Invalid workout data"),
            ("/api/nutrition", json!({ "calories": "lots" }), "Invalid nutrition data"),
            ("/api/goals", json!({ "userId": 1, "title": "No type" }), "Invalid goal data"),
            ("/api/recommendations", json!({ "userId": 1 }), "Invalid recommendation data"),
        ];
        for (path, payload, message) in cases {
            let response = client
                .post(format!("{}{}", base, path))
                .json(&payload)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", path);
            let body: Value = response.json().await.unwrap();
            assert_eq!(body["message"], message);
        }
    }

    #[tokio::test]
    async fn test_metrics_days_window() {
        let (base, client) = server().await;
        let week: Value = client
            .get(format!("{}/api/fitness-metrics/1", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(week.as_array().unwrap().len(), 7);

        let recent: Value = client
            .get(format!("{}/api/fitness-metrics/1?days=2", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(recent.as_array().unwrap().len(), 2);

        let response = client
            .get(format!("{}/api/fitness-metrics/1?days=soon", base))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_out_of_range_days_still_answer() {
        let (base, client) = server().await;
        let cases = [
            ("/api/fitness-metrics/1?days=100000000", 7),
            ("/api/fitness-metrics/1?days=-100000000", 0),
            ("/api/nutrition/1?days=100000000", 1),
            ("/api/nutrition/1?days=-100000000", 0),
        ];
        for (path, expected) in cases {
            let response = client.get(format!("{}{}", base, path)).send().await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", path);
            let body: Value = response.json().await.unwrap();
            assert_eq!(body.as_array().unwrap().len(), expected, "{}", path);
        }
    }

    #[tokio::test]
    async fn test_patch_goal() {
        let (base, client) = server().await;
        let response = client
            .patch(format!("{}/api/goals/1", base))
            .json(&json!({ "currentValue": 3.5 }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let goal: Value = response.json().await.unwrap();
        assert_eq!(goal["currentValue"], 3.5);
        assert_eq!(goal["title"], "Lose 10 lbs");

        let response = client
            .patch(format!("{}/api/goals/77", base))
            .json(&json!({ "currentValue": 1 }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        client
            .patch(format!("{}/api/goals/1", base))
            .json(&json!({ "isActive": false }))
            .send()
            .await
            .unwrap();
        let goals: Value = client
            .get(format!("{}/api/goals/1", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(goals.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_recommendation_defaults() {
        let (base, client) = server().await;
        let created: Value = client
            .post(format!("{}/api/recommendations", base))
            .json(&json!({
                "userId": 1,
                "type": "recovery",
                "title": "Take a rest day",
                "message": "HRV trending down for three days."
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(created["priority"], "medium");
        assert_eq!(created["isRead"], false);

        let listed: Value = client
            .get(format!("{}/api/recommendations/1", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(listed.as_array().unwrap().len(), 2);
    }
}
