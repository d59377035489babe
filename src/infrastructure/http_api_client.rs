// HTTP client for the dashboard API
use crate::application::layout_gateway::{DashboardSource, LayoutGateway};
use crate::domain::dashboard::DashboardData;
use crate::domain::fitness::DashboardLayoutRecord;
use crate::domain::layout::LayoutSnapshot;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaveLayoutRequest<'a> {
    user_id: i32,
    layout_data: &'a LayoutSnapshot,
}

impl HttpDashboardApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Dashboard API request failed with status {}: {}", status, body);
        }

        response
            .json::<T>()
            .await
            .context("Failed to parse dashboard API response")
    }
}

#[async_trait]
impl LayoutGateway for HttpDashboardApi {
    async fn fetch_layout(&self, user_id: i32) -> Result<Option<DashboardLayoutRecord>> {
        let response = self
            .client
            .get(self.url(&format!("/api/dashboard-layout/{}", user_id)))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send layout request")?;

        // Absence comes back as a JSON null
        Self::read_json::<Option<DashboardLayoutRecord>>(response).await
    }

    async fn save_layout(&self, user_id: i32, snapshot: &LayoutSnapshot) -> Result<DashboardLayoutRecord> {
        let response = self
            .client
            .post(self.url("/api/dashboard-layout"))
            .json(&SaveLayoutRequest {
                user_id,
                layout_data: snapshot,
            })
            .send()
            .await
            .context("Failed to send layout save request")?;

        Self::read_json(response).await
    }
}

#[async_trait]
impl DashboardSource for HttpDashboardApi {
    async fn fetch_dashboard(&self, user_id: i32) -> Result<Option<DashboardData>> {
        let response = self
            .client
            .get(self.url(&format!("/api/dashboard/{}", user_id)))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send dashboard request")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::read_json(response).await.map(Some)
    }
}
