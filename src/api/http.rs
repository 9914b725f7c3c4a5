//! HTTP transport for the Atlas backend API

use crate::config::ApiConfig;
use crate::error::{AtlasError, Result};
use crate::filter::ChallengeFilter;
use crate::types::{
    Bookmark, Challenge, ChallengePatch, ChallengeStats, CreateChallengeInput, NewSolution,
    Solution, SolutionStats, SolutionStatus,
};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

use super::BackendApi;

/// HTTP client for the Atlas backend API
///
/// # Example
///
/// ```rust,no_run
/// use atlas_sdk::{ApiClient, ApiConfig, ChallengeFilter};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use atlas_sdk::BackendApi;
///
/// let client = ApiClient::new(ApiConfig {
///     base_url: "https://api.atlas.example".into(),
///     ..Default::default()
/// });
///
/// let challenges = client.list_challenges(&ChallengeFilter::default()).await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    config: ApiConfig,
    client: Client,
}

#[derive(Serialize)]
struct StatusBody {
    status: SolutionStatus,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ApiConfig) -> Self {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                    .expect("Invalid API key"),
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.config.base_url, path)
    }

    /// Check the status class; non-success maps into the error taxonomy.
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AtlasError::NotFound("resource not found".to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AtlasError::from_status(status.as_u16(), body));
        }
        Ok(response)
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let response = self.check_status(response).await?;
        let body = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl BackendApi for ApiClient {
    // ==================== Challenges ====================

    async fn list_challenges(&self, filter: &ChallengeFilter) -> Result<Vec<Challenge>> {
        filter.validate()?;

        let mut url = self.url("challenges");
        let pairs = filter.query_pairs();
        if !pairs.is_empty() {
            let query: Vec<String> = pairs
                .iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }

        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn get_challenge(&self, id: &str) -> Result<Challenge> {
        let url = self.url(&format!("challenges/{}", urlencoding::encode(id)));
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn create_challenge(&self, input: CreateChallengeInput) -> Result<Challenge> {
        let url = self.url("challenges");
        let response = self.client.post(&url).json(&input).send().await?;
        self.handle_response(response).await
    }

    async fn update_challenge(&self, id: &str, patch: ChallengePatch) -> Result<Challenge> {
        let url = self.url(&format!("challenges/{}", urlencoding::encode(id)));
        let response = self.client.patch(&url).json(&patch).send().await?;
        self.handle_response(response).await
    }

    async fn delete_challenge(&self, id: &str) -> Result<()> {
        let url = self.url(&format!("challenges/{}", urlencoding::encode(id)));
        let response = self.client.delete(&url).send().await?;
        self.check_status(response).await?;
        Ok(())
    }

    // ==================== Bookmarks ====================

    async fn list_bookmarks(&self, user_id: &str) -> Result<Vec<Bookmark>> {
        let url = self.url(&format!("users/{}/bookmarks", urlencoding::encode(user_id)));
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn add_bookmark(&self, user_id: &str, challenge_id: &str) -> Result<Bookmark> {
        let url = self.url(&format!(
            "users/{}/bookmarks/{}",
            urlencoding::encode(user_id),
            urlencoding::encode(challenge_id)
        ));
        let response = self.client.put(&url).send().await?;
        self.handle_response(response).await
    }

    async fn remove_bookmark(&self, user_id: &str, challenge_id: &str) -> Result<()> {
        let url = self.url(&format!(
            "users/{}/bookmarks/{}",
            urlencoding::encode(user_id),
            urlencoding::encode(challenge_id)
        ));
        let response = self.client.delete(&url).send().await?;
        self.check_status(response).await?;
        Ok(())
    }

    // ==================== Solutions ====================

    async fn create_solution(&self, input: NewSolution) -> Result<Solution> {
        let url = self.url("solutions");
        let response = self.client.post(&url).json(&input).send().await?;
        self.handle_response(response).await
    }

    async fn list_solutions(&self, status: Option<SolutionStatus>) -> Result<Vec<Solution>> {
        let mut url = self.url("solutions");
        if let Some(status) = status {
            url.push_str("?status=");
            url.push_str(status.as_str());
        }
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn list_user_solutions(&self, user_id: &str) -> Result<Vec<Solution>> {
        let url = self.url(&format!("users/{}/solutions", urlencoding::encode(user_id)));
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn list_solutions_for_challenge(&self, challenge_id: &str) -> Result<Vec<Solution>> {
        let url = self.url(&format!(
            "challenges/{}/solutions",
            urlencoding::encode(challenge_id)
        ));
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn update_solution_status(&self, id: &str, status: SolutionStatus) -> Result<Solution> {
        let url = self.url(&format!("solutions/{}/status", urlencoding::encode(id)));
        let response = self
            .client
            .patch(&url)
            .json(&StatusBody { status })
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ==================== Stats ====================

    async fn challenge_stats(&self) -> Result<ChallengeStats> {
        let url = self.url("stats/challenges");
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    async fn solution_stats(&self) -> Result<SolutionStats> {
        let url = self.url("stats/solutions");
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }
}
