//! API client for communicating with the Study Bot web backend.
//!
//! This module provides the `ApiClient` struct used by the dashboard session
//! to poll statistics and submit broadcast messages.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, warn};

use crate::models::{BroadcastRequest, BroadcastResponse, StatsResponse};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Path of the aggregated statistics endpoint
const STATS_PATH: &str = "/api/stats";

/// Path of the broadcast endpoint
const BROADCAST_PATH: &str = "/api/broadcast";

/// API client for the Study Bot backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Arc<str>,
}

impl ApiClient {
    /// Create a new API client rooted at `base_url`.
    ///
    /// When `timeout` is `None` the reqwest defaults apply.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    /// Base URL this client sends requests to (without trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    // ===== Data Fetching Methods =====

    /// Fetch the aggregated dashboard statistics
    pub async fn fetch_stats(&self) -> Result<StatsResponse> {
        let url = self.url(STATS_PATH);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        let text = response
            .text()
            .await
            .context("Failed to read stats response body")?;

        let stats: StatsResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
            .context("Failed to parse stats response")?;

        debug!(
            activity_days = stats.activity.len(),
            top_users = stats.achievements.top_users.len(),
            "Stats fetched"
        );
        Ok(stats)
    }

    /// Send a broadcast message to every bot user.
    ///
    /// Any JSON body is returned as the reply, whatever the status code.
    /// The backend reports validation and delivery failures as an
    /// `{"error": ...}` body on 400/500 responses. A body that is not JSON
    /// becomes an `ApiError` classified by status.
    pub async fn broadcast(&self, message: &str) -> Result<BroadcastResponse> {
        let url = self.url(BROADCAST_PATH);
        let body = BroadcastRequest {
            message: message.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .context("Failed to read broadcast response body")?;

        match serde_json::from_str::<BroadcastResponse>(&text) {
            Ok(reply) => {
                if !status.is_success() {
                    warn!(
                        %status,
                        error = reply.error_message().unwrap_or(""),
                        "Broadcast reply with error status"
                    );
                }
                Ok(reply)
            }
            Err(e) if status.is_success() => {
                Err::<BroadcastResponse, _>(ApiError::InvalidResponse(e.to_string()))
                    .context("Failed to parse broadcast response")
            }
            Err(_) => Err(ApiError::from_status(status, &text).into()),
        }
    }
}
