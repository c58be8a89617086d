//! HTTP implementation of [`AdvisorApi`] over `reqwest`.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::{AskRequest, AskResponse, RecommendResponse, Recommendation};
use super::{AdvisorApi, Endpoint};
use crate::error::ApiError;
use crate::intake::IntakeRecord;

/// Maximum number of body bytes kept in a status error.
const MAX_ERROR_BODY_LEN: usize = 512;

/// Recommendation service client talking JSON over HTTP.
pub struct HttpAdvisorApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAdvisorApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Use a preconfigured `reqwest` client (proxies, TLS roots, ...).
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// POST `body` as JSON and decode the JSON response.
    async fn post_json<B, R>(&self, endpoint: Endpoint, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        tracing::debug!(%endpoint, "POST {}", self.url(endpoint));

        let resp = self
            .client
            .post(self.url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint,
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let mut body = resp.text().await.unwrap_or_default();
            truncate_on_char_boundary(&mut body, MAX_ERROR_BODY_LEN);
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<R>()
            .await
            .map_err(|e| ApiError::InvalidResponse {
                endpoint,
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl AdvisorApi for HttpAdvisorApi {
    async fn ask(&self, request: &AskRequest) -> Result<String, ApiError> {
        let parsed: AskResponse = self.post_json(Endpoint::Ask, request).await?;
        Ok(parsed.response)
    }

    async fn recommend(&self, intake: &IntakeRecord) -> Result<Vec<Recommendation>, ApiError> {
        let parsed: RecommendResponse = self.post_json(Endpoint::Recommend, intake).await?;
        tracing::info!(
            count = parsed.recommendations.len(),
            "Received recommendations"
        );
        Ok(parsed.recommendations)
    }
}

fn truncate_on_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
