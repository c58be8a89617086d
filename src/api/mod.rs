//! Recommendation service client.
//!
//! The service exposes two endpoints:
//! - `POST /ask`: one conversational turn, keyed by session id
//! - `POST /recommend`: card recommendations for a completed intake record
//!
//! [`AdvisorApi`] is the seam the conversation talks to; [`HttpAdvisorApi`]
//! is the `reqwest` implementation.

pub mod http;
pub mod types;

pub use http::HttpAdvisorApi;
pub use types::{AskRequest, AskResponse, Perks, RecommendResponse, Recommendation};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::intake::IntakeRecord;

/// Remote endpoints of the recommendation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Ask,
    Recommend,
}

impl Endpoint {
    /// Path relative to the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Ask => "/ask",
            Self::Recommend => "/recommend",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Calls made by the conversation against the recommendation service.
#[async_trait]
pub trait AdvisorApi: Send + Sync {
    /// Send one user message; returns the assistant reply text.
    async fn ask(&self, request: &AskRequest) -> Result<String, ApiError>;

    /// Request recommendations for a completed intake record.
    async fn recommend(&self, intake: &IntakeRecord) -> Result<Vec<Recommendation>, ApiError>;
}
