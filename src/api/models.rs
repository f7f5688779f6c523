use serde::{Deserialize, Serialize};

use crate::data_models::SearchResult;

/// Message the backend sends alongside result-bearing responses.
pub const RESULTS_MESSAGE: &str = "Search results for your query";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// Explicit discriminator for successful responses. Older backends omit it and
/// clients fall back to comparing `message` with [`RESULTS_MESSAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Results,
    FollowUp,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResponseKind>,
    pub message: String,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    pub fn results(results: Vec<SearchResult>) -> Self {
        Self {
            kind: Some(ResponseKind::Results),
            message: RESULTS_MESSAGE.to_string(),
            results,
        }
    }

    pub fn follow_up(message: impl Into<String>) -> Self {
        Self {
            kind: Some(ResponseKind::FollowUp),
            message: message.into(),
            results: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
