use async_trait::async_trait;
use std::sync::Arc;

use crate::api::models::SearchRequest;

use super::envelope::{RawResponse, SearchError};

/// Path of the search endpoint relative to the page origin.
pub const SEARCH_PATH: &str = "/search";

/// Carries one `{query}` POST to the backend and hands back the raw reply.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    async fn post_search(&self, query: &str) -> Result<RawResponse, SearchError>;
}

#[async_trait]
impl<T: SearchTransport + ?Sized> SearchTransport for Arc<T> {
    async fn post_search(&self, query: &str) -> Result<RawResponse, SearchError> {
        (**self).post_search(query).await
    }
}

/// [`SearchTransport`] over HTTP. No timeout and no retry.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// `origin` is scheme and authority, e.g. `http://127.0.0.1:5000`.
    pub fn new(origin: &str) -> Self {
        Self::with_client(reqwest::Client::new(), origin)
    }

    pub fn with_client(client: reqwest::Client, origin: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", origin.trim_end_matches('/'), SEARCH_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn post_search(&self, query: &str) -> Result<RawResponse, SearchError> {
        let request = SearchRequest {
            query: query.to_string(),
        };
        log::debug!("POST {} query={:?}", self.endpoint, query);

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

#[test]
fn test_endpoint_is_origin_plus_search_path() {
    assert_eq!(
        HttpTransport::new("http://localhost:5000/").endpoint(),
        "http://localhost:5000/search"
    );
    assert_eq!(
        HttpTransport::new("http://localhost:5000").endpoint(),
        "http://localhost:5000/search"
    );
}
