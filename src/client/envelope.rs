//! Classifying a `/search` reply into what the panel should show.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::api::models::{RESULTS_MESSAGE, ResponseKind};
use crate::data_models::SearchResult;

/// Failures at the request boundary. The `Display` text is what the user sees
/// after `"Error: "`.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

/// Status and body of a `/search` exchange, before interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Either payload shape, read leniently: success and error bodies share it.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    kind: Option<ResponseKind>,
    #[serde(default)]
    message: Option<String>,
    /// Kept raw so records past the display cap are never decoded.
    #[serde(default)]
    results: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Result-bearing success. `results` holds at most the requested number of
    /// leading records.
    Results {
        message: String,
        results: Vec<SearchResult>,
    },
    /// Informational success, such as a follow-up question.
    Message(String),
    /// Any failure; holds the text shown after `"Error: "`.
    Failed(String),
}

impl Outcome {
    pub fn from_exchange(
        exchange: Result<RawResponse, SearchError>,
        max_cards: usize,
    ) -> Outcome {
        match exchange {
            Ok(raw) => interpret(raw.status, &raw.body, max_cards),
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }
}

/// Interprets a reply. The body is decoded before the status is looked at, so
/// an unparseable body is a decode failure whatever the status. Only the first
/// `max_cards` results are decoded; later records may be malformed.
pub fn interpret(status: StatusCode, body: &[u8], max_cards: usize) -> Outcome {
    let envelope: Envelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) => return Outcome::Failed(SearchError::Decode(e).to_string()),
    };

    if !status.is_success() {
        return Outcome::Failed(envelope.error.unwrap_or_else(|| status.to_string()));
    }

    let message = envelope.message.unwrap_or_default();
    let result_bearing = match envelope.kind {
        Some(kind) => kind == ResponseKind::Results,
        None => message == RESULTS_MESSAGE,
    };

    if result_bearing {
        let decoded: Result<Vec<SearchResult>, _> = envelope
            .results
            .unwrap_or_default()
            .into_iter()
            .take(max_cards)
            .map(serde_json::from_value)
            .collect();
        match decoded {
            Ok(results) => Outcome::Results { message, results },
            Err(e) => Outcome::Failed(SearchError::Decode(e).to_string()),
        }
    } else {
        Outcome::Message(message)
    }
}
