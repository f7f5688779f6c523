use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;
use std::time::Instant;

use crate::attributes::parse_attributes;
use crate::catalog::{ProductFilter, search_products};

use super::AppState;
use super::models::{ErrorResponse, SearchRequest, SearchResponse};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = Instant::now();

    let Json(request) = request.map_err(|rejection| {
        log::warn!("rejected search request: {}", rejection.body_text());
        api_error(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    let extracted = state.extractor.extract(&request.query).await.map_err(|e| {
        log::error!("attribute extraction failed: {:#}", e);
        api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Extraction error: {:#}", e),
        )
    })?;
    log::info!("extractor response: {}", extracted);

    let attributes = parse_attributes(&extracted);

    if !attributes.move_on {
        log::info!("insufficient information to perform search");
        return Ok(Json(SearchResponse::follow_up(attributes.follow_up_message)));
    }

    // A catalog outage still answers with the results message, just no cards.
    let products = match state.catalog.products().await {
        Ok(products) => products,
        Err(e) => {
            log::error!("catalog read failed: {:#}", e);
            return Ok(Json(SearchResponse::results(Vec::new())));
        }
    };

    let filter = ProductFilter::from_attributes(&attributes);
    let results = search_products(&products, &filter, &mut rand::thread_rng());

    log::info!(
        "search completed with {} results in {}ms",
        results.len(),
        start.elapsed().as_millis()
    );

    Ok(Json(SearchResponse::results(results)))
}
