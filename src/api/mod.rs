use axum::{Router, routing::post};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
};

use crate::catalog::Catalog;
use crate::extractor::Extractor;

pub mod handlers;
pub mod models;

pub const HOME_PAGE: &str = "index_home.html";
pub const CHATBOT_PAGE: &str = "index.html";

/// Collaborators behind `/search`.
pub struct AppState {
    pub extractor: Arc<dyn Extractor>,
    pub catalog: Arc<dyn Catalog>,
}

impl AppState {
    pub fn new(extractor: Arc<dyn Extractor>, catalog: Arc<dyn Catalog>) -> Self {
        Self { extractor, catalog }
    }
}

pub fn create_router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    let static_dir = static_dir.as_ref();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", post(handlers::search_handler))
        .with_state(state)
        // Pages and their assets
        .route_service("/", ServeFile::new(static_dir.join(HOME_PAGE)))
        .route_service("/chatbot", ServeFile::new(static_dir.join(CHATBOT_PAGE)))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
}
