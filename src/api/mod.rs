use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::browser::BrowserHandle;
use crate::connectivity::OnlineStatus;

pub mod handlers;
pub mod models;

/// Shared state for every route.
#[derive(Clone)]
pub struct AppState {
    pub browser: BrowserHandle,
    pub online: OnlineStatus,
    pub debounce_ms: u64,
}

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(handlers::index_handler))
        .route("/grid", get(handlers::grid_handler))
        .route("/restaurant/:id", get(handlers::restaurant_handler))
        // API routes
        .route("/api/restaurants", get(handlers::restaurants_handler))
        .route("/api/search", post(handlers::search_handler))
        .route("/api/top-rated", post(handlers::top_rated_handler))
        .route("/api/online", post(handlers::online_handler))
        .with_state(state)
        // Stylesheet for the pages
        .nest_service("/static", ServeDir::new("static"))
        .layer(cors)
}
