use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};

use crate::browser::{Snapshot, View};
use crate::render;

use super::AppState;
use super::models::{ListingResponse, OnlineRequest, OnlineResponse, SearchAccepted, SearchRequest};

pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let view = state.browser.view().await;
    Html(render::render_page(&view))
}

pub async fn grid_handler(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.browser.snapshot().await;
    Html(render::render_grid_for(&snapshot.view))
}

pub async fn restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    match state.browser.restaurant(&id).await {
        Some(restaurant) => Ok(Html(render::render_restaurant(&restaurant))),
        None => Err((StatusCode::NOT_FOUND, format!("No restaurant with id {id}"))),
    }
}

pub async fn restaurants_handler(State(state): State<AppState>) -> Json<ListingResponse> {
    Json(listing(state.browser.snapshot().await))
}

pub async fn search_handler(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> (StatusCode, Json<SearchAccepted>) {
    state.browser.on_search_input(request.query.clone()).await;

    (
        StatusCode::ACCEPTED,
        Json(SearchAccepted {
            search_input: request.query,
            debounce_ms: state.debounce_ms,
        }),
    )
}

pub async fn top_rated_handler(State(state): State<AppState>) -> Json<ListingResponse> {
    Json(listing(state.browser.on_top_rated().await))
}

pub async fn online_handler(
    State(state): State<AppState>,
    Json(request): Json<OnlineRequest>,
) -> Json<OnlineResponse> {
    let previous = state.online.set_online(request.online);
    Json(OnlineResponse {
        online: request.online,
        previous,
    })
}

fn listing(snapshot: Snapshot) -> ListingResponse {
    let state = snapshot.view.name().to_string();
    let restaurants = match snapshot.view {
        View::Ready { restaurants, .. } => restaurants,
        _ => Vec::new(),
    };

    ListingResponse {
        state,
        search_input: snapshot.search_input,
        total: restaurants.len(),
        restaurants,
    }
}
