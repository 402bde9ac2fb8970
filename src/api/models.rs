use serde::{Deserialize, Serialize};

use crate::data_models::RestaurantRecord;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchAccepted {
    pub search_input: String,
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct OnlineRequest {
    pub online: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OnlineResponse {
    pub online: bool,
    pub previous: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListingResponse {
    pub state: String,
    pub search_input: String,
    pub total: usize,
    pub restaurants: Vec<RestaurantRecord>,
}
