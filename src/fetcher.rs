use reqwest::StatusCode;
use thiserror::Error;

use crate::config::TARGET_CARD_ID;
use crate::data_models::{Card, CardWrapper, FeedResponse, GridElements, RestaurantRecord};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to feed failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("feed responded with status {0}")]
    Status(StatusCode),

    #[error("feed body is not valid json: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("card {card_id} has no usable restaurant grid: {source}")]
    MalformedGrid {
        card_id: String,
        source: serde_json::Error,
    },
}

/// Returns the first card whose inner id equals `target_id`.
pub fn find_card_by_id<'a>(cards: &'a [CardWrapper], target_id: &str) -> Option<&'a Card> {
    cards
        .iter()
        .filter_map(CardWrapper::inner)
        .find(|card| card.id.as_deref() == Some(target_id))
}

/// Pulls `gridElements.infoWithStyle.restaurants` out of the target card.
///
/// `Ok(None)` means the target card is not in this feed, which callers treat
/// as "no data yet" rather than as a failure.
pub fn restaurants_from_feed(
    feed: &FeedResponse,
    target_id: &str,
) -> Result<Option<Vec<RestaurantRecord>>, FetchError> {
    let Some(card) = find_card_by_id(&feed.data.cards, target_id) else {
        return Ok(None);
    };

    let grid = card.grid_elements.clone().unwrap_or_default();
    let grid: GridElements =
        serde_json::from_value(grid).map_err(|source| FetchError::MalformedGrid {
            card_id: target_id.to_string(),
            source,
        })?;
    Ok(Some(grid.info_with_style.restaurants))
}

pub struct FeedFetcher {
    client: reqwest::Client,
    url: String,
    target_card_id: String,
}

impl FeedFetcher {
    pub fn new(url: impl Into<String>) -> FeedFetcher {
        FeedFetcher {
            client: reqwest::Client::new(),
            url: url.into(),
            target_card_id: TARGET_CARD_ID.to_string(),
        }
    }

    pub fn with_target_card(mut self, target_card_id: impl Into<String>) -> FeedFetcher {
        self.target_card_id = target_card_id.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One GET against the feed. No retry and no timeout.
    pub async fn fetch(&self) -> Result<Option<Vec<RestaurantRecord>>, FetchError> {
        let feed = self.fetch_feed().await?;
        let restaurants = restaurants_from_feed(&feed, &self.target_card_id)?;
        match &restaurants {
            Some(list) => log::info!("feed {} returned {} restaurants", self.url, list.len()),
            None => log::warn!(
                "feed {} has no card with id {}",
                self.url,
                self.target_card_id
            ),
        }
        Ok(restaurants)
    }

    async fn fetch_feed(&self) -> Result<FeedResponse, FetchError> {
        log::info!("fetching feed: {}", self.url);
        let res = self.client.get(&self.url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        let body = res.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
