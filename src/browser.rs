use once_cell::sync::OnceCell;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::connectivity::Connectivity;
use crate::data_models::RestaurantRecord;
use crate::debounce::Debouncer;
use crate::fetcher::{FeedFetcher, FetchError};
use crate::filters;

/// What the listing page should show.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Loading,
    Offline,
    Ready {
        search_input: String,
        restaurants: Vec<RestaurantRecord>,
    },
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Loading => "loading",
            View::Offline => "offline",
            View::Ready { .. } => "ready",
        }
    }
}

/// View and search input read under one lock.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub view: View,
    pub search_input: String,
}

impl Snapshot {
    /// Cards to show; empty unless the view is Ready.
    pub fn restaurants(&self) -> &[RestaurantRecord] {
        match &self.view {
            View::Ready { restaurants, .. } => restaurants,
            _ => &[],
        }
    }
}

/// Listing state. `full_list` is written once by `load`; `visible_list` is
/// always a fresh filter of it.
#[derive(Debug)]
pub struct RestaurantBrowser {
    search_input: String,
    full_list: OnceCell<Vec<RestaurantRecord>>,
    visible_list: Vec<RestaurantRecord>,
    top_rated_threshold: f64,
}

impl RestaurantBrowser {
    pub fn new(top_rated_threshold: f64) -> RestaurantBrowser {
        RestaurantBrowser {
            search_input: String::new(),
            full_list: OnceCell::new(),
            visible_list: Vec::new(),
            top_rated_threshold,
        }
    }

    /// Publishes the fetched list. Refused (returns false) once a list is in.
    pub fn load(&mut self, restaurants: Vec<RestaurantRecord>) -> bool {
        if self.full_list.set(restaurants.clone()).is_err() {
            return false;
        }
        self.visible_list = restaurants;
        true
    }

    pub fn is_loaded(&self) -> bool {
        self.full_list.get().is_some_and(|list| !list.is_empty())
    }

    pub fn full_list(&self) -> &[RestaurantRecord] {
        self.full_list.get().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn visible_list(&self) -> &[RestaurantRecord] {
        &self.visible_list
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn set_search_input(&mut self, input: impl Into<String>) {
        self.search_input = input.into();
    }

    pub fn apply_search(&mut self, term: &str) {
        self.visible_list = filters::search(self.full_list(), term);
    }

    pub fn apply_top_rated(&mut self) {
        self.visible_list = filters::top_rated(self.full_list(), self.top_rated_threshold);
    }

    pub fn restaurant(&self, id: &str) -> Option<&RestaurantRecord> {
        self.full_list().iter().find(|r| r.id() == id)
    }

    /// Offline wins over Loading so a page that starts without a network
    /// says so instead of showing the placeholder forever.
    pub fn view(&self, connectivity: &dyn Connectivity) -> View {
        if !connectivity.is_online() {
            return View::Offline;
        }
        if !self.is_loaded() {
            return View::Loading;
        }
        View::Ready {
            search_input: self.search_input.clone(),
            restaurants: self.visible_list.clone(),
        }
    }
}

/// The listing component as shared between request handlers: state behind a
/// single lock, one search debouncer, and the connectivity collaborator.
#[derive(Clone)]
pub struct BrowserHandle {
    state: Arc<Mutex<RestaurantBrowser>>,
    search: Arc<Debouncer<String>>,
    connectivity: Arc<dyn Connectivity>,
}

impl BrowserHandle {
    pub fn new(config: &Config, connectivity: Arc<dyn Connectivity>) -> BrowserHandle {
        let state = Arc::new(Mutex::new(RestaurantBrowser::new(config.top_rated_threshold)));

        let search_state = state.clone();
        let search = Debouncer::new(config.search_debounce(), move |term: String| {
            let state = search_state.clone();
            Box::pin(async move {
                let mut browser = state.lock().await;
                browser.apply_search(&term);
                tracing::debug!(
                    term = %term,
                    visible = browser.visible_list().len(),
                    "search applied"
                );
            }) as futures::future::BoxFuture<'static, ()>
        });

        BrowserHandle {
            state,
            search: Arc::new(search),
            connectivity,
        }
    }

    /// The single initial fetch. A missing target card leaves the listing
    /// empty; nothing is retried.
    pub async fn load_feed(&self, fetcher: &FeedFetcher) -> Result<usize, FetchError> {
        let Some(restaurants) = fetcher.fetch().await? else {
            return Ok(0);
        };
        let count = restaurants.len();
        if !self.state.lock().await.load(restaurants) {
            tracing::warn!("restaurant list already loaded, ignoring second load");
            return Ok(0);
        }
        Ok(count)
    }

    pub async fn load(&self, restaurants: Vec<RestaurantRecord>) -> bool {
        self.state.lock().await.load(restaurants)
    }

    /// Echoes the input right away; the filter follows after the quiet window.
    pub async fn on_search_input(&self, input: String) {
        self.state.lock().await.set_search_input(input.clone());
        self.search.schedule(input);
    }

    pub async fn on_top_rated(&self) -> Snapshot {
        let mut browser = self.state.lock().await;
        browser.apply_top_rated();
        self.snapshot_of(&browser)
    }

    pub async fn view(&self) -> View {
        self.state.lock().await.view(self.connectivity.as_ref())
    }

    pub async fn snapshot(&self) -> Snapshot {
        let browser = self.state.lock().await;
        self.snapshot_of(&browser)
    }

    fn snapshot_of(&self, browser: &RestaurantBrowser) -> Snapshot {
        Snapshot {
            view: browser.view(self.connectivity.as_ref()),
            search_input: browser.search_input().to_string(),
        }
    }

    pub async fn search_input(&self) -> String {
        self.state.lock().await.search_input().to_string()
    }

    pub async fn visible(&self) -> Vec<RestaurantRecord> {
        self.state.lock().await.visible_list().to_vec()
    }

    pub async fn restaurant(&self, id: &str) -> Option<RestaurantRecord> {
        self.state.lock().await.restaurant(id).cloned()
    }

    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }
}
