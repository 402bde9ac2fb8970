use std::sync::Arc;
use std::time::Duration;

use foodgrid::browser::{BrowserHandle, RestaurantBrowser, View};
use foodgrid::config::Config;
use foodgrid::connectivity::{Connectivity, OnlineStatus};
use foodgrid::data_models::RestaurantRecord;

mod test_helpers {
    use super::*;

    pub fn sample_restaurants() -> Vec<RestaurantRecord> {
        vec![
            RestaurantRecord::new("1", "Pizza Hut", 4.2).with_cuisines(["Pizzas"]),
            RestaurantRecord::new("2", "Burger King", 3.8).with_cuisines(["Burgers", "American"]),
        ]
    }

    pub fn larger_restaurants() -> Vec<RestaurantRecord> {
        vec![
            RestaurantRecord::new("10", "Domino's Pizza", 4.3),
            RestaurantRecord::new("11", "KFC", 4.0),
            RestaurantRecord::new("12", "Chinese Wok", 4.1),
            RestaurantRecord::new("13", "Pizza Hut", 3.9),
            RestaurantRecord::new("14", "Meghana Foods", 4.6),
        ]
    }

    pub fn ids(list: &[RestaurantRecord]) -> Vec<String> {
        list.iter().map(|r| r.id().to_string()).collect()
    }

    pub struct Offline;

    impl Connectivity for Offline {
        fn is_online(&self) -> bool {
            false
        }
    }

    pub fn loaded_browser(list: Vec<RestaurantRecord>) -> RestaurantBrowser {
        let mut browser = RestaurantBrowser::new(4.0);
        assert!(browser.load(list));
        browser
    }

    pub async fn loaded_handle(online: OnlineStatus) -> BrowserHandle {
        let handle = BrowserHandle::new(&Config::default(), Arc::new(online));
        assert!(handle.load(sample_restaurants()).await);
        handle
    }

    pub async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

use test_helpers::*;

#[cfg(test)]
mod state_tests {
    use super::*;

    #[test]
    fn test_starts_empty_and_loading() {
        let browser = RestaurantBrowser::new(4.0);
        assert!(browser.full_list().is_empty());
        assert!(browser.visible_list().is_empty());
        assert_eq!(browser.search_input(), "");
        assert_eq!(browser.view(&OnlineStatus::default()), View::Loading);
    }

    #[test]
    fn test_load_sets_both_lists_in_order() {
        let browser = loaded_browser(sample_restaurants());
        assert_eq!(ids(browser.full_list()), vec!["1", "2"]);
        assert_eq!(ids(browser.visible_list()), vec!["1", "2"]);
    }

    #[test]
    fn test_load_happens_at_most_once() {
        let mut browser = loaded_browser(sample_restaurants());
        assert!(!browser.load(larger_restaurants()));
        assert_eq!(ids(browser.full_list()), vec!["1", "2"]);
    }

    #[test]
    fn test_empty_grid_stays_loading() {
        let mut browser = RestaurantBrowser::new(4.0);
        browser.load(Vec::new());
        assert!(!browser.is_loaded());
        assert_eq!(browser.view(&OnlineStatus::default()), View::Loading);
    }

    #[test]
    fn test_search_filters_full_list() {
        let mut browser = loaded_browser(sample_restaurants());
        browser.apply_search("pizza");
        assert_eq!(ids(browser.visible_list()), vec!["1"]);

        // Derived from the full list, not from the previous result.
        browser.apply_search("king");
        assert_eq!(ids(browser.visible_list()), vec!["2"]);

        browser.apply_search("");
        assert_eq!(ids(browser.visible_list()), vec!["1", "2"]);
    }

    #[test]
    fn test_search_matches_name_not_cuisine() {
        let mut browser = loaded_browser(sample_restaurants());
        browser.apply_search("american");
        assert!(browser.visible_list().is_empty());
    }

    #[test]
    fn test_top_rated_is_idempotent() {
        let mut browser = loaded_browser(larger_restaurants());
        browser.apply_top_rated();
        let once = browser.visible_list().to_vec();
        browser.apply_top_rated();
        assert_eq!(browser.visible_list(), once.as_slice());
        assert_eq!(ids(&once), vec!["10", "12", "14"]);
    }

    #[test]
    fn test_top_rated_overrides_search() {
        let mut browser = loaded_browser(larger_restaurants());
        browser.apply_search("pizza");
        assert_eq!(ids(browser.visible_list()), vec!["10", "13"]);

        browser.apply_top_rated();
        assert_eq!(ids(browser.visible_list()), vec!["10", "12", "14"]);

        browser.apply_search("pizza");
        assert_eq!(ids(browser.visible_list()), vec!["10", "13"]);
    }

    #[test]
    fn test_visible_is_subset_of_full() {
        let mut browser = loaded_browser(larger_restaurants());
        for term in ["", "a", "PIZZA", "wok", "zzz"] {
            browser.apply_search(term);
            for r in browser.visible_list() {
                assert!(browser.restaurant(r.id()).is_some());
            }
        }
    }

    #[test]
    fn test_view_ready_carries_input_and_visible() {
        let mut browser = loaded_browser(sample_restaurants());
        browser.set_search_input("burg");
        browser.apply_search("burg");

        match browser.view(&OnlineStatus::default()) {
            View::Ready { search_input, restaurants } => {
                assert_eq!(search_input, "burg");
                assert_eq!(ids(&restaurants), vec!["2"]);
            }
            other => panic!("expected ready view, got {other:?}"),
        }
    }

    #[test]
    fn test_offline_after_load() {
        let browser = loaded_browser(sample_restaurants());
        assert_eq!(browser.view(&Offline), View::Offline);
    }

    #[test]
    fn test_offline_takes_precedence_over_loading() {
        let browser = RestaurantBrowser::new(4.0);
        assert_eq!(browser.view(&Offline), View::Offline);
    }
}

#[cfg(test)]
mod handle_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_typing_pizza_then_waiting() {
        let handle = loaded_handle(OnlineStatus::default()).await;

        handle.on_search_input("pizza".to_string()).await;
        assert_eq!(handle.search_input().await, "pizza");
        assert_eq!(ids(&handle.visible().await), vec!["1", "2"]);

        advance(600).await;
        assert_eq!(ids(&handle.visible().await), vec!["1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_echo_is_immediate_filter_lags() {
        let handle = loaded_handle(OnlineStatus::default()).await;

        handle.on_search_input("b".to_string()).await;
        advance(200).await;
        handle.on_search_input("bu".to_string()).await;
        advance(200).await;

        assert_eq!(handle.search_input().await, "bu");
        assert_eq!(ids(&handle.visible().await), vec!["1", "2"]);
        assert!(handle.search_pending());

        advance(400).await;
        assert_eq!(ids(&handle.visible().await), vec!["2"]);
        assert!(!handle.search_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_keystroke_applies() {
        let handle = loaded_handle(OnlineStatus::default()).await;

        // "pizza" would match, but is superseded inside the window.
        handle.on_search_input("pizza".to_string()).await;
        advance(100).await;
        handle.on_search_input("burger".to_string()).await;
        advance(600).await;

        assert_eq!(ids(&handle.visible().await), vec!["2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_search_restores_full_list() {
        let handle = loaded_handle(OnlineStatus::default()).await;

        handle.on_search_input("pizza".to_string()).await;
        advance(600).await;
        handle.on_search_input(String::new()).await;
        advance(600).await;

        assert_eq!(ids(&handle.visible().await), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_top_rated_click() {
        let handle = loaded_handle(OnlineStatus::default()).await;
        let top = handle.on_top_rated().await;
        assert_eq!(top.view.name(), "ready");
        assert_eq!(ids(top.restaurants()), vec!["1"]);
        assert_eq!(ids(&handle.visible().await), vec!["1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_search_overrides_top_rated() {
        let handle = loaded_handle(OnlineStatus::default()).await;

        handle.on_search_input("king".to_string()).await;
        handle.on_top_rated().await;
        assert_eq!(ids(&handle.visible().await), vec!["1"]);

        advance(600).await;
        assert_eq!(ids(&handle.visible().await), vec!["2"]);
    }

    #[tokio::test]
    async fn test_going_offline_after_load() {
        let online = OnlineStatus::default();
        let handle = loaded_handle(online.clone()).await;
        assert_eq!(handle.view().await.name(), "ready");

        online.set_online(false);
        assert_eq!(handle.view().await, View::Offline);

        online.set_online(true);
        assert_eq!(handle.view().await.name(), "ready");
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_pairs_view_with_input() {
        let handle = loaded_handle(OnlineStatus::default()).await;

        handle.on_search_input("king".to_string()).await;
        let before = handle.snapshot().await;
        assert_eq!(before.search_input, "king");
        assert_eq!(ids(before.restaurants()), vec!["1", "2"]);

        advance(600).await;
        let after = handle.snapshot().await;
        assert_eq!(after.search_input, "king");
        assert_eq!(ids(after.restaurants()), vec!["2"]);
    }

    #[tokio::test]
    async fn test_top_rated_while_offline_shows_no_cards() {
        let online = OnlineStatus::default();
        let handle = loaded_handle(online.clone()).await;
        online.set_online(false);

        let top = handle.on_top_rated().await;
        assert_eq!(top.view, View::Offline);
        assert!(top.restaurants().is_empty());

        // The filter still applied underneath.
        online.set_online(true);
        assert_eq!(ids(&handle.visible().await), vec!["1"]);
    }

    #[tokio::test]
    async fn test_restaurant_lookup() {
        let handle = loaded_handle(OnlineStatus::default()).await;
        assert_eq!(handle.restaurant("2").await.unwrap().name(), "Burger King");
        assert!(handle.restaurant("404").await.is_none());
    }
}
