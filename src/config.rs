use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Public listing endpoint the page was built against.
pub const SWIGGY_API: &str = "https://www.swiggy.com/dapi/restaurants/list/v5?lat=12.9715987&lng=77.5945627&is-seo-homepage-enabled=true&page_type=DESKTOP_WEB_LISTING";

/// Card wrapper that carries the restaurant grid.
pub const TARGET_CARD_ID: &str = "restaurant_grid_listing";

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_TOP_RATED_THRESHOLD: f64 = 4.0;
pub const DEFAULT_PROBE_SECS: u64 = 10;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        feed_url: get_env_or_default("FEED_URL", SWIGGY_API),
        bind_addr: get_env_or_default("BIND_ADDR", DEFAULT_BIND_ADDR),
        search_debounce_ms: parse_env_or_default(
            "SEARCH_DEBOUNCE_MS",
            DEFAULT_SEARCH_DEBOUNCE_MS,
        ),
        top_rated_threshold: parse_env_or_default(
            "TOP_RATED_THRESHOLD",
            DEFAULT_TOP_RATED_THRESHOLD,
        ),
        probe_url: env::var("CONNECTIVITY_PROBE_URL").ok(),
        probe_secs: parse_env_or_default("CONNECTIVITY_PROBE_SECS", DEFAULT_PROBE_SECS),
    }
});

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_url: String,
    pub bind_addr: String,
    pub search_debounce_ms: u64,
    pub top_rated_threshold: f64,
    pub probe_url: Option<String>,
    pub probe_secs: u64,
}

impl Config {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_secs.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            feed_url: SWIGGY_API.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            top_rated_threshold: DEFAULT_TOP_RATED_THRESHOLD,
            probe_url: None,
            probe_secs: DEFAULT_PROBE_SECS,
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => parse_or_default(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or_default<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    raw.trim().parse().unwrap_or_else(|e| {
        tracing::warn!("invalid {key} value {raw:?} ({e}), using default: {default}");
        default
    })
}

#[test]
fn test_parse_or_default() {
    assert_eq!(parse_or_default("SEARCH_DEBOUNCE_MS", "250", 500u64), 250);
    assert_eq!(parse_or_default("SEARCH_DEBOUNCE_MS", " 750 ", 500u64), 750);
    assert_eq!(parse_or_default("SEARCH_DEBOUNCE_MS", "soon", 500u64), 500);
    assert_eq!(parse_or_default("TOP_RATED_THRESHOLD", "4.5", 4.0f64), 4.5);
    assert_eq!(parse_or_default("TOP_RATED_THRESHOLD", "", 4.0f64), 4.0);
}
