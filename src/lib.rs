pub mod api;
pub mod browser;
pub mod config;
pub mod connectivity;
pub mod data_models;
pub mod debounce;
pub mod fetcher;
pub mod filters;
pub mod render;
