use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use foodgrid::api::{AppState, create_router};
use foodgrid::browser::BrowserHandle;
use foodgrid::config::CONFIG;
use foodgrid::connectivity::{OnlineStatus, spawn_probe};
use foodgrid::fetcher::FeedFetcher;

/// Restaurant listing page over a third-party feed.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Feed endpoint (defaults to FEED_URL or the built-in listing URL)
    #[arg(long)]
    feed_url: Option<String>,

    /// Address to listen on
    #[arg(long)]
    bind: Option<String>,

    /// URL to HEAD periodically for the online/offline flag
    #[arg(long)]
    probe_url: Option<String>,

    /// Search quiet window in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (also picks up log crate records)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let args = Args::parse();
    let mut config = CONFIG.clone();
    if let Some(feed_url) = args.feed_url {
        config.feed_url = feed_url;
    }
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(probe_url) = args.probe_url {
        config.probe_url = Some(probe_url);
    }
    if let Some(debounce_ms) = args.debounce_ms {
        config.search_debounce_ms = debounce_ms;
    }

    let online = OnlineStatus::default();
    let browser = BrowserHandle::new(&config, Arc::new(online.clone()));

    // Page serves the placeholder while this runs.
    let fetcher = FeedFetcher::new(config.feed_url.clone());
    let loader = browser.clone();
    tokio::spawn(async move {
        match loader.load_feed(&fetcher).await {
            Ok(0) => tracing::warn!("no restaurants loaded, listing stays on the placeholder"),
            Ok(count) => tracing::info!("loaded {count} restaurants"),
            Err(e) => tracing::error!("error loading feed {}, error: {:#}", fetcher.url(), e),
        }
    });

    let cancel = CancellationToken::new();
    let probe = config.probe_url.clone().map(|url| {
        tracing::info!("probing connectivity via {url} every {:?}", config.probe_interval());
        spawn_probe(online.clone(), url, config.probe_interval(), cancel.clone())
    });

    let app = create_router(AppState {
        browser,
        online,
        debounce_ms: config.search_debounce_ms,
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("server error")?;

    cancel.cancel();
    if let Some(probe) = probe {
        let _ = probe.await;
    }
    Ok(())
}
