// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rocket Container API Server
//!
//! Serves containers assembled from the Rocket advertisement, image and
//! video services.

use anyhow::Context as _;
use rocket_container::{
    config::Config,
    logging::{init_logging, spawn_filter_refresh},
    repository::UpstreamClient,
    services::ContainerService,
    AppState,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;

    // Console and rolling file logging; the guard flushes the file on exit
    let logging = init_logging(&config.logging).context("Failed to initialize logging")?;
    if let Some(path) = config.logging.filter_file.clone() {
        tracing::info!(
            path = %path.display(),
            interval_secs = config.logging.refresh_interval.as_secs(),
            "Watching log filter file"
        );
        spawn_filter_refresh(
            logging.filter_handle(),
            path,
            config.logging.refresh_interval,
            logging.directive().to_string(),
        );
    }

    tracing::info!(port = config.port, "Starting Rocket Container API");
    tracing::info!(
        ads = %config.advertisement_base_url,
        images = %config.image_base_url,
        videos = %config.video_base_url,
        max_attempts = config.upstream_max_attempts,
        cache_ttl_secs = config.upstream_cache_ttl.as_secs(),
        "Upstream services configured"
    );

    let client = UpstreamClient::from_config(&config).context("Failed to build HTTP client")?;
    let containers = ContainerService::from_config(client, &config);

    // Build shared state
    let state = Arc::new(AppState { containers });

    // Build router
    let app = rocket_container::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
