// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use rocket_container::config::Config;
use rocket_container::repository::UpstreamClient;
use rocket_container::routes::create_router;
use rocket_container::services::ContainerService;
use rocket_container::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a test app whose upstreams all live at `base_url`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(base_url: &str) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default(base_url);
    let client = UpstreamClient::from_config(&config).expect("Failed to build client");
    let containers = ContainerService::from_config(client, &config);

    let state = Arc::new(AppState { containers });

    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub fn ad_json(id: u32, container_id: u32) -> Value {
    json!({
        "containerId": container_id.to_string(),
        "id": id.to_string(),
        "name": format!("Ad {}", id),
        "url": format!("https://ads.example/{}.mp4", id),
    })
}

#[allow(dead_code)]
pub fn image_json(id: u32, container_id: u32) -> Value {
    json!({
        "containerId": container_id.to_string(),
        "id": id.to_string(),
        "name": format!("Image {}", id),
        "url": format!("https://images.example/{}.jpg", id),
    })
}

#[allow(dead_code)]
pub fn video_json(id: u32, container_id: u32, video_type: &str) -> Value {
    json!({
        "containerId": container_id.to_string(),
        "description": format!("Video {} description", id),
        "expirationDate": "2027-01-01T00:00:00Z",
        "id": id.to_string(),
        "playbackUrl": format!("https://videos.example/{}.m3u8", id),
        "title": format!("Video {}", id),
        "type": video_type,
    })
}

#[allow(dead_code)]
pub fn asset_reference_json(video_id: u32, asset_id: u32, asset_type: &str) -> Value {
    json!({
        "assetId": asset_id.to_string(),
        "assetType": asset_type,
        "videoId": video_id.to_string(),
    })
}

#[allow(dead_code)]
async fn mount_json(server: &MockServer, mock: wiremock::MockBuilder, body: Value) {
    mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Start a mock upstream serving a small catalogue:
///
/// - container 1: ad 10, image 20, videos 100 (MOVIE, references ad 10)
///   and 101 (CLIP)
/// - container 2: video 200 (EPISODE) only
/// - container 3: ad 30 only, so it never shows up as a container
///
/// Filtered endpoints are mounted before unfiltered ones; the first
/// matching mock wins.
#[allow(dead_code)]
pub async fn mock_upstreams() -> MockServer {
    let server = MockServer::start().await;

    // Per-container and per-type queries
    mount_json(
        &server,
        Mock::given(method("GET"))
            .and(path("/advertisements"))
            .and(query_param("containerId", "1")),
        json!({ "advertisements": [ad_json(10, 1)] }),
    )
    .await;
    mount_json(
        &server,
        Mock::given(method("GET"))
            .and(path("/images"))
            .and(query_param("containerId", "1")),
        json!({ "images": [image_json(20, 1)] }),
    )
    .await;
    mount_json(
        &server,
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("containerId", "1"))
            .and(query_param("type", "MOVIE")),
        json!({ "videos": [video_json(100, 1, "MOVIE")] }),
    )
    .await;
    mount_json(
        &server,
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("containerId", "1")),
        json!({ "videos": [video_json(100, 1, "MOVIE"), video_json(101, 1, "CLIP")] }),
    )
    .await;
    mount_json(
        &server,
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("type", "EPISODE")),
        json!({ "videos": [video_json(200, 2, "EPISODE")] }),
    )
    .await;

    // Asset references
    mount_json(
        &server,
        Mock::given(method("GET"))
            .and(path("/videos/100/asset-references"))
            .and(query_param("assetType", "IMAGE")),
        json!({ "videoAssets": [] }),
    )
    .await;
    mount_json(
        &server,
        Mock::given(method("GET")).and(path("/videos/100/asset-references")),
        json!({ "videoAssets": [asset_reference_json(100, 10, "AD")] }),
    )
    .await;
    for video_id in [101, 200] {
        mount_json(
            &server,
            Mock::given(method("GET"))
                .and(path(format!("/videos/{}/asset-references", video_id))),
            json!({ "videoAssets": [] }),
        )
        .await;
    }

    // Single video
    mount_json(
        &server,
        Mock::given(method("GET")).and(path("/videos/100")),
        video_json(100, 1, "MOVIE"),
    )
    .await;

    // Unfiltered lists
    mount_json(
        &server,
        Mock::given(method("GET")).and(path("/advertisements")),
        json!({ "advertisements": [ad_json(10, 1), ad_json(30, 3)] }),
    )
    .await;
    mount_json(
        &server,
        Mock::given(method("GET")).and(path("/images")),
        json!({ "images": [image_json(20, 1)] }),
    )
    .await;
    mount_json(
        &server,
        Mock::given(method("GET")).and(path("/videos")),
        json!({
            "videos": [
                video_json(200, 2, "EPISODE"),
                video_json(100, 1, "MOVIE"),
                video_json(101, 1, "CLIP"),
            ]
        }),
    )
    .await;

    server
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
