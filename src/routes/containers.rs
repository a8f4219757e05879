// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Container routes.

use crate::error::{AppError, Result};
use crate::models::{Advertisement, Container, Image, Video, VideoType};
use crate::AppState;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/containers", get(list_containers))
        .route("/containers/{id}", get(get_container))
        .route("/containers/{id}/ads", get(list_advertisements))
        .route("/containers/{id}/images", get(list_images))
        .route("/containers/{id}/videos", get(list_videos))
}

/// Container ID from the path; anything but a non-negative integer is a 400.
fn container_id(path: std::result::Result<Path<u32>, PathRejection>) -> Result<u32> {
    path.map(|Path(id)| id)
        .map_err(|rejection| AppError::BadRequest(format!("Invalid container id: {}", rejection)))
}

async fn list_containers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Container>>> {
    let containers = state.containers.list_containers().await?;
    Ok(Json(containers))
}

async fn get_container(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<u32>, PathRejection>,
) -> Result<Json<Container>> {
    let id = container_id(path)?;
    let container = state.containers.get_container(id).await?;
    Ok(Json(container))
}

async fn list_advertisements(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<u32>, PathRejection>,
) -> Result<Json<Vec<Advertisement>>> {
    let id = container_id(path)?;
    Ok(Json(state.containers.list_advertisements(id).await?))
}

async fn list_images(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<u32>, PathRejection>,
) -> Result<Json<Vec<Image>>> {
    let id = container_id(path)?;
    Ok(Json(state.containers.list_images(id).await?))
}

#[derive(Debug, Deserialize)]
struct VideosQuery {
    #[serde(rename = "type")]
    video_type: Option<String>,
}

async fn list_videos(
    State(state): State<Arc<AppState>>,
    path: std::result::Result<Path<u32>, PathRejection>,
    query: std::result::Result<Query<VideosQuery>, QueryRejection>,
) -> Result<Json<Vec<Video>>> {
    let id = container_id(path)?;
    let Query(query) = query
        .map_err(|rejection| AppError::BadRequest(format!("Invalid query: {}", rejection)))?;
    let video_type = query
        .video_type
        .as_deref()
        .map(str::parse::<VideoType>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    Ok(Json(state.containers.list_videos(id, video_type).await?))
}
