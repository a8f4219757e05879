// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rocket Video repository: videos and their asset references.

use super::{params, parse_id, UpstreamClient, UpstreamError};
use crate::models::{AssetReference, AssetType, Video, VideoType};
use serde::{Deserialize, Serialize};

/// Asset reference path segment under a video.
const ASSET_REFERENCES: &str = "asset-references";

/// Video as returned by Rocket Video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDto {
    pub container_id: String,
    pub description: String,
    /// Expiration date (ISO 8601)
    pub expiration_date: String,
    pub id: String,
    pub playback_url: String,
    pub title: String,
    #[serde(rename = "type")]
    pub video_type: VideoType,
}

impl VideoDto {
    pub fn id(&self) -> Result<u32, UpstreamError> {
        parse_id("id", &self.id)
    }

    pub fn container_id(&self) -> Result<u32, UpstreamError> {
        parse_id("containerId", &self.container_id)
    }
}

impl TryFrom<VideoDto> for Video {
    type Error = UpstreamError;

    /// Convert without assets; callers attach them with [`Video::with_assets`].
    fn try_from(dto: VideoDto) -> Result<Self, Self::Error> {
        Ok(Video {
            assets: Vec::new(),
            id: parse_id("id", &dto.id)?,
            description: dto.description,
            expiration_date: dto.expiration_date,
            playback_url: dto.playback_url,
            title: dto.title,
            video_type: dto.video_type,
        })
    }
}

/// List wrapper: `{ "videos": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideosDto {
    pub videos: Vec<VideoDto>,
}

/// Reference from a video to one of its assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReferenceDto {
    pub asset_id: String,
    pub asset_type: AssetType,
    pub video_id: String,
}

impl TryFrom<AssetReferenceDto> for AssetReference {
    type Error = UpstreamError;

    fn try_from(dto: AssetReferenceDto) -> Result<Self, Self::Error> {
        Ok(AssetReference {
            asset_id: parse_id("assetId", &dto.asset_id)?,
            asset_type: dto.asset_type,
        })
    }
}

/// List wrapper: `{ "videoAssets": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAssetsDto {
    pub video_assets: Vec<AssetReferenceDto>,
}

/// Repository for the video upstream.
#[derive(Clone)]
pub struct VideoRepository {
    client: UpstreamClient,
    base_url: String,
}

impl VideoRepository {
    pub fn new(client: UpstreamClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/videos", self.base_url.trim_end_matches('/'))
    }

    fn asset_references_endpoint(&self, video_id: u32) -> String {
        format!("{}/{}/{}", self.endpoint(), video_id, ASSET_REFERENCES)
    }

    /// Get one video by ID.
    pub async fn get_video(&self, video_id: u32) -> Result<VideoDto, UpstreamError> {
        tracing::trace!(video_id, "Getting video");

        let url = format!("{}/{}", self.endpoint(), video_id);
        self.client.get(&url, &[]).await
    }

    /// List every video.
    pub async fn list_videos(&self) -> Result<Vec<VideoDto>, UpstreamError> {
        tracing::trace!("Listing all videos");
        self.list(&[]).await
    }

    /// List the videos of one container.
    pub async fn list_videos_by_container(
        &self,
        container_id: u32,
    ) -> Result<Vec<VideoDto>, UpstreamError> {
        tracing::trace!(container_id, "Listing videos by container");
        self.list(&[(params::CONTAINER_ID, container_id.to_string())])
            .await
    }

    /// List every video of one type.
    pub async fn list_videos_by_type(
        &self,
        video_type: VideoType,
    ) -> Result<Vec<VideoDto>, UpstreamError> {
        tracing::trace!(%video_type, "Listing videos by type");
        self.list(&[(params::VIDEO_TYPE, video_type.to_string())])
            .await
    }

    /// List the videos of one container having one type.
    pub async fn list_videos_by_container_and_type(
        &self,
        container_id: u32,
        video_type: VideoType,
    ) -> Result<Vec<VideoDto>, UpstreamError> {
        tracing::trace!(container_id, %video_type, "Listing videos by container and type");
        self.list(&[
            (params::CONTAINER_ID, container_id.to_string()),
            (params::VIDEO_TYPE, video_type.to_string()),
        ])
        .await
    }

    /// List the asset references of one video.
    pub async fn list_asset_references(
        &self,
        video_id: u32,
    ) -> Result<Vec<AssetReferenceDto>, UpstreamError> {
        tracing::trace!(video_id, "Listing asset references");

        let wrapper: VideoAssetsDto = self
            .client
            .get(&self.asset_references_endpoint(video_id), &[])
            .await?;
        Ok(wrapper.video_assets)
    }

    /// List the asset references of one video having one asset type.
    pub async fn list_asset_references_by_type(
        &self,
        video_id: u32,
        asset_type: AssetType,
    ) -> Result<Vec<AssetReferenceDto>, UpstreamError> {
        tracing::trace!(video_id, %asset_type, "Listing asset references by type");

        let wrapper: VideoAssetsDto = self
            .client
            .get(
                &self.asset_references_endpoint(video_id),
                &[(params::ASSET_TYPE, asset_type.to_string())],
            )
            .await?;
        Ok(wrapper.video_assets)
    }

    async fn list(&self, query: &[(&str, String)]) -> Result<Vec<VideoDto>, UpstreamError> {
        let wrapper: VideosDto = self.client.get(&self.endpoint(), query).await?;
        Ok(wrapper.videos)
    }
}
