// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Video service.
//!
//! Every video handed out has its asset references resolved. Lookups for a
//! batch of videos run concurrently and the first failure fails the batch.

use super::group;
use crate::models::{AssetReference, AssetType, Video, VideoMap, VideoType};
use crate::repository::video::{AssetReferenceDto, VideoDto};
use crate::repository::{UpstreamError, VideoRepository};
use futures_util::future::try_join_all;

/// Converts video DTOs into domain models with their assets attached.
#[derive(Clone)]
pub struct VideoService {
    repository: VideoRepository,
}

impl VideoService {
    pub fn new(repository: VideoRepository) -> Self {
        Self { repository }
    }

    /// One video by ID.
    pub async fn get_video(&self, video_id: u32) -> Result<Video, UpstreamError> {
        let dto = self.repository.get_video(video_id).await?;
        self.resolve(dto).await
    }

    /// All asset references of a video.
    pub async fn list_asset_references(
        &self,
        video_id: u32,
    ) -> Result<Vec<AssetReference>, UpstreamError> {
        convert_references(self.repository.list_asset_references(video_id).await?)
    }

    /// Asset references of a video, restricted to one asset type.
    pub async fn list_asset_references_by_type(
        &self,
        video_id: u32,
        asset_type: AssetType,
    ) -> Result<Vec<AssetReference>, UpstreamError> {
        convert_references(
            self.repository
                .list_asset_references_by_type(video_id, asset_type)
                .await?,
        )
    }

    /// All videos, grouped by container.
    pub async fn list_videos(&self) -> Result<VideoMap, UpstreamError> {
        let dtos = self.repository.list_videos().await?;
        self.resolve_grouped(dtos).await
    }

    /// Videos of one container.
    pub async fn list_videos_by_container(
        &self,
        container_id: u32,
    ) -> Result<Vec<Video>, UpstreamError> {
        let dtos = self
            .repository
            .list_videos_by_container(container_id)
            .await?;
        try_join_all(dtos.into_iter().map(|dto| self.resolve(dto))).await
    }

    /// All videos of one type, grouped by container.
    pub async fn list_videos_by_type(
        &self,
        video_type: VideoType,
    ) -> Result<VideoMap, UpstreamError> {
        let dtos = self.repository.list_videos_by_type(video_type).await?;
        self.resolve_grouped(dtos).await
    }

    /// Videos of one container and type, grouped by container.
    pub async fn list_videos_by_container_and_type(
        &self,
        container_id: u32,
        video_type: VideoType,
    ) -> Result<VideoMap, UpstreamError> {
        let dtos = self
            .repository
            .list_videos_by_container_and_type(container_id, video_type)
            .await?;
        self.resolve_grouped(dtos).await
    }

    async fn resolve(&self, dto: VideoDto) -> Result<Video, UpstreamError> {
        let assets = self.list_asset_references(dto.id()?).await?;
        Ok(Video::try_from(dto)?.with_assets(assets))
    }

    async fn resolve_keyed(&self, dto: VideoDto) -> Result<(u32, Video), UpstreamError> {
        let container_id = dto.container_id()?;
        Ok((container_id, self.resolve(dto).await?))
    }

    async fn resolve_grouped(&self, dtos: Vec<VideoDto>) -> Result<VideoMap, UpstreamError> {
        let keyed = try_join_all(dtos.into_iter().map(|dto| self.resolve_keyed(dto))).await?;
        Ok(group(keyed))
    }
}

fn convert_references(
    dtos: Vec<AssetReferenceDto>,
) -> Result<Vec<AssetReference>, UpstreamError> {
    dtos.into_iter().map(AssetReference::try_from).collect()
}
