// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Container aggregation service.
//!
//! Combines advertisements, images and videos from the three upstreams into
//! [`Container`]s keyed by container ID.

use super::{AdvertisementService, ImageService, VideoService};
use crate::config::Config;
use crate::models::{Advertisement, Container, Image, Video, VideoType};
use crate::repository::{
    AdvertisementRepository, ImageRepository, UpstreamClient, UpstreamError, VideoRepository,
};

/// Aggregates the per-asset services into containers.
#[derive(Clone)]
pub struct ContainerService {
    advertisements: AdvertisementService,
    images: ImageService,
    videos: VideoService,
}

impl ContainerService {
    pub fn new(
        advertisements: AdvertisementService,
        images: ImageService,
        videos: VideoService,
    ) -> Self {
        Self {
            advertisements,
            images,
            videos,
        }
    }

    /// Wire all three services onto one shared upstream client.
    pub fn from_config(client: UpstreamClient, config: &Config) -> Self {
        Self::new(
            AdvertisementService::new(AdvertisementRepository::new(
                client.clone(),
                &config.advertisement_base_url,
            )),
            ImageService::new(ImageRepository::new(
                client.clone(),
                &config.image_base_url,
            )),
            VideoService::new(VideoRepository::new(client, &config.video_base_url)),
        )
    }

    /// One container with all of its assets.
    pub async fn get_container(&self, container_id: u32) -> Result<Container, UpstreamError> {
        tracing::debug!(container_id, "Assembling container");

        let (ads, images, videos) = tokio::try_join!(
            self.advertisements
                .list_advertisements_by_container(container_id),
            self.images.list_images_by_container(container_id),
            self.videos.list_videos_by_container(container_id),
        )?;

        Ok(Container::assemble(container_id, ads, images, videos))
    }

    /// Every container that has at least one video, sorted by ID.
    pub async fn list_containers(&self) -> Result<Vec<Container>, UpstreamError> {
        tracing::debug!("Assembling all containers");

        let (mut ads, mut images, videos) = tokio::try_join!(
            self.advertisements.list_advertisements(),
            self.images.list_images(),
            self.videos.list_videos(),
        )?;

        let mut containers: Vec<Container> = videos
            .into_iter()
            .map(|(id, videos)| {
                Container::assemble(
                    id,
                    ads.remove(&id).unwrap_or_default(),
                    images.remove(&id).unwrap_or_default(),
                    videos,
                )
            })
            .collect();
        containers.sort_by_key(|container| container.id);

        tracing::debug!(count = containers.len(), "Containers assembled");
        Ok(containers)
    }

    /// Advertisements of one container.
    pub async fn list_advertisements(
        &self,
        container_id: u32,
    ) -> Result<Vec<Advertisement>, UpstreamError> {
        self.advertisements
            .list_advertisements_by_container(container_id)
            .await
    }

    /// Images of one container.
    pub async fn list_images(&self, container_id: u32) -> Result<Vec<Image>, UpstreamError> {
        self.images.list_images_by_container(container_id).await
    }

    /// Videos of one container, optionally restricted to one type.
    pub async fn list_videos(
        &self,
        container_id: u32,
        video_type: Option<VideoType>,
    ) -> Result<Vec<Video>, UpstreamError> {
        match video_type {
            None => self.videos.list_videos_by_container(container_id).await,
            Some(video_type) => Ok(self
                .videos
                .list_videos_by_container_and_type(container_id, video_type)
                .await?
                .remove(&container_id)
                .unwrap_or_default()),
        }
    }
}
