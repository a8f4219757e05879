// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Image service.

use super::group;
use crate::models::{Image, ImageMap};
use crate::repository::{ImageRepository, UpstreamError};

/// Converts image DTOs into domain models.
#[derive(Clone)]
pub struct ImageService {
    repository: ImageRepository,
}

impl ImageService {
    pub fn new(repository: ImageRepository) -> Self {
        Self { repository }
    }

    /// All images, grouped by container.
    pub async fn list_images(&self) -> Result<ImageMap, UpstreamError> {
        let keyed = self
            .repository
            .list_images()
            .await?
            .into_iter()
            .map(|dto| -> Result<(u32, Image), UpstreamError> {
                Ok((dto.container_id()?, Image::try_from(dto)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(group(keyed))
    }

    /// Images of one container.
    pub async fn list_images_by_container(
        &self,
        container_id: u32,
    ) -> Result<Vec<Image>, UpstreamError> {
        self.repository
            .list_images_by_container(container_id)
            .await?
            .into_iter()
            .map(Image::try_from)
            .collect()
    }
}
