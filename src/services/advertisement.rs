// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Advertisement service.

use super::group;
use crate::models::{Advertisement, AdvertisementMap};
use crate::repository::{AdvertisementRepository, UpstreamError};

/// Converts advertisement DTOs into domain models.
#[derive(Clone)]
pub struct AdvertisementService {
    repository: AdvertisementRepository,
}

impl AdvertisementService {
    pub fn new(repository: AdvertisementRepository) -> Self {
        Self { repository }
    }

    /// All advertisements, grouped by container.
    pub async fn list_advertisements(&self) -> Result<AdvertisementMap, UpstreamError> {
        let keyed = self
            .repository
            .list_advertisements()
            .await?
            .into_iter()
            .map(|dto| -> Result<(u32, Advertisement), UpstreamError> {
                Ok((dto.container_id()?, Advertisement::try_from(dto)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(group(keyed))
    }

    /// Advertisements of one container.
    pub async fn list_advertisements_by_container(
        &self,
        container_id: u32,
    ) -> Result<Vec<Advertisement>, UpstreamError> {
        self.repository
            .list_advertisements_by_container(container_id)
            .await?
            .into_iter()
            .map(Advertisement::try_from)
            .collect()
    }
}
