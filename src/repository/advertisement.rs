// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rocket Advertisement repository.

use super::{params, parse_id, UpstreamClient, UpstreamError};
use crate::models::Advertisement;
use serde::{Deserialize, Serialize};

/// Advertisement as returned by Rocket Advertisement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementDto {
    /// Parent container (show/series) identifier
    pub container_id: String,
    pub id: String,
    pub name: String,
    pub url: String,
}

impl AdvertisementDto {
    pub fn container_id(&self) -> Result<u32, UpstreamError> {
        parse_id("containerId", &self.container_id)
    }
}

impl TryFrom<AdvertisementDto> for Advertisement {
    type Error = UpstreamError;

    fn try_from(dto: AdvertisementDto) -> Result<Self, Self::Error> {
        Ok(Advertisement {
            id: parse_id("id", &dto.id)?,
            name: dto.name,
            url: dto.url,
        })
    }
}

/// List wrapper: `{ "advertisements": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisementsDto {
    pub advertisements: Vec<AdvertisementDto>,
}

/// Repository for the advertisement upstream.
#[derive(Clone)]
pub struct AdvertisementRepository {
    client: UpstreamClient,
    base_url: String,
}

impl AdvertisementRepository {
    pub fn new(client: UpstreamClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/advertisements", self.base_url.trim_end_matches('/'))
    }

    /// List every advertisement.
    pub async fn list_advertisements(&self) -> Result<Vec<AdvertisementDto>, UpstreamError> {
        tracing::trace!("Listing all advertisements");

        let wrapper: AdvertisementsDto = self.client.get(&self.endpoint(), &[]).await?;
        Ok(wrapper.advertisements)
    }

    /// List the advertisements of one container.
    pub async fn list_advertisements_by_container(
        &self,
        container_id: u32,
    ) -> Result<Vec<AdvertisementDto>, UpstreamError> {
        tracing::trace!(container_id, "Listing advertisements by container");

        let wrapper: AdvertisementsDto = self
            .client
            .get(
                &self.endpoint(),
                &[(params::CONTAINER_ID, container_id.to_string())],
            )
            .await?;
        Ok(wrapper.advertisements)
    }
}
