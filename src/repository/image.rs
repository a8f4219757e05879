// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rocket Image repository.

use super::{params, parse_id, UpstreamClient, UpstreamError};
use crate::models::Image;
use serde::{Deserialize, Serialize};

/// Image as returned by Rocket Image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub container_id: String,
    pub id: String,
    pub name: String,
    pub url: String,
}

impl ImageDto {
    pub fn container_id(&self) -> Result<u32, UpstreamError> {
        parse_id("containerId", &self.container_id)
    }
}

impl TryFrom<ImageDto> for Image {
    type Error = UpstreamError;

    fn try_from(dto: ImageDto) -> Result<Self, Self::Error> {
        Ok(Image {
            id: parse_id("id", &dto.id)?,
            name: dto.name,
            url: dto.url,
        })
    }
}

/// List wrapper: `{ "images": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesDto {
    pub images: Vec<ImageDto>,
}

/// Repository for the image upstream.
#[derive(Clone)]
pub struct ImageRepository {
    client: UpstreamClient,
    base_url: String,
}

impl ImageRepository {
    pub fn new(client: UpstreamClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/images", self.base_url.trim_end_matches('/'))
    }

    /// List every image.
    pub async fn list_images(&self) -> Result<Vec<ImageDto>, UpstreamError> {
        tracing::trace!("Listing all images");

        let wrapper: ImagesDto = self.client.get(&self.endpoint(), &[]).await?;
        Ok(wrapper.images)
    }

    /// List the images of one container.
    pub async fn list_images_by_container(
        &self,
        container_id: u32,
    ) -> Result<Vec<ImageDto>, UpstreamError> {
        tracing::trace!(container_id, "Listing images by container");

        let wrapper: ImagesDto = self
            .client
            .get(
                &self.endpoint(),
                &[(params::CONTAINER_ID, container_id.to_string())],
            )
            .await?;
        Ok(wrapper.images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_wire_shape() {
        let data = ImagesDto {
            images: vec![ImageDto {
                container_id: "0".to_string(),
                id: "0".to_string(),
                name: "Image".to_string(),
                url: "https://image.com".to_string(),
            }],
        };

        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"images":[{"containerId":"0","id":"0","name":"Image","url":"https://image.com"}]}"#
        );
    }

    #[test]
    fn test_bad_container_id() {
        let dto = ImageDto {
            container_id: "".to_string(),
            id: "1".to_string(),
            name: "Image".to_string(),
            url: "https://image.com".to_string(),
        };
        assert!(dto.container_id().is_err());
    }
}
