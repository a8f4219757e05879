// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Container (show/series) model aggregating all of its assets.

use super::{Advertisement, Image, Video};
use serde::{Deserialize, Serialize};

/// A show or series with its advertisements, images and videos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub ads: Vec<Advertisement>,
    pub id: u32,
    pub images: Vec<Image>,
    pub title: String,
    pub videos: Vec<Video>,
}

impl Container {
    /// Assemble a container, deriving its title from which assets it has.
    pub fn assemble(
        id: u32,
        ads: Vec<Advertisement>,
        images: Vec<Image>,
        videos: Vec<Video>,
    ) -> Self {
        let title = Self::title_for(id, !ads.is_empty(), !images.is_empty());
        Self {
            ads,
            id,
            images,
            title,
            videos,
        }
    }

    /// `container-{id}[_ads][_images]_videos`
    pub fn title_for(id: u32, has_ads: bool, has_images: bool) -> String {
        let mut title = format!("container-{}", id);
        if has_ads {
            title.push_str("_ads");
        }
        if has_images {
            title.push_str("_images");
        }
        title.push_str("_videos");
        title
    }
}
