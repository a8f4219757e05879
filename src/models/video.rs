// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Video and asset reference models.

use super::{AssetType, VideoType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pointer from a video to an advertisement or image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReference {
    /// Identifier of the referenced asset
    pub asset_id: u32,
    /// Kind of the referenced asset
    pub asset_type: AssetType,
}

/// Video as served by the container API, with its asset references resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Assets associated with this video
    pub assets: Vec<AssetReference>,
    /// Brief description
    pub description: String,
    /// Expiration date (ISO 8601), empty if the video does not expire
    pub expiration_date: String,
    /// Unique video identifier
    pub id: u32,
    /// Playback URL
    pub playback_url: String,
    /// Title
    pub title: String,
    /// Length class
    #[serde(rename = "type")]
    pub video_type: VideoType,
}

impl Video {
    /// Replace the asset references of this video.
    pub fn with_assets(mut self, assets: Vec<AssetReference>) -> Self {
        self.assets = assets;
        self
    }
}

/// Videos grouped by container id.
pub type VideoMap = HashMap<u32, Vec<Video>>;
