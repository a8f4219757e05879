// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Asset and video classifications shared by upstream DTOs and domain models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of asset an [`AssetReference`](super::AssetReference) points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetType {
    /// Advertisement asset.
    Ad,
    /// Promotional image asset.
    Image,
}

impl AssetType {
    /// Wire name, as used in JSON bodies and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Ad => "AD",
            AssetType::Image => "IMAGE",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length class of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VideoType {
    /// A short clip.
    Clip,
    /// A TV length episode.
    Episode,
    /// A full length movie.
    Movie,
}

impl VideoType {
    /// Wire name, as used in JSON bodies and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoType::Clip => "CLIP",
            VideoType::Episode => "EPISODE",
            VideoType::Movie => "MOVIE",
        }
    }
}

impl fmt::Display for VideoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoType {
    type Err = String;

    /// Case-insensitive, so `?type=movie` works as well as `?type=MOVIE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CLIP" => Ok(VideoType::Clip),
            "EPISODE" => Ok(VideoType::Episode),
            "MOVIE" => Ok(VideoType::Movie),
            other => Err(format!("Unknown video type: {}", other)),
        }
    }
}
