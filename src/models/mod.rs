// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Domain models served by the container API.

pub mod advertisement;
pub mod asset;
pub mod container;
pub mod image;
pub mod video;

pub use advertisement::{Advertisement, AdvertisementMap};
pub use asset::{AssetType, VideoType};
pub use container::Container;
pub use image::{Image, ImageMap};
pub use video::{AssetReference, Video, VideoMap};
