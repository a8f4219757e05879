// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod advertisement;
pub mod container;
pub mod image;
pub mod video;

pub use advertisement::AdvertisementService;
pub use container::ContainerService;
pub use image::ImageService;
pub use video::VideoService;

use std::collections::HashMap;
use std::hash::Hash;

/// Group `(key, value)` pairs by key, keeping input order within each group.
pub fn group<I, K, V>(iter: I) -> HashMap<K, Vec<V>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Eq + Hash,
{
    let mut groups: HashMap<K, Vec<V>> = HashMap::new();
    for (key, value) in iter {
        groups.entry(key).or_default().push(value);
    }
    groups
}
