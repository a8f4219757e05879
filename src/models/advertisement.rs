// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Advertisement model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Advertisement as served by the container API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    /// Unique advertisement identifier
    pub id: u32,
    /// Advertisement name
    pub name: String,
    /// Playback URL
    pub url: String,
}

/// Advertisements grouped by container id.
pub type AdvertisementMap = HashMap<u32, Vec<Advertisement>>;
