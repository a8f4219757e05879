// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Promotional image model.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Promotional image as served by the container API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: u32,
    pub name: String,
    pub url: String,
}

/// Images grouped by container id.
pub type ImageMap = HashMap<u32, Vec<Image>>;
