// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Serde mapping of the objects returned by the streaming service's web API.
//!
//! Only the fields that are needed for clustering are mapped, all
//! other fields are ignored.

pub mod prelude {
    pub(crate) use serde::{Deserialize, Serialize};
}

pub mod audio;
pub mod track;

use crate::prelude::*;

/// A single page of a paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,

    /// URL of the next page, if any
    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub total: Option<u32>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}
