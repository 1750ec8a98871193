// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Split a batch of saved tracks into clusters of similar tracks.
//!
//! The pipeline is strictly linear: features are extracted from the
//! tracks, assembled into a standardized feature space, partitioned by
//! k-means, and the resulting labels are reconciled with the original
//! batch. All remote interaction is delegated to the [`source`] and
//! [`group`] collaborators.

use std::result::Result as StdResult;

use thiserror::Error;

use spotisplit_core::TrackId;

pub mod diagnostics;
pub mod feature;
pub mod group;
pub mod partition;
pub mod pipeline;
pub mod reconcile;
pub mod settings;
pub mod source;

#[cfg(test)]
mod fixtures;

/// Records that must be rejected before any processing starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("track without identifier")]
    EmptyTrackId,

    #[error("duplicate track {0}")]
    DuplicateTrack(TrackId),
}

#[derive(Error, Debug)]
pub enum Error {
    /// None of the tracks provides all required features.
    #[error("no tracks with all required features")]
    EmptyInput,

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("track source unavailable: {0:#}")]
    Source(anyhow::Error),

    #[error("group sink failed: {0:#}")]
    Sink(anyhow::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Settings(#[from] settings::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = StdResult<T, Error>;
