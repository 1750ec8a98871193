// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, num::NonZeroUsize};

/// Recoverable conditions that have been repaired in-place during a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Tracks without all required features were excluded from clustering.
    MissingFeatureRecords { count: usize },

    /// A feature column without variance was zero-filled.
    ConstantFeatureColumn { column: &'static str },

    /// Fewer rows than requested clusters.
    DegenerateClusterCount {
        requested: NonZeroUsize,
        effective: NonZeroUsize,
    },

    /// The best partitioning did not stabilize within the iteration limit.
    PartitionNonconvergence { iterations: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFeatureRecords { count } => {
                write!(f, "excluded {count} track(s) with missing features")
            }
            Self::ConstantFeatureColumn { column } => {
                write!(f, "constant feature column \"{column}\"")
            }
            Self::DegenerateClusterCount {
                requested,
                effective,
            } => write!(
                f,
                "reduced number of clusters from {requested} to {effective}"
            ),
            Self::PartitionNonconvergence { iterations } => {
                write!(f, "no convergence after {iterations} iteration(s)")
            }
        }
    }
}

/// Collects notices and forwards them to the log.
#[derive(Debug, Default)]
pub struct Diagnostics {
    notices: Vec<Notice>,
}

impl Diagnostics {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            notices: Vec::new(),
        }
    }

    pub fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::ConstantFeatureColumn { .. } => log::debug!("{notice}"),
            Notice::MissingFeatureRecords { .. } => log::info!("{notice}"),
            Notice::DegenerateClusterCount { .. } | Notice::PartitionNonconvergence { .. } => {
                log::warn!("{notice}");
            }
        }
        self.notices.push(notice);
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    #[must_use]
    pub fn into_notices(self) -> Vec<Notice> {
        self.notices
    }
}
