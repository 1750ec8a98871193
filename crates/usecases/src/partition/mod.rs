// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroUsize;

use static_assertions::const_assert_eq;

use spotisplit_core::cluster::Quality;

use crate::{
    Error, Result,
    diagnostics::{Diagnostics, Notice},
    feature::{extract::FeatureValue, space::FeatureMatrix},
};

mod kmeans;

pub mod silhouette;

pub const DEFAULT_SEED: u64 = 42;

pub const DEFAULT_RESTARTS: NonZeroUsize = NonZeroUsize::MIN.saturating_add(9);

const_assert_eq!(10, DEFAULT_RESTARTS.get());

pub const DEFAULT_MAX_ITERATIONS: NonZeroUsize = NonZeroUsize::MIN.saturating_add(299);

const_assert_eq!(300, DEFAULT_MAX_ITERATIONS.get());

pub const DEFAULT_TOLERANCE: FeatureValue = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Seed of the first run, incremented for every restart
    pub seed: u64,

    /// Number of independently seeded runs
    pub restarts: NonZeroUsize,

    /// Iteration limit per run
    pub max_iterations: NonZeroUsize,

    /// Relative tolerance for the movement of centroids
    pub tolerance: FeatureValue,
}

impl Params {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seed: DEFAULT_SEED,
            restarts: DEFAULT_RESTARTS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

/// Never more clusters than rows.
#[must_use]
pub fn effective_cluster_count(requested: NonZeroUsize, row_count: usize) -> Option<NonZeroUsize> {
    NonZeroUsize::new(requested.get().min(row_count))
}

/// Labels for every row of the partitioned matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Partitioning {
    /// The cluster index per row in `[0, cluster_count)`
    pub labels: Vec<usize>,

    /// Sum of squared distances from the centroids
    pub inertia: FeatureValue,

    /// Iterations of the retained run
    pub iterations: usize,

    /// `false` if the retained run hit the iteration limit
    pub converged: bool,

    pub quality: Quality,
}

impl Partitioning {
    #[must_use]
    pub const fn cluster_count(&self) -> NonZeroUsize {
        self.quality.cluster_count
    }
}

/// Partitions the rows of a standardized matrix into clusters.
///
/// Runs k-means once per restart with consecutive seeds and retains
/// the run with the lowest inertia. The first run wins ties.
pub fn partition(
    matrix: &FeatureMatrix,
    requested_cluster_count: NonZeroUsize,
    params: &Params,
    diagnostics: &mut Diagnostics,
) -> Result<Partitioning> {
    let row_count = matrix.row_count();
    let Some(cluster_count) = effective_cluster_count(requested_cluster_count, row_count) else {
        return Err(Error::EmptyInput);
    };
    if cluster_count < requested_cluster_count {
        diagnostics.notify(Notice::DegenerateClusterCount {
            requested: requested_cluster_count,
            effective: cluster_count,
        });
    }
    let Params {
        seed,
        restarts,
        max_iterations,
        tolerance,
    } = *params;
    let mut best: Option<kmeans::Run> = None;
    for restart in 0..restarts.get() {
        let run = kmeans::run(
            matrix,
            cluster_count.get(),
            seed.wrapping_add(restart as u64),
            max_iterations.get(),
            tolerance,
        );
        log::debug!(
            "k-means run #{restart} finished after {iterations} iteration(s) with inertia {inertia}",
            iterations = run.iterations,
            inertia = run.inertia,
        );
        if best.as_ref().is_none_or(|best| run.inertia < best.inertia) {
            best = Some(run);
        }
    }
    let Some(kmeans::Run {
        labels,
        inertia,
        iterations,
        converged,
    }) = best
    else {
        // At least one restart is guaranteed
        return Err(Error::EmptyInput);
    };
    if !converged {
        diagnostics.notify(Notice::PartitionNonconvergence { iterations });
    }
    let silhouette = if cluster_count.get() > 1 {
        silhouette::silhouette_score(matrix, &labels, cluster_count.get())
    } else {
        None
    };
    let quality = Quality {
        cluster_count,
        silhouette,
    };
    log::info!("Partitioned {row_count} track(s) into {quality}");
    Ok(Partitioning {
        labels,
        inertia,
        iterations,
        converged,
        quality,
    })
}

#[cfg(test)]
mod tests;
