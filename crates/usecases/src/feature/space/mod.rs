// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use spotisplit_core::{Track, util::clock::YearType};

use super::{
    AudioDescriptors, Schema,
    extract::{FeatureValue, extract_features},
};
use crate::{
    Error, Result,
    diagnostics::{Diagnostics, Notice},
};

///////////////////////////////////////////////////////////////////////
// FeatureMatrix
///////////////////////////////////////////////////////////////////////

/// Dense, row-major matrix with a fixed number of columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    width: usize,
    values: Vec<FeatureValue>,
}

impl FeatureMatrix {
    #[must_use]
    pub fn with_width(width: usize) -> Self {
        debug_assert!(width > 0);
        Self {
            width,
            values: Vec::new(),
        }
    }

    /// Creates a matrix from rows that all have the same length.
    ///
    /// Returns `None` if the rows differ in length or if there are
    /// no columns.
    #[must_use]
    pub fn from_rows<R>(rows: impl IntoIterator<Item = R>) -> Option<Self>
    where
        R: AsRef<[FeatureValue]>,
    {
        let mut rows = rows.into_iter().peekable();
        let width = rows.peek().map_or(0, |row| row.as_ref().len());
        if width == 0 {
            return None;
        }
        let mut matrix = Self::with_width(width);
        for row in rows {
            if row.as_ref().len() != width {
                return None;
            }
            matrix.values.extend_from_slice(row.as_ref());
        }
        Some(matrix)
    }

    fn push_row(&mut self, row: impl IntoIterator<Item = FeatureValue>) {
        let len_before = self.values.len();
        self.values.extend(row);
        debug_assert_eq!(self.width, self.values.len() - len_before);
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.values.len() / self.width
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn row(&self, index: usize) -> &[FeatureValue] {
        let start = index * self.width;
        &self.values[start..start + self.width]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[FeatureValue]> + '_ {
        self.values.chunks_exact(self.width)
    }

    pub fn column(&self, index: usize) -> impl Iterator<Item = FeatureValue> + '_ {
        debug_assert!(index < self.width);
        self.rows().map(move |row| row[index])
    }
}

///////////////////////////////////////////////////////////////////////
// Standardization
///////////////////////////////////////////////////////////////////////

/// Location and scale of a single column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub mean: FeatureValue,

    /// Population standard deviation
    pub std_dev: FeatureValue,
}

impl ColumnStats {
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.std_dev.is_nan() || self.std_dev <= 0.0
    }

    #[must_use]
    pub fn standardize(&self, value: FeatureValue) -> FeatureValue {
        if self.is_constant() {
            return 0.0;
        }
        (value - self.mean) / self.std_dev
    }
}

#[must_use]
#[allow(clippy::float_cmp)]
fn column_stats(matrix: &FeatureMatrix, column: usize) -> ColumnStats {
    let row_count = matrix.row_count() as FeatureValue;
    let mean = matrix.column(column).sum::<FeatureValue>() / row_count;
    let first = matrix.row(0)[column];
    if matrix.column(column).all(|value| value == first) {
        // Rounding errors must not turn a constant column into noise
        return ColumnStats {
            mean,
            std_dev: 0.0,
        };
    }
    let variance = matrix
        .column(column)
        .map(|value| (value - mean).powi(2))
        .sum::<FeatureValue>()
        / row_count;
    ColumnStats {
        mean,
        std_dev: variance.sqrt(),
    }
}

/// Centers and scales every column to zero mean and unit variance.
///
/// Columns without variance are filled with 0. The matrix must not
/// be empty.
#[must_use]
pub fn standardize(matrix: &FeatureMatrix) -> (FeatureMatrix, Vec<ColumnStats>) {
    debug_assert!(!matrix.is_empty());
    let stats = (0..matrix.width())
        .map(|column| column_stats(matrix, column))
        .collect::<Vec<_>>();
    let mut standardized = FeatureMatrix::with_width(matrix.width());
    for row in matrix.rows() {
        standardized.push_row(
            row.iter()
                .zip(&stats)
                .map(|(value, stats)| stats.standardize(*value)),
        );
    }
    (standardized, stats)
}

///////////////////////////////////////////////////////////////////////
// FeatureSpace
///////////////////////////////////////////////////////////////////////

/// The standardized feature matrix of a batch of tracks.
///
/// Row `i` of both matrices corresponds to the track at position
/// `row_indices()[i]` in the original batch.
#[derive(Debug, Clone)]
pub struct FeatureSpace {
    schema: Schema,
    total_count: usize,
    row_indices: Vec<usize>,
    excluded_indices: Vec<usize>,
    features: FeatureMatrix,
    standardized: FeatureMatrix,
    column_stats: Vec<ColumnStats>,
}

impl FeatureSpace {
    /// Builds the feature space of all tracks with complete features.
    ///
    /// Fails with [`Error::EmptyInput`] if not a single track provides
    /// all required features.
    pub fn build(
        schema: Schema,
        tracks: &[Track],
        descriptors: &AudioDescriptors,
        reference_year: YearType,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self> {
        let interactions = schema.interactions();
        let mut features = FeatureMatrix::with_width(schema.width());
        let mut row_indices = Vec::with_capacity(tracks.len());
        let mut excluded_indices = Vec::new();
        for (index, track) in tracks.iter().enumerate() {
            let vector = extract_features(schema, track, descriptors.get(&track.id), reference_year)?;
            if !vector.is_complete() {
                debug_assert!(schema.excludes_incomplete());
                log::debug!("Excluding track {} with missing features", track.id);
                excluded_indices.push(index);
                continue;
            }
            let primary = vector.as_slice();
            features.push_row(
                primary.iter().copied().chain(
                    interactions
                        .iter()
                        .map(|interaction| primary[interaction.lhs] * primary[interaction.rhs]),
                ),
            );
            row_indices.push(index);
        }
        if !excluded_indices.is_empty() {
            diagnostics.notify(Notice::MissingFeatureRecords {
                count: excluded_indices.len(),
            });
        }
        if features.is_empty() {
            return Err(Error::EmptyInput);
        }
        let (standardized, column_stats) = standardize(&features);
        for (column, stats) in schema.column_names().zip(&column_stats) {
            if stats.is_constant() {
                diagnostics.notify(Notice::ConstantFeatureColumn { column });
            }
        }
        log::debug!(
            "Built feature space with {} row(s) and {} column(s)",
            standardized.row_count(),
            standardized.width()
        );
        Ok(Self {
            schema,
            total_count: tracks.len(),
            row_indices,
            excluded_indices,
            features,
            standardized,
            column_stats,
        })
    }

    #[must_use]
    pub const fn schema(&self) -> Schema {
        self.schema
    }

    /// Number of tracks in the original batch.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Maps matrix rows to positions in the original batch.
    #[must_use]
    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    /// Positions of tracks that have been excluded.
    #[must_use]
    pub fn excluded_indices(&self) -> &[usize] {
        &self.excluded_indices
    }

    /// Unscaled features including interactions.
    #[must_use]
    pub const fn features(&self) -> &FeatureMatrix {
        &self.features
    }

    #[must_use]
    pub const fn standardized(&self) -> &FeatureMatrix {
        &self.standardized
    }

    #[must_use]
    pub fn column_stats(&self) -> &[ColumnStats] {
        &self.column_stats
    }

    /// Unscaled features of a track by its position in the original batch.
    #[must_use]
    pub fn features_of(&self, index: usize) -> Option<&[FeatureValue]> {
        self.row_indices
            .binary_search(&index)
            .ok()
            .map(|row| self.features.row(row))
    }
}

#[cfg(test)]
mod tests;
