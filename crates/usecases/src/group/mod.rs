// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Turning clusters into named playlists.

use std::num::NonZeroUsize;

use jiff::Zoned;
use static_assertions::const_assert_eq;

use spotisplit_core::{
    Track,
    cluster::{Assignment, Label},
};

use crate::{Error, Result, feature::Schema};

pub mod summary;

pub const DEFAULT_NAME_PREFIX: &str = "SpotiSplit";

/// Upper limit for the number of items that are added at once.
pub const MAX_BATCH_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(99);

const_assert_eq!(100, MAX_BATCH_SIZE.get());

const SOURCE_NAME: &str = "Liked Songs";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub name_prefix: String,
    pub schema: Schema,
    pub public: bool,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name_prefix: DEFAULT_NAME_PREFIX.to_owned(),
            schema: Schema::default(),
            public: false,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

/// The tracks of a single cluster, ready to be stored as a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub label: Label,
    pub name: String,
    pub description: String,
    pub public: bool,

    /// Playable URIs in the order of the original tracks
    pub uris: Vec<String>,
}

fn source_name(schema: Schema) -> String {
    match schema {
        Schema::Audio => SOURCE_NAME.to_owned(),
        Schema::Metadata => format!("{SOURCE_NAME} (No Audio)"),
    }
}

#[must_use]
pub fn group_name(
    prefix: &str,
    schema: Schema,
    label: Label,
    cluster_count: NonZeroUsize,
) -> String {
    format!(
        "{prefix}: {source} · Cluster {label} / {cluster_count}",
        source = source_name(schema),
    )
}

#[must_use]
pub fn group_description(schema: Schema, created_at: &Zoned) -> String {
    let timestamp = created_at.strftime(TIMESTAMP_FORMAT);
    let mut description =
        format!("Created by {DEFAULT_NAME_PREFIX} {timestamp}. Source: {SOURCE_NAME}");
    if schema == Schema::Metadata {
        description.push_str(" (without audio features)");
    }
    description
}

/// Collects the groups of all clusters in ascending order.
///
/// Excluded tracks and tracks without a URI are skipped.
#[must_use]
pub fn build_groups(
    tracks: &[Track],
    assignment: &Assignment,
    params: &Params,
    created_at: &Zoned,
) -> Vec<Group> {
    debug_assert_eq!(tracks.len(), assignment.len());
    let Params {
        name_prefix,
        schema,
        public,
    } = params;
    let cluster_count = assignment.cluster_count();
    let description = group_description(*schema, created_at);
    (0..cluster_count.get())
        .map(Label::from_index)
        .map(|label| {
            let uris = tracks
                .iter()
                .zip(assignment.iter())
                .filter(|(_, (_, track_label))| *track_label == label)
                .filter_map(|(track, _)| track.uri.clone())
                .collect::<Vec<_>>();
            Group {
                label,
                name: group_name(name_prefix, *schema, label, cluster_count),
                description: description.clone(),
                public: *public,
                uris,
            }
        })
        .collect()
}

/// Identifier of a playlist as assigned by the streaming service.
pub type GroupId = String;

/// Stores groups remotely.
pub trait GroupSink {
    fn create_group(
        &mut self,
        name: &str,
        description: &str,
        public: bool,
    ) -> anyhow::Result<GroupId>;

    /// Appends items to an existing group.
    ///
    /// Never invoked with more than [`MAX_BATCH_SIZE`] items.
    fn add_items(&mut self, group_id: &GroupId, uris: &[String]) -> anyhow::Result<()>;
}

/// Creates and fills a playlist for each group.
///
/// Returns the identifiers of the created playlists in the order of
/// `groups`. Stops at the first failure.
pub fn store_groups<S>(sink: &mut S, groups: &[Group]) -> Result<Vec<(Label, GroupId)>>
where
    S: GroupSink + ?Sized,
{
    let mut created = Vec::with_capacity(groups.len());
    for group in groups {
        let group_id = sink
            .create_group(&group.name, &group.description, group.public)
            .map_err(Error::Sink)?;
        for batch in group.uris.chunks(MAX_BATCH_SIZE.get()) {
            sink.add_items(&group_id, batch).map_err(Error::Sink)?;
        }
        log::info!("{}: added {} track(s)", group.name, group.uris.len());
        created.push((group.label, group_id));
    }
    Ok(created)
}

/// An existing playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub id: GroupId,
    pub name: String,
}

/// Selects playlists that contain the prefix in their name, ignoring case.
#[must_use]
pub fn select_for_cleanup<'a>(existing: &'a [GroupInfo], prefix: &str) -> Vec<&'a GroupInfo> {
    let prefix = prefix.to_lowercase();
    existing
        .iter()
        .filter(|group| group.name.to_lowercase().contains(&prefix))
        .collect()
}
