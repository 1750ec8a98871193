// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use spotisplit_core::util::clock::YearType;

use crate::{
    feature::{Schema, extract::DEFAULT_REFERENCE_YEAR},
    group::{self, DEFAULT_NAME_PREFIX},
    partition::{self, DEFAULT_SEED},
    pipeline::{self, DEFAULT_CLUSTER_COUNT},
};

pub const FILE_NAME: &str = "spotisplit_settings";

pub const FILE_SUFFIX: &str = "ron";

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/callback";

const SCOPES: [&str; 5] = [
    "playlist-read-private",
    "playlist-read-collaborative",
    "playlist-modify-private",
    "user-library-read",
    "user-read-private",
];

const PUBLIC_SCOPE: &str = "playlist-modify-public";

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Deserialize(#[from] ron::error::SpannedError),

    #[error(transparent)]
    Serialize(#[from] ron::Error),

    #[error("empty playlist name prefix")]
    EmptyNamePrefix,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Credentials for authorizing against the streaming service.
///
/// Only passed through to the authorization collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The requested number of clusters.
    ///
    /// Might be reduced for a particular run, but is never modified.
    pub n_clusters: NonZeroUsize,

    pub random_state: u64,

    pub make_public: bool,

    pub playlist_name_prefix: String,

    pub schema: Schema,

    pub reference_year: YearType,

    pub session: SessionConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            n_clusters: DEFAULT_CLUSTER_COUNT,
            random_state: DEFAULT_SEED,
            make_public: false,
            playlist_name_prefix: DEFAULT_NAME_PREFIX.to_owned(),
            schema: Schema::default(),
            reference_year: DEFAULT_REFERENCE_YEAR,
            session: SessionConfig::default(),
        }
    }
}

impl Settings {
    /// Loads the settings from the parent directory.
    ///
    /// Falls back to the defaults if the file does not exist.
    pub fn load(parent_dir: &Path) -> Result<Self> {
        let file_path = new_settings_file_path(parent_dir.to_path_buf());
        log::info!("Loading settings from file: {}", file_path.display());
        let settings: Self = match fs::read(&file_path) {
            Ok(bytes) => ron::de::from_bytes(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => return Err(err.into()),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, parent_dir: &Path) -> Result<()> {
        self.validate()?;
        let file_path = new_settings_file_path(parent_dir.to_path_buf());
        log::info!("Saving settings into file: {}", file_path.display());
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        if let Some(parent_path) = file_path.parent() {
            fs::create_dir_all(parent_path)?;
        }
        fs::write(&file_path, text)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.playlist_name_prefix.trim().is_empty() {
            return Err(Error::EmptyNamePrefix);
        }
        Ok(())
    }

    /// Authorization scopes that are required for reading saved tracks
    /// and creating playlists.
    #[must_use]
    pub fn scopes(&self) -> Vec<&'static str> {
        let mut scopes = SCOPES.to_vec();
        if self.make_public {
            scopes.push(PUBLIC_SCOPE);
        }
        scopes
    }

    #[must_use]
    pub fn pipeline_params(&self) -> pipeline::Params {
        pipeline::Params {
            schema: self.schema,
            requested_cluster_count: self.n_clusters,
            reference_year: self.reference_year,
            partition: partition::Params::with_seed(self.random_state),
        }
    }

    #[must_use]
    pub fn group_params(&self) -> group::Params {
        group::Params {
            name_prefix: self.playlist_name_prefix.clone(),
            schema: self.schema,
            public: self.make_public,
        }
    }
}

#[must_use]
fn new_settings_file_path(parent_dir: PathBuf) -> PathBuf {
    let mut path_buf = parent_dir;
    path_buf.push(FILE_NAME);
    path_buf.set_extension(FILE_SUFFIX);
    path_buf
}
