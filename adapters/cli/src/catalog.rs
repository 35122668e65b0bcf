//! Level catalog manifest consumed by the `--catalog` flag.
//!
//! The manifest is a TOML file listing levels in play order. Paths are
//! resolved relative to the manifest's own directory, so a catalog can ship
//! alongside its level files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Ordered list of levels for one play-through.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct Catalog {
    /// Levels in the order they are played.
    pub levels: Vec<LevelEntry>,
}

/// One catalog entry naming a level file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub(crate) struct LevelEntry {
    /// Display name announced when the level starts.
    pub name: String,
    /// Level file location, relative to the manifest.
    pub path: PathBuf,
}

impl Catalog {
    /// Reads and parses a manifest, resolving level paths against it.
    pub(crate) fn load(manifest: &Path) -> Result<Self> {
        let text = fs::read_to_string(manifest)
            .with_context(|| format!("failed to read level catalog {}", manifest.display()))?;
        let mut catalog: Catalog = toml::from_str(&text)
            .with_context(|| format!("failed to parse level catalog {}", manifest.display()))?;

        let base = manifest.parent().unwrap_or_else(|| Path::new("."));
        for entry in &mut catalog.levels {
            entry.path = base.join(&entry.path);
        }
        Ok(catalog)
    }
}
