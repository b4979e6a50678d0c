//! The editor-authored base document and the payload published from it.

use crate::sections::{CollectionDescriptor, CollectionSection, CulturePost, ProjectDescriptor, ProjectSection};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Homepage configuration as saved by the editor. Only the descriptor lists
/// are interpreted; every other field is carried through to the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeDocument {
    #[serde(default)]
    pub curated_collections: Vec<CollectionDescriptor>,
    #[serde(default)]
    pub apps_we_love: Vec<ProjectDescriptor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HomeDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read home document: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse home document: {}", path.display()))
    }
}

/// Built sections, one key per section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeData {
    pub culture_zine: Vec<CulturePost>,
    pub curated_collections: Vec<CollectionSection>,
    pub apps_we_love: Vec<ProjectSection>,
}

/// The base document with a `data` object of built sections next to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedPayload {
    #[serde(flatten)]
    pub document: HomeDocument,
    pub data: HomeData,
}

impl AggregatedPayload {
    pub fn new(mut document: HomeDocument, data: HomeData) -> Self {
        // A stale `data` from a previous build would otherwise be emitted twice.
        document.extra.remove("data");
        Self { document, data }
    }

    /// Write the payload as JSON, replacing `path` only once the new file is
    /// fully written.
    pub fn publish(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        }
        let json = serde_json::to_vec_pretty(self).context("Failed to serialize homepage payload")?;

        let tmp = staging_path(path);
        std::fs::write(&tmp, json)
            .with_context(|| format!("Failed to write payload: {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move payload into place: {}", path.display()))?;
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
