//! Cache manifest for fetched artifacts
//!
//! `artifacts.json` sits beside the cached files and records the
//! SHA-256 digest plus fetch timestamp of every artifact the store has
//! obtained. It is advisory metadata; verification reads the files
//! themselves.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, util};

/// File name of the manifest inside the cache directory
pub const MANIFEST_FILE: &str = "artifacts.json";

/// One fetched artifact's record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Hex SHA-256 digest of the cached file at fetch time
    pub sha256: String,
    /// When the artifact was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Per-cache manifest of fetched artifacts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub entries: BTreeMap<String, ManifestEntry>,
}

impl ArtifactManifest {
    fn path(cache_dir: &Path) -> PathBuf {
        cache_dir.join(MANIFEST_FILE)
    }

    /// Load the manifest from a cache directory, empty if absent.
    pub fn load(cache_dir: &Path) -> Result<Self> {
        let path = Self::path(cache_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| util::artifact_io_error(MANIFEST_FILE, &path, &e))?;
        serde_json::from_str(&content)
            .map_err(|e| util::artifact_unavailable(MANIFEST_FILE, format!("malformed: {e}")))
    }

    /// Persist the manifest into its cache directory.
    pub fn save(&self, cache_dir: &Path) -> Result<()> {
        let path = Self::path(cache_dir);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| util::artifact_unavailable(MANIFEST_FILE, e))?;
        fs::write(&path, content)
            .map_err(|e| util::artifact_io_error(MANIFEST_FILE, &path, &e))
    }

    /// Record a fetch that just completed.
    pub fn record(&mut self, name: &str, sha256: String) {
        self.entries.insert(
            name.to_string(),
            ManifestEntry {
                sha256,
                fetched_at: Utc::now(),
            },
        );
    }
}
