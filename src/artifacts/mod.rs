//! Startup artifact retrieval and caching
//!
//! The pipeline needs three artifacts before it can serve anything: the
//! trained model, its feature schema, and the background distribution
//! for attribution baselining. The store fetches them through an
//! `ArtifactSource` into a local cache directory, skipping any fetch
//! for which a cached copy already exists. Every load failure is
//! `ArtifactUnavailable` and fatal; there is no degraded scoring path.

pub mod demo;
pub mod loader;
pub mod manifest;

pub use loader::load_model_context;
pub use manifest::{ArtifactManifest, ManifestEntry};

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rustc_hash::FxHashMap;
use sha2::{Digest, Sha256};

use crate::error::{Result, util};
use crate::utils::progress::create_spinner;

/// Standard artifact file names
pub mod names {
    /// Serialized model specification
    pub const MODEL: &str = "sepera_model.json";
    /// Ordered feature schema the model was fit on
    pub const SCHEMA: &str = "feature_schema.json";
    /// Background distribution for attribution baselining
    pub const BACKGROUND: &str = "background.json";
}

/// External transport supplying artifacts by name
pub trait ArtifactSource {
    /// Fetch one artifact into `dest`. Called only when the cache has
    /// no usable copy.
    fn fetch(&self, name: &str, dest: &Path) -> Result<()>;
}

/// Source copying artifacts from a local directory
#[derive(Debug, Clone)]
pub struct LocalDirSource {
    root: PathBuf,
}

impl LocalDirSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArtifactSource for LocalDirSource {
    fn fetch(&self, name: &str, dest: &Path) -> Result<()> {
        let src = self.root.join(name);
        if !src.is_file() {
            return Err(util::artifact_unavailable(
                name,
                format!("not found in source directory {}", self.root.display()),
            ));
        }
        fs::copy(&src, dest)
            .map_err(|e| util::artifact_io_error(name, &src, &e))?;
        Ok(())
    }
}

/// Configuration for the artifact store
#[derive(Debug, Clone)]
pub struct ArtifactStoreConfig {
    /// Directory cached artifacts live in
    pub cache_dir: PathBuf,
    /// Verify cached files against pinned checksums before use
    pub verify_checksums: bool,
    /// Show a fetch spinner on the terminal
    pub show_progress: bool,
}

impl ArtifactStoreConfig {
    #[must_use]
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            verify_checksums: true,
            show_progress: true,
        }
    }
}

/// Idempotent artifact cache in front of an `ArtifactSource`
pub struct ArtifactStore<S: ArtifactSource> {
    config: ArtifactStoreConfig,
    source: S,
    /// Pinned hex SHA-256 digests by artifact name
    pinned: FxHashMap<String, String>,
}

impl<S: ArtifactSource> ArtifactStore<S> {
    pub fn new(config: ArtifactStoreConfig, source: S) -> Result<Self> {
        fs::create_dir_all(&config.cache_dir)
            .map_err(|e| util::artifact_io_error("cache", &config.cache_dir, &e))?;
        Ok(Self {
            config,
            source,
            pinned: FxHashMap::default(),
        })
    }

    /// Pin the expected checksum of one artifact. A cached or fetched
    /// copy that does not match is rejected.
    #[must_use]
    pub fn pin_checksum(mut self, name: &str, digest_hex: &str) -> Self {
        self.pinned
            .insert(name.to_string(), digest_hex.to_lowercase());
        self
    }

    fn cached_path(&self, name: &str) -> PathBuf {
        self.config.cache_dir.join(name)
    }

    fn checksum_ok(&self, name: &str, path: &Path) -> Result<bool> {
        match self.pinned.get(name) {
            Some(expected) => Ok(sha256_file(name, path)? == *expected),
            None => Ok(true),
        }
    }

    fn fetch_with_progress(&self, name: &str, dest: &Path) -> Result<()> {
        let spinner = self
            .config
            .show_progress
            .then(|| create_spinner(&format!("Downloading {name}... this may take awhile!")));
        let result = self.source.fetch(name, dest);
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        result
    }

    /// Ensure one artifact is cached and verified, returning its path.
    ///
    /// A valid cached copy short-circuits the fetch. A cached copy
    /// failing checksum verification is discarded and re-fetched once;
    /// a persistent mismatch is `ArtifactUnavailable`.
    pub fn ensure_cached(&self, name: &str) -> Result<PathBuf> {
        let path = self.cached_path(name);

        if path.is_file() {
            if !self.config.verify_checksums || self.checksum_ok(name, &path)? {
                info!("artifact '{name}' already cached, skipping fetch");
                return Ok(path);
            }
            warn!("cached artifact '{name}' failed checksum verification, re-fetching");
            fs::remove_file(&path).map_err(|e| util::artifact_io_error(name, &path, &e))?;
        }

        self.fetch_with_progress(name, &path)?;
        let digest = sha256_file(name, &path)?;
        if self.config.verify_checksums
            && self.pinned.get(name).is_some_and(|expected| *expected != digest)
        {
            fs::remove_file(&path).ok();
            return Err(util::artifact_unavailable(
                name,
                format!("checksum mismatch after fetch (got {digest})"),
            ));
        }

        let mut manifest = ArtifactManifest::load(&self.config.cache_dir)?;
        manifest.record(name, digest);
        manifest.save(&self.config.cache_dir)?;
        info!("artifact '{name}' fetched into {}", path.display());
        Ok(path)
    }

    /// Ensure an artifact is cached and read it fully into memory.
    pub fn load_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.ensure_cached(name)?;
        fs::read(&path).map_err(|e| util::artifact_io_error(name, &path, &e))
    }

    /// Ensure an artifact is cached and deserialize it from JSON.
    pub fn load_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T> {
        let bytes = self.load_bytes(name)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| util::artifact_unavailable(name, format!("malformed JSON: {e}")))
    }
}

/// Hex SHA-256 digest of a file's contents.
pub fn sha256_file(name: &str, path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| util::artifact_io_error(name, path, &e))?;
    Ok(sha256_hex(&bytes))
}

/// Hex SHA-256 digest of a byte slice.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
