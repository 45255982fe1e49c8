//! Artifact manifest: which files must exist, where they come from, and
//! where they go.
//!
//! The manifest is the single parameter object handed to the fetcher. A
//! built-in default covers the common case; a TOML file can replace it.

mod validate;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

pub use validate::validate_name;

/// Remote prefix of the built-in manifest.
pub const DEFAULT_BASE_URL: &str =
    "https://huggingface.co/roshan-research/hazm-postagger/resolve/main";
/// Local store of the built-in manifest, relative to the working directory.
pub const DEFAULT_TARGET_DIR: &str = "resources";
/// Artifacts of the built-in manifest.
pub const DEFAULT_ARTIFACTS: &[&str] = &["pos_tagger.model"];

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("cannot read manifest {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse manifest")]
    Parse(#[from] toml::de::Error),

    #[error("invalid base URL {url:?}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL {0:?} must be http or https")]
    UnsupportedScheme(String),

    #[error("invalid artifact name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("artifact {0:?} is listed more than once")]
    DuplicateName(String),

    #[error("artifact {name:?} has a malformed sha256 (expected 64 hex characters)")]
    InvalidChecksum { name: String },
}

/// A single named file the local store must hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    /// Expected SHA-256 of the downloaded file, hex in either case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl Artifact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sha256: None,
        }
    }

    pub fn with_sha256(mut self, digest: impl Into<String>) -> Self {
        self.sha256 = Some(digest.into());
        self
    }
}

/// Ordered list of artifacts plus the base location and the local store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub base_url: String,
    pub target_dir: PathBuf,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl Manifest {
    pub fn new<I, S>(base_url: impl Into<String>, target_dir: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_url: base_url.into(),
            target_dir: target_dir.into(),
            artifacts: names.into_iter().map(Artifact::new).collect(),
        }
    }

    /// The hardcoded manifest used when nothing else is configured.
    pub fn builtin() -> Self {
        Self::new(
            DEFAULT_BASE_URL,
            DEFAULT_TARGET_DIR,
            DEFAULT_ARTIFACTS.iter().copied(),
        )
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(s)?)
    }

    /// Read a manifest from a TOML file. Relative `target_dir` values are kept
    /// as written (resolved against the working directory at fetch time).
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let data = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    pub fn with_target_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.target_dir = dir.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Check names, checksums and the base URL before any I/O happens.
    pub fn validate(&self) -> Result<(), ManifestError> {
        validate::validate(self)
    }

    /// `<base_url>/<name>`, with the name percent-encoded as one path segment.
    pub fn remote_url(&self, artifact: &Artifact) -> Result<Url, ManifestError> {
        let mut url = validate::parse_base_url(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| ManifestError::UnsupportedScheme(self.base_url.clone()))?
            .pop_if_empty()
            .push(&artifact.name);
        Ok(url)
    }

    /// `<target_dir>/<name>`.
    pub fn local_path(&self, artifact: &Artifact) -> PathBuf {
        self.target_dir.join(&artifact.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Manifest {
        Manifest::new(
            "https://example.org/models",
            "/tmp/store",
            ["alpha.model", "beta.model"],
        )
    }

    #[test]
    fn remote_url_joins_base_and_name() {
        let m = example();
        let url = m.remote_url(&m.artifacts()[0]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/models/alpha.model");
    }

    #[test]
    fn remote_url_ignores_trailing_slash() {
        let m = example().with_base_url("https://example.org/models/");
        let url = m.remote_url(&m.artifacts()[1]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/models/beta.model");
    }

    #[test]
    fn remote_url_encodes_name_as_one_segment() {
        let m = Manifest::new("https://example.org", "/tmp", ["my model.bin"]);
        let url = m.remote_url(&m.artifacts()[0]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/my%20model.bin");
    }

    #[test]
    fn local_path_is_dir_plus_name() {
        let m = example();
        assert_eq!(
            m.local_path(&m.artifacts()[1]),
            PathBuf::from("/tmp/store/beta.model")
        );
    }

    #[test]
    fn builtin_manifest_is_valid() {
        let m = Manifest::builtin();
        m.validate().unwrap();
        assert_eq!(m.target_dir(), Path::new(DEFAULT_TARGET_DIR));
        assert_eq!(m.len(), DEFAULT_ARTIFACTS.len());
    }

    #[test]
    fn parse_toml_manifest_keeps_order() {
        let toml = r#"
            base_url = "https://example.org/models"
            target_dir = "models"

            [[artifacts]]
            name = "beta.model"

            [[artifacts]]
            name = "alpha.model"
            sha256 = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        "#;
        let m = Manifest::from_toml_str(toml).unwrap();
        let names: Vec<&str> = m.artifacts().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["beta.model", "alpha.model"]);
        assert!(m.artifacts()[0].sha256.is_none());
        assert!(m.artifacts()[1].sha256.is_some());
        m.validate().unwrap();
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = Manifest::load(Path::new("/nonexistent/mfetch/manifest.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/mfetch/manifest.toml"));
    }
}
