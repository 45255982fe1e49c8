//! Resource fetcher.
//!
//! Makes sure every artifact of a manifest exists in the local store. For each
//! artifact, in manifest order: skip it when a file with its name is already
//! there, otherwise download `<base_url>/<name>` into a `.part` file and
//! rename it into place. The first failure ends the run.
//!
//! Presence by name is the only freshness signal: an existing file is never
//! re-hashed or re-downloaded.

mod event;
mod inspect;

use std::path::Path;

use crate::checksum;
use crate::config::MfetchConfig;
use crate::error::FetchError;
use crate::manifest::{self, Artifact, Manifest};
use crate::retry::{self, RetryPolicy};
use crate::storage::{self, PartFile};
use crate::transport::{CurlTransport, Transport, TransportError};

pub use event::FetchEvent;
pub use inspect::{inspect, ArtifactStatus};

/// What happened to one artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A file was already at the local path; no request was made.
    AlreadyPresent,
    /// Downloaded and moved into place.
    Fetched { bytes: u64 },
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub fetched: usize,
    pub skipped: usize,
    pub bytes: u64,
}

impl FetchSummary {
    pub fn total(&self) -> usize {
        self.fetched + self.skipped
    }
}

pub struct Fetcher<T> {
    transport: T,
    retry: RetryPolicy,
}

impl Fetcher<CurlTransport> {
    /// libcurl transport and retry policy taken from the config file.
    pub fn from_config(cfg: &MfetchConfig) -> Self {
        Fetcher::new(CurlTransport::new(cfg.http.clone())).with_retry(cfg.retry_policy())
    }
}

impl<T: Transport> Fetcher<T> {
    /// Fetcher that attempts every transfer once.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            retry: RetryPolicy::no_retry(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Ensure every artifact in `manifest` is present, reporting progress to
    /// `on_event`. Stops at the first failure; artifacts after it are not
    /// attempted.
    pub fn ensure_all<F>(&self, manifest: &Manifest, mut on_event: F) -> Result<FetchSummary, FetchError>
    where
        F: FnMut(&FetchEvent<'_>),
    {
        manifest.validate()?;
        prepare_dir(manifest.target_dir())?;

        let mut summary = FetchSummary::default();
        for artifact in manifest.artifacts() {
            match self.ensure_artifact(manifest, artifact, &mut on_event)? {
                Outcome::AlreadyPresent => summary.skipped += 1,
                Outcome::Fetched { bytes } => {
                    summary.fetched += 1;
                    summary.bytes += bytes;
                }
            }
        }

        tracing::info!(
            dir = %manifest.target_dir().display(),
            fetched = summary.fetched,
            skipped = summary.skipped,
            bytes = summary.bytes,
            "all artifacts present"
        );
        Ok(summary)
    }

    /// Ensure a single artifact of `manifest` is present.
    pub fn ensure_one(&self, manifest: &Manifest, artifact: &Artifact) -> Result<Outcome, FetchError> {
        manifest::validate_name(&artifact.name)?;
        prepare_dir(manifest.target_dir())?;
        self.ensure_artifact(manifest, artifact, &mut |_: &FetchEvent<'_>| {})
    }

    fn ensure_artifact(
        &self,
        manifest: &Manifest,
        artifact: &Artifact,
        on_event: &mut dyn FnMut(&FetchEvent<'_>),
    ) -> Result<Outcome, FetchError> {
        let name = artifact.name.as_str();
        let path = manifest.local_path(artifact);
        if storage::is_present(&path) {
            tracing::debug!(name, path = %path.display(), "already present");
            on_event(&FetchEvent::Skipped { name, path: &path });
            return Ok(Outcome::AlreadyPresent);
        }

        let url = manifest.remote_url(artifact)?;
        tracing::info!(name, url = %url, "fetching");
        on_event(&FetchEvent::Fetching {
            name,
            url: url.as_str(),
        });

        match self.download(artifact, url.as_str(), &path) {
            Ok(bytes) => {
                on_event(&FetchEvent::Fetched {
                    name,
                    path: &path,
                    bytes,
                });
                Ok(Outcome::Fetched { bytes })
            }
            Err(error) => {
                tracing::error!(name, url = %url, "fetch failed: {}", error);
                on_event(&FetchEvent::Failed { name, error: &error });
                Err(error)
            }
        }
    }

    /// GET `url` into `<path>.part`, verify, rename onto `path`.
    /// Any early return drops the part file, which deletes it.
    fn download(&self, artifact: &Artifact, url: &str, path: &Path) -> Result<u64, FetchError> {
        let storage_err = |source| FetchError::Storage {
            name: artifact.name.clone(),
            path: path.to_path_buf(),
            source,
        };

        let mut part = PartFile::create(path).map_err(storage_err)?;
        let bytes = retry::run_with_retry(&self.retry, |attempt| {
            if attempt > 1 {
                part.reset().map_err(TransportError::Sink)?;
            }
            self.transport.get(url, part.writer())
        })
        .map_err(|e| match e {
            TransportError::Sink(source) => storage_err(source),
            source => FetchError::Transport {
                name: artifact.name.clone(),
                url: url.to_string(),
                source,
            },
        })?;

        if let Some(expected) = &artifact.sha256 {
            part.sync().map_err(storage_err)?;
            let actual = checksum::sha256_path(part.temp_path()).map_err(storage_err)?;
            if !checksum::digest_matches(expected, &actual) {
                return Err(FetchError::Checksum {
                    name: artifact.name.clone(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        part.commit().map_err(storage_err)?;
        Ok(bytes)
    }
}

fn prepare_dir(dir: &Path) -> Result<(), FetchError> {
    storage::ensure_dir(dir).map_err(|source| FetchError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
