//! Error types surfaced by the fetcher.
//!
//! Every variant that concerns a single artifact carries its name so the
//! operator can see which file stopped the run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::manifest::ManifestError;
use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid manifest")]
    Manifest(#[from] ManifestError),

    #[error("cannot create directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to fetch {name} from {url}")]
    Transport {
        name: String,
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("failed to store {name} at {}", path.display())]
    Storage {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("checksum mismatch for {name}: expected {expected}, got {actual}")]
    Checksum {
        name: String,
        expected: String,
        actual: String,
    },
}

impl FetchError {
    /// Name of the artifact this error is about, if any.
    pub fn artifact(&self) -> Option<&str> {
        match self {
            FetchError::Transport { name, .. }
            | FetchError::Storage { name, .. }
            | FetchError::Checksum { name, .. } => Some(name),
            FetchError::Manifest(_) | FetchError::CreateDir { .. } => None,
        }
    }
}
