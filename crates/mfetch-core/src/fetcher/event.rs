use std::fmt;
use std::path::Path;

use crate::error::FetchError;

/// Progress notification, one per artifact state change.
/// `Display` renders the operator-facing line.
#[derive(Debug)]
pub enum FetchEvent<'a> {
    Skipped { name: &'a str, path: &'a Path },
    Fetching { name: &'a str, url: &'a str },
    Fetched { name: &'a str, path: &'a Path, bytes: u64 },
    Failed { name: &'a str, error: &'a FetchError },
}

impl FetchEvent<'_> {
    pub fn name(&self) -> &str {
        match self {
            FetchEvent::Skipped { name, .. }
            | FetchEvent::Fetching { name, .. }
            | FetchEvent::Fetched { name, .. }
            | FetchEvent::Failed { name, .. } => name,
        }
    }
}

impl fmt::Display for FetchEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchEvent::Skipped { name, .. } => write!(f, "{} already present, skipping", name),
            FetchEvent::Fetching { name, url } => write!(f, "fetching {} from {}", name, url),
            FetchEvent::Fetched { name, bytes, .. } => {
                write!(f, "fetched {} ({} bytes)", name, bytes)
            }
            FetchEvent::Failed { name, error } => write!(f, "{} failed: {}", name, error),
        }
    }
}
