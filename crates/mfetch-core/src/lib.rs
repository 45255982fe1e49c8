pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod fetcher;
pub mod manifest;
pub mod retry;
pub mod storage;
pub mod transport;

pub use error::FetchError;
pub use fetcher::{FetchEvent, FetchSummary, Fetcher, Outcome};
pub use manifest::{Artifact, Manifest};
