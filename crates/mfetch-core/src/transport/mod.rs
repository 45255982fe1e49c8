//! Network side of the fetcher.
//!
//! [`Transport`] is the seam between the fetch loop and the wire: the loop
//! hands it a URL and a sink, it streams the body into the sink. The real
//! implementation is [`CurlTransport`]; tests substitute counting mocks.

mod easy;

use std::io::{self, Write};
use thiserror::Error;

pub use easy::CurlTransport;

/// Error from a single GET (curl failure, HTTP status, or sink write failure).
/// Kept separate from `FetchError` so retry classification can see the cause.
///
/// Each variant renders its cause inline and reports no further source, so an
/// error chain printed with `{:#}` names the cause once.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection, DNS, truncated body, ...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Final response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The sink rejected a write (disk full, permission denied). Not retried.
    #[error("write failed: {0}")]
    Sink(io::Error),
}

/// Retrieves a remote resource.
pub trait Transport {
    /// GET `url`, following redirects, writing the body into `sink`.
    /// Returns the number of body bytes written. Any non-success final status
    /// is an error; bytes already written to `sink` are then meaningless.
    fn get(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        (**self).get(url, sink)
    }
}
