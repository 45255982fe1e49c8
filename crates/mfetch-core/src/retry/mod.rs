//! Retry and backoff policy.
//!
//! Classifies transport failures (timeouts, throttling, connection errors)
//! and decides whether and when to try again. The default policy makes a
//! single attempt; retries only happen when configured.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryPolicy};
pub use run::run_with_retry;
