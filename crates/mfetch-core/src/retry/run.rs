//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::policy::RetryPolicy;
use crate::transport::TransportError;

/// Runs `f` until it succeeds or the retry policy says to stop.
/// `f` receives the 1-based attempt number. On retryable failure, sleeps for
/// the backoff duration then tries again.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, TransportError>
where
    F: FnMut(u32) -> Result<T, TransportError>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                let Some(d) = policy.next_delay(attempt, kind) else {
                    return Err(e);
                };
                tracing::warn!(attempt, ?kind, "transfer failed ({}), retrying in {:?}", e, d);
                std::thread::sleep(d);
                attempt += 1;
            }
        }
    }
}
