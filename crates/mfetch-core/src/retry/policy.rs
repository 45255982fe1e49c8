use std::time::Duration;

/// Why a transfer failed, as far as retrying is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Connect, read or low-speed timeout.
    Timeout,
    /// 429 or 503.
    Throttled,
    /// Connection refused or reset, DNS failure, truncated body.
    Connection,
    /// Any other 5xx.
    ServerError,
    /// Client errors, local write failures, everything else.
    Other,
}

impl ErrorKind {
    /// Transient failures worth another attempt.
    pub fn is_transient(self) -> bool {
        !matches!(self, ErrorKind::Other)
    }
}

/// How many times to try one artifact and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Wait after the first failed attempt; doubles after each further one.
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::no_retry()
    }
}

impl RetryPolicy {
    /// One attempt, fail immediately.
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }

    /// Wait before attempt `failed + 1`: `base_delay * 2^(failed - 1)`, capped at `max_delay`.
    pub fn delay_after(&self, failed: u32) -> Duration {
        let doublings = failed.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << doublings)
            .min(self.max_delay)
    }

    /// Delay before the next attempt, or `None` to give up. `failed` counts
    /// attempts made so far (1 after the first failure).
    pub(crate) fn next_delay(&self, failed: u32, kind: ErrorKind) -> Option<Duration> {
        (failed < self.max_attempts && kind.is_transient()).then(|| self.delay_after(failed))
    }
}
