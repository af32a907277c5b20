//! Retry timing helpers for catalog lookups.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Async sleeping abstraction so retry delays can be observed in tests.
#[async_trait]
pub trait LookupSleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Retry backoff jitter abstraction.
pub trait BackoffJitter: Send + Sync {
    /// Return a jittered delay derived from the exponential base delay.
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use merchant_events::domain::events::reconciler::BackoffJitter;
    /// use std::time::Duration;
    ///
    /// struct FixedOffset;
    /// impl BackoffJitter for FixedOffset {
    ///     fn jittered_delay(&self, base: Duration, attempt: u32, _now: chrono::DateTime<Utc>) -> Duration {
    ///         base + Duration::from_millis(u64::from(attempt))
    ///     }
    /// }
    /// let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).single().expect("valid time");
    /// assert_eq!(
    ///     FixedOffset.jittered_delay(Duration::from_millis(100), 2, now),
    ///     Duration::from_millis(102)
    /// );
    /// ```
    fn jittered_delay(&self, base: Duration, attempt: u32, now: DateTime<Utc>) -> Duration;
}

/// Runtime helpers used by the retry loop.
#[derive(Clone)]
pub struct ReconcilerRuntime {
    pub sleeper: Arc<dyn LookupSleeper>,
    pub jitter: Arc<dyn BackoffJitter>,
}

impl Default for ReconcilerRuntime {
    fn default() -> Self {
        Self {
            sleeper: Arc::new(TokioSleeper),
            jitter: Arc::new(AttemptJitter),
        }
    }
}

/// Tokio-based sleeper.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl LookupSleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Adds up to a quarter of the base delay, seeded from the clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttemptJitter;

impl BackoffJitter for AttemptJitter {
    fn jittered_delay(&self, base: Duration, attempt: u32, now: DateTime<Utc>) -> Duration {
        let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
        let max_extra = (base_ms / 4).max(1);
        let seed = u64::from(now.timestamp_subsec_nanos()) ^ u64::from(attempt);
        Duration::from_millis(base_ms.saturating_add(seed % max_extra.saturating_add(1)))
    }
}

/// Exponential delay before retry `attempt + 1`, capped at `max`.
pub(super) fn backoff_delay(initial: Duration, max: Duration, attempt: u32) -> Duration {
    let factor = 2_u64.saturating_pow(attempt.saturating_sub(1));
    let initial_ms = u64::try_from(initial.as_millis()).unwrap_or(u64::MAX);
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(initial_ms.saturating_mul(factor).min(max_ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case(1, 100)]
    #[case(2, 200)]
    #[case(3, 400)]
    #[case(6, 1_000)]
    fn backoff_doubles_until_capped(#[case] attempt: u32, #[case] expected_ms: u64) {
        let delay = backoff_delay(Duration::from_millis(100), Duration::from_secs(1), attempt);
        assert_eq!(delay, Duration::from_millis(expected_ms));
    }

    #[test]
    fn jitter_stays_within_a_quarter_of_base() {
        let now = Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
            .single()
            .expect("valid time")
            + chrono::TimeDelta::nanoseconds(987_654_321);
        let base = Duration::from_millis(200);
        let delay = AttemptJitter.jittered_delay(base, 2, now);
        assert!(delay >= base);
        assert!(delay <= base + Duration::from_millis(50));
    }
}
