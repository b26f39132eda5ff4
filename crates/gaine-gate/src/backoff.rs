//! Retry policy for throttled transcription calls
//!
//! Delay computation is a pure function of the attempt number; jitter is
//! added separately so the schedule can be tested without timers.

use crate::config::GateConfig;
use rand::Rng;
use std::time::Duration;

/// Exponential backoff with a cap and additive jitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
    cap: Duration,
    max_jitter: Duration,
}

impl Backoff {
    /// Create a backoff schedule
    pub fn new(base: Duration, cap: Duration, max_jitter: Duration) -> Self {
        Self { base, cap, max_jitter }
    }

    /// Build the schedule from gate configuration
    pub fn from_config(config: &GateConfig) -> Self {
        Self::new(
            Duration::from_millis(config.backoff_base_ms),
            Duration::from_millis(config.backoff_cap_ms),
            Duration::from_millis(config.max_jitter_ms),
        )
    }

    /// `min(base * 2^attempt, cap)`, without jitter
    ///
    /// ```
    /// use gaine_gate::Backoff;
    /// use std::time::Duration;
    ///
    /// let backoff = Backoff::new(Duration::from_secs(1), Duration::from_secs(5), Duration::ZERO);
    /// assert_eq!(backoff.compute_delay(0), Duration::from_secs(1));
    /// assert_eq!(backoff.compute_delay(2), Duration::from_secs(4));
    /// assert_eq!(backoff.compute_delay(3), Duration::from_secs(5));
    /// ```
    pub fn compute_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base.saturating_mul(factor).min(self.cap)
    }

    /// A random jitter in `[0, max_jitter]`
    pub fn jitter(&self) -> Duration {
        let max_ms = self.max_jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
    }

    /// Delay to wait before retry number `attempt` (0-based)
    pub fn delay_with_jitter(&self, attempt: u32) -> Duration {
        self.compute_delay(attempt) + self.jitter()
    }

    /// Upper bound on the jitter
    pub fn max_jitter(&self) -> Duration {
        self.max_jitter
    }
}

/// What to do after a throttled call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait, then try again; `attempt` is the 0-based retry index
    Retry {
        /// Retry index used to compute the delay
        attempt: u32,
    },

    /// Stop and report an empty transcript
    GiveUp,
}

/// Attempt counter with a terminal flag
///
/// ```
/// use gaine_gate::{RetryDecision, RetryState};
///
/// let mut state = RetryState::new(1);
/// assert_eq!(state.on_throttle(), RetryDecision::Retry { attempt: 0 });
/// assert_eq!(state.on_throttle(), RetryDecision::GiveUp);
/// assert!(state.is_terminal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    retries_used: u32,
    max_retries: u32,
    terminal: bool,
}

impl RetryState {
    /// Fresh state allowing `max_retries` retries
    pub fn new(max_retries: u32) -> Self {
        Self {
            retries_used: 0,
            max_retries,
            terminal: false,
        }
    }

    /// Record a throttled call and decide whether to retry
    pub fn on_throttle(&mut self) -> RetryDecision {
        if self.terminal {
            return RetryDecision::GiveUp;
        }
        if self.retries_used < self.max_retries {
            let attempt = self.retries_used;
            self.retries_used += 1;
            RetryDecision::Retry { attempt }
        } else {
            self.terminal = true;
            RetryDecision::GiveUp
        }
    }

    /// Record a non-retryable failure
    pub fn on_failure(&mut self) {
        self.terminal = true;
    }

    /// Number of retries granted so far
    pub fn retries_used(&self) -> u32 {
        self.retries_used
    }

    /// Whether no further attempt will be made
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backoff(base_ms: u64, cap_ms: u64, jitter_ms: u64) -> Backoff {
        Backoff::new(
            Duration::from_millis(base_ms),
            Duration::from_millis(cap_ms),
            Duration::from_millis(jitter_ms),
        )
    }

    #[test]
    fn test_delay_doubles_until_cap() {
        let b = backoff(1_000, 8_000, 0);
        let delays: Vec<u128> = (0..6).map(|a| b.compute_delay(a).as_millis()).collect();
        assert_eq!(delays, vec![1_000, 2_000, 4_000, 8_000, 8_000, 8_000]);
    }

    #[test]
    fn test_huge_attempt_does_not_overflow() {
        let b = backoff(1_000, 8_000, 0);
        assert_eq!(b.compute_delay(u32::MAX), Duration::from_millis(8_000));
    }

    #[test]
    fn test_jitter_bounds() {
        let b = backoff(100, 1_000, 50);
        for attempt in 0..20 {
            let delay = b.delay_with_jitter(attempt % 4);
            let floor = b.compute_delay(attempt % 4);
            assert!(delay >= floor && delay <= floor + Duration::from_millis(50));
        }
        assert_eq!(backoff(100, 1_000, 0).jitter(), Duration::ZERO);
    }

    #[test]
    fn test_retry_state_exhaustion() {
        let mut state = RetryState::new(3);
        assert_eq!(state.on_throttle(), RetryDecision::Retry { attempt: 0 });
        assert_eq!(state.on_throttle(), RetryDecision::Retry { attempt: 1 });
        assert_eq!(state.on_throttle(), RetryDecision::Retry { attempt: 2 });
        assert!(!state.is_terminal());
        assert_eq!(state.on_throttle(), RetryDecision::GiveUp);
        assert!(state.is_terminal());
        assert_eq!(state.retries_used(), 3);
        assert_eq!(state.on_throttle(), RetryDecision::GiveUp);
    }

    #[test]
    fn test_zero_retries() {
        let mut state = RetryState::new(0);
        assert_eq!(state.on_throttle(), RetryDecision::GiveUp);
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut state = RetryState::new(5);
        state.on_failure();
        assert_eq!(state.on_throttle(), RetryDecision::GiveUp);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: delays never decrease and never exceed the cap
        #[test]
        fn test_monotonic_and_capped(base in 1u64..5_000, extra in 0u64..60_000, attempt in 0u32..40) {
            let b = Backoff::new(Duration::from_millis(base), Duration::from_millis(base + extra), Duration::ZERO);
            prop_assert!(b.compute_delay(attempt) <= b.compute_delay(attempt + 1));
            prop_assert!(b.compute_delay(attempt) <= Duration::from_millis(base + extra));
        }
    }
}
