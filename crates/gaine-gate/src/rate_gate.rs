//! Minimum-spacing gate in front of the transcription service

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Permission to make exactly one transcription call
///
/// Slots are neither `Clone` nor `Copy`; each call acquires its own.
#[derive(Debug)]
pub struct Slot {
    granted_at: Instant,
}

impl Slot {
    /// When the gate granted this slot
    pub fn granted_at(&self) -> Instant {
        self.granted_at
    }
}

/// Serialises and paces access to a quota-limited resource
///
/// Holds a single `last_granted_at` timestamp. Acquisition is mutually
/// exclusive and first-come first-served: a caller computes
/// `max(0, min_interval - (now - last_granted_at))`, sleeps that long while
/// holding the lock, then records the grant time. Share one gate (behind an
/// `Arc`) between every caller of the same resource.
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    last_granted_at: Mutex<Option<Instant>>,
}

impl RateGate {
    /// Create a gate enforcing `min_interval` between grants
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_granted_at: Mutex::new(None),
        }
    }

    /// Minimum spacing between grants
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait for the next slot
    ///
    /// The wait cannot be interrupted early; a caller that loses interest
    /// should drop the result.
    pub async fn acquire(&self) -> Slot {
        let mut last = self.last_granted_at.lock().await;

        if let Some(previous) = *last {
            let elapsed = Instant::now().saturating_duration_since(previous);
            let wait = self.min_interval.saturating_sub(elapsed);
            if !wait.is_zero() {
                debug!("Rate gate waiting {:?} before next slot", wait);
                sleep(wait).await;
            }
        }

        let granted_at = Instant::now();
        *last = Some(granted_at);
        Slot { granted_at }
    }

    /// Time of the most recent grant, if any
    pub async fn last_granted_at(&self) -> Option<Instant> {
        *self.last_granted_at.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_first_slot_is_immediate() {
        let gate = RateGate::new(Duration::from_secs(1));
        let start = Instant::now();
        let slot = gate.acquire().await;
        assert_eq!(slot.granted_at(), start);
        assert_eq!(gate.last_granted_at().await, Some(start));
    }

    #[tokio::test(start_paused = true)]
    async fn test_back_to_back_slots_are_spaced() {
        let gate = RateGate::new(Duration::from_millis(500));
        let first = gate.acquire().await;
        let second = gate.acquire().await;
        assert!(second.granted_at() - first.granted_at() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_idle_period() {
        let gate = RateGate::new(Duration::from_millis(500));
        gate.acquire().await;
        sleep(Duration::from_secs(2)).await;

        let before = Instant::now();
        let slot = gate.acquire().await;
        assert_eq!(slot.granted_at(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_never_overlap() {
        let gate = Arc::new(RateGate::new(Duration::from_millis(300)));
        let start = Instant::now();
        let n = 6;

        let handles: Vec<_> = (0..n)
            .map(|_| {
                let gate = gate.clone();
                tokio::spawn(async move { gate.acquire().await.granted_at() })
            })
            .collect();

        let mut grants = Vec::new();
        for handle in handles {
            grants.push(handle.await.unwrap());
        }
        grants.sort();

        for pair in grants.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(300));
        }
        assert!(grants[n - 1] - start >= Duration::from_millis(300) * (n as u32 - 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_never_waits() {
        let gate = RateGate::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..5 {
            gate.acquire().await;
        }
        assert_eq!(Instant::now(), start);
    }
}
