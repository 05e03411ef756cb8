//! Exponential backoff schedule for gateway retries

use std::time::Duration;

/// Pure delay generator: `min(cap, base * 2^attempt)`
#[derive(Debug, Clone, Copy)]
pub struct BackoffSchedule {
    base: Duration,
    cap: Duration,
}

impl BackoffSchedule {
    pub fn new(base: Duration, cap: Duration) -> Self {
        let base = base.max(Duration::from_millis(50));
        Self {
            base,
            cap: cap.max(base),
        }
    }

    /// Delay before the retry following attempt number `attempt` (0-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.min(20));
        self.base.saturating_mul(factor).min(self.cap)
    }
}
