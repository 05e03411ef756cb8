//! Per-provider circuit breaker (closed → open → half-open)
//!
//! Closed: requests pass and consecutive failures are counted. Open: all
//! requests are rejected for the recovery window. Half-open: exactly one
//! probe is allowed after the window elapses; success closes the circuit,
//! failure re-opens it and resets the timer.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Injectable time source so recovery-window transitions are testable
/// without real delays
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock backed [`Clock`]
#[derive(Debug, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Default)]
struct BreakerState {
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    half_open: bool,
}

/// Failure-isolation state machine guarding one external provider.
/// Counters are the only mutable state shared across concurrent calls to
/// the same provider; all updates are serialized through the inner mutex.
pub struct CircuitBreaker {
    name: String,
    failure_threshold: u32,
    recovery: Duration,
    state: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, failure_threshold: u32, recovery: Duration) -> Self {
        Self {
            name: name.into(),
            failure_threshold: failure_threshold.max(1),
            recovery,
            state: Mutex::new(BreakerState::default()),
        }
    }

    /// Check whether a request may proceed. Returns the remaining cooldown
    /// when the circuit is open. Entering half-open happens here, so the
    /// first check after the window elapses admits the probe. Concurrent
    /// callers checking while half-open are all admitted; the first recorded
    /// outcome decides the transition.
    pub fn check(&self, clock: &dyn Clock) -> Result<(), Duration> {
        let mut state = self.state.lock().expect("breaker state poisoned");
        let Some(opened_at) = state.opened_at else {
            return Ok(());
        };
        let elapsed = clock.now().saturating_duration_since(opened_at);
        if elapsed >= self.recovery {
            if !state.half_open {
                state.half_open = true;
                tracing::info!(circuit = %self.name, "entering half-open state, probe allowed");
            }
            return Ok(());
        }
        Err(self.recovery - elapsed)
    }

    /// A success in closed or half-open state resets the breaker
    pub fn record_success(&self) {
        let mut state = self.state.lock().expect("breaker state poisoned");
        if state.consecutive_failures > 0 || state.opened_at.is_some() {
            tracing::info!(circuit = %self.name, "closed, provider recovered");
        }
        state.consecutive_failures = 0;
        state.opened_at = None;
        state.half_open = false;
    }

    pub fn record_failure(&self, clock: &dyn Clock) {
        let mut state = self.state.lock().expect("breaker state poisoned");
        state.consecutive_failures += 1;
        if state.half_open {
            state.opened_at = Some(clock.now());
            state.half_open = false;
            tracing::warn!(circuit = %self.name, "re-opened after half-open probe failure");
        } else if state.consecutive_failures >= self.failure_threshold {
            state.opened_at = Some(clock.now());
            tracing::warn!(
                circuit = %self.name,
                failures = state.consecutive_failures,
                recovery_secs = self.recovery.as_secs(),
                "opened after consecutive failures"
            );
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::ManualClock;
    use super::*;

    fn breaker() -> CircuitBreaker {
        CircuitBreaker::new("test", 3, Duration::from_secs(60))
    }

    #[test]
    fn stays_closed_below_threshold() {
        let clock = ManualClock::new();
        let b = breaker();
        b.record_failure(&clock);
        b.record_failure(&clock);
        assert!(b.check(&clock).is_ok());
    }

    #[test]
    fn opens_exactly_at_threshold() {
        let clock = ManualClock::new();
        let b = breaker();
        for _ in 0..3 {
            assert!(b.check(&clock).is_ok());
            b.record_failure(&clock);
        }
        let remaining = b.check(&clock).unwrap_err();
        assert!(remaining <= Duration::from_secs(60));
        assert!(remaining > Duration::from_secs(59));
    }

    #[test]
    fn success_resets_failure_count() {
        let clock = ManualClock::new();
        let b = breaker();
        b.record_failure(&clock);
        b.record_failure(&clock);
        b.record_success();
        b.record_failure(&clock);
        b.record_failure(&clock);
        assert!(b.check(&clock).is_ok());
    }

    #[test]
    fn probe_allowed_after_recovery_window() {
        let clock = ManualClock::new();
        let b = breaker();
        for _ in 0..3 {
            b.record_failure(&clock);
        }
        assert!(b.check(&clock).is_err());
        clock.advance(Duration::from_secs(61));
        assert!(b.check(&clock).is_ok());
    }

    #[test]
    fn probe_failure_reopens_with_fresh_timer() {
        let clock = ManualClock::new();
        let b = breaker();
        for _ in 0..3 {
            b.record_failure(&clock);
        }
        clock.advance(Duration::from_secs(61));
        assert!(b.check(&clock).is_ok());
        b.record_failure(&clock);
        let remaining = b.check(&clock).unwrap_err();
        assert!(remaining > Duration::from_secs(59));
    }

    #[test]
    fn probe_success_closes() {
        let clock = ManualClock::new();
        let b = breaker();
        for _ in 0..3 {
            b.record_failure(&clock);
        }
        clock.advance(Duration::from_secs(61));
        assert!(b.check(&clock).is_ok());
        b.record_success();
        assert!(b.check(&clock).is_ok());
        // one failure after recovery must not immediately re-open
        b.record_failure(&clock);
        assert!(b.check(&clock).is_ok());
    }
}
