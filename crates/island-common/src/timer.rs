//! One-shot scheduled tasks with explicit cancel tokens.
//!
//! A [`DeadlineTimer`] holds at most one armed deadline. Arming it again
//! invalidates the previous deadline before the new one is set, so a
//! timer never double-fires. The owning event loop drives it by calling
//! [`DeadlineTimer::poll`] with the current instant; nothing here sleeps
//! or spawns.

use std::time::{Duration, Instant};

/// Stand-in deadline for delays too large to represent as an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// Identifies a single arming of a [`DeadlineTimer`].
///
/// Tokens are never reused within one timer, so a stale token can be told
/// apart from the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct DeadlineTimer {
    armed: Option<(TimerToken, Instant)>,
    issued: u64,
}

impl DeadlineTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire `delay` after `now`, cancelling any pending deadline.
    /// Delays past the platform's `Instant` range are shortened to [`FAR_FUTURE`].
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TimerToken {
        let deadline = now
            .checked_add(delay)
            .or_else(|| now.checked_add(delay.min(FAR_FUTURE)))
            .unwrap_or(now);
        self.schedule_at(deadline)
    }

    /// Arm the timer for an absolute deadline, cancelling any pending one.
    pub fn schedule_at(&mut self, deadline: Instant) -> TimerToken {
        if let Some((stale, _)) = self.armed.take() {
            tracing::trace!(token = stale.0, "timer rescheduled");
        }
        self.issued += 1;
        let token = TimerToken(self.issued);
        self.armed = Some((token, deadline));
        token
    }

    /// Disarm the timer. Returns the token that was pending, if any.
    pub fn cancel(&mut self) -> Option<TimerToken> {
        self.armed.take().map(|(token, _)| token)
    }

    /// Disarm only if `token` is still the live arming.
    pub fn cancel_token(&mut self, token: TimerToken) -> bool {
        match self.armed {
            Some((live, _)) if live == token => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.armed.is_some()
    }

    pub fn token(&self) -> Option<TimerToken> {
        self.armed.map(|(token, _)| token)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.armed.map(|(_, deadline)| deadline)
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fire the timer if its deadline has passed.
    ///
    /// Returns the token of the arming that fired. The timer is disarmed
    /// afterwards, so each arming fires at most once.
    pub fn poll(&mut self, now: Instant) -> Option<TimerToken> {
        match self.armed {
            Some((token, deadline)) if now >= deadline => {
                self.armed = None;
                Some(token)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn fires_once_after_deadline() {
        let t0 = Instant::now();
        let mut timer = DeadlineTimer::new();
        let token = timer.schedule(t0, 5 * SECOND);

        assert!(timer.poll(t0 + 4 * SECOND).is_none());
        assert_eq!(timer.poll(t0 + 5 * SECOND), Some(token));
        assert!(timer.poll(t0 + 6 * SECOND).is_none());
        assert!(!timer.is_pending());
    }

    #[test]
    fn reschedule_replaces_previous_deadline() {
        let t0 = Instant::now();
        let mut timer = DeadlineTimer::new();
        let first = timer.schedule(t0, 5 * SECOND);
        let second = timer.schedule(t0 + 3 * SECOND, 5 * SECOND);

        assert_ne!(first, second);
        // The first deadline would have been t0+5s; it must not fire.
        assert!(timer.poll(t0 + 5 * SECOND).is_none());
        assert_eq!(timer.poll(t0 + 8 * SECOND), Some(second));
    }

    #[test]
    fn cancel_disarms() {
        let t0 = Instant::now();
        let mut timer = DeadlineTimer::new();
        let token = timer.schedule(t0, SECOND);
        assert_eq!(timer.cancel(), Some(token));
        assert!(timer.poll(t0 + 10 * SECOND).is_none());
        assert_eq!(timer.cancel(), None);
    }

    #[test]
    fn stale_token_cannot_cancel_live_arming() {
        let t0 = Instant::now();
        let mut timer = DeadlineTimer::new();
        let stale = timer.schedule(t0, SECOND);
        let live = timer.schedule(t0, 2 * SECOND);

        assert!(!timer.cancel_token(stale));
        assert!(timer.is_pending());
        assert!(timer.cancel_token(live));
        assert!(!timer.is_pending());
    }

    #[test]
    fn remaining_saturates_at_zero() {
        let t0 = Instant::now();
        let mut timer = DeadlineTimer::new();
        assert_eq!(timer.remaining(t0), None);
        timer.schedule(t0, 2 * SECOND);
        assert_eq!(timer.remaining(t0 + SECOND), Some(SECOND));
        assert_eq!(timer.remaining(t0 + 3 * SECOND), Some(Duration::ZERO));
    }

    #[test]
    fn unrepresentable_delay_stays_pending() {
        let t0 = Instant::now();
        let mut timer = DeadlineTimer::new();
        timer.schedule(t0, Duration::MAX);
        assert!(timer.is_pending());
        assert!(timer.poll(t0 + 3600 * SECOND).is_none());
    }
}
