//! Cooldown gate
//!
//! A debounce over the single most recent successful notification: the gate
//! is open when no notification has ever succeeded or when strictly more than
//! the cooldown has elapsed since the last success. Failed attempts never
//! move the gate, so a failed send may be retried on the very next dangerous
//! frame.

use std::time::{Duration, Instant};

use tracing::debug;

/// Open/closed decision over the last successful notification.
///
/// Time is passed in explicitly; the gate never reads the clock itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct CooldownGate {
    last_notified_at: Option<Instant>,
}

impl CooldownGate {
    /// A gate that has never notified
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff a notification attempt is permitted at `now`.
    ///
    /// Strict elapsed comparison: an attempt exactly at the cooldown boundary
    /// is still blocked.
    pub fn is_open(&self, now: Instant, cooldown: Duration) -> bool {
        match self.last_notified_at {
            None => true,
            Some(last) => {
                let open = now.saturating_duration_since(last) > cooldown;
                if !open {
                    debug!("Notification suppressed: in cooldown period");
                }
                open
            }
        }
    }

    /// Record a successful notification. This is the only transition that
    /// closes the gate; callers must not invoke it on failure.
    pub fn record_success(&mut self, now: Instant) {
        self.last_notified_at = Some(now);
    }

    /// Instant of the last successful notification, if any
    pub fn last_notified_at(&self) -> Option<Instant> {
        self.last_notified_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(20);

    #[test]
    fn fresh_gate_is_open_regardless_of_now() {
        let gate = CooldownGate::new();
        assert!(gate.is_open(Instant::now(), COOLDOWN));
        assert!(gate.is_open(Instant::now(), Duration::ZERO));
    }

    #[test]
    fn boundary_instant_is_still_closed() {
        let t = Instant::now();
        let mut gate = CooldownGate::new();
        gate.record_success(t);

        assert!(!gate.is_open(t + COOLDOWN, COOLDOWN));
        assert!(gate.is_open(t + COOLDOWN + Duration::from_nanos(1), COOLDOWN));
    }

    #[test]
    fn closed_within_cooldown_open_after() {
        let t = Instant::now();
        let mut gate = CooldownGate::new();
        gate.record_success(t);

        assert!(!gate.is_open(t + Duration::from_secs(10), COOLDOWN));
        assert!(gate.is_open(t + Duration::from_secs(25), COOLDOWN));
    }

    #[test]
    fn success_moves_the_gate_forward() {
        let t = Instant::now();
        let mut gate = CooldownGate::new();
        gate.record_success(t);
        gate.record_success(t + Duration::from_secs(30));

        // The newer success governs
        assert!(!gate.is_open(t + Duration::from_secs(45), COOLDOWN));
        assert!(gate.is_open(t + Duration::from_secs(51), COOLDOWN));
    }

    #[test]
    fn untouched_gate_state_is_observable() {
        let mut gate = CooldownGate::new();
        assert!(gate.last_notified_at().is_none());

        let t = Instant::now();
        gate.record_success(t);
        assert_eq!(gate.last_notified_at(), Some(t));
    }
}
