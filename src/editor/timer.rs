//! Cancellable deferred action
//!
//! Blur cleanup is scheduled rather than run immediately so a click on a
//! suggestion, which blurs the surface first, can still commit. The timer is
//! driven by host timestamps: `schedule` on blur, `cancel` when the click
//! commit arrives, `fire_if_due` from the host's timeout callback.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CancellableTimer {
    due_at: Option<f64>,
}

impl CancellableTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer; re-scheduling replaces any earlier deadline
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64) {
        self.due_at = Some(now_ms + delay_ms);
    }

    /// Disarm the timer. Returns whether it was armed.
    pub fn cancel(&mut self) -> bool {
        self.due_at.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    pub fn due_at(&self) -> Option<f64> {
        self.due_at
    }

    /// Disarm and return true if the deadline has passed
    pub fn fire_if_due(&mut self, now_ms: f64) -> bool {
        match self.due_at {
            Some(due) if now_ms >= due => {
                self.due_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_deadline() {
        let mut timer = CancellableTimer::new();
        timer.schedule(1000.0, 150.0);
        assert!(!timer.fire_if_due(1100.0));
        assert!(timer.fire_if_due(1150.0));
        assert!(!timer.fire_if_due(2000.0));
    }

    #[test]
    fn test_cancel() {
        let mut timer = CancellableTimer::new();
        assert!(!timer.cancel());
        timer.schedule(0.0, 150.0);
        assert!(timer.cancel());
        assert!(!timer.is_pending());
        assert!(!timer.fire_if_due(500.0));
    }

    #[test]
    fn test_reschedule_moves_deadline() {
        let mut timer = CancellableTimer::new();
        timer.schedule(0.0, 150.0);
        timer.schedule(100.0, 150.0);
        assert_eq!(timer.due_at(), Some(250.0));
        assert!(!timer.fire_if_due(200.0));
    }
}
