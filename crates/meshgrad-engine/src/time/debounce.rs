use std::time::{Duration, Instant};

/// Single-slot debounced action.
///
/// Scheduling replaces whatever is pending and restarts the delay, so a burst
/// of events fires once, with the last action, `delay` after the last event.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the debouncer to fire `action` at `now + delay`.
    ///
    /// Returns `true` if a pending action was superseded.
    pub fn schedule(&mut self, now: Instant, action: T) -> bool {
        self.pending.replace((now + self.delay, action)).is_some()
    }

    /// Drops the pending action, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, action)| action)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending action becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    /// Takes the pending action once `now` has reached its deadline.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|at| now >= at) {
            self.cancel()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_after_delay() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(100 * MS);
        assert!(!d.schedule(t0, 1));

        assert_eq!(d.poll(t0 + 99 * MS), None);
        assert_eq!(d.poll(t0 + 100 * MS), Some(1));
        assert!(!d.is_pending());
        assert_eq!(d.poll(t0 + 500 * MS), None);
    }

    #[test]
    fn burst_fires_once_with_last_action() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(300 * MS);
        d.schedule(t0, "a");
        assert!(d.schedule(t0 + 200 * MS, "b"));
        assert!(d.schedule(t0 + 400 * MS, "c"));

        // first deadline would have been t0+300
        assert_eq!(d.poll(t0 + 650 * MS), None);
        assert_eq!(d.deadline(), Some(t0 + 700 * MS));
        assert_eq!(d.poll(t0 + 700 * MS), Some("c"));
        assert_eq!(d.poll(t0 + 1000 * MS), None);
    }

    #[test]
    fn cancel_drops_pending() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(10 * MS);
        d.schedule(t0, ());
        assert_eq!(d.cancel(), Some(()));
        assert_eq!(d.poll(t0 + 20 * MS), None);
        assert_eq!(d.deadline(), None);
    }
}
