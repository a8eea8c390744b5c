use std::time::{Duration, Instant};

/// Quiescence-window scheduling for repeated triggers.
///
/// Each `trigger` pushes the deadline out by the full window; `poll` reports
/// true once, after the window has passed with no further triggers. Time is
/// passed in, so the policy carries no timer of its own.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Drop a pending trigger
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True when a pending trigger is due; clears it
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time until the pending trigger is due, if any
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(150);

    #[test]
    fn test_idle_never_fires() {
        let mut debounce = Debounce::new(WINDOW);
        let now = Instant::now();
        assert!(!debounce.poll(now + Duration::from_secs(10)));
        assert_eq!(debounce.time_left(now), None);
    }

    #[test]
    fn test_fires_once_after_window() {
        let mut debounce = Debounce::new(WINDOW);
        let start = Instant::now();
        debounce.trigger(start);

        assert!(!debounce.poll(start + Duration::from_millis(149)));
        assert!(debounce.poll(start + WINDOW));
        assert!(!debounce.poll(start + Duration::from_millis(400)));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_rapid_triggers_coalesce() {
        let mut debounce = Debounce::new(WINDOW);
        let start = Instant::now();
        for ms in [0, 50, 100, 140] {
            debounce.trigger(start + Duration::from_millis(ms));
            assert!(!debounce.poll(start + Duration::from_millis(ms)));
        }
        // Window counts from the last keystroke
        assert!(!debounce.poll(start + Duration::from_millis(200)));
        assert_eq!(
            debounce.time_left(start + Duration::from_millis(200)),
            Some(Duration::from_millis(90))
        );
        assert!(debounce.poll(start + Duration::from_millis(290)));
    }

    #[test]
    fn test_cancel() {
        let mut debounce = Debounce::new(WINDOW);
        let start = Instant::now();
        debounce.trigger(start);
        debounce.cancel();
        assert!(!debounce.poll(start + WINDOW));
    }
}
