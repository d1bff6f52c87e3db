//! Double-tap detection over explicit timestamps.
//!
//! The detector is fed the clock instead of reading it, so transitions
//! are deterministic under test and the host controls time.

use std::time::{Duration, Instant};

/// Longest gap between two taps that still counts as a double tap.
pub const DOUBLE_TAP_WINDOW: Duration = Duration::from_millis(300);

/// Detects two taps within a time window.
#[derive(Debug, Clone)]
pub struct DoubleTapDetector {
    window: Duration,
    last_tap: Option<Instant>,
}

impl DoubleTapDetector {
    /// Detector with the default window.
    pub const fn new() -> Self {
        Self::with_window(DOUBLE_TAP_WINDOW)
    }

    /// Detector with an explicit window.
    pub const fn with_window(window: Duration) -> Self {
        Self {
            window,
            last_tap: None,
        }
    }

    /// Feed one tap. Returns true when this tap completes a double tap;
    /// the completing tap is consumed, so a third quick tap starts a new
    /// pair.
    pub fn feed(&mut self, now: Instant) -> bool {
        if let Some(prev) = self.last_tap {
            let gap = now.checked_duration_since(prev);
            if gap.is_some_and(|d| d <= self.window) {
                self.last_tap = None;
                return true;
            }
        }
        self.last_tap = Some(now);
        false
    }

    /// Forget any pending tap.
    pub fn reset(&mut self) {
        self.last_tap = None;
    }

    /// The configured window.
    pub const fn window(&self) -> Duration {
        self.window
    }
}

impl Default for DoubleTapDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_quick_taps_complete() {
        let mut detector = DoubleTapDetector::with_window(Duration::from_millis(300));
        let t0 = Instant::now();
        assert!(!detector.feed(t0));
        assert!(detector.feed(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_slow_second_tap_starts_over() {
        let mut detector = DoubleTapDetector::with_window(Duration::from_millis(300));
        let t0 = Instant::now();
        assert!(!detector.feed(t0));
        assert!(!detector.feed(t0 + Duration::from_millis(400)));
        // the slow tap became the new first tap
        assert!(detector.feed(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn test_completing_tap_is_consumed() {
        let mut detector = DoubleTapDetector::with_window(Duration::from_millis(300));
        let t0 = Instant::now();
        detector.feed(t0);
        assert!(detector.feed(t0 + Duration::from_millis(100)));
        // a third quick tap only starts a new pair
        assert!(!detector.feed(t0 + Duration::from_millis(200)));
        assert!(detector.feed(t0 + Duration::from_millis(250)));
    }

    #[test]
    fn test_reset_clears_pending_tap() {
        let mut detector = DoubleTapDetector::new();
        let t0 = Instant::now();
        detector.feed(t0);
        detector.reset();
        assert!(!detector.feed(t0 + Duration::from_millis(10)));
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let mut detector = DoubleTapDetector::with_window(Duration::from_millis(300));
        let t0 = Instant::now();
        detector.feed(t0);
        assert!(detector.feed(t0 + Duration::from_millis(300)));
    }
}
