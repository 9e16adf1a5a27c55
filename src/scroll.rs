//! Scroll detection over an injected environment.
//!
//! The detector never asks "is there a window?" at runtime. It is handed an
//! [`Environment`] and takes its answers at face value: an environment that
//! cannot report a scroll position (the static renderer) yields `false`.
//!
//! Scroll samples arrive with a caller-supplied timestamp and are throttled
//! to one evaluation per frame interval. A sample that lands inside the
//! interval is parked rather than dropped; the next [`ScrollDetector::flush`]
//! evaluates it, so the resting position after a fling is always seen.
//!
//! ```text
//! t=0   y=100  → evaluated (below)
//! t=5   y=700  → parked
//! t=9   y=720  → parked (replaces 700)
//! t=16  flush  → evaluated 720 → Crossing { past_hero: true }
//! ```

/// Listener registrations an environment can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Scroll,
    Resize,
}

/// Opaque handle for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// What a page view can observe about the window it runs in.
pub trait Environment {
    /// Current vertical scroll offset, `None` when there is no scrollable window.
    fn scroll_y(&self) -> Option<f64>;

    /// Current viewport width in CSS px, `None` when there is no window.
    fn viewport_width(&self) -> Option<f64>;

    /// Register interest in an event stream. Environments that cannot deliver
    /// the event return `None`.
    fn add_listener(&mut self, kind: ListenerKind) -> Option<ListenerId>;

    fn remove_listener(&mut self, id: ListenerId);

    /// Told the offset of every scroll event delivered to the view.
    /// Environments that read the live window have nothing to record.
    fn scrolled_to(&mut self, _scroll_y: f64) {}
}

/// Environment of a static render: nothing to observe, nothing to register.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticEnvironment;

impl Environment for StaticEnvironment {
    fn scroll_y(&self) -> Option<f64> {
        None
    }

    fn viewport_width(&self) -> Option<f64> {
        None
    }

    fn add_listener(&mut self, _kind: ListenerKind) -> Option<ListenerId> {
        None
    }

    fn remove_listener(&mut self, _id: ListenerId) {}
}

/// Whether an offset lies past the hero section.
///
/// Non-finite offsets count as not scrolled.
pub fn is_past_threshold(scroll_y: f64, threshold: f64) -> bool {
    scroll_y.is_finite() && scroll_y > threshold
}

/// A threshold crossing reported by the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub scroll_y: f64,
    pub past_hero: bool,
}

/// Leading-edge throttle with a parked trailing value.
#[derive(Debug, Clone)]
struct Throttle {
    interval_ms: u64,
    last_run: Option<u64>,
    pending: Option<f64>,
}

impl Throttle {
    fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_run: None,
            pending: None,
        }
    }

    fn ready(&self, now_ms: u64) -> bool {
        self.last_run
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.interval_ms)
    }

    fn offer(&mut self, value: f64, at_ms: u64) -> Option<f64> {
        if self.ready(at_ms) {
            self.last_run = Some(at_ms);
            self.pending = None;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    fn flush(&mut self, now_ms: u64) -> Option<f64> {
        if self.pending.is_some() && self.ready(now_ms) {
            self.last_run = Some(now_ms);
            self.pending.take()
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrollDetector {
    threshold: f64,
    throttle: Throttle,
    past_hero: bool,
}

impl ScrollDetector {
    pub fn new(threshold: f64, interval_ms: u64) -> Self {
        Self {
            threshold,
            throttle: Throttle::new(interval_ms),
            past_hero: false,
        }
    }

    pub fn is_past_hero(&self) -> bool {
        self.past_hero
    }

    /// Read the position directly from the environment, bypassing the throttle.
    ///
    /// Used at mount and after a route change. Returns the offset that was
    /// evaluated, or `None` when the environment has no scroll position.
    pub fn sample(&mut self, env: &impl Environment) -> Option<f64> {
        match env.scroll_y() {
            Some(y) => {
                self.past_hero = is_past_threshold(y, self.threshold);
                Some(y)
            }
            None => {
                self.past_hero = false;
                None
            }
        }
    }

    /// Feed a scroll event. Reports only threshold crossings.
    pub fn observe(&mut self, scroll_y: f64, at_ms: u64) -> Option<Crossing> {
        let y = self.throttle.offer(scroll_y, at_ms)?;
        self.evaluate(y)
    }

    /// Evaluate a parked sample if its frame interval has elapsed.
    pub fn flush(&mut self, now_ms: u64) -> Option<Crossing> {
        let y = self.throttle.flush(now_ms)?;
        self.evaluate(y)
    }

    /// Drop any parked sample.
    pub fn cancel(&mut self) {
        self.throttle.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.throttle.pending.is_some()
    }

    fn evaluate(&mut self, scroll_y: f64) -> Option<Crossing> {
        let past_hero = is_past_threshold(scroll_y, self.threshold);
        if past_hero == self.past_hero {
            return None;
        }
        self.past_hero = past_hero;
        log::debug!("scroll crossed hero threshold at y={scroll_y} (past_hero={past_hero})");
        Some(Crossing {
            scroll_y,
            past_hero,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::SimulatedWindow;

    #[test]
    fn static_environment_defaults_to_not_scrolled() {
        let mut detector = ScrollDetector::new(600.0, 16);
        assert_eq!(detector.sample(&StaticEnvironment), None);
        assert!(!detector.is_past_hero());
    }

    #[test]
    fn sample_reads_environment_position() {
        let env = SimulatedWindow::at(900.0, 1280.0);
        let mut detector = ScrollDetector::new(600.0, 16);
        assert_eq!(detector.sample(&env), Some(900.0));
        assert!(detector.is_past_hero());
    }

    #[test]
    fn emits_only_on_crossings() {
        let mut detector = ScrollDetector::new(600.0, 0);
        assert_eq!(detector.observe(100.0, 0), None);
        assert_eq!(detector.observe(500.0, 1), None);
        assert_eq!(
            detector.observe(650.0, 2),
            Some(Crossing {
                scroll_y: 650.0,
                past_hero: true
            })
        );
        assert_eq!(detector.observe(1200.0, 3), None);
        assert_eq!(
            detector.observe(0.0, 4),
            Some(Crossing {
                scroll_y: 0.0,
                past_hero: false
            })
        );
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(!is_past_threshold(600.0, 600.0));
        assert!(is_past_threshold(600.5, 600.0));
        assert!(!is_past_threshold(f64::NAN, 600.0));
        assert!(!is_past_threshold(f64::INFINITY, 600.0));
    }

    #[test]
    fn throttle_parks_intra_frame_samples() {
        let mut detector = ScrollDetector::new(600.0, 16);
        assert_eq!(detector.observe(100.0, 0), None);
        assert_eq!(detector.observe(700.0, 5), None);
        assert!(detector.has_pending());
        assert!(!detector.is_past_hero());
        assert_eq!(detector.flush(10), None);
        let crossing = detector.flush(16).unwrap();
        assert_eq!(crossing.scroll_y, 700.0);
        assert!(detector.is_past_hero());
        assert!(!detector.has_pending());
    }

    #[test]
    fn later_sample_replaces_parked_one() {
        let mut detector = ScrollDetector::new(600.0, 16);
        detector.observe(0.0, 0);
        detector.observe(700.0, 4);
        detector.observe(300.0, 8);
        assert_eq!(detector.flush(20), None);
        assert!(!detector.is_past_hero());
    }

    #[test]
    fn cancel_drops_pending_sample() {
        let mut detector = ScrollDetector::new(600.0, 16);
        detector.observe(0.0, 0);
        detector.observe(900.0, 3);
        detector.cancel();
        assert_eq!(detector.flush(100), None);
        assert!(!detector.is_past_hero());
    }
}
