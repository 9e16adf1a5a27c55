//! Mobile menu overlay.
//!
//! The overlay holds no navigation data of its own. It follows the store's
//! `is_mobile_menu_open` flag and, while open, suspends background scrolling
//! through a [`ScrollLock`]. The overflow value in place before opening is
//! saved and written back verbatim on close, including "no inline value".

/// Access to the page's background overflow style.
pub trait ScrollLock {
    /// Current inline overflow value, `None` when unset.
    fn overflow(&self) -> Option<String>;

    fn set_overflow(&mut self, value: Option<&str>);
}

/// Nothing to lock when there is no document.
impl ScrollLock for crate::scroll::StaticEnvironment {
    fn overflow(&self) -> Option<String> {
        None
    }

    fn set_overflow(&mut self, _value: Option<&str>) {}
}

const LOCKED_OVERFLOW: &str = "hidden";

#[derive(Debug, Default)]
pub struct MobileOverlay {
    /// Overflow value captured at open; `Some` exactly while the lock is held.
    saved: Option<Option<String>>,
}

impl MobileOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.saved.is_some()
    }

    pub fn open(&mut self, lock: &mut impl ScrollLock) {
        if self.is_open() {
            return;
        }
        self.saved = Some(lock.overflow());
        lock.set_overflow(Some(LOCKED_OVERFLOW));
    }

    /// Restore the saved overflow. Closing a closed overlay does nothing.
    pub fn close(&mut self, lock: &mut impl ScrollLock) {
        if let Some(previous) = self.saved.take() {
            lock.set_overflow(previous.as_deref());
        }
    }

    /// Bring the overlay in line with the store's menu flag.
    pub fn sync(&mut self, menu_open: bool, lock: &mut impl ScrollLock) {
        if menu_open {
            self.open(lock);
        } else {
            self.close(lock);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::SimulatedWindow;

    #[test]
    fn open_locks_and_close_restores_unset() {
        let mut env = SimulatedWindow::default();
        let mut overlay = MobileOverlay::new();
        overlay.open(&mut env);
        assert_eq!(env.overflow().as_deref(), Some("hidden"));
        overlay.close(&mut env);
        assert_eq!(env.overflow(), None);
    }

    #[test]
    fn close_restores_previous_value_exactly() {
        let mut env = SimulatedWindow::default();
        env.set_overflow(Some("scroll"));
        let mut overlay = MobileOverlay::new();
        overlay.open(&mut env);
        overlay.close(&mut env);
        assert_eq!(env.overflow().as_deref(), Some("scroll"));
    }

    #[test]
    fn repeated_close_is_a_no_op() {
        let mut env = SimulatedWindow::default();
        let mut overlay = MobileOverlay::new();
        overlay.open(&mut env);
        overlay.close(&mut env);
        let writes = env.overflow_writes;
        overlay.close(&mut env);
        overlay.close(&mut env);
        assert_eq!(env.overflow_writes, writes);
        assert!(!overlay.is_open());
    }

    #[test]
    fn double_open_keeps_original_value() {
        let mut env = SimulatedWindow::default();
        env.set_overflow(Some("auto"));
        let mut overlay = MobileOverlay::new();
        overlay.open(&mut env);
        overlay.open(&mut env);
        overlay.close(&mut env);
        assert_eq!(env.overflow().as_deref(), Some("auto"));
    }
}
