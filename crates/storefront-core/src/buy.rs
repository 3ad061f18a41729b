//! Buy Control State
//!
//! Busy from the click until the navigation fails or the storefront is
//! shown again (including a restore from the back/forward cache).

/// Label while a navigation is in flight
pub const BUSY_LABEL: &str = "Redirecting\u{2026}";

pub const IDLE_LABEL: &str = "Buy";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuyControl {
    busy: bool,
}

impl BuyControl {
    /// Register a click. Returns `false` when a navigation is already in
    /// flight and the click must be ignored.
    pub fn click(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    /// The navigation ended: it failed, or the page came back into view
    pub fn settle(&mut self) {
        self.busy = false;
    }

    pub const fn is_busy(self) -> bool {
        self.busy
    }

    pub const fn label(self) -> &'static str {
        if self.busy { BUSY_LABEL } else { IDLE_LABEL }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_click_is_ignored_while_busy() {
        let mut control = BuyControl::default();

        assert!(control.click());
        assert!(control.is_busy());
        assert_eq!(control.label(), BUSY_LABEL);
        assert!(!control.click());
    }

    #[test]
    fn test_reenabled_after_navigation_ends() {
        let mut control = BuyControl::default();
        control.click();

        control.settle();

        assert!(!control.is_busy());
        assert_eq!(control.label(), IDLE_LABEL);
        assert!(control.click());
    }
}
