//! Focus pointer and its debounced input signal
//!
//! The focus pointer names the (page, frame) the user is hovering in the
//! component picker, so the preview can highlight it. Hover events arrive
//! in bursts; the debouncer only releases a value once it has been stable
//! for the configured delay.

use serde::{Deserialize, Serialize};

use super::component::Component;

/// Default quiet period before a hovered component becomes the focus
pub const DEFAULT_FOCUS_DEBOUNCE_MS: f64 = 500.0;

/// The (page, frame) coordinate currently highlighted for preview
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FocusPointer {
    pub page_index: usize,
    pub frame_index: usize,
}

impl FocusPointer {
    /// Pointer for a committed component; None when it lacks either index
    pub fn from_component(component: &Component) -> Option<Self> {
        component.location().map(|(page_index, frame_index)| Self {
            page_index,
            frame_index,
        })
    }
}

/// Trailing-edge debouncer for the hovered component.
///
/// Time is supplied by the caller in milliseconds; the core never reads a
/// clock itself.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusDebouncer {
    delay_ms: f64,
    pending: Option<Option<Component>>,
    last_change_ms: f64,
}

impl Default for FocusDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_DEBOUNCE_MS)
    }
}

impl FocusDebouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            pending: None,
            last_change_ms: 0.0,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Record a new hover value. Restarts the quiet period.
    pub fn push(&mut self, component: Option<Component>, now_ms: f64) {
        self.pending = Some(component);
        self.last_change_ms = now_ms;
    }

    /// Whether a value is waiting to be released
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the pending value once the quiet period has elapsed.
    /// The outer Option is "something to apply", the inner one is the value.
    pub fn poll(&mut self, now_ms: f64) -> Option<Option<Component>> {
        if self.pending.is_some() && now_ms - self.last_change_ms >= self.delay_ms {
            return self.pending.take();
        }
        None
    }

    /// Drop any pending value
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::layout::Position;

    fn located(page: usize, frame: usize) -> Component {
        let mut component = Component::new(Position::Center);
        component.page_index = Some(page);
        component.frame_index = Some(frame);
        component
    }

    #[test]
    fn test_pointer_from_component() {
        assert_eq!(
            FocusPointer::from_component(&located(2, 1)),
            Some(FocusPointer { page_index: 2, frame_index: 1 })
        );

        let mut half = Component::new(Position::Center);
        half.page_index = Some(0);
        assert_eq!(FocusPointer::from_component(&half), None);
    }

    #[test]
    fn test_debouncer_releases_after_quiet_period() {
        let mut debouncer = FocusDebouncer::new(500.0);
        debouncer.push(Some(located(0, 0)), 1000.0);
        assert_eq!(debouncer.poll(1200.0), None);

        // A new value restarts the timer
        debouncer.push(Some(located(1, 0)), 1400.0);
        assert_eq!(debouncer.poll(1800.0), None);

        let released = debouncer.poll(1900.0).unwrap();
        assert_eq!(released.unwrap().page_index, Some(1));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(5000.0), None);
    }

    #[test]
    fn test_debouncer_releases_clear() {
        let mut debouncer = FocusDebouncer::new(500.0);
        debouncer.push(None, 0.0);
        assert_eq!(debouncer.poll(500.0), Some(None));
    }
}
