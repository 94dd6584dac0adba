//! Horizontal swipe detection shared by touch and mouse input.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerSource {
    Touch,
    Mouse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwipeDirection {
    Next,
    Previous,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Press {
    source: PointerSource,
    start_x: f64,
}

/// Tracks one press at a time. A release only counts when it comes from
/// the same pointer source that pressed.
#[derive(Clone, Debug)]
pub struct DragTracker {
    threshold: f64,
    press: Option<Press>,
    /// A mouse swipe just ended; the browser follows it with a `click`.
    swallow_click: bool,
}

impl DragTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            press: None,
            swallow_click: false,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_active(&self) -> bool {
        self.press.is_some()
    }

    pub fn press(&mut self, x: f64, source: PointerSource) {
        self.press = Some(Press { source, start_x: x });
        self.swallow_click = false;
    }

    /// End the press at `x`. The delta is `start - end`: dragging content
    /// to the left is positive and advances.
    pub fn release(&mut self, x: f64, source: PointerSource) -> Option<SwipeDirection> {
        let press = self.press.filter(|p| p.source == source)?;
        self.press = None;

        let delta = press.start_x - x;
        if !delta.is_finite() || delta.abs() <= self.threshold {
            return None;
        }
        self.swallow_click = source == PointerSource::Mouse;
        Some(if delta > 0.0 {
            SwipeDirection::Next
        } else {
            SwipeDirection::Previous
        })
    }

    /// True once after a mouse swipe, so the click that ends it is not
    /// read as a tap.
    pub fn take_swipe_click(&mut self) -> bool {
        std::mem::take(&mut self.swallow_click)
    }

    pub fn cancel(&mut self, source: PointerSource) {
        if self.press.is_some_and(|p| p.source == source) {
            self.press = None;
        }
    }
}
