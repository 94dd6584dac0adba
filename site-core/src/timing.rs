//! Debounce and frame throttling, modelled on explicit timestamps.
//!
//! The browser crate owns the actual timers; these types decide whether
//! a timer firing should do any work, which keeps the collapse rules
//! testable without an event loop.

/// Trailing-edge debounce: work runs once, `delay_ms` after the last event.
#[derive(Clone, Debug)]
pub struct Debouncer {
    delay_ms: f64,
    last_event: Option<f64>,
}

impl Debouncer {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            last_event: None,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// Record an event at `now_ms`, pushing the deadline back.
    pub fn event(&mut self, now_ms: f64) {
        self.last_event = Some(now_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.last_event.is_some()
    }

    pub fn deadline(&self) -> Option<f64> {
        self.last_event.map(|t| t + self.delay_ms)
    }

    /// Returns `true` exactly once per burst, when the quiet period has
    /// elapsed at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline() {
            Some(deadline) if now_ms >= deadline => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }
}

/// Allows at most one outstanding animation-frame callback.
#[derive(Clone, Debug, Default)]
pub struct FrameThrottle {
    ticking: bool,
}

impl FrameThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when the caller should schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn complete(&mut self) {
        self.ticking = false;
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }
}
