//! Newsletter form feedback and lazy image loading.

/// Visual feedback for a newsletter submission. The button swaps to a
/// success label, then reverts after a fixed delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitFeedback {
    original_label: String,
    success_label: String,
    revert_after_ms: u32,
    showing: bool,
}

/// Button state the DOM layer must apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
    /// Clear the form fields as well.
    pub reset_form: bool,
}

impl SubmitFeedback {
    pub fn new(
        original_label: impl Into<String>,
        success_label: impl Into<String>,
        revert_after_ms: u32,
    ) -> Self {
        Self {
            original_label: original_label.into(),
            success_label: success_label.into(),
            revert_after_ms,
            showing: false,
        }
    }

    pub fn revert_after_ms(&self) -> u32 {
        self.revert_after_ms
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    /// Submission accepted. `None` while a previous success is still shown.
    pub fn submit(&mut self) -> Option<ButtonState> {
        if self.showing {
            return None;
        }
        self.showing = true;
        Some(ButtonState {
            label: self.success_label.clone(),
            disabled: true,
            reset_form: false,
        })
    }

    pub fn revert(&mut self) -> Option<ButtonState> {
        if !self.showing {
            return None;
        }
        self.showing = false;
        Some(ButtonState {
            label: self.original_label.clone(),
            disabled: false,
            reset_form: true,
        })
    }
}

/// Attribute copies needed to load a deferred image.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LazySource {
    pub src: Option<String>,
    pub srcset: Option<String>,
}

impl LazySource {
    pub fn from_data(data_src: Option<String>, data_srcset: Option<String>) -> Option<Self> {
        let src = data_src.filter(|s| !s.is_empty());
        let srcset = data_srcset.filter(|s| !s.is_empty());
        if src.is_none() && srcset.is_none() {
            return None;
        }
        Some(Self { src, srcset })
    }
}

/// How deferred images get loaded on this browser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LazyStrategy {
    /// The browser defers `loading="lazy"` images itself: copy now.
    Native,
    /// Copy when the image nears the viewport.
    Observer,
    /// Neither is available: copy now.
    Eager,
}

impl LazyStrategy {
    pub fn detect(native_lazy: bool, has_intersection_observer: bool) -> Self {
        match (native_lazy, has_intersection_observer) {
            (true, _) => LazyStrategy::Native,
            (false, true) => LazyStrategy::Observer,
            (false, false) => LazyStrategy::Eager,
        }
    }

    pub fn loads_immediately(&self) -> bool {
        !matches!(self, LazyStrategy::Observer)
    }
}
