//! Universal carousel engine.
//!
//! One [`Carousel`] owns the position of one track. It supports two
//! display modes: a paged scroller showing as many items as fit
//! ([`CarouselMode::Paged`]) and a single centred, highlighted item
//! ([`CarouselMode::Centered`]). Paged carousels with only a few items on
//! a desktop viewport fall back to a static layout where nothing moves.
//!
//! The engine never touches the DOM. Every state change returns a
//! [`RenderFrame`] describing what the page should look like; the caller
//! applies it. Layout is read through [`LayoutProbe`] on demand because
//! it changes with the viewport.

use serde::{Deserialize, Serialize};

use crate::config::CarouselTuning;
use crate::gesture::{DragTracker, PointerSource, SwipeDirection};
use crate::metrics::{resolve_metrics, LayoutProbe, Metrics};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselMode {
    /// Several items visible, the track scrolls one item per step.
    Paged,
    /// Exactly one item centred in the container and marked active.
    Centered,
}

/// Which application context field mirrors an instance's position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselSlot {
    Funds,
    Team,
}

/// When the static layout decision is taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticLayoutPolicy {
    /// Decide once at bind time. Crossing the desktop breakpoint later
    /// neither gains nor loses the carousel.
    #[default]
    FixedAtBind,
    /// Re-evaluate after every debounced resize.
    RecomputeOnResize,
}

/// Horizontal projection of the track.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    None,
    TranslateX(f64),
}

impl Transform {
    /// CSS `transform` value.
    pub fn css(&self) -> String {
        match self {
            Transform::None => "none".to_string(),
            Transform::TranslateX(x) => {
                // Avoid rendering "-0px".
                let x = if *x == 0.0 { 0.0 } else { *x };
                format!("translateX({x}px)")
            }
        }
    }

    pub fn offset(&self) -> Option<f64> {
        match self {
            Transform::None => None,
            Transform::TranslateX(x) => Some(*x),
        }
    }
}

/// Everything a render writes to the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub transform: Transform,
    /// Item carrying the active highlight. Only centred carousels have one.
    pub active_item: Option<usize>,
    /// Dot carrying the active flag, `None` when there are no items.
    pub active_dot: Option<usize>,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub is_static: bool,
    pub current_index: usize,
    pub metrics: Metrics,
}

impl RenderFrame {
    pub fn is_item_active(&self, index: usize) -> bool {
        self.active_item == Some(index)
    }

    pub fn is_dot_active(&self, index: usize) -> bool {
        self.active_dot == Some(index)
    }
}

/// Position state of one carousel instance.
#[derive(Clone, Debug)]
pub struct Carousel {
    mode: CarouselMode,
    item_count: usize,
    current_index: usize,
    is_static: bool,
    policy: StaticLayoutPolicy,
    static_min_items: usize,
    desktop_breakpoint_px: f64,
    drag: DragTracker,
}

impl Carousel {
    /// Create the engine for a freshly bound track and decide whether it
    /// is laid out statically. The caller renders the first frame.
    pub fn bind<P: LayoutProbe + ?Sized>(
        probe: &P,
        mode: CarouselMode,
        item_count: usize,
        tuning: &CarouselTuning,
    ) -> Self {
        let mut carousel = Self {
            mode,
            item_count,
            current_index: 0,
            is_static: false,
            policy: tuning.static_policy,
            static_min_items: tuning.static_min_items,
            desktop_breakpoint_px: tuning.desktop_breakpoint_px,
            drag: DragTracker::new(tuning.swipe_threshold_px),
        };
        carousel.is_static = carousel.decide_static(probe.viewport_width());
        log::debug!(
            "carousel bound: mode={:?} items={} static={}",
            mode,
            item_count,
            carousel.is_static
        );
        carousel
    }

    fn decide_static(&self, viewport_width: f64) -> bool {
        self.mode == CarouselMode::Paged
            && viewport_width >= self.desktop_breakpoint_px
            && self.item_count < self.static_min_items
    }

    pub fn mode(&self) -> CarouselMode {
        self.mode
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn metrics<P: LayoutProbe + ?Sized>(&self, probe: &P) -> Metrics {
        resolve_metrics(
            probe,
            self.mode,
            self.current_index,
            self.item_count,
            self.is_static,
        )
    }

    /// Clamp the position against current metrics and project it.
    pub fn render<P: LayoutProbe + ?Sized>(&mut self, probe: &P) -> RenderFrame {
        if self.is_static {
            self.current_index = 0;
            return RenderFrame {
                transform: Transform::None,
                active_item: None,
                active_dot: (self.item_count > 0).then_some(0),
                prev_disabled: true,
                next_disabled: true,
                is_static: true,
                current_index: 0,
                metrics: Metrics::static_layout(),
            };
        }

        let mut metrics = self.metrics(probe);
        if self.current_index > metrics.max_index {
            self.current_index = metrics.max_index;
            // Widths can vary per item: measure again at the landing index.
            metrics = self.metrics(probe);
            self.current_index = self.current_index.min(metrics.max_index);
        }
        let index = self.current_index;

        let mut offset = -(index as f64) * metrics.stride();
        let active_item = match self.mode {
            CarouselMode::Paged => None,
            CarouselMode::Centered => {
                offset += (metrics.container_width - metrics.item_width) / 2.0;
                (index < self.item_count).then_some(index)
            }
        };

        RenderFrame {
            transform: Transform::TranslateX(offset),
            active_item,
            active_dot: (index < self.item_count).then_some(index),
            prev_disabled: index == 0,
            next_disabled: index >= metrics.max_index,
            is_static: false,
            current_index: index,
            metrics,
        }
    }

    /// Jump to `index`, clamped into `[0, max_index]` of the metrics at
    /// the current position.
    pub fn go_to<P: LayoutProbe + ?Sized>(
        &mut self,
        probe: &P,
        index: usize,
    ) -> Option<RenderFrame> {
        if self.is_static {
            return None;
        }
        let metrics = self.metrics(probe);
        self.current_index = index.min(metrics.max_index);
        Some(self.render(probe))
    }

    /// Step forward, no-op at the last reachable index.
    pub fn next<P: LayoutProbe + ?Sized>(&mut self, probe: &P) -> Option<RenderFrame> {
        if self.is_static {
            return None;
        }
        let metrics = self.metrics(probe);
        if self.current_index >= metrics.max_index {
            return None;
        }
        self.current_index += 1;
        Some(self.render(probe))
    }

    /// Step back, no-op at index 0.
    pub fn previous<P: LayoutProbe + ?Sized>(&mut self, probe: &P) -> Option<RenderFrame> {
        if self.is_static || self.current_index == 0 {
            return None;
        }
        self.current_index -= 1;
        Some(self.render(probe))
    }

    /// Center mode selection: clicking a non-active item navigates to it.
    /// The click that closes a mouse swipe is ignored.
    pub fn select<P: LayoutProbe + ?Sized>(
        &mut self,
        probe: &P,
        index: usize,
    ) -> Option<RenderFrame> {
        if self.drag.take_swipe_click() {
            return None;
        }
        if self.mode != CarouselMode::Centered || index == self.current_index {
            return None;
        }
        self.go_to(probe, index)
    }

    pub fn pointer_down(&mut self, x: f64, source: PointerSource) {
        if self.is_static {
            return;
        }
        self.drag.press(x, source);
    }

    /// Finish a drag. Swipes beyond the threshold step once in the swipe
    /// direction; shorter movements count as taps.
    pub fn pointer_up<P: LayoutProbe + ?Sized>(
        &mut self,
        probe: &P,
        x: f64,
        source: PointerSource,
    ) -> Option<RenderFrame> {
        if self.is_static {
            self.drag.cancel(source);
            return None;
        }
        match self.drag.release(x, source)? {
            SwipeDirection::Next => self.next(probe),
            SwipeDirection::Previous => self.previous(probe),
        }
    }

    pub fn pointer_cancel(&mut self, source: PointerSource) {
        self.drag.cancel(source);
    }

    /// Debounced resize: re-evaluate the static decision if the policy
    /// asks for it, then re-render.
    pub fn resize<P: LayoutProbe + ?Sized>(&mut self, probe: &P) -> RenderFrame {
        if self.policy == StaticLayoutPolicy::RecomputeOnResize {
            let is_static = self.decide_static(probe.viewport_width());
            if is_static != self.is_static {
                log::debug!("carousel static layout changed to {is_static} on resize");
                self.is_static = is_static;
            }
        }
        self.render(probe)
    }
}
