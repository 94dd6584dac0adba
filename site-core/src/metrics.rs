//! Carousel geometry.
//!
//! The resolver reads the live layout through a [`LayoutProbe`] and turns
//! it into the handful of numbers the engine positions the track with:
//! item width, gap, how many items fit, and the last reachable index.
//! Absent elements read as zero; nothing here can fail.

use serde::{Deserialize, Serialize};

use crate::carousel::CarouselMode;
use crate::config::DEFAULT_GAP_PX;

/// Read-only view of the layout a carousel is rendered into.
pub trait LayoutProbe {
    /// Bounding width of the item at `index`, `None` when there is no such item.
    fn item_width(&self, index: usize) -> Option<f64>;
    /// Raw computed `gap` style of the track (`"32px"`, `"normal"`, ...).
    fn gap_style(&self) -> Option<String>;
    /// Client width of the track's parent, `None` when detached.
    fn container_width(&self) -> Option<f64>;
    /// Current viewport width, used for the static layout decision.
    fn viewport_width(&self) -> f64;
}

/// A layout captured as plain numbers, for callers that measure the page
/// themselves (JavaScript hosts, tests).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutSnapshot {
    pub item_widths: Vec<f64>,
    pub gap: Option<String>,
    pub container_width: Option<f64>,
    pub viewport_width: f64,
}

impl LayoutSnapshot {
    /// `count` items of equal width.
    pub fn uniform(
        count: usize,
        item_width: f64,
        gap: &str,
        container_width: f64,
        viewport_width: f64,
    ) -> Self {
        Self {
            item_widths: vec![item_width; count],
            gap: Some(gap.to_string()),
            container_width: Some(container_width),
            viewport_width,
        }
    }
}

impl LayoutProbe for LayoutSnapshot {
    fn item_width(&self, index: usize) -> Option<f64> {
        self.item_widths.get(index).copied()
    }

    fn gap_style(&self) -> Option<String> {
        self.gap.clone()
    }

    fn container_width(&self) -> Option<f64> {
        self.container_width
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub item_width: f64,
    pub gap: f64,
    pub visible_count: usize,
    pub max_index: usize,
    pub container_width: f64,
}

impl Metrics {
    /// Metrics of a carousel laid out statically: nothing moves.
    pub fn static_layout() -> Self {
        Self {
            item_width: 0.0,
            gap: 0.0,
            visible_count: 1,
            max_index: 0,
            container_width: 0.0,
        }
    }

    /// Distance between the leading edges of two neighbouring items.
    #[inline]
    pub fn stride(&self) -> f64 {
        self.item_width + self.gap
    }
}

/// Compute metrics for a carousel of `item_count` items positioned at
/// `current_index`.
///
/// The width is taken from the item currently on screen so variable width
/// cards report what is actually visible; the first item is the fallback.
pub fn resolve_metrics<P: LayoutProbe + ?Sized>(
    probe: &P,
    mode: CarouselMode,
    current_index: usize,
    item_count: usize,
    is_static: bool,
) -> Metrics {
    if is_static {
        return Metrics::static_layout();
    }

    let item_width = probe
        .item_width(current_index)
        .or_else(|| probe.item_width(0))
        .map(finite_or_zero)
        .unwrap_or(0.0);
    let gap = probe
        .gap_style()
        .and_then(|style| parse_leading_number(&style))
        .filter(|gap| *gap != 0.0)
        .unwrap_or(DEFAULT_GAP_PX);
    let container_width = probe.container_width().map(finite_or_zero).unwrap_or(0.0);

    let visible_count = match mode {
        CarouselMode::Centered => 1,
        CarouselMode::Paged => {
            let fit = (container_width + gap) / (item_width + gap);
            if fit.is_finite() && fit >= 1.0 {
                fit.floor() as usize
            } else {
                1
            }
        }
    };
    let max_index = match mode {
        CarouselMode::Centered => item_count.saturating_sub(1),
        CarouselMode::Paged => item_count.saturating_sub(visible_count),
    };

    Metrics {
        item_width,
        gap,
        visible_count,
        max_index,
        container_width,
    }
}

/// Parse the longest numeric prefix of a CSS value, the way browsers
/// read `"24px"` as 24. Returns `None` for values such as `"normal"`.
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let candidate_len = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    // Shrink until the prefix parses: "12.5e" -> "12.5".
    (1..=candidate_len)
        .rev()
        .find_map(|len| trimmed[..len].parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
