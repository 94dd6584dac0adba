//! Animated statistics counters.

use crate::metrics::parse_leading_number;

/// `1 - (1 - p)^3`, with `p` clamped to `[0, 1]`.
#[inline]
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

#[derive(Clone, Debug, PartialEq)]
pub struct CounterTarget {
    pub target: f64,
    /// Show one decimal instead of flooring to an integer.
    pub decimal: bool,
    pub suffix: String,
    pub duration_ms: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CounterFrame {
    pub text: String,
    pub done: bool,
}

impl CounterTarget {
    /// Build from the `data-target`, `data-decimal` and `data-suffix`
    /// attributes. A missing or non-numeric target disables the counter.
    pub fn from_attributes(
        target: Option<&str>,
        decimal: Option<&str>,
        suffix: Option<&str>,
        duration_ms: f64,
    ) -> Option<Self> {
        let target = target.and_then(parse_leading_number)?;
        Some(Self {
            target,
            decimal: decimal == Some("true"),
            suffix: suffix.unwrap_or_default().to_string(),
            duration_ms,
        })
    }

    /// Text to display `elapsed_ms` after the animation started.
    pub fn frame(&self, elapsed_ms: f64) -> CounterFrame {
        let progress = if self.duration_ms > 0.0 {
            (elapsed_ms / self.duration_ms).min(1.0)
        } else {
            1.0
        };
        let current = self.target * ease_out_cubic(progress);
        let value = if self.decimal {
            format!("{current:.1}")
        } else {
            format!("{}", current.floor())
        };
        CounterFrame {
            text: format!("{value}{}", self.suffix),
            done: progress >= 1.0,
        }
    }
}
