//! Site configuration.
//!
//! Every field has a default equal to the value the production page was
//! tuned with, so an empty JSON object (or no configuration at all)
//! yields the stock behaviour.

use serde::{Deserialize, Serialize};

use crate::carousel::{CarouselMode, CarouselSlot, StaticLayoutPolicy};
use crate::error::{Result, SiteError};

pub const SWIPE_THRESHOLD_PX: f64 = 50.0;
pub const RESIZE_DEBOUNCE_MS: f64 = 150.0;
pub const STATIC_MIN_ITEMS: usize = 4;
pub const DESKTOP_BREAKPOINT_PX: f64 = 1024.0;
pub const DEFAULT_GAP_PX: f64 = 32.0;

pub const HEADER_SCROLLED_AFTER_PX: f64 = 100.0;
pub const HEADER_HIDE_AFTER_PX: f64 = 300.0;
pub const SMOOTH_SCROLL_OFFSET_PX: f64 = 20.0;

pub const COUNTER_DURATION_MS: f64 = 1500.0;
pub const NEWSLETTER_REVERT_MS: u32 = 3000;
pub const NEWSLETTER_SUCCESS_LABEL: &str = "✓ Suscrito";
pub const POPUP_DELAY_MS: u32 = 1000;

/// Static description of one carousel on the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselConfig {
    pub track_id: String,
    pub prev_button_id: String,
    pub next_button_id: String,
    /// Selector of the container that receives one dot button per item.
    pub dots_selector: String,
    /// Item selector, scoped to the track.
    pub item_selector: String,
    pub mode: CarouselMode,
    /// Context field mirroring this instance's position.
    pub slot: CarouselSlot,
    /// Accessible label prefix for generated dots; the 1-based index is appended.
    #[serde(default)]
    pub dot_label: String,
}

impl CarouselConfig {
    pub fn funds() -> Self {
        Self {
            track_id: "funds-track".into(),
            prev_button_id: "prevBtn".into(),
            next_button_id: "nextBtn".into(),
            dots_selector: ".funds__controls .carousel-dots".into(),
            item_selector: ".fund-card".into(),
            mode: CarouselMode::Paged,
            slot: CarouselSlot::Funds,
            dot_label: "Ir al fondo".into(),
        }
    }

    pub fn team() -> Self {
        Self {
            track_id: "teamTrack".into(),
            prev_button_id: "teamPrevBtn".into(),
            next_button_id: "teamNextBtn".into(),
            dots_selector: ".team__controls .carousel-dots".into(),
            item_selector: ".team-member".into(),
            mode: CarouselMode::Centered,
            slot: CarouselSlot::Team,
            dot_label: "Ver miembro".into(),
        }
    }

    pub fn dot_label_for(&self, index: usize) -> String {
        format!("{} {}", self.dot_label, index + 1)
    }
}

/// Tunables shared by every carousel instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselTuning {
    pub swipe_threshold_px: f64,
    pub resize_debounce_ms: f64,
    pub static_min_items: usize,
    pub desktop_breakpoint_px: f64,
    pub static_policy: StaticLayoutPolicy,
}

impl Default for CarouselTuning {
    fn default() -> Self {
        Self {
            swipe_threshold_px: SWIPE_THRESHOLD_PX,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            static_min_items: STATIC_MIN_ITEMS,
            desktop_breakpoint_px: DESKTOP_BREAKPOINT_PX,
            static_policy: StaticLayoutPolicy::FixedAtBind,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderTuning {
    pub scrolled_after_px: f64,
    pub hide_after_px: f64,
    pub smooth_scroll_offset_px: f64,
}

impl Default for HeaderTuning {
    fn default() -> Self {
        Self {
            scrolled_after_px: HEADER_SCROLLED_AFTER_PX,
            hide_after_px: HEADER_HIDE_AFTER_PX,
            smooth_scroll_offset_px: SMOOTH_SCROLL_OFFSET_PX,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub carousels: Vec<CarouselConfig>,
    pub carousel: CarouselTuning,
    pub header: HeaderTuning,
    pub counter_duration_ms: f64,
    pub newsletter_revert_ms: u32,
    pub newsletter_success_label: String,
    pub popup_delay_ms: u32,
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            carousels: vec![CarouselConfig::funds(), CarouselConfig::team()],
            carousel: CarouselTuning::default(),
            header: HeaderTuning::default(),
            counter_duration_ms: COUNTER_DURATION_MS,
            newsletter_revert_ms: NEWSLETTER_REVERT_MS,
            newsletter_success_label: NEWSLETTER_SUCCESS_LABEL.into(),
            popup_delay_ms: POPUP_DELAY_MS,
            log_level: "info".into(),
        }
    }
}

impl SiteConfig {
    /// Decode and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SiteConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let tuning = &self.carousel;
        if !(tuning.swipe_threshold_px.is_finite() && tuning.swipe_threshold_px >= 0.0) {
            return Err(SiteError::InvalidConfig(format!(
                "swipeThresholdPx must be a non-negative number, got {}",
                tuning.swipe_threshold_px
            )));
        }
        if !(tuning.resize_debounce_ms.is_finite() && tuning.resize_debounce_ms >= 0.0) {
            return Err(SiteError::InvalidConfig(format!(
                "resizeDebounceMs must be a non-negative number, got {}",
                tuning.resize_debounce_ms
            )));
        }
        if !(tuning.desktop_breakpoint_px.is_finite() && tuning.desktop_breakpoint_px >= 0.0) {
            return Err(SiteError::InvalidConfig(format!(
                "desktopBreakpointPx must be a non-negative number, got {}",
                tuning.desktop_breakpoint_px
            )));
        }
        if !(self.counter_duration_ms.is_finite() && self.counter_duration_ms > 0.0) {
            return Err(SiteError::InvalidConfig(format!(
                "counterDurationMs must be positive, got {}",
                self.counter_duration_ms
            )));
        }
        if self.newsletter_revert_ms == 0 {
            return Err(SiteError::InvalidConfig(
                "newsletterRevertMs must be positive".into(),
            ));
        }
        for carousel in &self.carousels {
            let fields = [
                ("trackId", &carousel.track_id),
                ("prevButtonId", &carousel.prev_button_id),
                ("nextButtonId", &carousel.next_button_id),
                ("dotsSelector", &carousel.dots_selector),
                ("itemSelector", &carousel.item_selector),
            ];
            if let Some((name, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
                return Err(SiteError::InvalidConfig(format!(
                    "carousel {:?} has an empty {name}",
                    carousel.track_id
                )));
            }
        }
        if parse_level(&self.log_level).is_none() {
            return Err(SiteError::InvalidConfig(format!(
                "unknown logLevel {:?}",
                self.log_level
            )));
        }
        Ok(())
    }

    /// The configured log level, `Info` when unrecognised.
    pub fn level_filter(&self) -> log::LevelFilter {
        parse_level(&self.log_level).unwrap_or(log::LevelFilter::Info)
    }
}

fn parse_level(level: &str) -> Option<log::LevelFilter> {
    level.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_tuning() {
        let config = SiteConfig::default();
        assert_eq!(config.carousels.len(), 2);
        assert_eq!(config.carousels[0].mode, CarouselMode::Paged);
        assert_eq!(config.carousels[1].mode, CarouselMode::Centered);
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
        assert_eq!(config.carousel.resize_debounce_ms, 150.0);
        assert_eq!(config.newsletter_revert_ms, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn dot_labels_are_one_based() {
        assert_eq!(CarouselConfig::funds().dot_label_for(0), "Ir al fondo 1");
        assert_eq!(CarouselConfig::team().dot_label_for(2), "Ver miembro 3");
    }
}
