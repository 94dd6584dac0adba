//! Sticky header, mobile menu and in-page anchor scrolling.

use serde::{Deserialize, Serialize};

use crate::config::HeaderTuning;

/// Class state of the header for one scroll position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderClasses {
    /// `header--scrolled`
    pub scrolled: bool,
    /// `header--hidden`
    pub hidden: bool,
}

/// Tracks the previous scroll offset so the header can hide while the
/// visitor scrolls down and reappear as soon as they scroll up.
#[derive(Clone, Debug)]
pub struct HeaderScroll {
    scrolled_after: f64,
    hide_after: f64,
    last_scroll: f64,
}

impl HeaderScroll {
    pub fn new(tuning: &HeaderTuning) -> Self {
        Self {
            scrolled_after: tuning.scrolled_after_px,
            hide_after: tuning.hide_after_px,
            last_scroll: 0.0,
        }
    }

    pub fn on_scroll(&mut self, y: f64) -> HeaderClasses {
        let classes = HeaderClasses {
            scrolled: y > self.scrolled_after,
            hidden: y > self.last_scroll && y > self.hide_after,
        };
        self.last_scroll = y;
        classes
    }
}

/// Why the mobile menu is being closed. Escape also returns focus to the
/// toggle button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuClose {
    LinkClicked,
    OutsideClick,
    Escape,
    /// The binding is being torn down for re-initialisation.
    Teardown,
}

/// Outcome of a menu transition the DOM layer must mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuChange {
    pub open: bool,
    pub refocus_toggle: bool,
}

/// Mobile menu open flag. Closing an already closed menu is a no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    open: bool,
}

impl Menu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> MenuChange {
        self.open = !self.open;
        MenuChange {
            open: self.open,
            refocus_toggle: false,
        }
    }

    pub fn close(&mut self, reason: MenuClose) -> Option<MenuChange> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(MenuChange {
            open: false,
            refocus_toggle: reason == MenuClose::Escape,
        })
    }
}

/// Section id an in-page link points at; `None` for a bare `#` or a
/// non-anchor href.
pub fn anchor_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

/// Scroll destination for a section: its top minus the sticky header and
/// a little breathing room.
pub fn scroll_destination(section_top: f64, header_height: f64, offset: f64) -> f64 {
    section_top - header_height - offset
}

/// The nav link that should be highlighted when section `section_id`
/// enters view, as an index into `hrefs`.
pub fn active_link<'a, I>(hrefs: I, section_id: &str) -> Option<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    hrefs
        .into_iter()
        .position(|href| anchor_target(href) == Some(section_id))
}
