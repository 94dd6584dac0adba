//! Application context shared by the page components.
//!
//! Components receive the context explicitly at init time instead of
//! reaching for a global. Carousels keep their own position and only
//! publish it here so the debugging snapshot stays current.

use serde::{Deserialize, Serialize};

use crate::carousel::CarouselSlot;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppContext {
    pub menu_open: bool,
    pub modal_open: bool,
    pub prefers_reduced_motion: bool,
    pub current_fund_index: usize,
    pub current_team_index: usize,
}

impl AppContext {
    pub fn new(prefers_reduced_motion: bool) -> Self {
        Self {
            prefers_reduced_motion,
            ..Self::default()
        }
    }

    pub fn publish_index(&mut self, slot: CarouselSlot, index: usize) {
        match slot {
            CarouselSlot::Funds => self.current_fund_index = index,
            CarouselSlot::Team => self.current_team_index = index,
        }
    }

    pub fn index(&self, slot: CarouselSlot) -> usize {
        match slot {
            CarouselSlot::Funds => self.current_fund_index,
            CarouselSlot::Team => self.current_team_index,
        }
    }

    /// Motion-dependent enhancements (smooth scroll, counters) stay off
    /// for visitors who asked the OS for reduced motion.
    pub fn allows_motion(&self) -> bool {
        !self.prefers_reduced_motion
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
