//! Overlay dialogs: the team details modal and the maintenance popup.
//!
//! Both share the same open/close rules. A dialog remembers which control
//! opened it so focus can be handed back on close.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogClose {
    CloseButton,
    Backdrop,
    Escape,
    /// The binding is being torn down for re-initialisation.
    Teardown,
}

impl DialogClose {
    /// Every user-driven close hands focus back to the opener.
    pub fn restores_focus(self) -> bool {
        self != DialogClose::Teardown
    }
}

/// State of one dialog. `O` identifies the opener (an element handle in
/// the browser, anything comparable in tests).
#[derive(Clone, Debug)]
pub struct Dialog<O> {
    open: bool,
    opener: Option<O>,
}

impl<O> Default for Dialog<O> {
    fn default() -> Self {
        Self {
            open: false,
            opener: None,
        }
    }
}

impl<O> Dialog<O> {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the dialog. Returns `false` if it was already open.
    pub fn open(&mut self, opener: Option<O>) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        self.opener = opener;
        true
    }

    /// Close the dialog, handing back the opener for focus restoration.
    /// `None` when the dialog was not open.
    pub fn close(&mut self, reason: DialogClose) -> Option<Option<O>> {
        if !self.open {
            return None;
        }
        log::debug!("dialog closed via {reason:?}");
        self.open = false;
        Some(self.opener.take())
    }
}

/// Content shown in the team modal, read from a member card's
/// `data-name`, `data-role` and `data-bio` attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetails {
    pub name: String,
    pub role: String,
    pub bio: String,
}

impl MemberDetails {
    /// Value for a `data-modal-field` slot.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "role" => Some(&self.role),
            "bio" => Some(&self.bio),
            _ => None,
        }
    }
}
