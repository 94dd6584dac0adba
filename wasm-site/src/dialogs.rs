//! Team details modal and maintenance popup.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent};

use site_core::context::AppContext;
use site_core::dialog::{Dialog, DialogClose, MemberDetails};

use crate::dom;

const OPEN_CLASS: &str = "is-open";
const BODY_LOCK_CLASS: &str = "modal-open";
const POPUP_VISIBLE_CLASS: &str = "is-visible";
const POPUP_DISMISSED_ATTR: &str = "data-popup-dismissed";

fn escape_pressed(event: &Event) -> bool {
    event
        .dyn_ref::<KeyboardEvent>()
        .is_some_and(|key| key.key() == "Escape")
}

/// Clicks on the overlay itself, not on its content, count as backdrop clicks.
fn is_backdrop_click(overlay: &Element, event: &Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|target| &target == overlay)
}

struct ModalView {
    modal: Element,
    body: Option<Element>,
    state: RefCell<Dialog<Element>>,
    context: Rc<RefCell<AppContext>>,
}

impl ModalView {
    fn open(&self, opener: Element, details: &MemberDetails) {
        if !self.state.borrow_mut().open(Some(opener)) {
            return;
        }
        for slot in dom::query_all(&self.modal, "[data-modal-field]") {
            let field = slot.get_attribute("data-modal-field").unwrap_or_default();
            if let Some(value) = details.field(&field) {
                slot.set_text_content(Some(value));
            }
        }
        dom::set_class(&self.modal, OPEN_CLASS, true);
        dom::set_attr(&self.modal, "aria-hidden", "false");
        if let Some(body) = &self.body {
            dom::set_class(body, BODY_LOCK_CLASS, true);
        }
        self.context.borrow_mut().modal_open = true;
        if let Some(close) = dom::query(&self.modal, "[data-modal-close]") {
            dom::focus(&close);
        }
        log::debug!("team modal opened for {}", details.name);
    }

    fn close(&self, reason: DialogClose) {
        let closed = self.state.borrow_mut().close(reason);
        let Some(opener) = closed else {
            return;
        };
        self.hide();
        self.context.borrow_mut().modal_open = false;
        if let Some(opener) = opener.filter(|_| reason.restores_focus()) {
            dom::focus(&opener);
        }
    }

    fn hide(&self) {
        dom::set_class(&self.modal, OPEN_CLASS, false);
        dom::set_attr(&self.modal, "aria-hidden", "true");
        if let Some(body) = &self.body {
            dom::set_class(body, BODY_LOCK_CLASS, false);
        }
    }
}

fn member_details(member: &Element) -> MemberDetails {
    MemberDetails {
        name: member.get_attribute("data-name").unwrap_or_default(),
        role: member.get_attribute("data-role").unwrap_or_default(),
        bio: member.get_attribute("data-bio").unwrap_or_default(),
    }
}

/// `#teamModal`, opened from a `[data-modal-open]` control inside a
/// `.team-member`. Dropping the binding closes the modal and unlocks the
/// page.
pub struct TeamModalBinding {
    view: Rc<ModalView>,
    _listeners: Vec<EventListener>,
}

impl TeamModalBinding {
    pub fn bind(document: &Document, context: Rc<RefCell<AppContext>>) -> Option<Self> {
        let modal = document.get_element_by_id("teamModal")?;
        let view = Rc::new(ModalView {
            modal,
            body: document.body().map(Element::from),
            state: RefCell::new(Dialog::default()),
            context,
        });
        // Start closed whatever the markup says.
        view.hide();
        let mut listeners = Vec::new();

        for opener in dom::query_all_document(document, ".team-member [data-modal-open]") {
            let Some(member) = opener.closest(".team-member").ok().flatten() else {
                continue;
            };
            let v = view.clone();
            let trigger = opener.clone();
            listeners.push(EventListener::new(&opener, "click", move |event: &Event| {
                // Opening details must not also select the member in the carousel.
                event.stop_propagation();
                v.open(trigger.clone(), &member_details(&member));
            }));
        }

        for close in dom::query_all(&view.modal, "[data-modal-close]") {
            let v = view.clone();
            listeners.push(EventListener::new(&close, "click", move |_| {
                v.close(DialogClose::CloseButton);
            }));
        }

        let v = view.clone();
        listeners.push(EventListener::new(&view.modal, "click", move |event: &Event| {
            if is_backdrop_click(&v.modal, event) {
                v.close(DialogClose::Backdrop);
            }
        }));

        let v = view.clone();
        listeners.push(EventListener::new(document, "keydown", move |event: &Event| {
            if escape_pressed(event) {
                v.close(DialogClose::Escape);
            }
        }));

        Some(Self {
            view,
            _listeners: listeners,
        })
    }

    pub fn is_open(&self) -> bool {
        self.view.state.borrow().is_open()
    }
}

impl Drop for TeamModalBinding {
    fn drop(&mut self) {
        self.view.close(DialogClose::Teardown);
    }
}

/// `#maintenancePopup`, shown shortly after load until dismissed. A
/// dismissal is marked on the element, so re-binding on the same page
/// view neither re-shows nor hides it; nothing is persisted.
pub struct PopupBinding {
    _listeners: Vec<EventListener>,
    _show: Option<Timeout>,
}

impl PopupBinding {
    pub fn bind(document: &Document, delay_ms: u32) -> Option<Self> {
        let popup = document.get_element_by_id("maintenancePopup")?;
        let mut dialog = Dialog::default();
        let already_visible = dom::has_class(&popup, POPUP_VISIBLE_CLASS);
        if already_visible {
            dialog.open(None);
        }
        let state: Rc<RefCell<Dialog<()>>> = Rc::new(RefCell::new(dialog));

        let hide = {
            let popup = popup.clone();
            let state = state.clone();
            Rc::new(move |reason: DialogClose| {
                if state.borrow_mut().close(reason).is_some() {
                    dom::set_class(&popup, POPUP_VISIBLE_CLASS, false);
                    dom::set_attr(&popup, "aria-hidden", "true");
                    dom::set_attr(&popup, POPUP_DISMISSED_ATTR, "");
                }
            })
        };

        let mut listeners = Vec::new();
        for close in dom::query_all(&popup, "[data-popup-close]") {
            let hide = hide.clone();
            listeners.push(EventListener::new(&close, "click", move |_| {
                hide(DialogClose::CloseButton)
            }));
        }
        {
            let hide = hide.clone();
            let overlay = popup.clone();
            listeners.push(EventListener::new(&popup, "click", move |event: &Event| {
                if is_backdrop_click(&overlay, event) {
                    hide(DialogClose::Backdrop);
                }
            }));
        }
        listeners.push(EventListener::new(document, "keydown", move |event: &Event| {
            if escape_pressed(event) {
                hide(DialogClose::Escape);
            }
        }));

        let dismissed = popup.has_attribute(POPUP_DISMISSED_ATTR);
        let show = (!already_visible && !dismissed).then(|| {
            Timeout::new(delay_ms, move || {
                if state.borrow_mut().open(None) {
                    dom::set_class(&popup, POPUP_VISIBLE_CLASS, true);
                    dom::set_attr(&popup, "aria-hidden", "false");
                    log::info!("maintenance notice shown");
                }
            })
        });

        Some(Self {
            _listeners: listeners,
            _show: show,
        })
    }
}
