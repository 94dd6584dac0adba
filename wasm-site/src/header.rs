//! Sticky header, mobile menu, active section highlighting and smooth
//! anchor scrolling.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, KeyboardEvent, ScrollBehavior, ScrollToOptions, Window,
};

use site_core::config::HeaderTuning;
use site_core::context::AppContext;
use site_core::header::{
    active_link, anchor_target, scroll_destination, HeaderScroll, Menu, MenuChange, MenuClose,
};
use site_core::timing::FrameThrottle;

use crate::dom::{self, Observer};

/// Dropping the binding closes an open mobile menu.
pub struct HeaderBinding {
    menu: Option<Rc<MenuView>>,
    _listeners: Vec<EventListener>,
    _frame: Rc<RefCell<Option<AnimationFrame>>>,
    _sections: Option<Observer>,
}

impl HeaderBinding {
    /// `None` when the page has no `.header`.
    pub fn bind(
        window: &Window,
        document: &Document,
        tuning: &HeaderTuning,
        context: Rc<RefCell<AppContext>>,
    ) -> Option<Self> {
        let header = dom::query_document(document, ".header")?;
        let links = dom::query_all_document(document, ".nav__link");
        let mut listeners = Vec::new();

        let frame = Rc::new(RefCell::new(None));
        listeners.push(scroll_listener(window, header, tuning, frame.clone()));

        let toggle = dom::query_document(document, ".nav__toggle");
        let menu_el = dom::query_document(document, ".nav__menu");
        let menu = match (toggle, menu_el) {
            (Some(toggle), Some(menu_el)) => {
                let view = Rc::new(MenuView {
                    toggle,
                    menu: menu_el,
                    state: RefCell::new(Menu::default()),
                    context,
                });
                // Start closed whatever the markup says.
                view.apply(MenuChange {
                    open: false,
                    refocus_toggle: false,
                });
                listeners.extend(menu_listeners(document, &view, &links));
                Some(view)
            }
            _ => None,
        };

        let sections = section_observer(document, links);

        Some(Self {
            menu,
            _listeners: listeners,
            _frame: frame,
            _sections: sections,
        })
    }

    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(|m| m.state.borrow().is_open())
    }
}

impl Drop for HeaderBinding {
    fn drop(&mut self) {
        if let Some(menu) = &self.menu {
            menu.close(MenuClose::Teardown);
        }
    }
}

fn scroll_listener(
    window: &Window,
    header: Element,
    tuning: &HeaderTuning,
    frame: Rc<RefCell<Option<AnimationFrame>>>,
) -> EventListener {
    let state = Rc::new(RefCell::new(HeaderScroll::new(tuning)));
    let throttle = Rc::new(RefCell::new(FrameThrottle::new()));
    let win = window.clone();

    EventListener::new(window, "scroll", move |_| {
        if !throttle.borrow_mut().request() {
            return;
        }
        let state = state.clone();
        let throttle = throttle.clone();
        let header = header.clone();
        let win = win.clone();
        let handle = request_animation_frame(move |_| {
            let y = win.scroll_y().unwrap_or(0.0);
            let classes = state.borrow_mut().on_scroll(y);
            dom::set_class(&header, "header--scrolled", classes.scrolled);
            dom::set_class(&header, "header--hidden", classes.hidden);
            throttle.borrow_mut().complete();
        });
        *frame.borrow_mut() = Some(handle);
    })
}

struct MenuView {
    toggle: Element,
    menu: Element,
    state: RefCell<Menu>,
    context: Rc<RefCell<AppContext>>,
}

impl MenuView {
    fn apply(&self, change: MenuChange) {
        dom::set_attr(&self.toggle, "aria-expanded", if change.open { "true" } else { "false" });
        dom::set_class(&self.menu, "is-active", change.open);
        self.context.borrow_mut().menu_open = change.open;
        if change.refocus_toggle {
            dom::focus(&self.toggle);
        }
    }

    fn close(&self, reason: MenuClose) {
        let change = self.state.borrow_mut().close(reason);
        if let Some(change) = change {
            self.apply(change);
        }
    }
}

fn menu_listeners(
    document: &Document,
    view: &Rc<MenuView>,
    links: &[Element],
) -> Vec<EventListener> {
    let mut listeners = Vec::new();

    let v = view.clone();
    listeners.push(EventListener::new(&view.toggle, "click", move |_| {
        let change = v.state.borrow_mut().toggle();
        v.apply(change);
    }));

    for link in links {
        let v = view.clone();
        listeners.push(EventListener::new(link, "click", move |_| {
            v.close(MenuClose::LinkClicked);
        }));
    }

    let v = view.clone();
    listeners.push(EventListener::new(document, "click", move |event: &Event| {
        if !v.state.borrow().is_open() {
            return;
        }
        let target = event.target();
        let inside = dom::contains_target(&v.menu, target.clone())
            || dom::contains_target(&v.toggle, target);
        if !inside {
            v.close(MenuClose::OutsideClick);
        }
    }));

    let v = view.clone();
    listeners.push(EventListener::new(document, "keydown", move |event: &Event| {
        let is_escape = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|key| key.key() == "Escape");
        if is_escape {
            v.close(MenuClose::Escape);
        }
    }));

    listeners
}

/// Highlight the nav link of the section scrolled into view.
fn section_observer(document: &Document, links: Vec<Element>) -> Option<Observer> {
    let sections = dom::query_all_document(document, "section[id]");
    if sections.is_empty() || links.is_empty() {
        return None;
    }
    let observer = Observer::new("0px 0px -60% 0px", 0.2, move |entry, _| {
        if !entry.is_intersecting() {
            return;
        }
        let id = entry.target().id();
        let hrefs: Vec<String> = links
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect();
        let active = active_link(hrefs.iter().map(String::as_str), &id);
        for (i, link) in links.iter().enumerate() {
            dom::set_class(link, "nav__link--active", active == Some(i));
        }
    })?;
    for section in &sections {
        observer.observe(section);
    }
    Some(observer)
}

/// In-page anchors scroll smoothly below the sticky header and update
/// the URL hash without reloading. Off under reduced motion.
pub fn bind_smooth_scroll(
    window: &Window,
    document: &Document,
    tuning: &HeaderTuning,
    context: &AppContext,
) -> Vec<EventListener> {
    if !context.allows_motion() {
        return Vec::new();
    }
    let offset = tuning.smooth_scroll_offset_px;

    dom::query_all_document(document, "a[href^=\"#\"]")
        .into_iter()
        .map(|link| {
            let win = window.clone();
            let doc = document.clone();
            let href_source = link.clone();
            EventListener::new_with_options(
                &link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    let Some(href) = href_source.get_attribute("href") else {
                        return;
                    };
                    let Some(id) = anchor_target(&href) else {
                        return;
                    };
                    let target = doc
                        .get_element_by_id(id)
                        .and_then(|t| t.dyn_into::<HtmlElement>().ok());
                    let Some(target) = target else {
                        return;
                    };
                    event.prevent_default();

                    let header_height = dom::query_document(&doc, ".header")
                        .and_then(|h| h.dyn_into::<HtmlElement>().ok())
                        .map(|h| f64::from(h.offset_height()))
                        .unwrap_or(0.0);
                    let section_top = f64::from(target.offset_top());
                    let top = scroll_destination(section_top, header_height, offset);

                    let options = ScrollToOptions::new();
                    options.set_top(top);
                    options.set_behavior(ScrollBehavior::Smooth);
                    win.scroll_to_with_scroll_to_options(&options);

                    if let Ok(history) = win.history() {
                        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&href));
                    }
                },
            )
        })
        .collect()
}
