//! Stats counters, FAQ accordion, newsletter form and lazy images.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlFormElement, Window};

use site_core::accordion::Accordion;
use site_core::context::AppContext;
use site_core::counter::CounterTarget;
use site_core::forms::{ButtonState, LazySource, LazyStrategy, SubmitFeedback};

use crate::dom::{self, Observer};

type FrameSlots = Rc<RefCell<HashMap<usize, AnimationFrame>>>;

/// Counters count up once, the first time they are half visible.
pub struct StatsBinding {
    _observer: Observer,
    _frames: FrameSlots,
}

impl StatsBinding {
    pub fn bind(document: &Document, duration_ms: f64, context: &AppContext) -> Option<Self> {
        if !context.allows_motion() {
            return None;
        }
        let counters = dom::query_all_document(document, ".stat-item h3[data-target]");
        if counters.is_empty() {
            return None;
        }

        let frames: FrameSlots = Rc::new(RefCell::new(HashMap::new()));
        let slots = frames.clone();
        let tracked = counters.clone();
        let observer = Observer::new("0px", 0.5, move |entry, observer| {
            if !entry.is_intersecting() {
                return;
            }
            let element = entry.target();
            observer.unobserve(&element);
            let Some(index) = tracked.iter().position(|c| c == &element) else {
                return;
            };
            let target = CounterTarget::from_attributes(
                element.get_attribute("data-target").as_deref(),
                element.get_attribute("data-decimal").as_deref(),
                element.get_attribute("data-suffix").as_deref(),
                duration_ms,
            );
            if let Some(target) = target {
                animate(element, Rc::new(target), None, index, slots.clone());
            }
        })?;
        for counter in &counters {
            observer.observe(counter);
        }
        Some(Self {
            _observer: observer,
            _frames: frames,
        })
    }
}

fn animate(
    element: Element,
    target: Rc<CounterTarget>,
    start: Option<f64>,
    index: usize,
    slots: FrameSlots,
) {
    let next_slots = slots.clone();
    let handle = request_animation_frame(move |timestamp| {
        let start = start.unwrap_or(timestamp);
        let frame = target.frame(timestamp - start);
        element.set_text_content(Some(&frame.text));
        if frame.done {
            log::debug!("counter {index} finished at {}", frame.text);
        } else {
            animate(element, target, Some(start), index, next_slots);
        }
    });
    slots.borrow_mut().insert(index, handle);
}

pub fn bind_accordion(document: &Document) -> Vec<EventListener> {
    let triggers = dom::query_all_document(document, ".accordion__trigger");
    if triggers.is_empty() {
        return Vec::new();
    }
    let initial = triggers
        .iter()
        .map(|t| t.get_attribute("aria-expanded").as_deref() == Some("true"))
        .collect();
    let state = Rc::new(RefCell::new(Accordion::new(initial)));
    let triggers = Rc::new(triggers);

    (0..triggers.len())
        .map(|index| {
            let state = state.clone();
            let all = triggers.clone();
            EventListener::new(&triggers[index], "click", move |_| {
                state.borrow_mut().toggle(index);
                let state = state.borrow();
                for (i, trigger) in all.iter().enumerate() {
                    let expanded = state.is_expanded(i);
                    let value = if expanded { "true" } else { "false" };
                    dom::set_attr(trigger, "aria-expanded", value);
                    if let Some(panel) = trigger.next_element_sibling() {
                        dom::set_hidden(&panel, !expanded);
                    }
                }
            })
        })
        .collect()
}

/// Newsletter submission shows a confirmation on the button for a few
/// seconds; nothing is sent anywhere. Dropping the binding puts the
/// button back at once.
pub struct NewsletterBinding {
    form: HtmlFormElement,
    button: HtmlButtonElement,
    feedback: Rc<RefCell<SubmitFeedback>>,
    _listener: EventListener,
    _revert: Rc<RefCell<Option<Timeout>>>,
}

impl NewsletterBinding {
    pub fn bind(document: &Document, success_label: &str, revert_ms: u32) -> Option<Self> {
        let form: HtmlFormElement =
            dom::query_document(document, ".newsletter__form")?.dyn_into().ok()?;
        let button: HtmlButtonElement = dom::query(&form, "button")?.dyn_into().ok()?;
        let feedback = Rc::new(RefCell::new(SubmitFeedback::new(
            button.text_content().unwrap_or_default(),
            success_label,
            revert_ms,
        )));
        let revert = Rc::new(RefCell::new(None));

        let listener = {
            let feedback = feedback.clone();
            let button = button.clone();
            let form = form.clone();
            let timer = revert.clone();
            EventListener::new_with_options(
                &form.clone(),
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    let Some(shown) = feedback.borrow_mut().submit() else {
                        return;
                    };
                    apply_button(&button, &form, &shown);
                    log::info!("newsletter subscription acknowledged");

                    let feedback = feedback.clone();
                    let button = button.clone();
                    let form = form.clone();
                    let delay = feedback.borrow().revert_after_ms();
                    *timer.borrow_mut() = Some(Timeout::new(delay, move || {
                        if let Some(reverted) = feedback.borrow_mut().revert() {
                            apply_button(&button, &form, &reverted);
                        }
                    }));
                },
            )
        };
        Some(Self {
            form,
            button,
            feedback,
            _listener: listener,
            _revert: revert,
        })
    }

    pub fn is_confirming(&self) -> bool {
        self.feedback.borrow().is_showing()
    }
}

impl Drop for NewsletterBinding {
    fn drop(&mut self) {
        let reverted = self.feedback.borrow_mut().revert();
        if let Some(reverted) = reverted {
            apply_button(&self.button, &self.form, &reverted);
        }
    }
}

fn apply_button(button: &HtmlButtonElement, form: &HtmlFormElement, state: &ButtonState) {
    button.set_text_content(Some(&state.label));
    button.set_disabled(state.disabled);
    if state.reset_form {
        form.reset();
    }
}

fn load_image(image: &Element) {
    let source = LazySource::from_data(
        image.get_attribute("data-src"),
        image.get_attribute("data-srcset"),
    );
    let Some(source) = source else {
        return;
    };
    if let Some(src) = &source.src {
        dom::set_attr(image, "src", src);
    }
    if let Some(srcset) = &source.srcset {
        dom::set_attr(image, "srcset", srcset);
    }
    let _ = image.remove_attribute("data-src");
    let _ = image.remove_attribute("data-srcset");
    dom::set_class(image, "is-loaded", true);
}

/// Fill in deferred `data-src` images. Only browsers without native lazy
/// loading need the observer.
pub fn bind_lazy_images(window: &Window, document: &Document) -> Option<Observer> {
    let images = dom::query_all_document(document, "img[data-src], img[data-srcset]");
    if images.is_empty() {
        return None;
    }
    let native = document
        .create_element("img")
        .ok()
        .is_some_and(|probe| js_sys::Reflect::has(&probe, &"loading".into()).unwrap_or(false));
    let strategy = LazyStrategy::detect(native, dom::has_global(window, "IntersectionObserver"));
    log::debug!("lazy images: {} deferred, strategy {strategy:?}", images.len());

    if strategy.loads_immediately() {
        images.iter().for_each(load_image);
        return None;
    }

    let observer = Observer::new("200px", 0.0, |entry, observer| {
        if entry.is_intersecting() {
            let image = entry.target();
            observer.unobserve(&image);
            load_image(&image);
        }
    });
    match observer {
        Some(observer) => {
            images.iter().for_each(|image| observer.observe(image));
            Some(observer)
        }
        None => {
            images.iter().for_each(load_image);
            None
        }
    }
}
