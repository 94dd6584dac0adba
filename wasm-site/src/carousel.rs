//! Binds a [`site_core::Carousel`] to a track, its buttons and its dots.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, MouseEvent, TouchEvent, Window};

use site_core::carousel::{Carousel, CarouselMode, RenderFrame};
use site_core::config::{CarouselConfig, CarouselTuning};
use site_core::context::AppContext;
use site_core::gesture::PointerSource;
use site_core::timing::Debouncer;

use crate::dom::{self, DomLayout};

const ACTIVE_CLASS: &str = "active";
const STATIC_CLASS: &str = "is-static";

struct CarouselView {
    config: CarouselConfig,
    window: Window,
    track: Element,
    items: Vec<Element>,
    dots: Vec<Element>,
    prev: Option<HtmlButtonElement>,
    next: Option<HtmlButtonElement>,
    engine: RefCell<Carousel>,
    context: Rc<RefCell<AppContext>>,
}

impl CarouselView {
    fn layout(&self) -> DomLayout<'_> {
        DomLayout {
            window: &self.window,
            track: &self.track,
            items: &self.items,
        }
    }

    fn apply(&self, frame: &RenderFrame) {
        dom::set_style(&self.track, "transform", &frame.transform.css());
        dom::set_class(&self.track, STATIC_CLASS, frame.is_static);

        if self.config.mode == CarouselMode::Centered {
            for (i, item) in self.items.iter().enumerate() {
                dom::set_class(item, ACTIVE_CLASS, frame.is_item_active(i));
            }
        }
        for (i, dot) in self.dots.iter().enumerate() {
            dom::set_class(dot, ACTIVE_CLASS, frame.is_dot_active(i));
        }
        if let Some(prev) = &self.prev {
            prev.set_disabled(frame.prev_disabled);
        }
        if let Some(next) = &self.next {
            next.set_disabled(frame.next_disabled);
        }

        self.context
            .borrow_mut()
            .publish_index(self.config.slot, frame.current_index);
    }

    fn render(&self) {
        let layout = self.layout();
        let frame = self.engine.borrow_mut().render(&layout);
        self.apply(&frame);
    }

    fn resize(&self) {
        let layout = self.layout();
        let frame = self.engine.borrow_mut().resize(&layout);
        self.apply(&frame);
    }

    /// Run a navigation operation and apply its frame, if any.
    fn navigate<F>(&self, op: F)
    where
        F: FnOnce(&mut Carousel, &DomLayout<'_>) -> Option<RenderFrame>,
    {
        let layout = self.layout();
        let frame = {
            let mut engine = self.engine.borrow_mut();
            op(&mut *engine, &layout)
        };
        if let Some(frame) = frame {
            self.apply(&frame);
        }
    }
}

/// A live carousel. Dropping it detaches every listener and cancels a
/// pending resize.
pub struct CarouselBinding {
    view: Rc<CarouselView>,
    _listeners: Vec<EventListener>,
    _resize_timer: Rc<RefCell<Option<Timeout>>>,
}

impl CarouselBinding {
    /// Bind `config` on this page. `None` when the track is absent.
    pub fn bind(
        window: &Window,
        document: &Document,
        config: &CarouselConfig,
        tuning: &CarouselTuning,
        context: Rc<RefCell<AppContext>>,
    ) -> Option<Self> {
        let track: Element = dom::by_id(document, &config.track_id)?;
        let items = dom::query_all(&track, &config.item_selector);
        let dots = dom::query_document(document, &config.dots_selector)
            .map(|container| ensure_dots(document, &container, config, items.len()))
            .unwrap_or_default();

        let engine = Carousel::bind(
            &DomLayout {
                window,
                track: &track,
                items: &items,
            },
            config.mode,
            items.len(),
            tuning,
        );
        log::info!(
            "carousel #{} bound with {} items{}",
            config.track_id,
            items.len(),
            if engine.is_static() { " (static layout)" } else { "" }
        );

        let view = Rc::new(CarouselView {
            config: config.clone(),
            window: window.clone(),
            track,
            items,
            dots,
            prev: dom::by_id(document, &config.prev_button_id),
            next: dom::by_id(document, &config.next_button_id),
            engine: RefCell::new(engine),
            context,
        });

        let mut listeners = Vec::new();
        if let Some(prev) = &view.prev {
            let v = view.clone();
            listeners.push(EventListener::new(prev, "click", move |_| {
                v.navigate(|engine, layout| engine.previous(layout));
            }));
        }
        if let Some(next) = &view.next {
            let v = view.clone();
            listeners.push(EventListener::new(next, "click", move |_| {
                v.navigate(|engine, layout| engine.next(layout));
            }));
        }
        for (index, dot) in view.dots.iter().enumerate() {
            let v = view.clone();
            listeners.push(EventListener::new(dot, "click", move |_| {
                v.navigate(|engine, layout| engine.go_to(layout, index));
            }));
        }
        if config.mode == CarouselMode::Centered {
            for (index, item) in view.items.iter().enumerate() {
                let v = view.clone();
                listeners.push(EventListener::new(item, "click", move |_| {
                    v.navigate(|engine, layout| engine.select(layout, index));
                }));
            }
        }
        listeners.extend(drag_listeners(&view));

        let resize_timer = Rc::new(RefCell::new(None));
        let debouncer = Rc::new(RefCell::new(Debouncer::new(tuning.resize_debounce_ms)));
        {
            let v = view.clone();
            let timer = resize_timer.clone();
            listeners.push(EventListener::new(window, "resize", move |_| {
                debouncer.borrow_mut().event(dom::now_ms());
                arm_resize(v.clone(), debouncer.clone(), timer.clone());
            }));
        }

        view.render();
        Some(Self {
            view,
            _listeners: listeners,
            _resize_timer: resize_timer,
        })
    }

    pub fn current_index(&self) -> usize {
        self.view.engine.borrow().current_index()
    }

    pub fn is_static(&self) -> bool {
        self.view.engine.borrow().is_static()
    }
}

/// Schedule the debounced recomputation. Replacing the stored timeout
/// cancels the one armed by the previous event.
fn arm_resize(
    view: Rc<CarouselView>,
    debouncer: Rc<RefCell<Debouncer>>,
    timer: Rc<RefCell<Option<Timeout>>>,
) {
    let Some(deadline) = debouncer.borrow().deadline() else {
        return;
    };
    let wait = (deadline - dom::now_ms()).max(0.0).ceil() as u32;
    let slot = timer.clone();
    let timeout = Timeout::new(wait, move || {
        let due = debouncer.borrow_mut().poll(dom::now_ms());
        if due {
            log::debug!("carousel #{} resized", view.config.track_id);
            view.resize();
        } else {
            // Fired a hair early; wait out the remainder.
            arm_resize(view, debouncer, slot);
        }
    });
    *timer.borrow_mut() = Some(timeout);
}

/// Touch and mouse drags share one tracker inside the engine; only the
/// coordinate extraction differs per source.
fn drag_listeners(view: &Rc<CarouselView>) -> Vec<EventListener> {
    let track = view.track.clone();
    let mut listeners = Vec::new();

    let press = |source: PointerSource, kind: &'static str| {
        let v = view.clone();
        EventListener::new(&track, kind, move |event: &Event| {
            if let Some(x) = pointer_x(event, source, false) {
                v.engine.borrow_mut().pointer_down(x, source);
            }
        })
    };
    listeners.push(press(PointerSource::Touch, "touchstart"));
    listeners.push(press(PointerSource::Mouse, "mousedown"));

    let release = |source: PointerSource, kind: &'static str| {
        let v = view.clone();
        EventListener::new(&track, kind, move |event: &Event| {
            if let Some(x) = pointer_x(event, source, true) {
                v.navigate(|engine, layout| engine.pointer_up(layout, x, source));
            }
        })
    };
    listeners.push(release(PointerSource::Touch, "touchend"));
    listeners.push(release(PointerSource::Mouse, "mouseup"));

    {
        let v = view.clone();
        listeners.push(EventListener::new(&track, "touchcancel", move |_| {
            v.engine.borrow_mut().pointer_cancel(PointerSource::Touch);
        }));
    }
    {
        let v = view.clone();
        listeners.push(EventListener::new(&track, "mouseleave", move |_| {
            v.engine.borrow_mut().pointer_cancel(PointerSource::Mouse);
        }));
    }
    // Keep the browser from starting a native image/text drag mid-swipe.
    listeners.push(EventListener::new_with_options(
        &track,
        "dragstart",
        EventListenerOptions::enable_prevent_default(),
        |event: &Event| event.prevent_default(),
    ));

    listeners
}

fn pointer_x(event: &Event, source: PointerSource, released: bool) -> Option<f64> {
    match source {
        PointerSource::Touch => {
            let event = event.dyn_ref::<TouchEvent>()?;
            let touches = if released {
                event.changed_touches()
            } else {
                event.touches()
            };
            touches.get(0).map(|touch| f64::from(touch.client_x()))
        }
        PointerSource::Mouse => {
            let event = event.dyn_ref::<MouseEvent>()?;
            (event.button() == 0).then(|| f64::from(event.client_x()))
        }
    }
}

/// Reuse the dots already in `container` when there is one per item;
/// otherwise replace them with freshly created buttons.
fn ensure_dots(
    document: &Document,
    container: &Element,
    config: &CarouselConfig,
    count: usize,
) -> Vec<Element> {
    let existing = dom::query_all(container, "button");
    if existing.len() == count {
        return existing;
    }
    for stale in existing {
        stale.remove();
    }

    (0..count)
        .filter_map(|index| {
            let dot = document.create_element("button").ok()?;
            dom::set_attr(&dot, "type", "button");
            dom::set_attr(&dot, "aria-label", &config.dot_label_for(index));
            container.append_child(&dot).ok()?;
            Some(dot)
        })
        .collect()
}
