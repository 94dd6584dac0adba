//! BlackBird Capital site runtime
//!
//! WebAssembly entry point binding the `site-core` state machines to the
//! page: header and menu, smooth scrolling, the fund and team carousels,
//! counters, accordion, team modal, newsletter form, lazy images and the
//! maintenance popup.
//!
//! Initialisation runs once the DOM is ready. `window.BlackBirdCapital`
//! exposes the live state and a `reinit()` for debugging; re-running
//! initialisation first tears down the previous bindings.

use std::cell::RefCell;

use gloo::events::EventListener;
use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

use site_core::config::SiteConfig;

pub mod app;
pub mod carousel;
pub mod dialogs;
pub mod dom;
pub mod header;
pub mod logging;
pub mod widgets;

pub use app::App;

const GLOBAL_NAME: &str = "BlackBirdCapital";

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static CONFIG: RefCell<SiteConfig> = RefCell::new(SiteConfig::default());
}

#[wasm_bindgen(start)]
pub fn start() {
    let config = SiteConfig::default();
    logging::init(config.level_filter());
    install_global();

    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", move |_| boot(config)).forget();
    } else {
        boot(config);
    }
}

/// Replace the running bindings with a fresh initialisation.
fn boot(config: SiteConfig) {
    let previous = APP.with(|slot| slot.borrow_mut().take());
    if previous.is_some() {
        log::debug!("detaching previous bindings");
    }
    drop(previous);

    let app = App::init(&config);
    CONFIG.with(|slot| *slot.borrow_mut() = config);
    APP.with(|slot| *slot.borrow_mut() = app);
}

/// Run initialisation again with the current configuration.
#[wasm_bindgen]
pub fn reinit() {
    let config = CONFIG.with(|slot| slot.borrow().clone());
    boot(config);
}

/// Re-initialise with a configuration object. Missing fields take the
/// defaults.
#[wasm_bindgen(js_name = "initWithConfig")]
pub fn init_with_config(config: JsValue) -> Result<(), JsValue> {
    let config: SiteConfig = if config.is_undefined() || config.is_null() {
        SiteConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    config.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
    logging::init(config.level_filter());
    boot(config);
    Ok(())
}

/// Snapshot of the shared application state, `null` before initialisation.
#[wasm_bindgen]
pub fn state() -> JsValue {
    APP.with(|slot| {
        slot.borrow()
            .as_ref()
            .and_then(|app| serde_wasm_bindgen::to_value(&app.snapshot()).ok())
            .unwrap_or(JsValue::NULL)
    })
}

/// Publish `window.BlackBirdCapital = { state, reinit }`, with `state` a
/// live getter.
fn install_global() {
    let Some(window) = dom::window() else {
        return;
    };
    let api = Object::new();

    let getter = Closure::<dyn Fn() -> JsValue>::new(state).into_js_value();
    let descriptor = Object::new();
    let _ = Reflect::set(&descriptor, &"get".into(), &getter);
    let _ = Reflect::set(&descriptor, &"enumerable".into(), &JsValue::TRUE);
    Object::define_property(&api, &"state".into(), &descriptor);

    let reinit_fn = Closure::<dyn Fn()>::new(reinit).into_js_value();
    let _ = Reflect::set(&api, &"reinit".into(), &reinit_fn);

    if Reflect::set(&window, &GLOBAL_NAME.into(), &api).is_err() {
        log::warn!("could not publish window.{GLOBAL_NAME}");
    }
}
