//! WebAssembly bindings for site-core
//!
//! This module exposes the pure carousel engine to JavaScript via
//! `wasm-bindgen`, for hosts that measure the page themselves and only
//! want the positioning logic. Layouts are passed as plain objects
//! matching [`LayoutSnapshot`]; frames come back as plain objects.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::carousel::{Carousel as RustCarousel, CarouselMode};
use crate::config::{
    CarouselTuning, SiteConfig, DESKTOP_BREAKPOINT_PX, RESIZE_DEBOUNCE_MS, STATIC_MIN_ITEMS,
    SWIPE_THRESHOLD_PX,
};
use crate::gesture::PointerSource;
use crate::metrics::{resolve_metrics as rust_resolve_metrics, LayoutSnapshot};

/// Shared constants exposed to JavaScript
#[wasm_bindgen]
pub fn constants() -> JsValue {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Constants {
        swipe_threshold_px: f64,
        resize_debounce_ms: f64,
        static_min_items: usize,
        desktop_breakpoint_px: f64,
    }

    let c = Constants {
        swipe_threshold_px: SWIPE_THRESHOLD_PX,
        resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        static_min_items: STATIC_MIN_ITEMS,
        desktop_breakpoint_px: DESKTOP_BREAKPOINT_PX,
    };

    serde_wasm_bindgen::to_value(&c).unwrap_or_else(|_| JsValue::NULL)
}

/// Default site configuration as a plain object.
#[wasm_bindgen(js_name = "defaultConfig")]
pub fn default_config() -> JsValue {
    serde_wasm_bindgen::to_value(&SiteConfig::default()).unwrap_or_else(|_| JsValue::NULL)
}

fn layout_from_js(layout: JsValue) -> Result<LayoutSnapshot, JsValue> {
    serde_wasm_bindgen::from_value(layout).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn mode_from_flag(center_mode: bool) -> CarouselMode {
    if center_mode {
        CarouselMode::Centered
    } else {
        CarouselMode::Paged
    }
}

fn pointer_from_flag(touch: bool) -> PointerSource {
    if touch {
        PointerSource::Touch
    } else {
        PointerSource::Mouse
    }
}

fn frame_to_js<T: Serialize>(frame: Option<T>) -> JsValue {
    match frame {
        Some(frame) => serde_wasm_bindgen::to_value(&frame).unwrap_or_else(|_| JsValue::NULL),
        None => JsValue::NULL,
    }
}

/// Resolve carousel metrics for a measured layout.
#[wasm_bindgen(js_name = "resolveMetrics")]
pub fn resolve_metrics(
    layout: JsValue,
    center_mode: bool,
    current_index: usize,
    is_static: bool,
) -> Result<JsValue, JsValue> {
    let layout = layout_from_js(layout)?;
    let metrics = rust_resolve_metrics(
        &layout,
        mode_from_flag(center_mode),
        current_index,
        layout.item_widths.len(),
        is_static,
    );
    serde_wasm_bindgen::to_value(&metrics).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Carousel engine driven from JavaScript.
///
/// Every navigation method takes the current layout and returns the frame
/// to apply, or `null` when nothing changed.
#[wasm_bindgen]
pub struct Carousel {
    inner: RustCarousel,
}

#[wasm_bindgen]
impl Carousel {
    #[wasm_bindgen(constructor)]
    pub fn new(layout: JsValue, center_mode: bool, tuning: JsValue) -> Result<Carousel, JsValue> {
        let layout = layout_from_js(layout)?;
        let tuning: CarouselTuning = if tuning.is_undefined() || tuning.is_null() {
            CarouselTuning::default()
        } else {
            serde_wasm_bindgen::from_value(tuning).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Ok(Carousel {
            inner: RustCarousel::bind(
                &layout,
                mode_from_flag(center_mode),
                layout.item_widths.len(),
                &tuning,
            ),
        })
    }

    #[wasm_bindgen(getter, js_name = "currentIndex")]
    pub fn current_index(&self) -> usize {
        self.inner.current_index()
    }

    #[wasm_bindgen(getter, js_name = "isStatic")]
    pub fn is_static(&self) -> bool {
        self.inner.is_static()
    }

    pub fn render(&mut self, layout: JsValue) -> Result<JsValue, JsValue> {
        let layout = layout_from_js(layout)?;
        Ok(frame_to_js(Some(self.inner.render(&layout))))
    }

    #[wasm_bindgen(js_name = "goTo")]
    pub fn go_to(&mut self, layout: JsValue, index: usize) -> Result<JsValue, JsValue> {
        let layout = layout_from_js(layout)?;
        Ok(frame_to_js(self.inner.go_to(&layout, index)))
    }

    pub fn next(&mut self, layout: JsValue) -> Result<JsValue, JsValue> {
        let layout = layout_from_js(layout)?;
        Ok(frame_to_js(self.inner.next(&layout)))
    }

    pub fn previous(&mut self, layout: JsValue) -> Result<JsValue, JsValue> {
        let layout = layout_from_js(layout)?;
        Ok(frame_to_js(self.inner.previous(&layout)))
    }

    #[wasm_bindgen(js_name = "pointerDown")]
    pub fn pointer_down(&mut self, x: f64, touch: bool) {
        self.inner.pointer_down(x, pointer_from_flag(touch));
    }

    #[wasm_bindgen(js_name = "pointerUp")]
    pub fn pointer_up(&mut self, layout: JsValue, x: f64, touch: bool) -> Result<JsValue, JsValue> {
        let layout = layout_from_js(layout)?;
        Ok(frame_to_js(self.inner.pointer_up(&layout, x, pointer_from_flag(touch))))
    }

    pub fn resize(&mut self, layout: JsValue) -> Result<JsValue, JsValue> {
        let layout = layout_from_js(layout)?;
        Ok(frame_to_js(Some(self.inner.resize(&layout))))
    }
}
