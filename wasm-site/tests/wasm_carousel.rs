use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use site_core::config::{CarouselConfig, CarouselTuning};
use site_core::context::AppContext;
use site_core::StaticLayoutPolicy;
use wasm_site::carousel::CarouselBinding;

wasm_bindgen_test_configure!(run_in_browser);

const CARD_STYLE: &str = "flex:0 0 200px;width:200px;height:10px";

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Mount a fixed-size paged carousel: 800px viewport box, 200px cards, 32px gap.
fn mount(prefix: &str, items: usize) -> (Element, CarouselConfig) {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    let cards: String = (0..items)
        .map(|i| format!(r#"<div class="card" style="{CARD_STYLE}">{i}</div>"#))
        .collect();
    root.set_inner_html(&format!(
        r#"<div style="width:800px;overflow:hidden">
             <div id="{prefix}-track" style="display:flex;gap:32px">{cards}</div>
           </div>
           <button id="{prefix}-prev" type="button">prev</button>
           <button id="{prefix}-next" type="button">next</button>
           <div class="{prefix}-dots"></div>"#
    ));
    doc.body().unwrap().append_child(&root).unwrap();

    let config = CarouselConfig {
        track_id: format!("{prefix}-track"),
        prev_button_id: format!("{prefix}-prev"),
        next_button_id: format!("{prefix}-next"),
        dots_selector: format!(".{prefix}-dots"),
        item_selector: ".card".into(),
        ..CarouselConfig::funds()
    };
    (root, config)
}

fn bind(config: &CarouselConfig, tuning: &CarouselTuning) -> Option<CarouselBinding> {
    let window = web_sys::window().unwrap();
    let context = Rc::new(RefCell::new(AppContext::new(false)));
    CarouselBinding::bind(&window, &document(), config, tuning, context)
}

fn button(id: &str) -> HtmlButtonElement {
    document().get_element_by_id(id).unwrap().dyn_into().unwrap()
}

fn transform(id: &str) -> String {
    let track: HtmlElement = document().get_element_by_id(id).unwrap().dyn_into().unwrap();
    track.style().get_property_value("transform").unwrap()
}

fn dots(prefix: &str) -> Vec<Element> {
    let list = document()
        .query_selector_all(&format!(".{prefix}-dots button"))
        .unwrap();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Wide breakpoint so the viewport of the test browser never triggers the
/// static layout.
fn sliding() -> CarouselTuning {
    CarouselTuning {
        desktop_breakpoint_px: f64::INFINITY,
        ..CarouselTuning::default()
    }
}

#[wasm_bindgen_test]
fn binding_creates_one_dot_per_item() {
    let (root, config) = mount("dots", 6);
    let binding = bind(&config, &sliding()).expect("track present");

    let dots = dots("dots");
    assert_eq!(dots.len(), 6);
    assert_eq!(dots[0].get_attribute("aria-label").as_deref(), Some("Ir al fondo 1"));
    assert!(dots[0].class_list().contains("active"));
    assert_eq!(binding.current_index(), 0);
    assert!(button("dots-prev").disabled());
    assert!(!button("dots-next").disabled());

    drop(binding);
    root.remove();
}

#[wasm_bindgen_test]
fn next_click_translates_by_one_stride() {
    let (root, config) = mount("step", 6);
    let binding = bind(&config, &sliding()).unwrap();

    button("step-next").click();
    assert_eq!(binding.current_index(), 1);
    assert_eq!(transform("step-track"), "translateX(-232px)");
    assert!(!button("step-prev").disabled());
    assert!(dots("step")[1].class_list().contains("active"));

    // Three cards fit, so index 3 is the last page.
    button("step-next").click();
    button("step-next").click();
    button("step-next").click();
    assert_eq!(binding.current_index(), 3);
    assert!(button("step-next").disabled());

    drop(binding);
    root.remove();
}

#[wasm_bindgen_test]
fn dot_click_jumps_to_item() {
    let (root, config) = mount("jump", 6);
    let binding = bind(&config, &sliding()).unwrap();

    dots("jump")[2].dyn_ref::<HtmlElement>().unwrap().click();
    assert_eq!(binding.current_index(), 2);
    assert_eq!(transform("jump-track"), "translateX(-464px)");

    drop(binding);
    root.remove();
}

#[wasm_bindgen_test]
fn short_paged_carousel_is_static() {
    let (root, config) = mount("still", 3);
    let tuning = CarouselTuning {
        desktop_breakpoint_px: 0.0,
        static_policy: StaticLayoutPolicy::FixedAtBind,
        ..CarouselTuning::default()
    };
    let binding = bind(&config, &tuning).unwrap();

    assert!(binding.is_static());
    assert_eq!(transform("still-track"), "none");
    assert!(document()
        .get_element_by_id("still-track")
        .unwrap()
        .class_list()
        .contains("is-static"));
    assert!(button("still-prev").disabled());
    assert!(button("still-next").disabled());

    button("still-next").click();
    assert_eq!(binding.current_index(), 0);

    drop(binding);
    root.remove();
}

#[wasm_bindgen_test]
fn missing_track_is_skipped() {
    let config = CarouselConfig {
        track_id: "no-such-track".into(),
        ..CarouselConfig::funds()
    };
    assert!(bind(&config, &sliding()).is_none());
}

#[wasm_bindgen_test]
fn dropped_binding_stops_listening() {
    let (root, config) = mount("gone", 6);
    let binding = bind(&config, &sliding()).unwrap();
    drop(binding);

    button("gone-next").click();
    assert_eq!(transform("gone-track"), "translateX(0px)");

    root.remove();
}

#[wasm_bindgen_test]
fn rebinding_reuses_existing_dots() {
    let (root, config) = mount("again", 5);
    let first = bind(&config, &sliding()).unwrap();
    drop(first);
    let second = bind(&config, &sliding()).unwrap();

    assert_eq!(dots("again").len(), 5);
    button("again-next").click();
    assert_eq!(second.current_index(), 1);

    drop(second);
    root.remove();
}
