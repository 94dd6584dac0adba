use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount_page() -> Element {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_inner_html(
        r#"<section class="funds">
             <div style="width:800px;overflow:hidden">
               <div id="funds-track" style="display:flex;gap:32px">
                 <div class="fund-card" style="flex:0 0 200px">A</div>
                 <div class="fund-card" style="flex:0 0 200px">B</div>
                 <div class="fund-card" style="flex:0 0 200px">C</div>
                 <div class="fund-card" style="flex:0 0 200px">D</div>
                 <div class="fund-card" style="flex:0 0 200px">E</div>
               </div>
             </div>
             <div class="funds__controls">
               <button id="prevBtn" type="button">prev</button>
               <div class="carousel-dots"></div>
               <button id="nextBtn" type="button">next</button>
             </div>
           </section>
           <div class="faq">
             <button class="accordion__trigger" aria-expanded="true">one</button><div>1</div>
             <button class="accordion__trigger" aria-expanded="false">two</button>
             <div hidden>2</div>
           </div>"#,
    );
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

fn field(value: &JsValue, name: &str) -> JsValue {
    js_sys::Reflect::get(value, &name.into()).unwrap()
}

#[wasm_bindgen_test]
fn reinit_does_not_duplicate_dots() {
    let root = mount_page();
    wasm_site::reinit();
    wasm_site::reinit();

    let dots = document()
        .query_selector_all(".funds__controls .carousel-dots button")
        .unwrap();
    assert_eq!(dots.length(), 5);
    assert!(document().body().unwrap().class_list().contains("js-initialized"));

    root.remove();
    wasm_site::reinit();
}

#[wasm_bindgen_test]
fn state_tracks_fund_index() {
    let root = mount_page();
    wasm_site::reinit();

    let next: HtmlElement = document().get_element_by_id("nextBtn").unwrap().dyn_into().unwrap();
    next.click();

    let state = wasm_site::state();
    assert!(state.is_object());
    assert_eq!(field(&state, "currentFundIndex").as_f64(), Some(1.0));
    assert_eq!(field(&state, "menuOpen").as_bool(), Some(false));

    root.remove();
    wasm_site::reinit();
}

#[wasm_bindgen_test]
fn accordion_keeps_one_panel_open() {
    let root = mount_page();
    wasm_site::reinit();

    let triggers = document().query_selector_all(".accordion__trigger").unwrap();
    let second: HtmlElement = triggers.item(1).unwrap().dyn_into().unwrap();
    second.click();

    let first: Element = triggers.item(0).unwrap().dyn_into().unwrap();
    assert_eq!(first.get_attribute("aria-expanded").as_deref(), Some("false"));
    assert_eq!(second.get_attribute("aria-expanded").as_deref(), Some("true"));

    root.remove();
    wasm_site::reinit();
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let config = js_sys::Object::new();
    let carousel = js_sys::Object::new();
    js_sys::Reflect::set(&carousel, &"swipeThresholdPx".into(), &JsValue::from_f64(-1.0)).unwrap();
    js_sys::Reflect::set(&config, &"carousel".into(), &carousel).unwrap();

    let err = wasm_site::init_with_config(config.into()).unwrap_err();
    assert!(err.as_string().unwrap().contains("swipeThresholdPx"));
}
