#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use room_mover::config::{AppConfig, MoverOptions, ViewBoxSpecs, CONFIG_ELEMENT_ID};
use room_mover::types::ControlMode;
use room_mover::{target_id, touchstart_listener};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, EventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn remove_config_element() {
    if let Some(element) = gloo_utils::document().get_element_by_id(CONFIG_ELEMENT_ID) {
        element.remove();
    }
}

fn insert_config_element(json: &str) -> Element {
    remove_config_element();
    let document = gloo_utils::document();
    let script = document.create_element("script").unwrap();
    script.set_id(CONFIG_ELEMENT_ID);
    script.set_attribute("type", "application/json").unwrap();
    script.set_text_content(Some(json));
    gloo_utils::body().append_child(&script).unwrap();
    script
}

#[wasm_bindgen_test]
fn reads_target_attribute() {
    let document = gloo_utils::document();
    let rect = document
        .create_element_ns(Some("http://www.w3.org/2000/svg"), "rect")
        .unwrap();
    rect.set_attribute("data-target", "rect-3").unwrap();
    assert_eq!(target_id(Some(rect.unchecked_into())), Some("rect-3".to_string()));
}

#[wasm_bindgen_test]
fn missing_attribute_yields_none() {
    let document = gloo_utils::document();
    let div = document.create_element("div").unwrap();
    assert_eq!(target_id(Some(div.unchecked_into())), None);
    assert_eq!(target_id(None), None);
}

#[wasm_bindgen_test]
fn config_without_element_is_default() {
    remove_config_element();
    assert_eq!(AppConfig::from_document(), AppConfig::default());
}

#[wasm_bindgen_test]
fn config_element_is_parsed() {
    let element = insert_config_element(
        r#"{"viewBox": "-10 0 400 300", "options": {"keepRatio": true, "mode": "warp"}}"#,
    );
    let config = AppConfig::from_document();
    element.remove();

    assert_eq!(config.view_box, ViewBoxSpecs::new(-10.0, 0.0, 400.0, 300.0).unwrap());
    assert_eq!(
        config.options,
        MoverOptions {
            keep_ratio: true,
            mode: ControlMode::Warp,
            ..MoverOptions::default()
        }
    );
}

#[wasm_bindgen_test]
fn malformed_config_element_falls_back_to_default() {
    for json in [r#"{"viewBox": "0 0 0 0"}"#, "{not json"] {
        let element = insert_config_element(json);
        let config = AppConfig::from_document();
        element.remove();
        assert_eq!(config, AppConfig::default());
    }
}

#[wasm_bindgen_test]
fn touchstart_listener_cancels_the_touch() {
    let div = gloo_utils::document().create_element("div").unwrap();
    let calls = Rc::new(Cell::new(0));
    let _listener = {
        let calls = calls.clone();
        touchstart_listener(&div, move |_event| calls.set(calls.get() + 1))
    };

    let init = EventInit::new();
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("touchstart", &init).unwrap();
    let not_cancelled = div.dispatch_event(&event).unwrap();

    assert!(!not_cancelled);
    assert!(event.default_prevented());
    assert_eq!(calls.get(), 1);
}
