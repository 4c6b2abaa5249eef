#![cfg(target_arch = "wasm32")]

use gloo_timers::future::TimeoutFuture;
use pretty_assertions::assert_eq;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, EventInit, KeyboardEvent, KeyboardEventInit};

use kbec_site::chrome::nav;
use kbec_site::components::{modal, slider};
use kbec_site::config::{ModalConfig, RevealGroupConfig};
use kbec_site::dom;
use kbec_site::engine::animator::{already_animated, animate_counter};
use kbec_site::engine::{apply_stagger, CounterConfig, RevealGroup};

wasm_bindgen_test_configure!(run_in_browser);

fn quick() -> CounterConfig {
    CounterConfig {
        duration_ms: 100,
        fps: 60,
    }
}

fn mount(tag: &str, class: &str, text: &str) -> Element {
    let document = dom::document().unwrap();
    let el = document.create_element(tag).unwrap();
    el.set_class_name(class);
    el.set_text_content(Some(text));
    document.body().unwrap().append_child(&el).unwrap();
    el
}

fn child(parent: &Element, tag: &str, class: &str) -> Element {
    let el = dom::document().unwrap().create_element(tag).unwrap();
    el.set_class_name(class);
    parent.append_child(&el).unwrap();
    el
}

/// Dispatches a bubbling, cancelable click. Returns `false` when a handler
/// prevented the default action.
fn click(target: &Element) -> bool {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("click", &init).unwrap();
    target.dispatch_event(&event).unwrap()
}

fn press(key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_bubbles(true);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    dom::document().unwrap().dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
async fn counter_ends_on_original_text() {
    let el = mount("span", "stat-number", "35,000+");
    animate_counter(el.clone(), &quick());
    assert!(already_animated(&el));

    TimeoutFuture::new(500).await;
    assert_eq!(el.text_content().unwrap(), "35,000+");
    el.remove();
}

#[wasm_bindgen_test]
async fn counter_ends_on_declared_target() {
    let el = mount("span", "stat-number", "0%");
    dom::set_attr(&el, "data-count", "95");
    animate_counter(el.clone(), &quick());

    TimeoutFuture::new(500).await;
    assert_eq!(el.text_content().unwrap(), "95%");
    el.remove();
}

#[wasm_bindgen_test]
async fn non_numeric_counter_is_left_alone() {
    let el = mount("span", "stat-number", "N/A");
    animate_counter(el.clone(), &quick());
    assert!(already_animated(&el));

    TimeoutFuture::new(200).await;
    assert_eq!(el.text_content().unwrap(), "N/A");
    el.remove();
}

#[wasm_bindgen_test]
async fn detached_counter_stops() {
    let el = mount("span", "stat-number", "500");
    animate_counter(el.clone(), &quick());
    el.remove();

    TimeoutFuture::new(300).await;
    assert_eq!(el.text_content().unwrap(), "500");
}

#[wasm_bindgen_test]
async fn visible_element_is_revealed_and_counted() {
    let el = mount("div", "fixture-reveal", "120");
    dom::set_style(&el, "height", "40px");

    let config = RevealGroupConfig {
        selector: ".fixture-reveal".to_string(),
        threshold: 0.5,
        counters: Some(".fixture-reveal".to_string()),
        ..Default::default()
    };
    let group = RevealGroup::attach(&config, &quick()).unwrap().unwrap();
    assert_eq!(group.len(), 1);

    TimeoutFuture::new(500).await;
    assert!(dom::has_class(&el, "visible"));
    assert!(already_animated(&el));
    assert_eq!(el.text_content().unwrap(), "120");

    drop(group);
    el.remove();
}

#[wasm_bindgen_test]
fn missing_selector_attaches_nothing() {
    let config = RevealGroupConfig {
        selector: ".nothing-matches-this".to_string(),
        ..Default::default()
    };
    assert!(RevealGroup::attach(&config, &quick()).unwrap().is_none());
}

#[wasm_bindgen_test]
fn stagger_sets_transition_delay() {
    let items: Vec<Element> = (0..3).map(|_| mount("div", "fixture-card", "")).collect();

    assert_eq!(apply_stagger(".fixture-card", 100), 3);
    let delays: Vec<String> = items
        .iter()
        .map(|el| el.get_attribute("style").unwrap_or_default())
        .collect();
    assert!(delays[1].contains("100ms"));
    assert!(delays[2].contains("200ms"));

    for el in items {
        el.remove();
    }
}

#[wasm_bindgen_test]
async fn counter_starts_once_across_groups() {
    let el = mount("div", "fixture-shared", "4,200");
    dom::set_style(&el, "height", "40px");

    let config = RevealGroupConfig {
        selector: ".fixture-shared".to_string(),
        threshold: 0.0,
        counters: Some(".fixture-shared".to_string()),
        ..Default::default()
    };
    let first = RevealGroup::attach(&config, &quick()).unwrap().unwrap();
    let second = RevealGroup::attach(&config, &quick()).unwrap().unwrap();

    TimeoutFuture::new(500).await;
    assert!(already_animated(&el));
    assert_eq!(el.text_content().unwrap(), "4,200");
    assert!(!animate_counter(el.clone(), &quick()));

    TimeoutFuture::new(100).await;
    assert_eq!(el.text_content().unwrap(), "4,200");

    drop(first);
    drop(second);
    el.remove();
}

#[wasm_bindgen_test]
fn marked_counter_is_not_restarted() {
    let el = mount("span", "stat-number", "75");
    assert!(animate_counter(el.clone(), &quick()));
    assert!(!animate_counter(el.clone(), &quick()));
    el.remove();
}

#[wasm_bindgen_test]
fn slider_follows_arrow_keys() {
    let hero = mount("div", "fixture-slider", "");
    let slides: Vec<Element> = (0..3).map(|_| child(&hero, "div", "slide")).collect();
    let listeners = slider::attach().unwrap();
    assert!(!listeners.is_empty());

    press("ArrowRight");
    assert!(dom::has_class(&slides[1], "active"));
    assert!(!dom::has_class(&slides[0], "active"));

    press("ArrowLeft");
    press("ArrowLeft");
    assert!(dom::has_class(&slides[2], "active"));

    drop(listeners);
    hero.remove();
}

#[wasm_bindgen_test]
async fn modal_opens_and_closes_on_escape() {
    let wrapper = mount("div", "fixture-modals", "");
    let trigger = child(&wrapper, "button", "monitoring-details-btn");
    dom::set_attr(&trigger, "data-modal", "fixture-modal");
    let dialog = child(&wrapper, "div", "monitoring-modal");
    dialog.set_id("fixture-modal");

    let listeners = modal::attach(&ModalConfig::default()).unwrap();
    assert!(dom::matches(&dialog, "[style*='display: none']"));

    click(&trigger);
    TimeoutFuture::new(100).await;
    assert!(dom::has_class(&dialog, "active"));
    assert!(dom::matches(&dialog, "[style*='display: flex']"));

    press("Escape");
    assert!(!dom::has_class(&dialog, "active"));
    TimeoutFuture::new(500).await;
    assert!(dom::matches(&dialog, "[style*='display: none']"));

    drop(listeners);
    wrapper.remove();
}

fn dropdown_menu() -> (Element, Vec<Element>, Vec<Element>) {
    let menu = mount("ul", "fixture-menu", "");
    let mut items = Vec::new();
    let mut links = Vec::new();
    for _ in 0..2 {
        let item = child(&menu, "li", "nav-item has-dropdown");
        let link = child(&item, "a", "nav-link");
        dom::set_attr(&link, "href", "#");
        items.push(item);
        links.push(link);
    }
    (menu, items, links)
}

#[wasm_bindgen_test]
fn narrow_dropdown_link_opens_submenu() {
    let (menu, items, links) = dropdown_menu();
    let listeners = nav::attach(f64::MAX).unwrap();

    assert!(!click(&links[0]));
    assert!(dom::has_class(&items[0], "active"));

    assert!(!click(&links[1]));
    assert!(dom::has_class(&items[1], "active"));
    assert!(!dom::has_class(&items[0], "active"));

    drop(listeners);
    menu.remove();
}

#[wasm_bindgen_test]
fn wide_dropdown_link_navigates() {
    let (menu, items, links) = dropdown_menu();
    let listeners = nav::attach(0.0).unwrap();

    assert!(click(&links[0]));
    assert!(!dom::has_class(&items[0], "active"));

    drop(listeners);
    menu.remove();
}
