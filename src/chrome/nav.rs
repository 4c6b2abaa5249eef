//! Mobile menu toggle and dropdown menus.

use std::rc::Rc;

use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent};

use crate::dom::{self, Listener};
use crate::error::Result;

const ACTIVE: &str = "active";

pub fn is_mobile(width: f64, breakpoint: f64) -> bool {
    width <= breakpoint
}

fn close_menu(toggle: Option<&Element>, menu: Option<&Element>) {
    if let Some(toggle) = toggle {
        dom::remove_class(toggle, ACTIVE);
    }
    if let Some(menu) = menu {
        dom::remove_class(menu, ACTIVE);
    }
}

struct Dropdowns {
    items: Vec<Element>,
}

impl Dropdowns {
    fn collapse(&self, item: &Element) {
        dom::remove_class(item, ACTIVE);
        if let Some(arrow) = dom::query_within(item, ".dropdown-arrow") {
            dom::set_attr(&arrow, "aria-expanded", "false");
        }
    }

    /// Toggles `item` and closes the others. Returns whether it is now open.
    fn toggle(&self, item: &Element) -> bool {
        let open = dom::toggle_class(item, ACTIVE);
        for other in self.items.iter().filter(|other| *other != item) {
            self.collapse(other);
        }
        open
    }

    /// Toggles the dropdown owning `arrow`.
    fn toggle_from(&self, arrow: &Element) {
        let Some(parent) = dom::closest(arrow, ".has-dropdown") else {
            return;
        };
        let open = self.toggle(&parent);
        dom::set_attr(arrow, "aria-expanded", &open.to_string());
    }

    fn collapse_all(&self) {
        for item in &self.items {
            self.collapse(item);
        }
    }
}

pub fn attach(breakpoint: f64) -> Result<Vec<Listener>> {
    let mut listeners = Vec::new();
    let document = dom::document()?;
    let window = dom::window()?;

    let toggle = dom::by_id("nav-toggle");
    let menu = dom::by_id("nav-menu");

    if let Some(button) = toggle.clone() {
        let menu = menu.clone();
        let target = button.clone();
        listeners.push(Listener::new(&target, "click", move |_| {
            dom::toggle_class(&button, ACTIVE);
            if let Some(menu) = &menu {
                dom::toggle_class(menu, ACTIVE);
            }
        })?);
    }

    let dropdowns = Rc::new(Dropdowns {
        items: dom::query_all(".has-dropdown"),
    });

    // On narrow screens a dropdown's own link opens the submenu instead of
    // navigating.
    for item in dropdowns.items.clone() {
        let Some(link) = dom::query_within(&item, ".nav-link") else {
            continue;
        };
        let dropdowns = dropdowns.clone();
        listeners.push(Listener::new(&link, "click", move |event: Event| {
            if is_mobile(dom::inner_width(), breakpoint) {
                event.prevent_default();
                dropdowns.toggle(&item);
            }
        })?);
    }

    for arrow in dom::query_all(".dropdown-arrow") {
        dom::set_attr(&arrow, "tabindex", "0");
        dom::set_attr(&arrow, "aria-expanded", "false");

        let on_click = dropdowns.clone();
        let clicked = arrow.clone();
        listeners.push(Listener::new(&arrow, "click", move |event: Event| {
            event.prevent_default();
            event.stop_propagation();
            on_click.toggle_from(&clicked);
        })?);

        let on_key = dropdowns.clone();
        let pressed = arrow.clone();
        listeners.push(Listener::new(&arrow, "keydown", move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|k| k.key()) else {
                return;
            };
            if key == "Enter" || key == " " {
                event.prevent_default();
                event.stop_propagation();
                on_key.toggle_from(&pressed);
            }
        })?);
    }

    if menu.is_some() {
        let dropdowns = dropdowns.clone();
        let toggle = toggle.clone();
        let menu = menu.clone();
        listeners.push(Listener::new(&document, "click", move |event: Event| {
            let Some(target) = dom::event_element(&event) else {
                return;
            };
            if dom::closest(&target, ".nav-item.has-dropdown").is_none() {
                dropdowns.collapse_all();
            }
            if is_mobile(dom::inner_width(), breakpoint)
                && dom::closest(&target, ".nav-menu").is_none()
                && dom::closest(&target, ".nav-toggle").is_none()
            {
                close_menu(toggle.as_ref(), menu.as_ref());
            }
        })?);
    }

    {
        let toggle = toggle.clone();
        let menu = menu.clone();
        listeners.push(Listener::new(&window, "resize", move |_| {
            if !is_mobile(dom::inner_width(), breakpoint) {
                close_menu(toggle.as_ref(), menu.as_ref());
            }
        })?);
    }

    if let (Some(toggle), Some(menu)) = (toggle, menu) {
        for link in dom::query_all(".nav-link") {
            if dom::closest(&link, ".has-dropdown").is_some() {
                continue;
            }
            let toggle = toggle.clone();
            let menu = menu.clone();
            listeners.push(Listener::new(&link, "click", move |_| {
                close_menu(Some(&toggle), Some(&menu));
            })?);
        }
    }

    info!(
        "Navigation bound with {} dropdown(s)",
        dropdowns.items.len()
    );
    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_is_inclusive() {
        assert!(is_mobile(768.0, 768.0));
        assert!(is_mobile(320.0, 768.0));
        assert!(!is_mobile(769.0, 768.0));
    }
}
