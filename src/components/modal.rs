//! Detail modals opened by `data-modal` buttons.

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent};

use crate::config::ModalConfig;
use crate::dom::{self, Listener};
use crate::error::Result;

const ACTIVATE_DELAY_MS: u32 = 10;
const CLOSE_TRANSITION_MS: u32 = 300;

fn open(modal: Element) {
    dom::set_style(&modal, "display", "flex");
    dom::set_body_overflow("hidden");
    Timeout::new(ACTIVATE_DELAY_MS, move || dom::add_class(&modal, "active")).forget();
}

fn close(modal: Element) {
    dom::remove_class(&modal, "active");
    Timeout::new(CLOSE_TRANSITION_MS, move || {
        dom::set_style(&modal, "display", "none");
        dom::set_body_overflow("");
    })
    .forget();
}

pub fn attach(config: &ModalConfig) -> Result<Vec<Listener>> {
    let modals = Rc::new(dom::query_all(&config.modal));
    let triggers = dom::query_all(&config.triggers);
    if modals.is_empty() && triggers.is_empty() {
        return Ok(Vec::new());
    }

    for modal in modals.iter() {
        dom::set_style(modal, "display", "none");
    }

    let mut listeners = Vec::new();

    for button in &triggers {
        let target = button.get_attribute("data-modal");
        listeners.push(Listener::new(button, "click", move |_| {
            match target.as_deref().and_then(dom::by_id) {
                Some(modal) => open(modal),
                None => debug!("modal {:?} not found", target),
            }
        })?);
    }

    for button in dom::query_all(&config.close) {
        let selector = config.modal.clone();
        let clicked = button.clone();
        listeners.push(Listener::new(&button, "click", move |_| {
            if let Some(modal) = dom::closest(&clicked, &selector) {
                close(modal);
            }
        })?);
    }

    for modal in modals.iter() {
        let backdrop = modal.clone();
        listeners.push(Listener::new(modal, "click", move |event: Event| {
            if dom::event_element(&event).as_ref() == Some(&backdrop) {
                close(backdrop.clone());
            }
        })?);
    }

    let open_modals = modals.clone();
    let document = dom::document()?;
    listeners.push(Listener::new(&document, "keydown", move |event: Event| {
        if event.dyn_ref::<KeyboardEvent>().map(|k| k.key()).as_deref() != Some("Escape") {
            return;
        }
        for modal in open_modals.iter().filter(|m| dom::has_class(m, "active")) {
            close(modal.clone());
        }
    })?);

    info!(
        "Modals bound: {} modal(s), {} trigger(s)",
        modals.len(),
        triggers.len()
    );
    Ok(listeners)
}
