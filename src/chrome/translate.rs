//! Open/close state of the translate widget container. The widget itself is
//! third-party markup and is never touched beyond its `aria-hidden` flag.

use std::rc::Rc;

use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent, Node};

use crate::dom::{self, Listener};
use crate::error::Result;

const OPEN: &str = "open";
const WIDGET_ID: &str = "google_translate_element";

struct Translate {
    controls: Element,
    toggle: Element,
    widget: Element,
}

impl Translate {
    fn sync(&self, open: bool) {
        dom::set_attr(&self.widget, "aria-hidden", &(!open).to_string());
        dom::set_attr(&self.toggle, "aria-expanded", &open.to_string());
    }

    fn flip(&self) {
        let open = dom::toggle_class(&self.controls, OPEN);
        self.sync(open);
    }

    fn close(&self) {
        if dom::has_class(&self.controls, OPEN) {
            dom::remove_class(&self.controls, OPEN);
            self.sync(false);
        }
    }

    fn contains(&self, target: &Element) -> bool {
        let node: &Node = target;
        self.controls.contains(Some(node))
    }
}

pub fn attach() -> Result<Vec<Listener>> {
    let Some(controls) = dom::query(".header-controls") else {
        return Ok(Vec::new());
    };
    let (Some(toggle), Some(widget)) = (
        dom::query_within(&controls, ".translate-toggle"),
        dom::by_id(WIDGET_ID),
    ) else {
        return Ok(Vec::new());
    };

    let translate = Rc::new(Translate {
        controls,
        toggle,
        widget,
    });
    translate.sync(false);

    let document = dom::document()?;
    let mut listeners = Vec::new();

    let on_toggle = translate.clone();
    listeners.push(Listener::new(&translate.toggle, "click", move |event: Event| {
        event.stop_propagation();
        on_toggle.flip();
    })?);

    let on_outside = translate.clone();
    listeners.push(Listener::new(&document, "click", move |event: Event| {
        match dom::event_element(&event) {
            Some(target) if on_outside.contains(&target) => {}
            _ => on_outside.close(),
        }
    })?);

    let on_escape = translate.clone();
    listeners.push(Listener::new(&document, "keydown", move |event: Event| {
        if event.dyn_ref::<KeyboardEvent>().map(|k| k.key()).as_deref() == Some("Escape") {
            on_escape.close();
        }
    })?);

    info!("Translate toggle bound");
    Ok(listeners)
}
