//! Image load state classes and `data-src` lazy loading.

use log::info;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use crate::dom::{self, Listener};
use crate::engine::VisibilityDetector;
use crate::error::Result;

pub fn attach() -> Result<Vec<Listener>> {
    let mut listeners = Vec::new();
    for img in dom::query_all("img") {
        let loaded = img.clone();
        listeners.push(Listener::new(&img, "load", move |_| dom::add_class(&loaded, "loaded"))?);

        let failed = img.clone();
        listeners.push(Listener::new(&img, "error", move |_| {
            dom::add_class(&failed, "error");
            let src = failed
                .dyn_ref::<HtmlImageElement>()
                .map(|i| i.src())
                .unwrap_or_default();
            gloo_console::warn!("Image failed to load:", src);
        })?);
    }
    Ok(listeners)
}

/// Swaps `data-src` into `src` once an image scrolls into view.
pub fn lazy_load() -> Result<Option<VisibilityDetector>> {
    let images = dom::query_all("img[data-src]");
    if images.is_empty() {
        return Ok(None);
    }

    let detector = VisibilityDetector::new(0.0, "0px", |event| {
        if !event.visible {
            return;
        }
        if let Some(src) = event.element.get_attribute("data-src") {
            dom::set_attr(&event.element, "src", &src);
        }
        dom::remove_class(&event.element, "lazy");
        event.unwatch();
    })?;
    for img in &images {
        detector.watch(img);
    }

    info!("Lazy loading {} image(s)", images.len());
    Ok(Some(detector))
}
