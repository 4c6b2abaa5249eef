//! Smooth scrolling for in-page `#anchor` links, offset by the header.

use log::{debug, info};
use web_sys::Event;

use crate::dom::{self, Listener};
use crate::error::Result;

/// Scroll target for an element whose top is `rect_top` in the viewport.
pub fn scroll_target(rect_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    rect_top + scroll_y - header_height
}

pub fn attach() -> Result<Vec<Listener>> {
    let mut listeners = Vec::new();
    for anchor in dom::query_all(r##"a[href^="#"]"##) {
        let link = anchor.clone();
        listeners.push(Listener::new(&anchor, "click", move |event: Event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            event.prevent_default();
            if href == "#" {
                return;
            }
            let Some(target) = dom::document()
                .ok()
                .and_then(|doc| doc.query_selector(&href).ok().flatten())
            else {
                debug!("anchor target {:?} not found", href);
                return;
            };
            let header_height = dom::query(".header")
                .map(|header| dom::offset_height(&header))
                .unwrap_or(0.0);
            let top = scroll_target(
                target.get_bounding_client_rect().top(),
                dom::scroll_y(),
                header_height,
            );
            dom::smooth_scroll_to(top);
        })?);
    }
    if !listeners.is_empty() {
        info!("Smooth scrolling bound to {} anchor(s)", listeners.len());
    }
    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_target_subtracts_header() {
        assert_eq!(scroll_target(250.0, 1000.0, 80.0), 1170.0);
        assert_eq!(scroll_target(-300.0, 1000.0, 0.0), 700.0);
    }
}
