//! FAQ accordion: one open item at a time.

use std::rc::Rc;

use log::info;

use crate::dom::{self, Listener};
use crate::error::Result;

pub fn attach() -> Result<Vec<Listener>> {
    let items = Rc::new(dom::query_all(".faq-item"));
    let mut listeners = Vec::new();

    for item in items.iter() {
        let Some(question) = dom::query_within(item, ".faq-question") else {
            continue;
        };
        let items = items.clone();
        let item = item.clone();
        listeners.push(Listener::new(&question, "click", move |_| {
            for other in items.iter().filter(|other| **other != item) {
                dom::remove_class(other, "active");
            }
            dom::toggle_class(&item, "active");
        })?);
    }

    if !listeners.is_empty() {
        info!("FAQ accordion bound to {} item(s)", listeners.len());
    }
    Ok(listeners)
}
