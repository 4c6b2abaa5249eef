//! Client-side behaviour for the corporate site pages: scroll reveals,
//! animated statistics, header chrome, navigation, the hero slider, modals,
//! the FAQ and the contact form.
//!
//! The module runs itself on load. The page is picked from
//! `<body data-page="...">` or the URL, and its preset can be adjusted with a
//! `<script type="application/json" id="site-config">` block. `init_page`
//! rebinds with an explicit page name and overrides.

use std::cell::RefCell;

use log::{info, warn, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod chrome;
pub mod components;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod site;

pub use config::{PageKind, SiteConfig, SiteOverrides};
pub use error::{Error, Result};
pub use site::Site;

thread_local! {
    static SITE: RefCell<Option<Site>> = RefCell::new(None);
}

fn install(page: PageKind, config: SiteConfig) {
    // Release the previous page's bindings before binding again.
    SITE.with(|slot| {
        let previous = slot.borrow_mut().take();
        let config = if previous.is_some() {
            config.rebinding()
        } else {
            config
        };
        drop(previous);
        let site = Site::boot(page, &config);
        *slot.borrow_mut() = Some(site);
    });
}

fn boot_detected() {
    let page = PageKind::detect();
    let config = match SiteConfig::load(page) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring inline site config: {}", e);
            SiteConfig::preset(page)
        }
    };
    install(page, config);
}

#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Info
    };
    // Already initialised when the module is instantiated twice.
    let _ = console_log::init_with_level(level);

    let document = dom::document()?;
    if document.ready_state() == "loading" {
        info!("Waiting for DOMContentLoaded");
        let callback = Closure::once_into_js(boot_detected);
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
    } else {
        boot_detected();
    }
    Ok(())
}

/// Rebinds the page as `page` with `overrides` (a plain object, or
/// `undefined`) applied on top of its preset.
#[wasm_bindgen]
pub fn init_page(page: &str, overrides: JsValue) -> std::result::Result<(), JsValue> {
    let page = PageKind::from_name(page);
    let mut config = SiteConfig::preset(page);
    if !overrides.is_undefined() && !overrides.is_null() {
        let overrides: SiteOverrides = serde_wasm_bindgen::from_value(overrides).map_err(Error::from)?;
        config.apply(overrides);
    }
    install(page, config);
    Ok(())
}

/// Number of elements currently watched by reveal groups.
#[wasm_bindgen]
pub fn watched_count() -> usize {
    SITE.with(|slot| slot.borrow().as_ref().map(Site::watched).unwrap_or(0))
}
