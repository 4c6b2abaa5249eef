//! Boots every enabled feature for one page and keeps their handles alive.

use log::{info, warn};

use crate::chrome::{loader, nav, scroll, translate};
use crate::components::{anchors, contact_form, faq, hover, images, modal, slider};
use crate::config::{PageKind, SiteConfig};
use crate::dom::Listener;
use crate::engine::{apply_stagger, RevealGroup, VisibilityDetector};
use crate::error::Result;

/// Everything bound for the current page. Dropping it removes the listeners
/// and disconnects the observers.
#[derive(Default)]
pub struct Site {
    listeners: Vec<Listener>,
    groups: Vec<RevealGroup>,
    lazy: Option<VisibilityDetector>,
}

impl Site {
    pub fn boot(page: PageKind, config: &SiteConfig) -> Self {
        let mut site = Site::default();
        let features = &config.features;

        if features.loader {
            loader::start();
        }

        site.bind("scroll chrome", || scroll::attach(&config.chrome));
        if features.navigation {
            site.bind("navigation", || nav::attach(config.chrome.mobile_breakpoint));
        }
        if features.translate {
            site.bind("translate toggle", translate::attach);
        }
        if features.slider {
            site.bind("hero slider", slider::attach);
        }
        if features.faq {
            site.bind("faq", faq::attach);
        }
        if let Some(modals) = &features.modals {
            site.bind("modals", || modal::attach(modals));
        }
        if features.contact_form {
            site.bind("contact form", contact_form::attach);
        }
        if features.images {
            site.bind("images", images::attach);
        }
        if features.anchors {
            site.bind("anchor links", anchors::attach);
        }
        site.bind("hover effects", || hover::attach(&features.hover));

        for stagger in &config.stagger_groups {
            apply_stagger(&stagger.selector, stagger.base_ms);
        }

        for group in &config.reveal_groups {
            match RevealGroup::attach(group, &config.counter) {
                Ok(Some(group)) => site.groups.push(group),
                Ok(None) => {}
                Err(e) => warn!("Reveal group {:?} not started: {}", group.selector, e),
            }
        }

        if features.lazy_images {
            match images::lazy_load() {
                Ok(detector) => site.lazy = detector,
                Err(e) => warn!("Lazy images not started: {}", e),
            }
        }

        info!(
            "{:?} page ready: {} listener(s), {} reveal group(s)",
            page,
            site.listeners.len(),
            site.groups.len()
        );
        site
    }

    /// A failing feature is logged and skipped so the rest of the page works.
    fn bind<F>(&mut self, name: &str, attach: F)
    where
        F: FnOnce() -> Result<Vec<Listener>>,
    {
        match attach() {
            Ok(listeners) => self.listeners.extend(listeners),
            Err(e) => warn!("Failed to bind {}: {}", name, e),
        }
    }

    pub fn watched(&self) -> usize {
        self.groups.iter().map(RevealGroup::len).sum()
    }
}
