//! Page loader overlay.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::info;
use web_sys::js_sys::Math;
use web_sys::Element;

use crate::dom;

const TICK_MS: u32 = 100;
const MAX_STEP: f64 = 15.0;
const FADE_DELAY_MS: u32 = 300;
const HIDE_DELAY_MS: u32 = 500;
const TIMED_FADE_MS: u32 = 1000;

/// Fake load progress in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoaderProgress {
    value: f64,
}

impl LoaderProgress {
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Adds `step` and returns `true` once 100 is reached.
    pub fn advance(&mut self, step: f64) -> bool {
        self.value = (self.value + step.max(0.0)).min(100.0);
        self.value >= 100.0
    }
}

fn fade_out(loader: Element, delay_ms: u32) {
    Timeout::new(delay_ms, move || {
        dom::add_class(&loader, "fade-out");
        Timeout::new(HIDE_DELAY_MS, move || {
            dom::set_style(&loader, "display", "none");
        })
        .forget();
    })
    .forget();
}

pub fn start() {
    let Some(loader) = dom::query(".loader") else {
        dom::set_body_overflow("auto");
        return;
    };

    let Some(bar) = dom::query(".loader-progress") else {
        fade_out(loader, TIMED_FADE_MS);
        info!("Loader fading after {}ms", TIMED_FADE_MS);
        return;
    };

    let mut progress = LoaderProgress::default();
    let handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let handle_clone = handle.clone();
    let interval = Interval::new(TICK_MS, move || {
        let done = progress.advance(Math::random() * MAX_STEP);
        dom::set_style(&bar, "width", &format!("{}%", progress.value()));
        if done {
            if let Some(interval) = handle_clone.borrow_mut().take() {
                dom::defer_drop(interval);
            }
            fade_out(loader.clone(), FADE_DELAY_MS);
        }
    });
    *handle.borrow_mut() = Some(interval);
    info!("Loader progress started");
}
