use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::debug;
use web_sys::Element;

use super::counter::{CounterConfig, CounterRun, CounterSpec, Frame};
use crate::dom;

/// Marker attribute shared by every group, so one element never runs two
/// counters even when two groups watch it.
pub const ANIMATED_ATTR: &str = "data-animated";

pub fn already_animated(element: &Element) -> bool {
    element.has_attribute(ANIMATED_ATTR)
}

/// Starts the counter animation on `element`. Returns `false` when the
/// element was already marked, in which case nothing is started.
///
/// Text that holds no usable number is left as it is. If the element is
/// detached mid-run the timer stops quietly.
pub fn animate_counter(element: Element, config: &CounterConfig) -> bool {
    if already_animated(&element) {
        return false;
    }
    dom::set_attr(&element, ANIMATED_ATTR, "true");

    let text = element.text_content().unwrap_or_default();
    let declared = element.get_attribute("data-count");
    let Some(spec) = CounterSpec::from_parts(&text, declared.as_deref()) else {
        debug!("counter text {:?} is not numeric, leaving it", text);
        return true;
    };

    let mut run = CounterRun::new(spec, config);
    let handle: Rc<RefCell<Option<Interval>>> = Rc::new(RefCell::new(None));
    let handle_clone = handle.clone();

    let interval = Interval::new(config.tick_interval_ms(), move || {
        if !element.is_connected() {
            debug!("counter element detached, stopping");
            stop(&handle_clone);
            return;
        }
        match run.tick() {
            Frame::Step(text) => element.set_text_content(Some(&text)),
            Frame::Final(text) => {
                element.set_text_content(Some(&text));
                stop(&handle_clone);
            }
        }
    });

    *handle.borrow_mut() = Some(interval);
    true
}

fn stop(handle: &Rc<RefCell<Option<Interval>>>) {
    if let Some(interval) = handle.borrow_mut().take() {
        dom::defer_drop(interval);
    }
}

/// Fills a progress bar to its `data-width` percentage.
pub fn fill_progress(element: &Element) {
    let Some(width) = element
        .get_attribute("data-width")
        .and_then(|w| w.trim().trim_end_matches('%').parse::<f64>().ok())
        .filter(|w| w.is_finite())
    else {
        return;
    };
    dom::set_style(element, "width", &format!("{}%", width.clamp(0.0, 100.0)));
}

/// Shows a timeline item after its stagger delay.
pub fn show_after(element: Element, delay_ms: u32) {
    Timeout::new(delay_ms, move || {
        dom::set_style(&element, "opacity", "1");
        dom::set_style(&element, "transform", "translateX(0)");
    })
    .forget();
}
