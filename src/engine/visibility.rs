//! Push-based viewport visibility, on top of `IntersectionObserver`.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::Result;

/// Browsers report ratios a hair under the threshold that triggered them.
const RATIO_TOLERANCE: f64 = 0.005;

/// Whether an intersection report counts as "in view" for `threshold`.
///
/// `isIntersecting` alone is true for any overlap, so the ratio is checked
/// as well; otherwise the initial report would fire for elements that are
/// only partly visible.
pub fn is_visible(is_intersecting: bool, ratio: f64, threshold: f64) -> bool {
    is_intersecting && ratio + RATIO_TOLERANCE >= threshold.clamp(0.0, 1.0)
}

pub struct VisibilityEvent<'a> {
    pub element: Element,
    pub visible: bool,
    observer: &'a IntersectionObserver,
}

impl VisibilityEvent<'_> {
    /// Stops watching this element.
    pub fn unwatch(&self) {
        self.observer.unobserve(&self.element);
    }
}

type ObserverCallback = dyn FnMut(Array, IntersectionObserver);

pub struct VisibilityDetector {
    observer: IntersectionObserver,
    threshold: f64,
    _callback: Closure<ObserverCallback>,
}

impl VisibilityDetector {
    pub fn new<F>(threshold: f64, root_margin: &str, mut on_change: F) -> Result<Self>
    where
        F: FnMut(VisibilityEvent<'_>) + 'static,
    {
        let threshold = threshold.clamp(0.0, 1.0);
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                on_change(VisibilityEvent {
                    element: entry.target(),
                    visible: is_visible(entry.is_intersecting(), entry.intersection_ratio(), threshold),
                    observer: &observer,
                });
            }
        }) as Box<ObserverCallback>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            threshold,
            _callback: callback,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn watch(&self, element: &Element) {
        self.observer.observe(element);
    }

    pub fn unwatch(&self, element: &Element) {
        self.observer.unobserve(element);
    }
}

impl Drop for VisibilityDetector {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_visibility_below_threshold() {
        // 40% of the element on screen with a 0.5 threshold.
        assert!(!is_visible(true, 0.4, 0.5));
        assert!(is_visible(true, 0.5, 0.5));
        assert!(is_visible(true, 0.498, 0.5));
        assert!(is_visible(true, 0.9, 0.5));
    }

    #[test]
    fn test_not_intersecting_is_never_visible() {
        assert!(!is_visible(false, 0.0, 0.0));
        assert!(!is_visible(false, 1.0, 0.1));
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert!(is_visible(true, 1.0, 3.0));
        assert!(is_visible(true, 0.0, -1.0));
    }
}
