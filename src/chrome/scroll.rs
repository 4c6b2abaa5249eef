//! Scroll-driven chrome: a table of `{target, condition, class}` rules plus
//! the hero parallax, evaluated at most once per animation frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};
use serde::Deserialize;
use web_sys::Element;

use crate::config::ChromeConfig;
use crate::dom::{self, Listener};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScrollCondition {
    /// Page scrolled further than `offset` pixels.
    Beyond { offset: f64 },
    /// Moving down and further than `past` pixels.
    ScrollingDown { past: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub y: f64,
    pub previous: f64,
}

impl ScrollCondition {
    pub fn holds(&self, sample: ScrollSample) -> bool {
        match *self {
            ScrollCondition::Beyond { offset } => sample.y > offset,
            ScrollCondition::ScrollingDown { past } => sample.y > sample.previous && sample.y > past,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScrollRule {
    pub target: String,
    pub class: String,
    pub when: ScrollCondition,
}

impl ScrollRule {
    pub fn new(target: &str, class: &str, when: ScrollCondition) -> Self {
        Self {
            target: target.to_string(),
            class: class.to_string(),
            when,
        }
    }
}

/// Last scroll offset, clamped at zero for overscroll bounce.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollTracker {
    last_y: f64,
}

impl ScrollTracker {
    pub fn new(y: f64) -> Self {
        Self { last_y: y.max(0.0) }
    }

    pub fn advance(&mut self, y: f64) -> ScrollSample {
        let sample = ScrollSample {
            y,
            previous: self.last_y,
        };
        self.last_y = y.max(0.0);
        sample
    }
}

pub fn parallax_transform(y: f64, rate: f64) -> String {
    let offset = y * rate;
    // avoid rendering "-0px"
    let offset = if offset == 0.0 { 0.0 } else { offset };
    format!("translate3d(0px, {}px, 0px)", offset)
}

struct Bindings {
    rules: Vec<(Element, ScrollRule)>,
    parallax: Option<(Element, f64)>,
    tracker: RefCell<ScrollTracker>,
    pending: Cell<bool>,
}

impl Bindings {
    fn update(&self) {
        let y = dom::scroll_y();
        let sample = self.tracker.borrow_mut().advance(y);
        for (element, rule) in &self.rules {
            dom::set_class(element, &rule.class, rule.when.holds(sample));
        }
        if let Some((hero, rate)) = &self.parallax {
            dom::set_style(hero, "transform", &parallax_transform(y, *rate));
        }
    }
}

pub fn attach(config: &ChromeConfig) -> Result<Vec<Listener>> {
    let mut listeners = Vec::new();

    let rules: Vec<(Element, ScrollRule)> = config
        .rules
        .iter()
        .filter_map(|rule| match dom::query(&rule.target) {
            Some(element) => Some((element, rule.clone())),
            None => {
                debug!("scroll rule target {:?} not on page", rule.target);
                None
            }
        })
        .collect();
    let parallax = config
        .parallax
        .as_ref()
        .and_then(|p| dom::query(&p.selector).map(|hero| (hero, p.rate)));

    if !rules.is_empty() || parallax.is_some() {
        let bindings = Rc::new(Bindings {
            rules,
            parallax,
            tracker: RefCell::new(ScrollTracker::new(dom::scroll_y())),
            pending: Cell::new(false),
        });
        bindings.update();

        let window = dom::window()?;
        let on_scroll = bindings.clone();
        listeners.push(Listener::passive(&window, "scroll", move |_| {
            if on_scroll.pending.replace(true) {
                return;
            }
            let frame = on_scroll.clone();
            dom::next_frame(move || {
                frame.update();
                frame.pending.set(false);
            });
        })?);
        info!(
            "Scroll chrome bound: {} rule(s), parallax {}",
            bindings.rules.len(),
            bindings.parallax.is_some()
        );
    }

    if let Some(button) = config.back_to_top.as_deref().and_then(dom::query) {
        listeners.push(Listener::new(&button, "click", |event| {
            event.prevent_default();
            dom::smooth_scroll_to(0.0);
        })?);
    }

    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(y: f64, previous: f64) -> ScrollSample {
        ScrollSample { y, previous }
    }

    #[test]
    fn test_beyond() {
        let back_to_top = ScrollCondition::Beyond { offset: 300.0 };
        assert!(!back_to_top.holds(sample(300.0, 0.0)));
        assert!(back_to_top.holds(sample(301.0, 0.0)));
        assert!(back_to_top.holds(sample(301.0, 900.0)));
    }

    #[test]
    fn test_scrolling_down() {
        let hide = ScrollCondition::ScrollingDown { past: 100.0 };
        assert!(hide.holds(sample(150.0, 120.0)));
        assert!(!hide.holds(sample(120.0, 150.0)));
        assert!(!hide.holds(sample(90.0, 50.0)));
        assert!(!hide.holds(sample(150.0, 150.0)));
    }

    #[test]
    fn test_tracker_clamps_negative_offsets() {
        let mut tracker = ScrollTracker::new(0.0);
        assert_eq!(tracker.advance(-40.0), sample(-40.0, 0.0));
        assert_eq!(tracker.advance(10.0), sample(10.0, 0.0));
        assert_eq!(tracker.advance(5.0), sample(5.0, 10.0));
    }

    #[test]
    fn test_parallax_transform() {
        assert_eq!(parallax_transform(200.0, -0.5), "translate3d(0px, -100px, 0px)");
        assert_eq!(parallax_transform(0.0, -0.5), "translate3d(0px, 0px, 0px)");
    }

    #[test]
    fn test_rule_from_json() {
        let rule: ScrollRule = serde_json::from_str(
            r#"{"target": ".navbar", "class": "hidden", "when": {"kind": "scrolling-down", "past": 100}}"#,
        )
        .unwrap();
        assert_eq!(rule, ScrollRule::new(".navbar", "hidden", ScrollCondition::ScrollingDown { past: 100.0 }));
    }
}
