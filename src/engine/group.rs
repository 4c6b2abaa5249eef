use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use web_sys::Element;

use super::animator::{already_animated, animate_counter, fill_progress, show_after};
use super::counter::CounterConfig;
use super::reveal::{css_delay, stagger_delay_ms, CountOnce, RevealAction, RevealMachine};
use super::visibility::{VisibilityDetector, VisibilityEvent};
use crate::config::RevealGroupConfig;
use crate::dom;
use crate::error::Result;

struct Watched {
    element: Element,
    machine: RevealMachine,
    counter: CountOnce,
}

/// A set of elements sharing one threshold, root margin and reveal policy.
pub struct RevealGroup {
    detector: VisibilityDetector,
    watched: Rc<RefCell<Vec<Watched>>>,
}

impl RevealGroup {
    /// Starts watching every element matching the group selector. `None` when
    /// the page has no such elements.
    pub fn attach(config: &RevealGroupConfig, counter: &CounterConfig) -> Result<Option<Self>> {
        let elements = dom::query_all(&config.selector);
        if elements.is_empty() {
            debug!("no elements for reveal group {:?}", config.selector);
            return Ok(None);
        }

        let watched: Rc<RefCell<Vec<Watched>>> = Rc::new(RefCell::new(
            elements
                .into_iter()
                .map(|element| Watched {
                    machine: RevealMachine::new(config.policy, dom::offset_top(&element)),
                    element,
                    counter: CountOnce::default(),
                })
                .collect(),
        ));

        let state = watched.clone();
        let group = config.clone();
        let counter = counter.clone();
        let detector = VisibilityDetector::new(config.threshold, &config.root_margin, move |event| {
            on_visibility(&mut state.borrow_mut(), &event, &group, &counter);
        })?;

        for entry in watched.borrow_mut().iter_mut() {
            entry.machine.arm();
            detector.watch(&entry.element);
        }

        info!(
            "Watching {} element(s) for {:?} at threshold {}",
            watched.borrow().len(),
            config.selector,
            detector.threshold()
        );
        Ok(Some(Self { detector, watched }))
    }

    pub fn len(&self) -> usize {
        self.watched.borrow().len()
    }
}

fn on_visibility(
    watched: &mut [Watched],
    event: &VisibilityEvent<'_>,
    group: &RevealGroupConfig,
    counter: &CounterConfig,
) {
    let Some(entry) = watched.iter_mut().find(|w| w.element == event.element) else {
        return;
    };

    match entry.machine.on_visibility(event.visible, dom::scroll_y()) {
        RevealAction::Reveal { unwatch } => {
            reveal(entry, group, counter);
            if unwatch {
                event.unwatch();
            }
        }
        RevealAction::Conceal => dom::remove_class(&entry.element, &group.class),
        RevealAction::Nothing => {}
    }
}

fn reveal(entry: &mut Watched, group: &RevealGroupConfig, counter: &CounterConfig) {
    let element = &entry.element;
    dom::add_class(element, &group.class);

    if let Some(timeline) = &group.timeline {
        if dom::matches(element, &timeline.selector) {
            let index = dom::query_all(&timeline.selector)
                .iter()
                .position(|item| item == element)
                .unwrap_or(0);
            show_after(element.clone(), stagger_delay_ms(index, timeline.base_ms));
        }
    }

    if let Some(selector) = &group.counters {
        if dom::matches(element, selector) && !already_animated(element) && entry.counter.begin() {
            animate_counter(element.clone(), counter);
        }
    }

    if let Some(selector) = &group.progress {
        if dom::matches(element, selector) {
            fill_progress(element);
        }
    }
}

/// Sets `transition-delay: index * base` on every match, so CSS reveals
/// cascade instead of firing together.
pub fn apply_stagger(selector: &str, base_ms: u32) -> usize {
    let items = dom::query_all(selector);
    for (index, item) in items.iter().enumerate() {
        dom::set_style(item, "transition-delay", &css_delay(stagger_delay_ms(index, base_ms)));
    }
    items.len()
}
