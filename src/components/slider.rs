//! Hero slider with dots, prev/next buttons, autoplay and arrow keys.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Interval;
use log::info;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, KeyboardEvent};

use crate::dom::{self, Listener};
use crate::error::Result;

pub const AUTOPLAY_MS: u32 = 5000;

/// Current slide index over a fixed number of slides, wrapping both ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideIndex {
    current: usize,
    len: usize,
}

impl SlideIndex {
    pub fn new(len: usize) -> Self {
        Self { current: 0, len }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
        self.current
    }

    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.current = (self.current + self.len - 1) % self.len;
        }
        self.current
    }

    pub fn go(&mut self, index: usize) -> usize {
        if index < self.len {
            self.current = index;
        }
        self.current
    }
}

struct Slider {
    slides: Vec<Element>,
    dots: Vec<Element>,
    index: RefCell<SlideIndex>,
    autoplay: RefCell<Option<Interval>>,
}

impl Slider {
    fn show(&self, index: usize) {
        for el in self.slides.iter().chain(self.dots.iter()) {
            dom::remove_class(el, "active");
        }
        if let Some(slide) = self.slides.get(index) {
            dom::add_class(slide, "active");
        }
        if let Some(dot) = self.dots.get(index) {
            dom::add_class(dot, "active");
        }
    }

    fn next(&self) {
        let index = self.index.borrow_mut().next();
        self.show(index);
    }

    fn prev(&self) {
        let index = self.index.borrow_mut().prev();
        self.show(index);
    }

    fn go(&self, index: usize) {
        let index = self.index.borrow_mut().go(index);
        self.show(index);
    }

    fn start_autoplay(self: &Rc<Self>) {
        if self.slides.len() < 2 {
            return;
        }
        let weak: Weak<Self> = Rc::downgrade(self);
        let interval = Interval::new(AUTOPLAY_MS, move || {
            if let Some(slider) = weak.upgrade() {
                slider.next();
            }
        });
        self.autoplay.replace(Some(interval));
    }

    fn stop_autoplay(&self) {
        self.autoplay.borrow_mut().take();
    }

    fn restart_autoplay(self: &Rc<Self>) {
        self.stop_autoplay();
        self.start_autoplay();
    }
}

pub fn attach() -> Result<Vec<Listener>> {
    let slides = dom::query_all(".slide");
    if slides.is_empty() {
        return Ok(Vec::new());
    }

    let slider = Rc::new(Slider {
        index: RefCell::new(SlideIndex::new(slides.len())),
        slides,
        dots: dom::query_all(".dot"),
        autoplay: RefCell::new(None),
    });
    let mut listeners = Vec::new();

    if let Some(prev) = dom::query(".slider-prev") {
        let slider = slider.clone();
        listeners.push(Listener::new(&prev, "click", move |_| slider.prev())?);
    }
    if let Some(next) = dom::query(".slider-next") {
        let slider = slider.clone();
        listeners.push(Listener::new(&next, "click", move |_| slider.next())?);
    }

    for (index, dot) in slider.dots.iter().enumerate() {
        let slider = slider.clone();
        listeners.push(Listener::new(dot, "click", move |_| {
            slider.go(index);
            slider.restart_autoplay();
        })?);
    }

    if slider.slides.len() > 1 {
        slider.start_autoplay();
        if let Some(hero) = dom::query(".hero") {
            let pause = slider.clone();
            listeners.push(Listener::new(&hero, "mouseenter", move |_| pause.stop_autoplay())?);
            let resume = slider.clone();
            listeners.push(Listener::new(&hero, "mouseleave", move |_| resume.start_autoplay())?);
        }
    }

    let keys = slider.clone();
    let document = dom::document()?;
    listeners.push(Listener::new(&document, "keydown", move |event: Event| {
        match event.dyn_ref::<KeyboardEvent>().map(|k| k.key()).as_deref() {
            Some("ArrowLeft") => keys.prev(),
            Some("ArrowRight") => keys.next(),
            _ => {}
        }
    })?);

    info!("Hero slider bound with {} slide(s)", slider.slides.len());
    Ok(listeners)
}
