//! Page components that are bound once and then react to user input.

pub mod anchors;
pub mod contact_form;
pub mod faq;
pub mod hover;
pub mod images;
pub mod modal;
pub mod slider;

pub use hover::{HoverConfig, LiftRule};
