//! Page chrome: header, back-to-top, parallax, navigation, translate toggle
//! and the loader overlay.

pub mod loader;
pub mod nav;
pub mod scroll;
pub mod translate;

pub use scroll::{ScrollCondition, ScrollRule};
