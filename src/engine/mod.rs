//! Reveal and counter engine.
//!
//! - `visibility` - `IntersectionObserver` wrapper with per-group threshold
//! - `reveal` - per-element reveal state machine and stagger arithmetic
//! - `counter` - counter parsing, formatting and eased schedule
//! - `animator` - timers that drive counters, progress bars and timelines
//! - `group` - ties the above together for one configured selector

pub mod animator;
pub mod counter;
pub mod group;
pub mod reveal;
pub mod visibility;

pub use counter::{CounterConfig, CounterRun, CounterSpec, Frame};
pub use group::{apply_stagger, RevealGroup};
pub use reveal::{RevealAction, RevealMachine, RevealPolicy, WatchState};
pub use visibility::{VisibilityDetector, VisibilityEvent};
