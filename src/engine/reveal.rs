//! Per-element reveal lifecycle.
//!
//! `Unwatched -> Watching -> Revealed`. One-shot elements stop there; re-arm
//! elements drop back to `Watching` when they leave the viewport while the
//! page is scrolled above their original top offset.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RevealPolicy {
    #[default]
    OneShot,
    Rearm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Unwatched,
    Watching,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Add the state class. `unwatch` asks the detector to drop the element.
    Reveal { unwatch: bool },
    /// Remove the state class so the element can reveal again.
    Conceal,
    Nothing,
}

#[derive(Debug, Clone)]
pub struct RevealMachine {
    state: WatchState,
    policy: RevealPolicy,
    origin_top: f64,
}

impl RevealMachine {
    pub fn new(policy: RevealPolicy, origin_top: f64) -> Self {
        Self {
            state: WatchState::Unwatched,
            policy,
            origin_top,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn arm(&mut self) {
        if self.state == WatchState::Unwatched {
            self.state = WatchState::Watching;
        }
    }

    pub fn on_visibility(&mut self, visible: bool, scroll_y: f64) -> RevealAction {
        match (self.state, visible) {
            (WatchState::Watching, true) => {
                self.state = WatchState::Revealed;
                RevealAction::Reveal {
                    unwatch: self.policy == RevealPolicy::OneShot,
                }
            }
            (WatchState::Revealed, false)
                if self.policy == RevealPolicy::Rearm && scroll_y < self.origin_top =>
            {
                self.state = WatchState::Watching;
                RevealAction::Conceal
            }
            _ => RevealAction::Nothing,
        }
    }
}

/// Delay for the `index`-th member of a staggered group.
#[inline]
pub fn stagger_delay_ms(index: usize, base_ms: u32) -> u32 {
    (index as u32).saturating_mul(base_ms)
}

pub fn css_delay(ms: u32) -> String {
    format!("{}ms", ms)
}

/// Guards a counter so it starts at most once per page life.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountOnce {
    started: bool,
}

impl CountOnce {
    /// Returns `true` the first time only.
    pub fn begin(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    pub fn started(&self) -> bool {
        self.started
    }
}
