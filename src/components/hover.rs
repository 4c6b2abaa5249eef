//! Hover lift on cards, zoom on image wrappers and the CTA icon nudge.

use serde::Deserialize;

use crate::dom::{self, Listener};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LiftRule {
    pub selector: String,
    pub lift_px: f64,
    pub shadow: String,
}

impl LiftRule {
    pub fn new(selector: &str, lift_px: f64, shadow: &str) -> Self {
        Self {
            selector: selector.to_string(),
            lift_px,
            shadow: shadow.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    pub lift: Vec<LiftRule>,
    pub zoom: Option<String>,
    pub nudge: Option<String>,
}

pub fn lift_transform(lift_px: f64) -> String {
    format!("translateY(-{}px)", lift_px)
}

pub fn attach(config: &HoverConfig) -> Result<Vec<Listener>> {
    let mut listeners = Vec::new();

    // Later rules win, so a card matching two rules takes the last one.
    let mut lifted: Vec<(web_sys::Element, LiftRule)> = Vec::new();
    for rule in &config.lift {
        for card in dom::query_all(&rule.selector) {
            match lifted.iter_mut().find(|(el, _)| *el == card) {
                Some(entry) => entry.1 = rule.clone(),
                None => lifted.push((card, rule.clone())),
            }
        }
    }
    for (card, rule) in lifted {
        let enter = card.clone();
        let transform = lift_transform(rule.lift_px);
        let shadow = rule.shadow.clone();
        listeners.push(Listener::new(&card, "mouseenter", move |_| {
            dom::set_style(&enter, "transform", &transform);
            dom::set_style(&enter, "box-shadow", &shadow);
        })?);
        let leave = card.clone();
        listeners.push(Listener::new(&card, "mouseleave", move |_| {
            dom::clear_style(&leave, "transform");
            dom::clear_style(&leave, "box-shadow");
        })?);
    }

    if let Some(selector) = &config.zoom {
        for wrapper in dom::query_all(selector) {
            let Some(img) = dom::query_within(&wrapper, "img") else {
                continue;
            };
            let enter = img.clone();
            listeners.push(Listener::new(&wrapper, "mouseenter", move |_| {
                dom::set_style(&enter, "transform", "scale(1.05)");
            })?);
            listeners.push(Listener::new(&wrapper, "mouseleave", move |_| {
                dom::clear_style(&img, "transform");
            })?);
        }
    }

    if let Some(selector) = &config.nudge {
        for button in dom::query_all(selector) {
            let enter = button.clone();
            listeners.push(Listener::new(&button, "mouseenter", move |_| {
                if let Some(icon) = dom::query_within(&enter, "i") {
                    dom::set_style(&icon, "transform", "translateX(4px)");
                }
            })?);
            let leave = button.clone();
            listeners.push(Listener::new(&button, "mouseleave", move |_| {
                if let Some(icon) = dom::query_within(&leave, "i") {
                    dom::clear_style(&icon, "transform");
                }
            })?);
        }
    }

    Ok(listeners)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_transform() {
        assert_eq!(lift_transform(10.0), "translateY(-10px)");
        assert_eq!(lift_transform(5.0), "translateY(-5px)");
    }

    #[test]
    fn test_config_from_json() {
        let config: HoverConfig = serde_json::from_str(
            r#"{"lift": [{"selector": ".card", "lift_px": 5, "shadow": "var(--shadow-md)"}]}"#,
        )
        .unwrap();
        assert_eq!(config.lift, vec![LiftRule::new(".card", 5.0, "var(--shadow-md)")]);
        assert_eq!(config.zoom, None);
    }
}
