//! Per-page configuration.
//!
//! Each page kind has a preset matching the behaviour its markup expects.
//! A page can adjust it with an inline
//! `<script type="application/json" id="site-config">` block or by passing an
//! object to `init_page`; present fields replace the preset's.

use serde::Deserialize;

use crate::chrome::{ScrollCondition, ScrollRule};
use crate::components::{HoverConfig, LiftRule};
use crate::dom;
use crate::engine::{CounterConfig, RevealPolicy};
use crate::error::Result;

pub const CONFIG_SCRIPT_ID: &str = "site-config";

const ANIMATABLE: &str = ".fade-in, .slide-in-left, .slide-in-right, .scale-in";
const HERO: &str = ".about-hero, .hero, .contact-hero, .products-hero, .energy-hero, .page-hero";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    General,
    Home,
    About,
    Contact,
    Products,
    EnergyTransition,
    Refining,
    Sustainability,
    WhoWeAre,
    Hseq,
}

impl PageKind {
    /// Accepts `data-page` values and page file names (`about.html`).
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().to_ascii_lowercase();
        let stem = name
            .rsplit('/')
            .find(|part| !part.is_empty())
            .unwrap_or("")
            .trim_end_matches(".html");
        match stem {
            "" | "index" | "home" => PageKind::Home,
            "about" => PageKind::About,
            "contact" => PageKind::Contact,
            "products" => PageKind::Products,
            "energy-transition" => PageKind::EnergyTransition,
            "refining" => PageKind::Refining,
            "sustainability" => PageKind::Sustainability,
            "who-we-are" => PageKind::WhoWeAre,
            "hseq" => PageKind::Hseq,
            _ => PageKind::General,
        }
    }

    /// `<body data-page>` first, then the URL path.
    pub fn detect() -> Self {
        if let Some(page) = dom::body().and_then(|body| body.get_attribute("data-page")) {
            return Self::from_name(&page);
        }
        dom::window()
            .ok()
            .and_then(|w| w.location().pathname().ok())
            .map(|path| Self::from_name(&path))
            .unwrap_or(PageKind::General)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimelineConfig {
    pub selector: String,
    pub base_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealGroupConfig {
    pub selector: String,
    pub threshold: f64,
    pub root_margin: String,
    pub class: String,
    pub policy: RevealPolicy,
    /// Members matching this also run a counter.
    pub counters: Option<String>,
    /// Members matching this fill to their `data-width`.
    pub progress: Option<String>,
    pub timeline: Option<TimelineConfig>,
}

impl Default for RevealGroupConfig {
    fn default() -> Self {
        Self {
            selector: String::new(),
            threshold: 0.1,
            root_margin: "0px".to_string(),
            class: "visible".to_string(),
            policy: RevealPolicy::OneShot,
            counters: None,
            progress: None,
            timeline: None,
        }
    }
}

impl RevealGroupConfig {
    fn new(selector: &str, threshold: f64) -> Self {
        Self {
            selector: selector.to_string(),
            threshold,
            ..Default::default()
        }
    }

    fn margin(mut self, root_margin: &str) -> Self {
        self.root_margin = root_margin.to_string();
        self
    }

    fn class(mut self, class: &str) -> Self {
        self.class = class.to_string();
        self
    }

    fn rearm(mut self) -> Self {
        self.policy = RevealPolicy::Rearm;
        self
    }

    fn counters(mut self, selector: &str) -> Self {
        self.counters = Some(selector.to_string());
        self
    }

    fn progress(mut self, selector: &str) -> Self {
        self.progress = Some(selector.to_string());
        self
    }

    fn timeline(mut self, selector: &str, base_ms: u32) -> Self {
        self.timeline = Some(TimelineConfig {
            selector: selector.to_string(),
            base_ms,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StaggerGroupConfig {
    pub selector: String,
    pub base_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParallaxConfig {
    pub selector: String,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    pub rules: Vec<ScrollRule>,
    pub parallax: Option<ParallaxConfig>,
    pub back_to_top: Option<String>,
    pub mobile_breakpoint: f64,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                ScrollRule::new(".header", "scrolled", ScrollCondition::Beyond { offset: 100.0 }),
                ScrollRule::new(".navbar", "hidden", ScrollCondition::ScrollingDown { past: 100.0 }),
                ScrollRule::new(".back-to-top", "visible", ScrollCondition::Beyond { offset: 300.0 }),
            ],
            parallax: Some(ParallaxConfig {
                selector: HERO.to_string(),
                rate: -0.5,
            }),
            back_to_top: Some(".back-to-top".to_string()),
            mobile_breakpoint: 768.0,
        }
    }
}

impl ChromeConfig {
    /// Hides `target` instead of `.navbar` while scrolling down.
    fn hide_on_scroll(mut self, target: &str) -> Self {
        for rule in &mut self.rules {
            if rule.class == "hidden" {
                rule.target = target.to_string();
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModalConfig {
    pub triggers: String,
    pub modal: String,
    pub close: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            triggers: ".monitoring-details-btn, .highlight-details-btn".to_string(),
            modal: ".monitoring-modal".to_string(),
            close: ".modal-close".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Features {
    pub loader: bool,
    pub navigation: bool,
    pub translate: bool,
    pub slider: bool,
    pub faq: bool,
    pub modals: Option<ModalConfig>,
    pub contact_form: bool,
    pub images: bool,
    pub lazy_images: bool,
    pub anchors: bool,
    pub hover: HoverConfig,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            loader: true,
            navigation: true,
            translate: true,
            slider: true,
            faq: false,
            modals: None,
            contact_form: false,
            images: true,
            lazy_images: true,
            anchors: true,
            hover: HoverConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub reveal_groups: Vec<RevealGroupConfig>,
    pub stagger_groups: Vec<StaggerGroupConfig>,
    pub counter: CounterConfig,
    pub chrome: ChromeConfig,
    pub features: Features,
}

/// Partial configuration; every present field replaces the preset's.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteOverrides {
    pub reveal_groups: Option<Vec<RevealGroupConfig>>,
    pub stagger_groups: Option<Vec<StaggerGroupConfig>>,
    pub counter: Option<CounterConfig>,
    pub chrome: Option<ChromeConfig>,
    pub features: Option<Features>,
}

impl SiteOverrides {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn base_groups() -> Vec<RevealGroupConfig> {
    vec![
        RevealGroupConfig::new(".fade-in", 0.1).margin("0px 0px -50px 0px"),
        RevealGroupConfig::new(".stat-number", 0.5).counters(".stat-number"),
    ]
}

fn animatable() -> RevealGroupConfig {
    RevealGroupConfig::new(ANIMATABLE, 0.1)
}

impl SiteConfig {
    pub fn preset(page: PageKind) -> Self {
        let mut config = SiteConfig {
            reveal_groups: base_groups(),
            stagger_groups: Vec::new(),
            counter: CounterConfig::default(),
            chrome: ChromeConfig::default(),
            features: Features::default(),
        };

        match page {
            PageKind::General | PageKind::Home => {}
            PageKind::About => {
                config.reveal_groups = vec![
                    RevealGroupConfig::new(".stat-number", 0.5).counters(".stat-number"),
                    RevealGroupConfig::new(".timeline-item", 0.3).class("active"),
                    animatable().margin("0px 0px -50px 0px").rearm(),
                ];
                config.stagger_groups = vec![StaggerGroupConfig {
                    selector: ".stat-card, .value-card, .advantage-card, .faq-item".to_string(),
                    base_ms: 100,
                }];
                config.features.faq = true;
            }
            PageKind::Contact => {
                config.features.faq = true;
                config.features.contact_form = true;
            }
            PageKind::Products => {
                config.reveal_groups =
                    vec![animatable().counters(".stat-number, .stat-value, .project-number")];
                config.chrome = config.chrome.hide_on_scroll(".header");
                config.features.hover = HoverConfig {
                    lift: vec![
                        LiftRule::new(".service-card, .benefit-card", 10.0, "var(--shadow-xl)"),
                        LiftRule::new(".specialized-card", 5.0, "var(--shadow-xl)"),
                    ],
                    zoom: Some(".production-image, .refining-image, .project-image".to_string()),
                    nudge: Some(".cta-button".to_string()),
                };
            }
            PageKind::EnergyTransition => {
                config.reveal_groups = vec![RevealGroupConfig::new(
                    &format!("{}, .timeline-item", ANIMATABLE),
                    0.1,
                )
                .timeline(".timeline-item", 200)];
                config.chrome = config.chrome.hide_on_scroll(".header");
                config.features.hover = HoverConfig {
                    lift: vec![
                        LiftRule::new(".highlight-item, .project-card, .benefit-card", 5.0, "var(--shadow-md)"),
                        LiftRule::new(".project-card", 10.0, "var(--shadow-xl)"),
                    ],
                    zoom: Some(".battery-image, .project-image".to_string()),
                    nudge: Some(".cta-button".to_string()),
                };
            }
            PageKind::Refining => {
                config.reveal_groups = vec![RevealGroupConfig::new(
                    &format!("{}, .stat-number, .progress-fill", ANIMATABLE),
                    0.1,
                )
                .counters(".stat-number[data-count]")
                .progress(".progress-fill")];
                config.chrome = config.chrome.hide_on_scroll(".header");
            }
            PageKind::Sustainability => {
                config.reveal_groups = vec![animatable()];
                config.features.modals = Some(ModalConfig::default());
            }
            PageKind::WhoWeAre => {
                config.reveal_groups =
                    vec![animatable().counters(".stat-number, .safety-stat, .production-stat")];
                config.chrome = config.chrome.hide_on_scroll(".header");
                config.features.hover = HoverConfig {
                    lift: vec![LiftRule::new(
                        ".service-card, .value-card, .product-item",
                        10.0,
                        "var(--shadow-xl)",
                    )],
                    zoom: Some(".intro-image, .facility-image, .project-image".to_string()),
                    nudge: Some(".cta-button".to_string()),
                };
            }
            PageKind::Hseq => {
                config.reveal_groups = vec![RevealGroupConfig::new(
                    &format!("{}, .stat-number", ANIMATABLE),
                    0.1,
                )
                .counters(".stat-number[data-count]")];
            }
        }
        config
    }

    pub fn apply(&mut self, overrides: SiteOverrides) {
        if let Some(groups) = overrides.reveal_groups {
            self.reveal_groups = groups;
        }
        if let Some(groups) = overrides.stagger_groups {
            self.stagger_groups = groups;
        }
        if let Some(counter) = overrides.counter {
            self.counter = counter;
        }
        if let Some(chrome) = overrides.chrome {
            self.chrome = chrome;
        }
        if let Some(features) = overrides.features {
            self.features = features;
        }
        for group in &mut self.reveal_groups {
            group.threshold = group.threshold.clamp(0.0, 1.0);
        }
    }

    /// The same configuration for binding a page a second time. The loader
    /// has already run and hidden itself by then.
    pub fn rebinding(mut self) -> Self {
        self.features.loader = false;
        self
    }

    /// Preset for `page` with the inline config script applied, if any.
    pub fn load(page: PageKind) -> Result<Self> {
        let mut config = Self::preset(page);
        if let Some(script) = dom::by_id(CONFIG_SCRIPT_ID) {
            let json = script.text_content().unwrap_or_default();
            if !json.trim().is_empty() {
                config.apply(SiteOverrides::from_json(&json)?);
            }
        }
        Ok(config)
    }
}
