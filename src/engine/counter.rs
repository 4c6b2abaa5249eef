//! Numeric counter: parsing, formatting and the eased frame schedule.
//!
//! A counter reads its target from `data-count` and/or its own text, keeps the
//! format kind of the displayed text (`35,000+`, `14.9%`, `87.4M`, `$45B`)
//! through every frame, and finishes on the exact original string.

use serde::Deserialize;

pub const DEFAULT_DURATION_MS: u32 = 2000;
pub const DEFAULT_FPS: u32 = 60;

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;
const BILLION: f64 = 1_000_000_000.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: u32,
    pub fps: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            fps: DEFAULT_FPS,
        }
    }
}

impl CounterConfig {
    pub fn fps(&self) -> u32 {
        if self.fps == 0 {
            DEFAULT_FPS
        } else {
            self.fps
        }
    }

    /// Milliseconds between frames, ~16 at 60 fps.
    pub fn tick_interval_ms(&self) -> u32 {
        (1000 / self.fps()).max(1)
    }

    pub fn total_frames(&self) -> u32 {
        total_frames(self.duration_ms, self.fps())
    }
}

pub fn total_frames(duration_ms: u32, fps: u32) -> u32 {
    let frame_ms = 1000.0 / fps.max(1) as f64;
    (duration_ms as f64 / frame_ms).round().max(1.0) as u32
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Integer,
    Decimal,
    Percent,
    Thousand,
    Million,
    Billion,
    Plus,
}

/// How a number was written on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Format {
    pub kind: FormatKind,
    pub decimals: usize,
    pub grouped: bool,
    pub currency: bool,
}

impl Format {
    /// Raises the fractional digit count to at least `decimals`, so a
    /// placeholder like `0%` can show a declared target of `14.9`.
    pub fn widened(mut self, decimals: usize) -> Self {
        if decimals <= self.decimals {
            return self;
        }
        self.decimals = decimals;
        if self.kind == FormatKind::Integer {
            self.kind = FormatKind::Decimal;
            self.grouped = true;
        }
        self
    }

    pub fn render(&self, value: f64) -> String {
        let body = match self.kind {
            FormatKind::Integer => group_thousands(&format!("{:.0}", value.floor())),
            FormatKind::Plus if self.decimals == 0 => {
                format!("{}+", group_thousands(&format!("{:.0}", value.floor())))
            }
            FormatKind::Plus => format!("{}+", fixed(value, self.decimals, true)),
            FormatKind::Decimal => fixed(value, self.decimals, self.grouped),
            FormatKind::Percent if self.decimals == 0 => format!("{:.0}%", value.floor()),
            FormatKind::Percent => format!("{}%", fixed(value, self.decimals, self.grouped)),
            FormatKind::Thousand => {
                format!("{:.*}K", self.decimals, floor_to(value / THOUSAND, self.decimals))
            }
            FormatKind::Million => format!("{:.1}M", value / MILLION),
            FormatKind::Billion => format!("{:.0}B", value / BILLION),
        };
        if self.currency {
            format!("${}", body)
        } else {
            body
        }
    }
}

/// Truncates to `decimals` places so a frame never shows more than the target.
fn floor_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).floor() / scale
}

fn fixed(value: f64, decimals: usize, grouped: bool) -> String {
    let text = format!("{:.*}", decimals, value);
    if !grouped {
        return text;
    }
    match text.split_once('.') {
        Some((int, frac)) => format!("{}.{}", group_thousands(int), frac),
        None => group_thousands(&text),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// A number as displayed: its scaled value and the format it was written in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displayed {
    pub value: f64,
    pub format: Format,
}

/// Parses displayed numeric text. `None` for anything that is not a finite,
/// non-negative number in one of the known formats.
pub fn parse_displayed(raw: &str) -> Option<Displayed> {
    let mut text = raw.trim();
    let currency = text.starts_with('$');
    if currency {
        text = text[1..].trim_start();
    }

    let (kind, body) = match text.chars().last()? {
        '%' => (FormatKind::Percent, &text[..text.len() - 1]),
        'K' => (FormatKind::Thousand, &text[..text.len() - 1]),
        'M' => (FormatKind::Million, &text[..text.len() - 1]),
        'B' => (FormatKind::Billion, &text[..text.len() - 1]),
        '+' => (FormatKind::Plus, &text[..text.len() - 1]),
        _ => (FormatKind::Integer, text),
    };
    let body = body.trim();
    if !body.chars().any(|c| c.is_ascii_digit())
        || !body.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
    {
        return None;
    }

    let digits: String = body.chars().filter(|c| *c != ',').collect();
    let value = digits.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let decimals = digits.split_once('.').map(|(_, frac)| frac.len()).unwrap_or(0);

    let kind = if kind == FormatKind::Integer && decimals > 0 {
        FormatKind::Decimal
    } else {
        kind
    };
    let scale = match kind {
        FormatKind::Thousand => THOUSAND,
        FormatKind::Million => MILLION,
        FormatKind::Billion => BILLION,
        _ => 1.0,
    };
    let grouped = match kind {
        FormatKind::Integer | FormatKind::Plus => true,
        _ => body.contains(','),
    };

    Some(Displayed {
        value: value * scale,
        format: Format {
            kind,
            decimals,
            grouped,
            currency,
        },
    })
}

fn same_value(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

/// Everything needed to run one counter.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSpec {
    pub target: f64,
    pub format: Format,
    /// Text set on the last frame.
    pub final_text: String,
}

impl CounterSpec {
    /// Builds a counter from the element's current text and its optional
    /// `data-count` attribute. The format always comes from the displayed
    /// text when it is numeric; the target prefers `data-count`.
    ///
    /// Returns `None` when neither source holds a usable number, in which
    /// case the element is left showing its literal text.
    pub fn from_parts(text: &str, data_count: Option<&str>) -> Option<Self> {
        let shown = parse_displayed(text);
        let declared = data_count.and_then(parse_displayed);

        match (declared, shown) {
            (Some(declared), Some(shown)) => {
                let format = shown.format.widened(declared.format.decimals);
                let final_text = if same_value(declared.value, shown.value) {
                    text.to_string()
                } else {
                    format.render(declared.value)
                };
                Some(Self {
                    target: declared.value,
                    format,
                    final_text,
                })
            }
            (Some(declared), None) => Some(Self {
                target: declared.value,
                format: declared.format,
                final_text: declared.format.render(declared.value),
            }),
            (None, Some(shown)) => Some(Self {
                target: shown.value,
                format: shown.format,
                final_text: text.to_string(),
            }),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Step(String),
    Final(String),
}

/// A counter in flight, advanced one frame per timer tick.
#[derive(Debug, Clone)]
pub struct CounterRun {
    spec: CounterSpec,
    frame: u32,
    total_frames: u32,
}

impl CounterRun {
    pub fn new(spec: CounterSpec, config: &CounterConfig) -> Self {
        Self {
            spec,
            frame: 0,
            total_frames: config.total_frames(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.total_frames
    }

    pub fn tick(&mut self) -> Frame {
        self.frame = self.frame.saturating_add(1);
        if self.is_finished() {
            return Frame::Final(self.spec.final_text.clone());
        }
        let progress = self.frame as f64 / self.total_frames as f64;
        let value = self.spec.target * ease_out_cubic(progress);
        Frame::Step(self.spec.format.render(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run_all(text: &str, data_count: Option<&str>) -> Vec<Frame> {
        let spec = CounterSpec::from_parts(text, data_count).expect("numeric input");
        let mut run = CounterRun::new(spec, &CounterConfig::default());
        let mut frames = Vec::new();
        while !run.is_finished() {
            frames.push(run.tick());
        }
        frames
    }

    fn steps(frames: &[Frame]) -> Vec<&str> {
        frames
            .iter()
            .filter_map(|f| match f {
                Frame::Step(s) => Some(s.as_str()),
                Frame::Final(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_default_schedule_is_120_frames() {
        let config = CounterConfig::default();
        assert_eq!(config.total_frames(), 120);
        assert_eq!(config.tick_interval_ms(), 16);
    }

    #[test]
    fn test_zero_fps_falls_back() {
        let config = CounterConfig {
            fps: 0,
            ..Default::default()
        };
        assert_eq!(config.fps(), 60);
        assert_eq!(total_frames(0, 60), 1);
    }

    #[test]
    fn test_ease_out_cubic_bounds() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
        let mut last = 0.0;
        for i in 0..=100 {
            let v = ease_out_cubic(i as f64 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_final_frame_is_original_text() {
        for text in ["35,000+", "14.9%", "87.4M", "$45B", "1,250", "3.75", "95%", "120"] {
            let frames = run_all(text, None);
            assert_eq!(frames.len(), 120);
            assert_eq!(frames.last(), Some(&Frame::Final(text.to_string())), "{}", text);
        }
    }

    #[test]
    fn test_final_frame_keeps_surrounding_whitespace() {
        let frames = run_all("  42% ", None);
        assert_eq!(frames.last(), Some(&Frame::Final("  42% ".to_string())));
    }

    #[test]
    fn test_plus_suffixed_with_data_count() {
        let frames = run_all("35,000+", Some("35000"));
        let steps = steps(&frames);
        let mut last = 0u64;
        for step in &steps {
            assert!(step.ends_with('+'), "{}", step);
            let n: u64 = step.trim_end_matches('+').replace(',', "").parse().unwrap();
            assert!(n >= last);
            last = n;
        }
        assert!(steps.iter().any(|s| s.contains(',')));
        assert_eq!(frames.last(), Some(&Frame::Final("35,000+".to_string())));
    }

    #[test]
    fn test_percent_keeps_one_decimal() {
        let frames = run_all("14.9%", None);
        for step in steps(&frames) {
            let number = step.strip_suffix('%').unwrap();
            let (_, frac) = number.split_once('.').unwrap();
            assert_eq!(frac.len(), 1, "{}", step);
        }
        assert_eq!(frames.last(), Some(&Frame::Final("14.9%".to_string())));
    }

    #[test]
    fn test_decimal_precision_is_preserved() {
        let frames = run_all("1,234.56", None);
        for step in steps(&frames) {
            let (_, frac) = step.split_once('.').unwrap();
            assert_eq!(frac.len(), 2, "{}", step);
        }
    }

    #[test]
    fn test_million_and_billion_rendering() {
        let million = parse_displayed("87.4M").unwrap();
        assert_eq!(million.format.kind, FormatKind::Million);
        assert!((million.value - 87_400_000.0).abs() < 1e-3);
        assert_eq!(million.format.render(43_700_000.0), "43.7M");

        let billion = parse_displayed("$45B").unwrap();
        assert_eq!(billion.format.kind, FormatKind::Billion);
        assert!(billion.format.currency);
        assert_eq!(billion.format.render(12_000_000_000.0), "$12B");
    }

    #[test]
    fn test_integer_frames_are_grouped() {
        let shown = parse_displayed("1250").unwrap();
        assert_eq!(shown.format.render(1234.9), "1,234");
        assert_eq!(shown.format.render(999.0), "999");
        assert_eq!(shown.format.render(1_000_000.0), "1,000,000");
    }

    #[test]
    fn test_data_count_wins_over_placeholder_text() {
        let spec = CounterSpec::from_parts("0", Some("1200")).unwrap();
        assert_eq!(spec.target, 1200.0);
        assert_eq!(spec.final_text, "1,200");
    }

    #[test]
    fn test_decimal_data_count_keeps_its_fraction() {
        let spec = CounterSpec::from_parts("0%", Some("14.9")).unwrap();
        assert_eq!(spec.final_text, "14.9%");
        let frames = run_all("0%", Some("14.9"));
        for step in steps(&frames) {
            let (_, frac) = step.trim_end_matches('%').split_once('.').unwrap();
            assert_eq!(frac.len(), 1, "{}", step);
        }
        assert_eq!(frames.last(), Some(&Frame::Final("14.9%".to_string())));

        let spec = CounterSpec::from_parts("0", Some("2.5")).unwrap();
        assert_eq!(spec.format.kind, FormatKind::Decimal);
        assert_eq!(spec.final_text, "2.5");
    }

    #[test]
    fn test_thousands_suffix() {
        let twelve = parse_displayed("12K").unwrap();
        assert_eq!(twelve.format.kind, FormatKind::Thousand);
        assert_eq!(twelve.value, 12_000.0);
        assert_eq!(twelve.format.render(7_800.0), "7K");

        let half = parse_displayed("2.5K").unwrap();
        assert_eq!(half.value, 2_500.0);
        assert_eq!(half.format.render(1_990.0), "1.9K");

        for text in ["12K", "2.5K"] {
            let frames = run_all(text, None);
            assert_eq!(frames.last(), Some(&Frame::Final(text.to_string())), "{}", text);
        }
        let frames = run_all("12K", Some("12000"));
        assert_eq!(frames.last(), Some(&Frame::Final("12K".to_string())));
        assert!(steps(&frames).iter().all(|s| s.ends_with('K')));
    }

    #[test]
    fn test_data_count_without_numeric_text() {
        let spec = CounterSpec::from_parts("", Some("45")).unwrap();
        assert_eq!(spec.final_text, "45");
    }

    #[test]
    fn test_malformed_input_is_inert() {
        assert_eq!(CounterSpec::from_parts("N/A", None), None);
        assert_eq!(CounterSpec::from_parts("abc", Some("xyz")), None);
        assert_eq!(CounterSpec::from_parts("", None), None);
        assert_eq!(CounterSpec::from_parts("1.2.3", None), None);
        assert_eq!(CounterSpec::from_parts("-5", None), None);
        assert_eq!(parse_displayed("%"), None);
    }

    #[test]
    fn test_frames_never_exceed_target() {
        let spec = CounterSpec::from_parts("500", None).unwrap();
        let mut run = CounterRun::new(spec, &CounterConfig::default());
        while let Frame::Step(text) = run.tick() {
            let n: u32 = text.replace(',', "").parse().unwrap();
            assert!(n <= 500);
        }
    }
}
