//! Font fitting and text-driven minimum sizes.
//!
//! A text widget has two derived quantities:
//!
//! - **minimum size**: the widest unbreakable token and the wrapped content
//!   height, both at the base font size. Manual resizes never go below it.
//! - **applied font size**: the largest size (between `min_font_size` and
//!   `max_font_size`) at which the content fits the box.
//!
//! Content height grows monotonically with font size under greedy word
//! wrapping, which is what makes the binary search valid.
//!
//! Measurement is pluggable through [`TextMeasurer`]; when the measuring
//! context is unavailable the engine falls back to nominal sizes instead of
//! failing.

use crate::config::FitConfig;
use crate::geom::Size;
use crate::model::{FitStyle, FontSpec};

/// Measures the advance width of a run of text.
pub trait TextMeasurer {
    /// Width of `text` rendered with `font`, or `None` when no measuring
    /// context is available.
    fn measure(&self, text: &str, font: &FontSpec) -> Option<f64>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font: &FontSpec) -> Option<f64> {
        (**self).measure(text, font)
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for Box<T> {
    fn measure(&self, text: &str, font: &FontSpec) -> Option<f64> {
        (**self).measure(text, font)
    }
}

/// Glyph-count estimate: ~0.6 em per character, ~0.66 em when bold.
///
/// Good enough for native targets without a font stack, and deterministic
/// for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMeasurer;

impl TextMeasurer for HeuristicMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> Option<f64> {
        let em = if font.bold { 0.66 } else { 0.6 };
        Some(em * font.size * text.chars().count() as f64)
    }
}

/// Outcome of [`TextFitEngine::fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub font_size: f64,
    /// Box height the content needs. Equals the container height unless even
    /// the floor font overflows, in which case the box must grow.
    pub required_height: f64,
}

/// Derives font sizes and minimum boxes for text widgets.
#[derive(Debug, Clone)]
pub struct TextFitEngine<M> {
    measurer: M,
    config: FitConfig,
}

impl<M: TextMeasurer> TextFitEngine<M> {
    pub fn new(measurer: M, config: FitConfig) -> Self {
        Self { measurer, config }
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    // ─── Measurement ─────────────────────────────────────────────────────

    /// Width of the widest whitespace-separated token. Empty text is 0.
    pub fn widest_token(&self, text: &str, font: &FontSpec) -> Option<f64> {
        let mut widest = 0.0f64;
        for token in text.split_whitespace() {
            widest = widest.max(self.measurer.measure(token, font)?);
        }
        Some(widest)
    }

    /// Number of lines after greedy word wrap within `max_width`.
    /// Explicit newlines start a new line; an empty paragraph is one line.
    pub fn line_count(&self, text: &str, font: &FontSpec, max_width: f64) -> Option<usize> {
        let space = self.measurer.measure(" ", font)?;
        let mut lines = 0usize;
        for paragraph in text.split('\n') {
            lines += 1;
            let mut current = 0.0f64;
            for word in paragraph.split_whitespace() {
                let w = self.measurer.measure(word, font)?;
                if current == 0.0 {
                    current = w;
                } else if current + space + w <= max_width {
                    current += space + w;
                } else {
                    lines += 1;
                    current = w;
                }
            }
        }
        Some(lines.max(1))
    }

    /// Wrapped content height (no padding).
    pub fn content_height(&self, text: &str, font: &FontSpec, max_width: f64) -> Option<f64> {
        let lines = self.line_count(text, font, max_width)?;
        Some(lines as f64 * font.size * self.config.line_height)
    }

    // ─── Minimum size ────────────────────────────────────────────────────

    /// Widest token at the base size plus padding, never below the nominal
    /// minimum width.
    pub fn min_width(&self, style: &FitStyle) -> f64 {
        let pad = 2.0 * self.config.padding;
        match self.widest_token(&style.text, &style.base_font()) {
            Some(w) => (w + pad).max(self.config.nominal_min_width),
            None => {
                log::warn!("text_fit: measurement unavailable, using nominal min width");
                self.config.nominal_min_width
            }
        }
    }

    /// Wrapped height at the base size for a box `width` wide, plus padding.
    pub fn min_height(&self, style: &FitStyle, width: f64) -> f64 {
        let pad = 2.0 * self.config.padding;
        let avail = (width - pad).max(1.0);
        match self.content_height(&style.text, &style.base_font(), avail) {
            Some(h) => (h + pad).max(self.config.nominal_min_height),
            None => {
                log::warn!("text_fit: measurement unavailable, using nominal min height");
                self.config.nominal_min_height
            }
        }
    }

    /// Minimum box for the current content when laid out `width` wide.
    pub fn min_size(&self, style: &FitStyle, width: f64) -> Size {
        let min_w = self.min_width(style);
        Size::new(min_w, self.min_height(style, width.max(min_w)))
    }

    /// Grow `size` so the content fits at its base size. Never shrinks.
    pub fn grow_to_fit(&self, size: Size, style: &FitStyle) -> Size {
        size.max(self.min_size(style, size.width))
    }

    /// Apply the hard character cap to typed input.
    pub fn truncate_input<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.config.max_chars) {
            Some((idx, _)) => &text[..idx],
            None => text,
        }
    }

    // ─── Font search ─────────────────────────────────────────────────────

    /// Whether content fits `avail` (the box minus padding) at `font_size`.
    fn fits(&self, style: &FitStyle, font_size: f64, avail: Size) -> Option<bool> {
        let font = style.font(font_size);
        if self.widest_token(&style.text, &font)? > avail.width + 1e-9 {
            return Some(false);
        }
        let h = self.content_height(&style.text, &font, avail.width)?;
        Some(h <= avail.height + 1e-9)
    }

    /// Largest multiple of `font_step` in `[lo, hi]` that fits, where `lo`
    /// is known to fit. Never returns less than `lo`.
    fn search(&self, style: &FitStyle, lo: f64, hi: f64, avail: Size) -> f64 {
        if self.fits(style, hi, avail) == Some(true) {
            return hi;
        }
        let step = self.config.font_step.max(0.01);
        // lo_k * step fits, hi_k * step does not.
        let mut lo_k = (lo / step).floor() as i64;
        let mut hi_k = (hi / step).ceil() as i64;
        while hi_k - lo_k > 1 {
            let mid = lo_k + (hi_k - lo_k) / 2;
            if self.fits(style, mid as f64 * step, avail) == Some(true) {
                lo_k = mid;
            } else {
                hi_k = mid;
            }
        }
        (lo_k as f64 * step).max(lo)
    }

    /// Largest font size at which the content fits `container`.
    ///
    /// Base fits → search upward to the cap. Base overflows → search
    /// downward to the floor. Floor overflows → font stays at the floor and
    /// `required_height` reports how tall the box must become.
    pub fn fit(&self, container: Size, style: &FitStyle) -> FitResult {
        let pad = 2.0 * self.config.padding;
        let avail = Size::new(
            (container.width - pad).max(0.0),
            (container.height - pad).max(0.0),
        );
        let floor = self.config.min_font_size.max(1.0);
        let base = style.base_font_size.max(floor);
        let cap = self.config.max_font_size.max(base);

        match self.fits(style, base, avail) {
            None => {
                log::warn!("text_fit: measurement unavailable, keeping base font");
                FitResult {
                    font_size: base,
                    required_height: container.height.max(self.config.nominal_min_height),
                }
            }
            Some(true) => FitResult {
                font_size: self.search(style, base, cap, avail),
                required_height: container.height,
            },
            Some(false) => {
                if self.fits(style, floor, avail) == Some(true) {
                    return FitResult {
                        font_size: self.search(style, floor, base, avail),
                        required_height: container.height,
                    };
                }
                let needed = self
                    .content_height(&style.text, &style.font(floor), avail.width.max(1.0))
                    .map_or(container.height, |h| h + pad);
                log::debug!("text_fit: floor {floor}px overflows, box needs {needed}px");
                FitResult {
                    font_size: floor,
                    required_height: container.height.max(needed),
                }
            }
        }
    }
}
