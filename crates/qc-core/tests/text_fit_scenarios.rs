//! End-to-end font fitting with the default configuration.

use pretty_assertions::assert_eq;
use qc_core::{FitConfig, FitStyle, FontSpec, HeuristicMeasurer, Size, TextFitEngine, TextMeasurer};

const EIGHT_WORDS: &str = "aaaa bbbb cccc dddd eeee ffff gggg hhhh";

fn engine() -> TextFitEngine<HeuristicMeasurer> {
    TextFitEngine::new(HeuristicMeasurer, FitConfig::default())
}

#[test]
fn overflowing_base_searches_down_to_largest_fitting_step() {
    // 100×40 inside padding; 16px needs four lines.
    let result = engine().fit(Size::new(108.0, 48.0), &FitStyle::with_text(EIGHT_WORDS));
    assert_eq!(result.font_size, 11.0);
    assert_eq!(result.required_height, 48.0);
}

#[test]
fn floor_overflow_grows_the_box() {
    let result = engine().fit(Size::new(108.0, 20.0), &FitStyle::with_text(EIGHT_WORDS));
    assert_eq!(result.font_size, 8.0);
    // two lines of 8px at 1.2 plus 4px padding each side
    assert!((result.required_height - 27.2).abs() < 1e-9, "{}", result.required_height);
}

#[test]
fn refit_at_required_height_is_stable() {
    let eng = engine();
    let style = FitStyle::with_text(EIGHT_WORDS);
    let first = eng.fit(Size::new(108.0, 20.0), &style);
    let second = eng.fit(Size::new(108.0, first.required_height), &style);
    assert_eq!(second.font_size, 8.0);
    assert_eq!(second.required_height, first.required_height);
}

#[test]
fn short_text_grows_to_the_cap() {
    let result = engine().fit(Size::new(2000.0, 2000.0), &FitStyle::with_text("Hi"));
    assert_eq!(result.font_size, 72.0);
}

#[test]
fn grown_box_always_holds_the_base_font() {
    let eng = engine();
    let style = FitStyle::with_text("A considerably longer prompt that wraps a few times");
    let size = eng.grow_to_fit(Size::new(120.0, 30.0), &style);
    let result = eng.fit(size, &style);
    assert!(result.font_size >= style.base_font_size);
    assert_eq!(result.required_height, size.height);
}

/// Every glyph the same width.
struct Monospace {
    em: f64,
}

impl TextMeasurer for Monospace {
    fn measure(&self, text: &str, font: &FontSpec) -> Option<f64> {
        Some(text.chars().count() as f64 * self.em * font.size)
    }
}

#[test]
fn custom_measurer_drives_the_minimums() {
    let config = FitConfig {
        padding: 0.0,
        ..FitConfig::default()
    };
    let eng = TextFitEngine::new(Monospace { em: 0.5 }, config);
    let style = FitStyle::with_text("abcdefghij abc");
    // "abcdefghij" at 16px
    assert_eq!(eng.min_width(&style), 80.0);
    // two lines at 80 wide
    assert!((eng.min_height(&style, 80.0) - 38.4).abs() < 1e-9);
    // one line at 112 wide
    assert!((eng.min_height(&style, 112.0) - 24.0).abs() < 1e-9);
}
