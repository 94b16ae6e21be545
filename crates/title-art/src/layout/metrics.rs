//! Horizontal advance measurement.

use super::segment::is_cjk;

/// Source of per-glyph horizontal advances.
///
/// Implemented by the real font handle in the rendering crate and by
/// [`UniformAdvance`] for tests and previews.
pub trait AdvanceMetrics {
    /// Advance width in whole pixels of `ch` at `font_size` pixels per em.
    fn advance(&self, ch: char, font_size: u32) -> u32;

    /// Width of `text`, the sum of its per-codepoint advances.
    fn text_width(&self, text: &str, font_size: u32) -> u32 {
        text.chars().map(|ch| self.advance(ch, font_size)).sum()
    }
}

impl<T: AdvanceMetrics + ?Sized> AdvanceMetrics for &T {
    fn advance(&self, ch: char, font_size: u32) -> u32 {
        (**self).advance(ch, font_size)
    }
}

/// Fixed advances expressed as a fraction of the em size.
///
/// CJK characters use `wide`, everything else `narrow`. Roughly what a
/// monospaced Latin font paired with a square CJK font would report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformAdvance {
    pub narrow: f32,
    pub wide: f32,
}

impl UniformAdvance {
    pub const fn new(narrow: f32, wide: f32) -> Self {
        Self { narrow, wide }
    }
}

impl Default for UniformAdvance {
    fn default() -> Self {
        Self::new(0.5, 1.0)
    }
}

impl AdvanceMetrics for UniformAdvance {
    fn advance(&self, ch: char, font_size: u32) -> u32 {
        let ratio = if is_cjk(ch) { self.wide } else { self.narrow };
        (font_size as f32 * ratio).round() as u32
    }
}
