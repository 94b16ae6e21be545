//! Font size selection.

/// Largest pixel size a title is ever drawn at.
pub const MAX_FONT_SIZE: u32 = 100;

/// Size used when the configured floor is unset or unreasonably small.
pub const DEFAULT_FONT_SIZE: u32 = 32;

/// Configured floors below this fall back to [`DEFAULT_FONT_SIZE`].
pub const MIN_FONT_FLOOR: u32 = 16;

/// Horizontal margin budget; text may use `width - TEXT_GAP` pixels.
pub const TEXT_GAP: u32 = 100;

/// Resolve the configured floor into the minimum size actually used.
///
/// Floors above [`MAX_FONT_SIZE`] are capped so the bounds never cross.
pub fn effective_min_size(configured: u32) -> u32 {
    if configured < MIN_FONT_FLOOR {
        DEFAULT_FONT_SIZE
    } else {
        configured.min(MAX_FONT_SIZE)
    }
}

/// Pick the pixel size for `title` on a canvas `width` pixels wide.
///
/// The text box width is divided evenly among the title's codepoints and the
/// result is clamped to `[min_size, MAX_FONT_SIZE]`.
pub fn choose_font_size(width: u32, title: &str, min_size: u32) -> u32 {
    let min_size = effective_min_size(min_size);
    let count = title.chars().count() as u32;
    if count == 0 {
        return MAX_FONT_SIZE;
    }
    (width.saturating_sub(TEXT_GAP) / count).clamp(min_size, MAX_FONT_SIZE)
}
