//! Width-aware title layout.
//!
//! The engine works in three steps:
//!
//! 1. [`segment`] splits the title into tokens: runs of letters and digits
//!    stay together, every CJK character stands alone, and anything else
//!    (spaces, punctuation) is a single-character token.
//! 2. [`choose_font_size`] picks one pixel size for the whole title so short
//!    titles render large and long titles shrink, within fixed bounds.
//! 3. [`layout`] measures each token with an [`AdvanceMetrics`]
//!    implementation, greedily packs tokens into lines no wider than the
//!    text box, and positions the block centred on the canvas.
//!
//! Nothing here rasterizes. Measurement comes from a font's advance table,
//! so the same plan can be drawn by any renderer that advances its pen by
//! the same metrics.

mod metrics;
mod plan;
mod segment;
mod sizing;

pub use metrics::{AdvanceMetrics, UniformAdvance};
pub use plan::{layout, pack_lines, LayoutParams, LayoutPlan, Line, PlacedLine};
pub use segment::{classify, is_cjk, segment, CharClass};
pub use sizing::{
    choose_font_size, effective_min_size, DEFAULT_FONT_SIZE, MAX_FONT_SIZE, MIN_FONT_FLOOR,
    TEXT_GAP,
};
