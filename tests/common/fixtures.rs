//! Test fixtures and constants.

use std::path::Path;
use titlecard::models::GenerationConfig;
use titlecard::rendering::ResolvedFont;

/// Font shipped with the repository so results do not depend on the host
pub const TEST_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fonts/DejaVuSans.ttf");

pub fn test_font() -> ResolvedFont {
    ResolvedFont::from_file(Path::new(TEST_FONT), 0).expect("bundled test font parses")
}

/// Small canvas keeps encoding fast; PNG optimisation off for byte-stable output
pub fn small_config() -> GenerationConfig {
    GenerationConfig {
        width: 240,
        height: 160,
        optimize_png: false,
        ..Default::default()
    }
}

/// Article bodies
pub mod html {
    /// Two `<h2>` sections with an `<h3>` between them
    pub const TWO_H2_ONE_H3: &str = "<p>Intro</p>\n\
        <h2>First section</h2>\n\
        <p>a</p>\n\
        <h3>Detail</h3>\n\
        <p>b</p>\n\
        <h2 class=\"wide\">Second section</h2>\n\
        <p>c</p>";

    /// Only `<h3>` sections
    pub const H3_ONLY: &str = "<h3>Alpha</h3><p>a</p><h3>Beta</h3><p>b</p>";

    /// The same heading text twice
    pub const DUPLICATE_HEADINGS: &str = "<h2>Same</h2><p>x</p><h2>Same</h2>";

    /// No headings at all
    pub const PLAIN: &str = "<p>Just a paragraph.</p>";
}
