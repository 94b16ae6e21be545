//! Line packing and placement.

use super::metrics::AdvanceMetrics;
use super::segment::segment;
use super::sizing::{choose_font_size, TEXT_GAP};

/// Line height as a multiple of the font size.
const LINE_SPACING: f64 = 1.6;

/// Canvas geometry and the configured font-size floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    pub width: u32,
    pub height: u32,
    pub min_font_size: u32,
}

impl LayoutParams {
    pub const fn new(width: u32, height: u32, min_font_size: u32) -> Self {
        Self {
            width,
            height,
            min_font_size,
        }
    }

    /// Widest a line may grow before it is closed.
    pub fn max_text_width(&self) -> u32 {
        self.width.saturating_sub(TEXT_GAP)
    }
}

/// One laid-out line of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    /// Measured advance width in pixels
    pub width: u32,
    pub font_size: u32,
}

/// A line with its pen origin on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedLine<'a> {
    pub line: &'a Line,
    /// Left edge of the first glyph; negative when the line is wider than the canvas
    pub x: i32,
    pub baseline: i32,
}

/// The full layout of one title: lines plus the vertical metrics to place them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    lines: Vec<Line>,
    canvas_width: u32,
    font_size: u32,
    start_y: i32,
    line_height: i32,
}

impl LayoutPlan {
    /// A plan that draws nothing.
    pub fn empty(canvas_width: u32, font_size: u32) -> Self {
        Self {
            lines: Vec::new(),
            canvas_width,
            font_size,
            start_y: 0,
            line_height: line_height(font_size),
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    /// Baseline of the first line.
    pub fn start_y(&self) -> i32 {
        self.start_y
    }

    pub fn line_height(&self) -> i32 {
        self.line_height
    }

    /// Lines with horizontally centred origins, one line height apart.
    pub fn placed(&self) -> impl Iterator<Item = PlacedLine<'_>> {
        let canvas_width = self.canvas_width as i32;
        self.lines.iter().enumerate().map(move |(i, line)| PlacedLine {
            line,
            x: (canvas_width - line.width as i32) / 2,
            baseline: self.start_y + i as i32 * self.line_height,
        })
    }
}

fn line_height(font_size: u32) -> i32 {
    (f64::from(font_size) * LINE_SPACING) as i32
}

/// Baseline of the first of `line_count` lines so the block sits centred.
fn block_start_y(canvas_height: u32, font_size: u32, line_count: usize) -> i32 {
    let size = font_size as i64;
    let extra_lines = line_count.saturating_sub(1) as i64;
    let first_line = (size as f64 / 1.5) as i64;
    let spread = ((extra_lines * size) as f64 * LINE_SPACING) as i64 / 2;
    (i64::from(canvas_height) / 2 - (first_line + spread) + size) as i32
}

/// Greedily pack `tokens` into lines at most `max_width` pixels wide.
///
/// A token joins the pending line only while the running width stays within
/// `max_width`. Reaching the limit exactly closes the line with that token;
/// overshooting it closes the line without the token, which then opens the
/// next line. A single token wider than `max_width` therefore gets a line of
/// its own. Empty lines are never produced.
pub fn pack_lines<M: AdvanceMetrics>(
    tokens: &[&str],
    metrics: &M,
    font_size: u32,
    max_width: u32,
) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut pending = String::new();
    let mut running: u32 = 0;

    let close = |text: &mut String, lines: &mut Vec<Line>| {
        if !text.is_empty() {
            let text = std::mem::take(text);
            let width = metrics.text_width(&text, font_size);
            lines.push(Line {
                text,
                width,
                font_size,
            });
        }
    };

    for token in tokens {
        let token_width = metrics.text_width(token, font_size);
        running = running.saturating_add(token_width);

        if running <= max_width {
            pending.push_str(token);
        }
        if running >= max_width {
            close(&mut pending, &mut lines);
            if running > max_width {
                pending.push_str(token);
                running = token_width;
            } else {
                running = 0;
            }
        }
    }
    close(&mut pending, &mut lines);

    lines
}

/// Lay out `title` for the canvas described by `params`.
///
/// A title with no visible tokens (empty or whitespace only) yields an empty
/// plan; callers draw the background alone.
pub fn layout<M: AdvanceMetrics>(title: &str, metrics: &M, params: &LayoutParams) -> LayoutPlan {
    let font_size = choose_font_size(params.width, title, params.min_font_size);
    let tokens = segment(title);
    if tokens.iter().all(|token| token.trim().is_empty()) {
        return LayoutPlan::empty(params.width, font_size);
    }

    let lines = pack_lines(&tokens, metrics, font_size, params.max_text_width());
    let start_y = block_start_y(params.height, font_size, lines.len());

    LayoutPlan {
        lines,
        canvas_width: params.width,
        font_size,
        start_y,
        line_height: line_height(font_size),
    }
}
