use crate::error::GenerateError;
use crate::rendering::FontFace;
use image::{Rgba, RgbaImage};
use tiny_skia::{ColorU8, FillRule, Paint, Pixmap, Transform};
use title_art::{LayoutPlan, Rgb};

/// Draw the lines of `plan` onto `background` in `color`.
///
/// Glyphs are filled anti-aliased from their outlines, each line starting
/// at its planned pen origin and advancing by the same per-glyph advances
/// layout measured with. Without a font, or with an empty plan, the
/// background comes back untouched.
///
/// Outlines are filled unhinted, exactly as designed in the font; output
/// does not depend on the host's font rendering settings.
pub fn render_text(
    background: RgbaImage,
    plan: &LayoutPlan,
    face: Option<&FontFace<'_>>,
    color: Rgb,
) -> Result<RgbaImage, GenerateError> {
    let face = match face {
        Some(face) if !plan.is_empty() => face,
        _ => return Ok(background),
    };

    let mut pixmap = to_pixmap(&background)?;

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = true;

    let font_size = plan.font_size();
    for placed in plan.placed() {
        let baseline = placed.baseline as f32;
        let mut pen_x = placed.x as f32;
        for ch in placed.line.text.chars() {
            let glyph = face.glyph_index(ch);
            if let Some(path) = face.glyph_path(glyph, font_size, pen_x, baseline) {
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
            pen_x += face.glyph_advance(glyph, font_size) as f32;
        }
    }

    tracing::debug!(
        lines = plan.lines().len(),
        font_size,
        "Drew title text"
    );

    Ok(to_image(&pixmap))
}

fn to_pixmap(image: &RgbaImage) -> Result<Pixmap, GenerateError> {
    let (width, height) = image.dimensions();
    let mut pixmap =
        Pixmap::new(width, height).ok_or(GenerateError::PixmapAllocation { width, height })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image
}
