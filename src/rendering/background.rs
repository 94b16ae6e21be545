use crate::models::GenerationConfig;
use crate::rendering::TitleDigest;
use image::imageops::{self, FilterType};
use image::{ImageReader, Rgba, RgbaImage};
use std::path::Path;
use title_art::{deep_color, primary_color, DecimalDigest, DIGEST_LEN, MAX_ADDON};

/// Height of the procedural tile before upscaling.
pub const TILE_HEIGHT: u32 = 6;

/// Background canvas for one title, always exactly `width` x `height`.
///
/// Uses the configured picture when it decodes, otherwise synthesizes one
/// from the title digest. A picture that fails to load is logged and
/// replaced, never reported as an error.
pub fn build_background(config: &GenerationConfig, digest: &TitleDigest) -> RgbaImage {
    if let Some(path) = config.background_path() {
        match load_static(&path, config.width, config.height) {
            Ok(image) => {
                tracing::debug!(path = %path.display(), "Using static background");
                return image;
            }
            Err(e) => {
                tracing::warn!(
                    %e,
                    path = %path.display(),
                    "Failed to load background image, using procedural background"
                );
            }
        }
    }

    procedural_background(digest.decimal(), config.width, config.height, config.noise)
}

/// Decode `path` and crop-to-fill it, centred, to the target size.
///
/// The decoder is chosen from the file contents, so the extension does not
/// have to match the format.
pub fn load_static(path: &Path, width: u32, height: u32) -> Result<RgbaImage, image::ImageError> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image
        .resize_to_fill(width, height, FilterType::Lanczos3)
        .to_rgba8())
}

/// Width of a [`TILE_HEIGHT`]-row tile with the canvas aspect ratio.
pub fn tile_width(width: u32, height: u32) -> u32 {
    if height == 0 {
        return 1;
    }
    ((f64::from(width) / f64::from(height) * f64::from(TILE_HEIGHT)) as u32).max(1)
}

/// Small tile filled with the primary colour, optionally speckled.
///
/// Speckles are placed by walking the digest cyclically: rows whose digit
/// is even are left plain; on the other rows each column advances the walk
/// and gets a deep-colour pixel whenever the digit it lands on is a
/// multiple of three. The digit's character code picks the colour window.
pub fn procedural_tile(digest: &DecimalDigest, tile_width: u32, noise: bool) -> RgbaImage {
    let base = primary_color(digest, 0).to_rgba();
    let mut tile = RgbaImage::from_pixel(tile_width, TILE_HEIGHT, Rgba(base));
    if !noise {
        return tile;
    }

    let mut cursor = 0usize;
    for y in 0..TILE_HEIGHT {
        if digest.digit(y as usize) % 2 == 0 {
            continue;
        }
        for x in 0..tile_width {
            cursor = (cursor + 1) % DIGEST_LEN;
            if digest.digit(cursor) % 3 == 0 {
                let addon = usize::from(digest.code(cursor)) % MAX_ADDON;
                tile.put_pixel(x, y, Rgba(deep_color(digest, addon).to_rgba()));
            }
        }
    }
    tile
}

/// Procedural background: a tile upscaled with a Gaussian filter.
pub fn procedural_background(
    digest: &DecimalDigest,
    width: u32,
    height: u32,
    noise: bool,
) -> RgbaImage {
    let tile = procedural_tile(digest, tile_width(width, height), noise);
    imageops::resize(&tile, width, height, FilterType::Gaussian)
}
