//! Primary and deep colour derivation.

use super::digest::DecimalDigest;
use crate::color::Rgb;

/// Largest addon for which both colour windows stay inside the digest.
///
/// The primary window starts at `addon`, the deep window at
/// `MAX_ADDON - addon`; each is nine digits wide.
pub const MAX_ADDON: usize = 22;

/// Combined red and green level above which blue is dropped entirely.
const LUMINANCE_CAP: u64 = 400;

/// A base colour and its darkened companion, both derived from one digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub deep: Rgb,
}

impl Palette {
    /// Derive both colours for `addon` from `digest`.
    ///
    /// ```
    /// use title_art::{DecimalDigest, Palette, Rgb};
    ///
    /// let digest = DecimalDigest::from_hex("0123456789abcdef0123456789abcdef").unwrap();
    /// let palette = Palette::from_digest(&digest, 0);
    /// assert_eq!(palette.primary, Rgb::new(108, 105, 187));
    /// assert_eq!(palette.deep, Rgb::new(121, 124, 42));
    /// ```
    pub fn from_digest(digest: &DecimalDigest, addon: usize) -> Self {
        Self {
            primary: primary_color(digest, addon),
            deep: deep_color(digest, addon),
        }
    }
}

/// Base colour seeded by the window at `addon`.
///
/// Red and green come straight from the seed; blue fills the remaining
/// budget up to [`LUMINANCE_CAP`] so all three channels are never bright at
/// the same time.
pub fn primary_color(digest: &DecimalDigest, addon: usize) -> Rgb {
    let addon = addon.min(MAX_ADDON);
    let seed = digest.window(addon);

    let red = seed % 255;
    let green = (seed / 1000) % 255;
    let blue = if red + green > LUMINANCE_CAP {
        0
    } else {
        (LUMINANCE_CAP - green - red).min(255)
    };

    Rgb::new(red as u8, green as u8, blue as u8)
}

/// Darkened variant of [`primary_color`] for the same `addon`.
///
/// A second window, mirrored around [`MAX_ADDON`], picks an offset in
/// `[30, 284]` that is subtracted from every channel. The distance is taken
/// as an absolute value, so very dark bases flip towards lighter tones
/// instead of clipping to black.
pub fn deep_color(digest: &DecimalDigest, addon: usize) -> Rgb {
    let addon = addon.min(MAX_ADDON);
    let base = primary_color(digest, addon);
    let increase = 30 + (digest.window(MAX_ADDON - addon) % 255) as i32;

    let darken = |channel: u8| (i32::from(channel) - increase).min(255).abs().min(255) as u8;

    Rgb::new(darken(base.r), darken(base.g), darken(base.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DecimalDigest {
        DecimalDigest::from_hex("0123456789abcdef0123456789abcdef").unwrap()
    }

    #[test]
    fn test_primary_by_hand() {
        // window(0) = 12345678 -> red 108, green 12345 % 255 = 105
        assert_eq!(primary_color(&sample(), 0), Rgb::new(108, 105, 187));
    }

    #[test]
    fn test_deep_by_hand() {
        // window(22) = 678901234 -> increase 30 + 199 = 229
        assert_eq!(deep_color(&sample(), 0), Rgb::new(121, 124, 42));
    }

    #[test]
    fn test_blue_dropped_when_red_and_green_bright() {
        // window(0) = 100128044 -> red 254, green 100128 % 255 = 168
        let digest = DecimalDigest::from_hex("10012804400000000000000000000000").unwrap();
        assert_eq!(primary_color(&digest, 0), Rgb::new(254, 168, 0));
    }

    #[test]
    fn test_blue_capped_at_255() {
        // window(0) = 0 -> red 0, green 0, blue min(400, 255)
        let digest = DecimalDigest::from_hex("00000000000000000000000000000000").unwrap();
        assert_eq!(primary_color(&digest, 0), Rgb::new(0, 0, 255));
    }

    #[test]
    fn test_addon_shifts_window() {
        let digest = sample();
        assert_ne!(primary_color(&digest, 0), primary_color(&digest, 1));
    }

    #[test]
    fn test_addon_is_clamped() {
        let digest = sample();
        assert_eq!(primary_color(&digest, 500), primary_color(&digest, MAX_ADDON));
        assert_eq!(deep_color(&digest, 500), deep_color(&digest, MAX_ADDON));
    }
}
