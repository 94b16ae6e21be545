//! 8-bit RGB colour type.
//!
//! Everything in the title pipeline works on opaque 8-bit channels: derived
//! background colours, speckle colours and the configured text colour.
//!
//! # Example
//!
//! ```
//! use title_art::Rgb;
//!
//! let white: Rgb = "#FFF".parse().unwrap();
//! assert_eq!(white, Rgb::new(255, 255, 255));
//! assert_eq!(white.to_rgba(), [255, 255, 255, 255]);
//! ```

mod error;

pub use error::{Channel, ParseColorError};

use std::fmt;
use std::str::FromStr;

/// An opaque colour with 8-bit red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels plus a fully opaque alpha byte.
    #[inline]
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

const CHANNELS: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// `#RRGGBB` or the `#RGB` short form, `#` optional, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits: Vec<char> = s.strip_prefix('#').unwrap_or(s).chars().collect();
        let width = match digits.len() {
            0 => return Err(ParseColorError::Empty),
            3 => 1,
            6 => 2,
            4 | 8 => return Err(ParseColorError::Alpha),
            n => return Err(ParseColorError::DigitCount(n)),
        };

        let mut channels = [0u8; 3];
        let groups = digits.chunks(width).zip(CHANNELS);
        for (slot, (group, channel)) in channels.iter_mut().zip(groups) {
            let mut value = 0u32;
            for &found in group {
                let nibble = found
                    .to_digit(16)
                    .ok_or(ParseColorError::NotHex { channel, found })?;
                value = value * 16 + nibble;
            }
            // Short form repeats each digit: F -> FF
            if width == 1 {
                value *= 17;
            }
            *slot = value as u8;
        }

        let [r, g, b] = channels;
        Ok(Self::new(r, g, b))
    }
}
