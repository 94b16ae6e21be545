use sha2::{Digest, Sha256};
use title_art::{DecimalDigest, Palette};

/// Content digest of a title, the seed for everything procedural.
///
/// The first 16 bytes of the title's SHA-256 give both the stored file name
/// (as 32 lowercase hex characters) and the decimal-folded digest that the
/// palette and speckle pattern are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleDigest {
    hex: String,
    decimal: DecimalDigest,
}

impl TitleDigest {
    pub fn of(text: &str) -> Self {
        let hash = Sha256::digest(text.as_bytes());
        let mut head = [0u8; 16];
        head.copy_from_slice(&hash[..16]);

        Self {
            hex: hex::encode(head),
            decimal: DecimalDigest::from_bytes(head),
        }
    }

    /// 32 lowercase hex characters.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn decimal(&self) -> &DecimalDigest {
        &self.decimal
    }

    pub fn palette(&self, addon: usize) -> Palette {
        Palette::from_digest(&self.decimal, addon)
    }
}

/// Base and speckle colours for `text`.
pub fn derive_palette(text: &str) -> Palette {
    TitleDigest::of(text).palette(0)
}
