//! Decimal-folded digest used as a seed string.

use std::fmt;

/// Number of characters in a digest.
pub const DIGEST_LEN: usize = 32;

/// Number of digits read for one numeric seed.
pub const WINDOW_LEN: usize = 9;

/// Error returned when a hex digest cannot be folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestError {
    /// Input was not exactly [`DIGEST_LEN`] bytes long
    InvalidLength(usize),
    /// Input contained a byte that is not a hex digit
    InvalidChar(char),
}

impl fmt::Display for DigestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestError::InvalidLength(len) => {
                write!(f, "digest must be {} hex characters, got {}", DIGEST_LEN, len)
            }
            DigestError::InvalidChar(c) => write!(f, "invalid digest character: {:?}", c),
        }
    }
}

impl std::error::Error for DigestError {}

/// A 32-character digest in which every character is an ASCII decimal digit.
///
/// Built from a hex digest by shifting `a`..`f` down onto `0`..`5`. The
/// folded string can be sliced and parsed as decimal without any hex
/// decoding, which is what the palette and noise code rely on.
///
/// ```
/// use title_art::DecimalDigest;
///
/// let digest = DecimalDigest::from_hex("0123456789abcdef0123456789abcdef").unwrap();
/// assert_eq!(digest.as_str(), "01234567890123450123456789012345");
/// assert_eq!(digest.window(1), 123_456_789);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecimalDigest([u8; DIGEST_LEN]);

impl DecimalDigest {
    /// Fold a hex digest into decimal digits. Upper-case hex is accepted.
    pub fn from_hex(hex: &str) -> Result<Self, DigestError> {
        let bytes = hex.as_bytes();
        if bytes.len() != DIGEST_LEN {
            return Err(DigestError::InvalidLength(bytes.len()));
        }

        let mut folded = [0u8; DIGEST_LEN];
        for (slot, &byte) in folded.iter_mut().zip(bytes) {
            *slot = match byte {
                b'0'..=b'9' => byte,
                // 'a' (97) lands on '0' (48)
                b'a'..=b'f' => byte - 49,
                b'A'..=b'F' => byte - 17,
                _ => return Err(DigestError::InvalidChar(byte as char)),
            };
        }
        Ok(Self(folded))
    }

    /// Fold raw digest bytes, two digits per byte (high nibble first).
    ///
    /// Equivalent to hex-encoding `bytes` in lower case and calling
    /// [`from_hex`](Self::from_hex), but cannot fail.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN / 2]) -> Self {
        let mut folded = [0u8; DIGEST_LEN];
        for (pair, byte) in folded.chunks_exact_mut(2).zip(bytes) {
            pair[0] = b'0' + (byte >> 4) % 10;
            pair[1] = b'0' + (byte & 0x0f) % 10;
        }
        Self(folded)
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Character code at `index`, wrapping around the digest length.
    #[inline]
    pub fn code(&self, index: usize) -> u8 {
        self.0[index % DIGEST_LEN]
    }

    /// Numeric value (0-9) at `index`, wrapping around the digest length.
    #[inline]
    pub fn digit(&self, index: usize) -> u8 {
        self.code(index) - b'0'
    }

    /// Parse the [`WINDOW_LEN`]-digit window starting at `start`.
    ///
    /// `start` is clamped so the window always lies inside the digest.
    pub fn window(&self, start: usize) -> u64 {
        let start = start.min(DIGEST_LEN - WINDOW_LEN);
        self.0[start..start + WINDOW_LEN]
            .iter()
            .fold(0u64, |acc, &c| acc * 10 + u64::from(c - b'0'))
    }
}

impl fmt::Display for DecimalDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
