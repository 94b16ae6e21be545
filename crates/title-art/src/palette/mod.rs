//! Deterministic colour derivation from a title digest.
//!
//! A 32-character hex digest is folded into decimal digits and then read in
//! 9-digit windows to seed colour channels. No random source is involved, so
//! the same digest always yields the same colours on every platform.

mod digest;
mod palette;

pub use digest::{DecimalDigest, DigestError, DIGEST_LEN, WINDOW_LEN};
pub use palette::{deep_color, primary_color, Palette, MAX_ADDON};
