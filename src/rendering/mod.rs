//! Raster side of title images: digest, font, background, text, encoding.

pub mod background;
pub mod compositor;
pub mod digest;
pub mod encoder;
pub mod font;

pub use background::{build_background, procedural_background, procedural_tile, tile_width};
pub use compositor::render_text;
pub use digest::{derive_palette, TitleDigest};
pub use encoder::{encode_base64_data_uri, EncodedImage, Encoder, ImageFormat, PREVIEW_QUALITY};
pub use font::{
    system_candidates, FontCandidate, FontError, FontFace, FontResolver, FontStrategy,
    ResolvedFont,
};
