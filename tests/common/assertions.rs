//! Assertion helpers for tests.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use pretty_assertions::assert_eq;

/// Assert `bytes` is a PNG image
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert `bytes` is a WEBP image
pub fn assert_webp(bytes: &[u8]) {
    assert!(
        bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP",
        "Expected WEBP image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..12.min(bytes.len())]
    );
}

/// Assert encoded `bytes` decode to an image of the given size
pub fn assert_dimensions(bytes: &[u8], width: u32, height: u32) {
    let image = image::load_from_memory(bytes).expect("image decodes");
    assert_eq!(
        (image.width(), image.height()),
        (width, height),
        "Unexpected image dimensions"
    );
}

/// Assert `uri` is a WEBP data URI and return the decoded bytes
pub fn assert_webp_data_uri(uri: &str) -> Vec<u8> {
    let payload = uri
        .strip_prefix("data:image/webp;base64,")
        .unwrap_or_else(|| panic!("Not a WEBP data URI: {}", &uri[..40.min(uri.len())]));
    let bytes = STANDARD.decode(payload).expect("valid base64");
    assert_webp(&bytes);
    bytes
}
