use crate::error::GenerateError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

/// WEBP quality used for inline previews.
pub const PREVIEW_QUALITY: u8 = 85;

/// Output container for generated images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Webp,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Webp => "webp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "webp" => Ok(ImageFormat::Webp),
            other => Err(format!("unsupported image format: {other} (expected png or webp)")),
        }
    }
}

/// Encoded bytes ready for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    /// `<stem>.<extension>`
    pub filename: String,
}

/// Turns finished canvases into PNG or WEBP bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    /// Re-compress PNG output with oxipng
    pub optimize_png: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self { optimize_png: true }
    }
}

impl Encoder {
    pub fn new(optimize_png: bool) -> Self {
        Self { optimize_png }
    }

    /// Encode `image` as `format`. `quality` (1-100) only affects WEBP.
    pub fn encode(
        &self,
        image: &RgbaImage,
        format: ImageFormat,
        quality: u8,
        stem: &str,
    ) -> Result<EncodedImage, GenerateError> {
        let bytes = match format {
            ImageFormat::Png => self.encode_png(image)?,
            ImageFormat::Webp => encode_webp(image, quality)?,
        };

        tracing::debug!(
            %format,
            bytes = bytes.len(),
            width = image.width(),
            height = image.height(),
            "Encoded image"
        );

        Ok(EncodedImage {
            bytes,
            format,
            filename: format!("{stem}.{}", format.extension()),
        })
    }

    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>, GenerateError> {
        // Drop the alpha channel when nothing uses it
        let opaque = image.pixels().all(|p| p.0[3] == u8::MAX);
        let (color_type, data) = if opaque {
            let rgb: Vec<u8> = image
                .pixels()
                .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
                .collect();
            (png::ColorType::Rgb, rgb)
        } else {
            (png::ColorType::Rgba, image.as_raw().clone())
        };

        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
            encoder.set_color(color_type);
            encoder.set_depth(png::BitDepth::Eight);
            if self.optimize_png {
                // Fast settings; oxipng re-compresses below
                encoder.set_compression(png::Compression::Fast);
                encoder.set_filter(png::FilterType::NoFilter);
            } else {
                encoder.set_compression(png::Compression::Default);
            }
            let mut writer = encoder
                .write_header()
                .map_err(|e| GenerateError::Encoding(format!("PNG header: {e}")))?;
            writer
                .write_image_data(&data)
                .map_err(|e| GenerateError::Encoding(format!("PNG data: {e}")))?;
        }
        let png_bytes = buf.into_inner();

        if !self.optimize_png {
            return Ok(png_bytes);
        }

        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                optimize_alpha: false,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);
        Ok(optimized)
    }
}

fn encode_webp(image: &RgbaImage, quality: u8) -> Result<Vec<u8>, GenerateError> {
    let quality = f32::from(quality.clamp(1, 100));
    let memory = webp::Encoder::from_rgba(image.as_raw(), image.width(), image.height())
        .encode_simple(false, quality)
        .map_err(|e| GenerateError::Encoding(format!("WEBP: {e:?}")))?;
    Ok(memory.to_vec())
}

/// `data:image/webp;base64,...` preview of `image` at [`PREVIEW_QUALITY`].
pub fn encode_base64_data_uri(image: &RgbaImage) -> Result<String, GenerateError> {
    let bytes = encode_webp(image, PREVIEW_QUALITY)?;
    Ok(format!(
        "data:{};base64,{}",
        ImageFormat::Webp.mime_type(),
        STANDARD.encode(bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 255 / width) as u8, (y * 255 / height) as u8, 128, 255])
        })
    }

    #[test]
    fn test_format_parsing_and_display() {
        assert_eq!("PNG".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("webp".parse::<ImageFormat>().unwrap(), ImageFormat::Webp);
        assert!("gif".parse::<ImageFormat>().is_err());
        assert_eq!(ImageFormat::Webp.to_string(), "webp");
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_png_decodes_to_same_pixels() {
        let image = gradient(64, 48);
        let encoded = Encoder::default()
            .encode(&image, ImageFormat::Png, 100, "abc")
            .unwrap();

        assert_eq!(encoded.filename, "abc.png");
        assert_eq!(encoded.format, ImageFormat::Png);
        assert_eq!(&encoded.bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&encoded.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), image.as_raw());
    }

    #[test]
    fn test_png_without_optimization() {
        let image = gradient(16, 16);
        let encoded = Encoder::new(false)
            .encode(&image, ImageFormat::Png, 100, "plain")
            .unwrap();
        let decoded = image::load_from_memory(&encoded.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), image.as_raw());
    }

    #[test]
    fn test_png_keeps_transparency() {
        let mut image = gradient(8, 8);
        image.put_pixel(0, 0, Rgba([1, 2, 3, 0]));
        let encoded = Encoder::new(false)
            .encode(&image, ImageFormat::Png, 100, "alpha")
            .unwrap();
        let decoded = image::load_from_memory(&encoded.bytes).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn test_webp_decodes_to_same_dimensions() {
        let image = gradient(120, 80);
        let encoded = Encoder::default()
            .encode(&image, ImageFormat::Webp, 90, "abc")
            .unwrap();

        assert_eq!(encoded.filename, "abc.webp");
        assert_eq!(&encoded.bytes[..4], b"RIFF");
        assert_eq!(&encoded.bytes[8..12], b"WEBP");

        let decoded = image::load_from_memory(&encoded.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 80));
    }

    #[test]
    fn test_data_uri_prefix_and_payload() {
        let image = gradient(32, 32);
        let uri = encode_base64_data_uri(&image).unwrap();
        let payload = uri.strip_prefix("data:image/webp;base64,").unwrap();

        let bytes = STANDARD.decode(payload).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }
}
