use crate::error::GenerateError;
use crate::models::{ArticleUpdate, GenerationConfig, SubImage, TitleSource};
use crate::rendering::{
    build_background, encode_base64_data_uri, render_text, Encoder, FontResolver, ResolvedFont,
    TitleDigest,
};
use crate::services::headings::{extract_headings, image_paragraph, insert_at};
use crate::services::ImageStorage;
use image::RgbaImage;
use std::sync::Arc;
use title_art::{layout, Rgb};

/// Generates and stores title images for articles.
///
/// The font is resolved once when the pipeline is built and shared by
/// every image it renders. Runs hold no mutable state, so one pipeline can
/// serve several threads.
pub struct TitleImagePipeline {
    config: GenerationConfig,
    text_color: Rgb,
    font: Option<ResolvedFont>,
    encoder: Encoder,
    storage: Arc<dyn ImageStorage>,
}

impl TitleImagePipeline {
    /// Validate `config` and resolve the font from the system.
    pub fn new(
        config: GenerationConfig,
        storage: Arc<dyn ImageStorage>,
    ) -> Result<Self, GenerateError> {
        let font = FontResolver::new(config.font_file()).resolve();
        Self::with_font(config, font, storage)
    }

    /// Build with an already resolved font (or none).
    pub fn with_font(
        config: GenerationConfig,
        font: Option<ResolvedFont>,
        storage: Arc<dyn ImageStorage>,
    ) -> Result<Self, GenerateError> {
        config.validate()?;
        let text_color = config.text_color()?;
        let encoder = Encoder::new(config.optimize_png);

        Ok(Self {
            config,
            text_color,
            font,
            encoder,
            storage,
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn font(&self) -> Option<&ResolvedFont> {
        self.font.as_ref()
    }

    /// Background plus laid-out title. Without a font only the background
    /// is returned.
    pub fn render_image(&self, title: &str) -> Result<RgbaImage, GenerateError> {
        self.render_with_digest(title, &TitleDigest::of(title))
    }

    fn render_with_digest(
        &self,
        title: &str,
        digest: &TitleDigest,
    ) -> Result<RgbaImage, GenerateError> {
        let background = build_background(&self.config, digest);

        let Some(font) = &self.font else {
            return Ok(background);
        };
        let face = font.face().map_err(|e| {
            tracing::warn!(%e, "Resolved font no longer parses");
            GenerateError::FontResolution
        })?;

        let plan = layout(title, &face, &self.config.layout_params());
        tracing::debug!(
            title,
            font_size = plan.font_size(),
            lines = plan.lines().len(),
            "Laid out title"
        );

        render_text(background, &plan, Some(&face), self.text_color)
    }

    /// Render, encode and upload one image; returns the storage location.
    pub fn store_image(&self, title: &str) -> Result<String, GenerateError> {
        let digest = TitleDigest::of(title);
        let image = self.render_with_digest(title, &digest)?;
        let encoded =
            self.encoder
                .encode(&image, self.config.format, self.config.quality, digest.hex())?;
        let location = self.storage.upload(&encoded.bytes, &encoded.filename)?;
        tracing::info!(title, %location, "Stored title image");
        Ok(location)
    }

    /// Generate the main image for `source` and, when enabled, one image per
    /// section heading of its body.
    ///
    /// Fails only when the main image cannot be produced. A heading whose
    /// image fails is logged and left without one.
    pub fn generate(&self, source: &TitleSource) -> Result<ArticleUpdate, GenerateError> {
        if self.font.is_none() {
            return Err(GenerateError::FontResolution);
        }

        let location = self.store_image(&source.title)?;
        let mut images = source.images.clone();
        images.push(self.config.public_reference(&location).to_string());

        let mut update = ArticleUpdate {
            images,
            ..Default::default()
        };

        if !self.config.draw_sub {
            return Ok(update);
        }
        let Some(body) = source.body() else {
            return Ok(update);
        };

        let mut insertions = Vec::new();
        for heading in extract_headings(body) {
            match self.store_image(&heading.text) {
                Ok(location) => {
                    insertions.push((heading.block.end, image_paragraph(&location, &heading.text)));
                    update.sub_images.push(SubImage {
                        heading: heading.text,
                        location,
                    });
                }
                Err(e) => {
                    tracing::warn!(%e, heading = %heading.text, "Skipping heading image");
                }
            }
        }

        if !insertions.is_empty() {
            update.content = Some(insert_at(body, &insertions));
        }

        tracing::info!(
            title = %source.title,
            sub_images = update.sub_images.len(),
            "Generated title images"
        );
        Ok(update)
    }

    /// Inline WEBP data URI for `title`, without touching storage.
    /// An empty title has no preview.
    pub fn preview(&self, title: &str) -> Result<Option<String>, GenerateError> {
        if title.is_empty() {
            return Ok(None);
        }
        let image = self.render_image(title)?;
        encode_base64_data_uri(&image).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::services::InMemoryStorage;
    use std::path::Path;

    const TEST_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fonts/DejaVuSans.ttf");

    fn test_font() -> Option<ResolvedFont> {
        Some(ResolvedFont::from_file(Path::new(TEST_FONT), 0).unwrap())
    }

    fn small_config() -> GenerationConfig {
        GenerationConfig {
            width: 240,
            height: 160,
            optimize_png: false,
            ..Default::default()
        }
    }

    /// Rejects every upload whose name is in `refuse`.
    struct PickyStorage {
        inner: InMemoryStorage,
        refuse: Vec<String>,
    }

    impl ImageStorage for PickyStorage {
        fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, StorageError> {
            if self.refuse.iter().any(|name| name == filename) {
                return Err(StorageError::Rejected(filename.to_string()));
            }
            self.inner.upload(bytes, filename)
        }
    }

    #[test]
    fn test_pipeline_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TitleImagePipeline>();
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GenerationConfig {
            width: 0,
            ..small_config()
        };
        let result =
            TitleImagePipeline::with_font(config, test_font(), Arc::new(InMemoryStorage::new()));
        assert!(matches!(result, Err(GenerateError::Config(_))));
    }

    #[test]
    fn test_generate_without_font_fails() {
        let pipeline =
            TitleImagePipeline::with_font(small_config(), None, Arc::new(InMemoryStorage::new()))
                .unwrap();
        let result = pipeline.generate(&TitleSource::new("No font"));
        assert!(matches!(result, Err(GenerateError::FontResolution)));
    }

    #[test]
    fn test_render_without_font_is_background_only() {
        let pipeline =
            TitleImagePipeline::with_font(small_config(), None, Arc::new(InMemoryStorage::new()))
                .unwrap();
        let image = pipeline.render_image("Title").unwrap();
        let background = build_background(pipeline.config(), &TitleDigest::of("Title"));
        assert_eq!(image.as_raw(), background.as_raw());
    }

    #[test]
    fn test_main_image_named_by_digest() {
        let storage = Arc::new(InMemoryStorage::new());
        let pipeline =
            TitleImagePipeline::with_font(small_config(), test_font(), storage.clone()).unwrap();

        let update = pipeline.generate(&TitleSource::new("Hello World")).unwrap();
        assert_eq!(
            update.images,
            vec!["memory://a591a6d40bf420404a011733cfb7b190.png"]
        );
        assert!(storage.get("a591a6d40bf420404a011733cfb7b190.png").is_some());
        assert_eq!(update.content, None);
    }

    #[test]
    fn test_sub_image_failure_is_skipped() {
        let refused = format!("{}.png", TitleDigest::of("Broken").hex());
        let storage = Arc::new(PickyStorage {
            inner: InMemoryStorage::new(),
            refuse: vec![refused],
        });
        let config = GenerationConfig {
            draw_sub: true,
            ..small_config()
        };
        let pipeline = TitleImagePipeline::with_font(config, test_font(), storage).unwrap();

        let source =
            TitleSource::new("Article").with_content("<h2>Broken</h2><p>a</p><h2>Works</h2>");
        let update = pipeline.generate(&source).unwrap();

        assert_eq!(update.sub_images.len(), 1);
        assert_eq!(update.sub_images[0].heading, "Works");
        let content = update.content.unwrap();
        assert!(content.starts_with("<h2>Broken</h2><p>a</p><h2>Works</h2>\n<p><img src="));
    }

    #[test]
    fn test_main_image_storage_failure_is_fatal() {
        let refused = format!("{}.png", TitleDigest::of("Main").hex());
        let storage = Arc::new(PickyStorage {
            inner: InMemoryStorage::new(),
            refuse: vec![refused],
        });
        let pipeline = TitleImagePipeline::with_font(small_config(), test_font(), storage).unwrap();
        let result = pipeline.generate(&TitleSource::new("Main"));
        assert!(matches!(result, Err(GenerateError::Storage(_))));
    }

    #[test]
    fn test_storage_io_failure_is_reported_as_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("covers");
        std::fs::write(&blocker, b"not a directory").unwrap();
        let storage = Arc::new(crate::services::DirectoryStorage::new(&blocker, "/covers"));
        let pipeline = TitleImagePipeline::with_font(small_config(), test_font(), storage).unwrap();

        let result = pipeline.generate(&TitleSource::new("Blocked"));
        assert!(matches!(
            result,
            Err(GenerateError::Storage(StorageError::Io(_)))
        ));
    }

    #[test]
    fn test_preview() {
        let pipeline = TitleImagePipeline::with_font(
            small_config(),
            test_font(),
            Arc::new(InMemoryStorage::new()),
        )
        .unwrap();

        assert_eq!(pipeline.preview("").unwrap(), None);
        let uri = pipeline.preview("Preview").unwrap().unwrap();
        assert!(uri.starts_with("data:image/webp;base64,"));
    }
}
