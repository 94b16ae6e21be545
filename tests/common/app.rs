//! Pipeline harness wired to in-memory storage and the bundled font.

use std::sync::Arc;
use titlecard::error::GenerateError;
use titlecard::models::{ArticleUpdate, GenerationConfig, TitleSource};
use titlecard::services::{InMemoryStorage, TitleImagePipeline};

use super::fixtures;

pub struct TestPipeline {
    pub pipeline: TitleImagePipeline,
    pub storage: Arc<InMemoryStorage>,
}

impl TestPipeline {
    /// Pipeline over [`fixtures::small_config`]
    pub fn new() -> Self {
        Self::with_config(fixtures::small_config())
    }

    pub fn with_config(config: GenerationConfig) -> Self {
        let storage = Arc::new(InMemoryStorage::new());
        let pipeline =
            TitleImagePipeline::with_font(config, Some(fixtures::test_font()), storage.clone())
                .expect("test config is valid");
        Self { pipeline, storage }
    }

    pub fn generate(&self, source: &TitleSource) -> Result<ArticleUpdate, GenerateError> {
        self.pipeline.generate(source)
    }

    /// Bytes stored under the file name at the end of `location`
    pub fn stored(&self, location: &str) -> Vec<u8> {
        let filename = location.rsplit('/').next().unwrap_or(location);
        self.storage
            .get(filename)
            .unwrap_or_else(|| panic!("nothing stored for {location}"))
    }
}
