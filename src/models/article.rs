use serde::{Deserialize, Serialize};

/// The article fields cover generation reads.
///
/// The pipeline never mutates this; it returns an [`ArticleUpdate`] for the
/// caller to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TitleSource {
    pub title: String,

    /// Rich-text HTML body, scanned for section headings
    #[serde(default)]
    pub content: Option<String>,

    /// Image references already recorded on the article
    #[serde(default)]
    pub images: Vec<String>,
}

impl TitleSource {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Body text, if there is any worth scanning.
    pub fn body(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// One image generated for a section heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubImage {
    pub heading: String,
    pub location: String,
}

/// What a pipeline run produced for one article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArticleUpdate {
    /// Existing references followed by the new main image
    pub images: Vec<String>,

    /// Rewritten body; `None` when no sub-image was inserted
    pub content: Option<String>,

    /// Sub-images in heading order
    pub sub_images: Vec<SubImage>,
}

impl ArticleUpdate {
    /// Reference of the main image generated by this run.
    pub fn main_image(&self) -> Option<&str> {
        self.images.last().map(String::as_str)
    }
}
