pub mod headings;
pub mod storage;
pub mod title_pipeline;

pub use headings::{extract_headings, Heading, HeadingLevel};
pub use storage::{DirectoryStorage, ImageStorage, InMemoryStorage};
pub use title_pipeline::TitleImagePipeline;
