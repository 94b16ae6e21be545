pub mod article;
pub mod config;

pub use article::{ArticleUpdate, SubImage, TitleSource};
pub use config::GenerationConfig;
