//! Titlecard - cover images for articles that have none
//!
//! Generates a title image from an article's title: a background derived
//! from the title's digest (or a configured picture), the title laid out
//! centred on top, encoded as PNG or WEBP and handed to a storage backend.
//! Optionally does the same for every section heading of the article body
//! and links the results inline.
//!
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
