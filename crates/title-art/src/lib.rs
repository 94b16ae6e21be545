//! title-art: deterministic colours and text layout for generated title images
//!
//! This crate holds the parts of cover-image generation that are pure
//! functions of their input: no file access, no font parsing, no
//! rasterization. Keeping them here makes the reproducibility guarantees
//! easy to test in isolation.
//!
//! # Quick Start
//!
//! ```
//! use title_art::{layout, DecimalDigest, LayoutParams, Palette, UniformAdvance};
//!
//! let digest = DecimalDigest::from_hex("9e107d9d372bb6826bd81d3542a419d6").unwrap();
//! let palette = Palette::from_digest(&digest, 0);
//!
//! let params = LayoutParams::new(800, 600, 32);
//! let plan = layout("Hello World", &UniformAdvance::default(), &params);
//!
//! assert_eq!(plan.lines().len(), 1);
//! assert_eq!(palette, Palette::from_digest(&digest, 0));
//! ```
//!
//! # Colours
//!
//! A title's hex digest is folded into decimal digits ([`DecimalDigest`]).
//! Nine-digit windows of that string seed the colour channels:
//!
//! ```text
//! n      = window(addon)
//! red    = n % 255
//! green  = (n / 1000) % 255
//! blue   = red + green > 400 ? 0 : min(255, 400 - red - green)
//!
//! m      = window(22 - addon)
//! shift  = 30 + m % 255                      (30..=284)
//! deep.c = min(|c - shift|, 255)             for each channel c
//! ```
//!
//! `addon` moves both windows, which is how background speckles get
//! colours that differ from the base fill while staying reproducible.
//!
//! # Layout
//!
//! See the [`layout`](mod@layout) module. Measurement goes through the
//! [`AdvanceMetrics`] trait so the packer can be exercised with synthetic
//! metrics; the rendering crate implements it on top of a real font.

pub mod color;
pub mod layout;
pub mod palette;


pub use color::{Channel, ParseColorError, Rgb};
pub use layout::{
    choose_font_size, effective_min_size, layout, pack_lines, segment, AdvanceMetrics,
    LayoutParams, LayoutPlan, Line, PlacedLine, UniformAdvance, MAX_FONT_SIZE,
};
pub use palette::{
    deep_color, primary_color, DecimalDigest, DigestError, Palette, DIGEST_LEN, MAX_ADDON,
    WINDOW_LEN,
};
