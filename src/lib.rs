//! Puts a wrapped, outlined quotation onto a resized raster image.
//!
//! [`OverlayEngine::render`] runs the whole pipeline: [`image_io`] decodes and resizes the source,
//! [`font`] resolves a usable face, [`wrap`] breaks the quote into lines, [`layout`] positions them
//! around the anchor, [`compose`] stamps halo and fill, and [`image_io`] writes the result.

pub mod color;
pub mod compose;
pub mod config;
pub mod engine;
pub mod error;
pub mod font;
pub mod image_io;
pub mod layout;
pub mod quotes;
pub mod wrap;

pub use engine::{OverlayEngine, Rendered, StyleRequest};
pub use error::OverlayError;
pub use quotes::Quote;
