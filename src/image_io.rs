use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader, RgbaImage, imageops::FilterType};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::OverlayError;

/// Encoding of every written file, whatever extension its name carries.
pub const OUTPUT_FORMAT: ImageFormat = ImageFormat::Jpeg;
const FALLBACK_EXTENSION: &str = "jpg";

pub fn load(path: &Path) -> Result<DynamicImage, OverlayError> {
	let not_found = |source| OverlayError::SourceNotFound { path: path.to_owned(), source };
	let reader = ImageReader::open(path).map_err(not_found)?.with_guessed_format().map_err(not_found)?;
	reader.decode().map_err(|source| OverlayError::Decode { path: path.to_owned(), source })
}

/// Scales to `target_width`, keeping the aspect ratio, with nearest-neighbour sampling.
pub fn resize(img: &DynamicImage, target_width: u32) -> DynamicImage {
	let (width, height) = img.dimensions();
	let target_height = scaled_height(width, height, target_width);
	debug!(width, height, target_width, target_height, "resizing source image");
	img.resize_exact(target_width, target_height, FilterType::Nearest)
}

pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
	let scaled = (f64::from(target_width) * f64::from(height) / f64::from(width.max(1))).round();
	(scaled as u32).max(1)
}

/// Writes `img` into `dir` under a fresh random name that keeps the source's extension.
///
/// The directory must already exist. A failed write may leave a partial file behind.
pub fn save(img: RgbaImage, dir: &Path, source: &Path) -> Result<PathBuf, OverlayError> {
	let extension = source.extension().and_then(|ext| ext.to_str()).unwrap_or(FALLBACK_EXTENSION);
	let destination = dir.join(format!("{}.{extension}", Uuid::new_v4().simple()));

	// JPEG has no alpha channel
	let rgb = DynamicImage::ImageRgba8(img).into_rgb8();
	rgb.save_with_format(&destination, OUTPUT_FORMAT)
		.map_err(|source| OverlayError::Encode { path: destination.clone(), source })?;

	info!(path = %destination.display(), "wrote overlay image");
	Ok(destination)
}
