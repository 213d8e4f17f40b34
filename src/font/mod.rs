//! Font resolution with a guaranteed fallback.
//!
//! Candidates are tried in order: the requested family from the host font database, the bundled
//! font file, then a short list of common system families. The first one that actually shapes
//! glyphs at the requested size wins. If none does, the built-in bitmap font is used, so
//! [`FontResolver::resolve`] always hands back something that can draw.

mod bitmap;
mod vector;

use std::{
	fmt,
	path::{Path, PathBuf},
	sync::Arc,
};

use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use self::{bitmap::BitmapFont, vector::VectorFont};

/// Largest pixel size an outline font is shaped at. Bigger requests land on the bitmap font.
pub const MAX_FONT_SIZE: u32 = 4096;

/// Anything that can measure and rasterize a single line of text at a fixed pixel size.
pub trait Typeface {
	/// Nominal pixel size, the `font_size` the layout pads lines with.
	fn pixel_size(&self) -> u32;
	/// Extent of `line` in pixels, `(width, height)`, measured from the line top down to the descent.
	fn measure(&self, line: &str) -> (u32, u32);
	fn rasterize(&self, line: &str) -> GlyphMask;
}

/// 8-bit coverage of one rasterized line.
///
/// Row `0` of the mask sits `top` pixels below the line origin (negative when glyphs rise above
/// the nominal line top).
#[derive(Clone, Debug, Default, PartialEq, Eq, new)]
pub struct GlyphMask {
	pub width: u32,
	pub height: u32,
	pub top: i32,
	pub coverage: Vec<u8>,
}

impl GlyphMask {
	pub fn coverage_at(&self, x: u32, y: u32) -> u8 {
		self.coverage[(y * self.width + x) as usize]
	}

	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}
}

/// Where a resolved font came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FontSource {
	System { family: String },
	File { path: PathBuf },
	Builtin { scale: u32 },
}

impl fmt::Display for FontSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::System { family } => write!(f, "system font `{family}`"),
			Self::File { path } => write!(f, "font file {}", path.display()),
			Self::Builtin { scale } => write!(f, "built-in bitmap font x{scale}"),
		}
	}
}

#[derive(Debug)]
enum Face {
	Vector(VectorFont),
	Bitmap(BitmapFont),
}

/// A usable font for one render call.
#[derive(Debug)]
pub struct ResolvedFont {
	face: Face,
	source: FontSource,
}

impl ResolvedFont {
	pub fn builtin(size: u32) -> Self {
		let font = BitmapFont::nearest(size);
		let source = FontSource::Builtin { scale: font.scale() };
		Self { face: Face::Bitmap(font), source }
	}

	pub fn source(&self) -> &FontSource {
		&self.source
	}

	fn vector(font: VectorFont, source: FontSource) -> Self {
		Self { face: Face::Vector(font), source }
	}
}

impl Typeface for ResolvedFont {
	fn pixel_size(&self) -> u32 {
		match &self.face {
			Face::Vector(font) => font.pixel_size(),
			Face::Bitmap(font) => font.pixel_size(),
		}
	}

	fn measure(&self, line: &str) -> (u32, u32) {
		match &self.face {
			Face::Vector(font) => font.measure(line),
			Face::Bitmap(font) => font.measure(line),
		}
	}

	fn rasterize(&self, line: &str) -> GlyphMask {
		match &self.face {
			Face::Vector(font) => font.rasterize(line),
			Face::Bitmap(font) => font.rasterize(line),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum FontUnavailable {
	#[error("font size must be positive")]
	ZeroSize,
	#[error("font size {0} exceeds {MAX_FONT_SIZE}")]
	Oversized(u32),
	#[error("no installed face for family `{0}`")]
	NotInstalled(String),
	#[error("cannot read font file: {0}")]
	Io(#[from] std::io::Error),
	#[error("font file contains no faces")]
	NoFaces,
	#[error("face renders no glyphs")]
	NoGlyphs,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Candidate {
	Family(String),
	File(PathBuf),
}

impl fmt::Display for Candidate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Family(name) => write!(f, "family `{name}`"),
			Self::File(path) => write!(f, "file {}", path.display()),
		}
	}
}

/// Font lookup settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
	/// Font file shipped with the application, tried right after the requested family.
	pub bundled: Option<PathBuf>,
	/// Common system families tried last.
	pub fallbacks: Vec<String>,
}

impl Default for FontConfig {
	fn default() -> Self {
		Self {
			bundled: Some(PathBuf::from("./fonts/LilitaOne-Regular.ttf")),
			fallbacks: ["Arial", "Helvetica", "DejaVu Sans", "Liberation Sans"].map(String::from).to_vec(),
		}
	}
}

#[derive(Clone, Debug, Default)]
pub struct FontResolver {
	config: FontConfig,
}

impl FontResolver {
	pub fn new(config: FontConfig) -> Self {
		Self { config }
	}

	/// Never fails: when every candidate is rejected the built-in bitmap font is returned.
	pub fn resolve(&self, family: &str, size: u32) -> ResolvedFont {
		// System fonts are scanned at most once per call and only if a family candidate needs them.
		let mut system: Option<Arc<fontdb::Database>> = None;

		for candidate in self.candidates(family) {
			match Self::load(&candidate, size, &mut system) {
				Ok(font) => {
					info!(%candidate, source = %font.source(), size, "resolved font");
					return font;
				}
				Err(e) => debug!(%candidate, "font candidate rejected: {e}"),
			}
		}

		let font = ResolvedFont::builtin(size);
		warn!(family, size, "no font candidate loaded, using {}", font.source());
		font
	}

	fn candidates(&self, family: &str) -> Vec<Candidate> {
		let mut candidates = Vec::with_capacity(self.config.fallbacks.len() + 2);
		let family = family.trim();
		if !family.is_empty() {
			candidates.push(Self::classify(family));
		}
		if let Some(bundled) = &self.config.bundled {
			candidates.push(Candidate::File(bundled.clone()));
		}
		candidates.extend(self.config.fallbacks.iter().map(|name| Self::classify(name)));
		candidates
	}

	/// A name ending in a font-file extension is a path, anything else a family.
	fn classify(name: &str) -> Candidate {
		let is_file = Path::new(name)
			.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"));
		match is_file {
			true => Candidate::File(PathBuf::from(name)),
			false => Candidate::Family(name.to_owned()),
		}
	}

	fn load(candidate: &Candidate, size: u32, system: &mut Option<Arc<fontdb::Database>>) -> Result<ResolvedFont, FontUnavailable> {
		match size {
			0 => return Err(FontUnavailable::ZeroSize),
			size if size > MAX_FONT_SIZE => return Err(FontUnavailable::Oversized(size)),
			_ => {}
		}
		let (font, source) = match candidate {
			Candidate::Family(name) => {
				let db = system.get_or_insert_with(|| {
					let mut db = fontdb::Database::new();
					db.load_system_fonts();
					debug!(faces = db.len(), "loaded system font database");
					Arc::new(db)
				});
				let font = VectorFont::from_family(Arc::clone(db), name, size)?;
				let source = FontSource::System { family: font.family().to_owned() };
				(font, source)
			}
			Candidate::File(path) => (VectorFont::from_file(path, size)?, FontSource::File { path: path.clone() }),
		};
		Ok(ResolvedFont::vector(font, source))
	}
}
