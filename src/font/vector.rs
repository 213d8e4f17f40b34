use std::{fmt, path::Path, sync::Arc};

use tiny_skia::{Pixmap, Transform};

use super::{FontUnavailable, GlyphMask, Typeface};

/// Outline font shaped by `usvg` and rasterized by `resvg`.
///
/// Each line is laid out as a one-element SVG document with its baseline at `size` pixels below
/// the line top; the layout box of the flattened text (advance width, ascent to descent) gives the metrics.
pub struct VectorFont {
	db: Arc<fontdb::Database>,
	family: String,
	size: u32,
}

impl fmt::Debug for VectorFont {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("VectorFont").field("family", &self.family).field("size", &self.size).finish()
	}
}

impl VectorFont {
	pub(crate) fn from_family(db: Arc<fontdb::Database>, name: &str, size: u32) -> Result<Self, FontUnavailable> {
		let query = fontdb::Query {
			families: &[fontdb::Family::Name(name)],
			..fontdb::Query::default()
		};
		let family = db
			.query(&query)
			.and_then(|id| db.face(id))
			.and_then(|face| face.families.first())
			.map(|(family, _)| family.clone())
			.ok_or_else(|| FontUnavailable::NotInstalled(name.to_owned()))?;
		Self { db, family, size }.verified()
	}

	pub(crate) fn from_file(path: &Path, size: u32) -> Result<Self, FontUnavailable> {
		let mut db = fontdb::Database::new();
		db.load_font_file(path)?;
		let family = db
			.faces()
			.find_map(|face| face.families.first())
			.map(|(family, _)| family.clone())
			.ok_or(FontUnavailable::NoFaces)?;
		Self { db: Arc::new(db), family, size }.verified()
	}

	pub fn family(&self) -> &str {
		&self.family
	}

	/// A face that resolves by name but shapes nothing (missing cmap, bitmap-only) is rejected here.
	fn verified(self) -> Result<Self, FontUnavailable> {
		match self.measure("M").0 {
			0 => Err(FontUnavailable::NoGlyphs),
			_ => Ok(self),
		}
	}

	fn layout(&self, line: &str) -> Option<(usvg::Tree, usvg::Rect)> {
		if line.trim().is_empty() {
			return None;
		}
		let chars = u32::try_from(line.chars().count()).ok()?;
		let width = self.size.checked_mul(chars.checked_add(2)?)?;
		let height = self.size.checked_mul(2)?;
		let svg = format!(
			r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg"><text x="0" y="{baseline}" font-family="'{family}'" font-size="{size}" fill="white" xml:space="preserve">{text}</text></svg>"#,
			baseline = self.size,
			family = escape_xml(&self.family),
			size = self.size,
			text = escape_xml(line),
		);

		let mut options = usvg::Options::default();
		options.fontdb = Arc::clone(&self.db);
		let tree = usvg::Tree::from_str(&svg, &options).ok()?;
		if tree.root().children().is_empty() {
			return None;
		}
		let bbox = tree.root().abs_bounding_box();
		Some((tree, bbox))
	}
}

impl Typeface for VectorFont {
	fn pixel_size(&self) -> u32 {
		self.size
	}

	fn measure(&self, line: &str) -> (u32, u32) {
		match self.layout(line) {
			Some((_, bbox)) => (bbox.width().ceil() as u32, bbox.bottom().ceil().max(0.0) as u32),
			None => (0, 0),
		}
	}

	fn rasterize(&self, line: &str) -> GlyphMask {
		let Some((tree, bbox)) = self.layout(line) else {
			return GlyphMask::default();
		};
		let top = bbox.top().floor().min(0.0);
		let width = bbox.width().ceil().max(1.0) as u32;
		let height = (bbox.bottom().ceil() - top).max(1.0) as u32;
		let Some(mut pixmap) = Pixmap::new(width, height) else {
			return GlyphMask::default();
		};

		resvg::render(&tree, Transform::from_translate(-bbox.left(), -top), &mut pixmap.as_mut());

		let coverage = pixmap.pixels().iter().map(|p| p.alpha()).collect();
		GlyphMask::new(width, height, top as i32, coverage)
	}
}

fn escape_xml(text: &str) -> String {
	text.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&apos;")
}
