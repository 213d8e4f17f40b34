use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
	color::NamedColor,
	compose,
	error::OverlayError,
	font::{FontResolver, FontSource, MAX_FONT_SIZE},
	image_io, layout,
	layout::Anchor,
	quotes::Quote,
	wrap,
};

/// How one overlay should look. Supplied per request and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleRequest {
	pub target_width: u32,
	pub font_size: u32,
	pub font_family: String,
	/// One of [`NamedColor`]'s names; anything else draws white.
	pub fill_color: String,
	pub anchor: Anchor,
	pub outline_enabled: bool,
}

impl Default for StyleRequest {
	fn default() -> Self {
		Self {
			target_width: 500,
			font_size: 30,
			font_family: "Impact".to_owned(),
			fill_color: "white".to_owned(),
			anchor: Anchor::default(),
			outline_enabled: true,
		}
	}
}

impl StyleRequest {
	pub fn validate(&self) -> Result<(), OverlayError> {
		if self.target_width == 0 {
			return Err(OverlayError::InvalidStyle("target width must be positive".into()));
		}
		if self.font_size == 0 || self.font_size > MAX_FONT_SIZE {
			return Err(OverlayError::InvalidStyle(format!("font size {} is outside 1..={MAX_FONT_SIZE}", self.font_size)));
		}
		if self.anchor.x_pct > 100 || self.anchor.y_pct > 100 {
			return Err(OverlayError::InvalidStyle(format!("anchor ({}, {}) is outside 0..=100", self.anchor.x_pct, self.anchor.y_pct)));
		}
		Ok(())
	}
}

/// What a successful render produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rendered {
	pub path: PathBuf,
	pub width: u32,
	pub height: u32,
	pub font: FontSource,
}

/// Decode, resize, lay out, composite and encode, one exclusively owned buffer per call.
#[derive(Clone, Debug)]
pub struct OverlayEngine {
	resolver: FontResolver,
	output_dir: PathBuf,
	wrap_width: usize,
}

impl OverlayEngine {
	pub fn new(resolver: FontResolver, output_dir: impl Into<PathBuf>) -> Self {
		Self {
			resolver,
			output_dir: output_dir.into(),
			wrap_width: wrap::DEFAULT_WRAP_WIDTH,
		}
	}

	pub fn with_wrap_width(mut self, wrap_width: usize) -> Self {
		self.wrap_width = wrap_width.max(1);
		self
	}

	pub fn output_dir(&self) -> &Path {
		&self.output_dir
	}

	/// Rejects an empty quote or an invalid style before touching the filesystem.
	#[instrument(skip_all, fields(source = %source.display()))]
	pub fn render(&self, source: &Path, quote: &Quote, style: &StyleRequest) -> Result<Rendered, OverlayError> {
		if quote.body.trim().is_empty() {
			return Err(OverlayError::EmptyQuote);
		}
		style.validate()?;

		let original = image_io::load(source)?;
		let mut canvas = image_io::resize(&original, style.target_width).to_rgba8();
		drop(original);
		let (width, height) = canvas.dimensions();

		let font = self.resolver.resolve(&style.font_family, style.font_size);
		let lines = wrap::quote_lines(quote, self.wrap_width);
		let planned = layout::plan(&lines, &font, style.anchor, width, height);
		debug!(lines = planned.len(), width, height, "planned layout");

		let fill = NamedColor::from_name(&style.fill_color);
		compose::draw(&mut canvas, &font, &planned, fill.rgba(), fill.outline().rgba(), style.outline_enabled);

		let path = image_io::save(canvas, &self.output_dir, source)?;
		Ok(Rendered {
			path,
			width,
			height,
			font: font.source().clone(),
		})
	}
}
