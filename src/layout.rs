use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::font::Typeface;

/// Gap kept between every line and each canvas edge.
pub const MARGIN: i32 = 5;
/// Extra pixels added to the font size to get the baseline-to-baseline distance.
pub const LINE_PADDING: i32 = 5;

/// Point the text block is centered on, in percent of canvas width and height.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Anchor {
	pub x_pct: u8,
	pub y_pct: u8,
}

impl Default for Anchor {
	fn default() -> Self {
		Self { x_pct: 50, y_pct: 50 }
	}
}

impl Anchor {
	pub fn to_pixels(self, canvas_w: u32, canvas_h: u32) -> (i32, i32) {
		let scale = |pct: u8, extent: u32| (f64::from(pct) / 100.0 * f64::from(extent)).round() as i32;
		(scale(self.x_pct, canvas_w), scale(self.y_pct, canvas_h))
	}
}

/// One line of text with the absolute top-left pixel it is drawn at.
#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct LayoutLine {
	pub text: String,
	pub origin_x: i32,
	pub origin_y: i32,
}

/// Pixel quantities saturate at `i32::MAX` instead of wrapping negative.
fn px(value: impl TryInto<i32>) -> i32 {
	value.try_into().unwrap_or(i32::MAX)
}

pub fn line_height(font_size: u32) -> i32 {
	px(font_size).saturating_add(LINE_PADDING)
}

/// Top of a block of `line_count` lines centered on `anchor_y`.
///
/// Halving truncates, so odd block heights sit one pixel lower than exact centering would put them.
pub fn block_start_y(anchor_y: i32, line_count: usize, font_size: u32) -> i32 {
	let block_height = px(line_count).saturating_mul(line_height(font_size));
	anchor_y.saturating_sub(block_height / 2)
}

/// Positions `lines` around `anchor`: each line centered on its own measured width, the block
/// centered vertically, every origin pulled inside a [`MARGIN`] border.
///
/// When the canvas is too small for a line the lower bound wins, so origins never go below the margin.
pub fn plan<F: Typeface + ?Sized>(lines: &[String], font: &F, anchor: Anchor, canvas_w: u32, canvas_h: u32) -> Vec<LayoutLine> {
	let font_size = font.pixel_size();
	let (anchor_x, anchor_y) = anchor.to_pixels(canvas_w, canvas_h);
	let start_y = block_start_y(anchor_y, lines.len(), font_size);
	let max_y = px(canvas_h).saturating_sub(px(font_size)).saturating_sub(MARGIN);

	lines
		.iter()
		.enumerate()
		.map(|(i, text)| {
			let (line_width, _) = font.measure(text);
			let line_width = px(line_width);
			let raw_x = anchor_x.saturating_sub(line_width / 2);
			let raw_y = start_y.saturating_add(px(i).saturating_mul(line_height(font_size)));

			let x = raw_x.min(px(canvas_w).saturating_sub(line_width).saturating_sub(MARGIN)).max(MARGIN);
			let y = raw_y.min(max_y).max(MARGIN);
			LayoutLine::new(text.clone(), x, y)
		})
		.collect()
}
