use font8x8::{BASIC_FONTS, UnicodeFonts};

use super::{GlyphMask, Typeface};

const CELL: u32 = 8;
const MAX_SCALE: u32 = 16;

/// Built-in 8x8 bitmap font drawn at an integer scale. Characters outside basic Latin render as `?`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapFont {
	scale: u32,
}

impl BitmapFont {
	/// Picks the supported scale whose cell height is closest to `size` pixels.
	pub fn nearest(size: u32) -> Self {
		let scale = (size as f32 / CELL as f32).round() as u32;
		Self { scale: scale.clamp(1, MAX_SCALE) }
	}

	pub fn scale(&self) -> u32 {
		self.scale
	}

	fn glyph(ch: char) -> [u8; 8] {
		BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')).unwrap_or_default()
	}
}

impl Typeface for BitmapFont {
	fn pixel_size(&self) -> u32 {
		CELL * self.scale
	}

	fn measure(&self, line: &str) -> (u32, u32) {
		let advance = CELL * self.scale;
		(line.chars().count() as u32 * advance, advance)
	}

	fn rasterize(&self, line: &str) -> GlyphMask {
		let (width, height) = self.measure(line);
		let mut coverage = vec![0u8; (width * height) as usize];

		for (i, ch) in line.chars().enumerate() {
			let cursor_x = i as u32 * CELL * self.scale;
			for (row_idx, &row) in Self::glyph(ch).iter().enumerate() {
				for col in 0..CELL {
					if (row >> col) & 1 == 0 {
						continue;
					}
					let px = cursor_x + col * self.scale;
					let py = row_idx as u32 * self.scale;
					for sy in 0..self.scale {
						let start = ((py + sy) * width + px) as usize;
						coverage[start..start + self.scale as usize].fill(0xff);
					}
				}
			}
		}

		GlyphMask::new(width, height, 0, coverage)
	}
}
