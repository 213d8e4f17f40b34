//! Halo-then-fill text compositing.
//!
//! The halo is brute force: the same line is stamped in the outline color at every offset of a
//! 5x5 grid around the origin (center excluded), then once in the fill color on top.

use image::{Rgba, RgbaImage};

use crate::{
	font::{GlyphMask, Typeface},
	layout::LayoutLine,
};

pub const OUTLINE_RADIUS: i32 = 2;

/// Surface glyph masks can be stamped onto.
pub trait Canvas {
	/// Paints `color` through `mask`, with the mask's row 0 placed `mask.top` rows below `(x, y)`.
	/// Pixels falling outside the surface are dropped.
	fn stamp(&mut self, mask: &GlyphMask, x: i32, y: i32, color: Rgba<u8>);
}

impl Canvas for RgbaImage {
	fn stamp(&mut self, mask: &GlyphMask, x: i32, y: i32, color: Rgba<u8>) {
		let (width, height) = (self.width() as i32, self.height() as i32);
		let y = y + mask.top;

		for my in 0..mask.height {
			let ty = y + my as i32;
			if ty < 0 || ty >= height {
				continue;
			}
			for mx in 0..mask.width {
				let tx = x + mx as i32;
				if tx < 0 || tx >= width {
					continue;
				}
				let alpha = mask.coverage_at(mx, my);
				if alpha == 0 {
					continue;
				}
				let pixel = self.get_pixel_mut(tx as u32, ty as u32);
				blend(pixel, color, alpha);
			}
		}
	}
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, alpha: u8) {
	let a = alpha as f32 / 255.0;
	for c in 0..3 {
		dst[c] = (src[c] as f32 * a + dst[c] as f32 * (1.0 - a)).round() as u8;
	}
	dst[3] = dst[3].max(alpha);
}

/// The 24 halo offsets, row by row.
pub fn outline_offsets() -> impl Iterator<Item = (i32, i32)> {
	(-OUTLINE_RADIUS..=OUTLINE_RADIUS)
		.flat_map(|dx| (-OUTLINE_RADIUS..=OUTLINE_RADIUS).map(move |dy| (dx, dy)))
		.filter(|&offset| offset != (0, 0))
}

/// Draws every line, top to bottom. A line's halo is finished before its fill so the fill is never covered.
pub fn draw<C, F>(canvas: &mut C, font: &F, lines: &[LayoutLine], fill: Rgba<u8>, outline: Rgba<u8>, outline_enabled: bool)
where
	C: Canvas + ?Sized,
	F: Typeface + ?Sized, {
	for line in lines {
		let mask = font.rasterize(&line.text);
		if outline_enabled {
			for (dx, dy) in outline_offsets() {
				canvas.stamp(&mask, line.origin_x + dx, line.origin_y + dy, outline);
			}
		}
		canvas.stamp(&mask, line.origin_x, line.origin_y, fill);
	}
}
