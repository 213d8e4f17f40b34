use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView, ImageReader, Rgb, RgbImage};
use quote_overlay::{
	OverlayEngine, OverlayError, Quote, StyleRequest,
	font::{FontConfig, FontResolver, FontSource, Typeface},
	layout::{self, Anchor, MARGIN},
	wrap,
};

/// Resolver that can only ever land on the built-in font, whatever the host has installed.
fn isolated_resolver() -> FontResolver {
	FontResolver::new(FontConfig { bundled: None, fallbacks: vec![] })
}

fn source_image(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
	let path = dir.join(name);
	RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 96])).save(&path).unwrap();
	path
}

// Output keeps the source extension but is always JPEG, so sniff instead of trusting the name.
fn decode(path: &Path) -> DynamicImage {
	ImageReader::open(path).unwrap().with_guessed_format().unwrap().decode().unwrap()
}

fn entries(dir: &Path) -> usize {
	std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn renders_attributed_quote() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();
	let source = source_image(input.path(), "photo.png", 800, 600);

	let engine = OverlayEngine::new(isolated_resolver(), output.path());
	let style = StyleRequest {
		target_width: 500,
		anchor: Anchor::new(50, 50),
		outline_enabled: true,
		..StyleRequest::default()
	};
	let rendered = engine.render(&source, &Quote::new("Keep moving forward.", "Walt"), &style).unwrap();

	assert!(rendered.path.exists());
	assert_eq!(rendered.path.parent(), Some(output.path()));
	assert_eq!(rendered.path.extension().and_then(|e| e.to_str()), Some("png"));
	assert_eq!((rendered.width, rendered.height), (500, 375));
	assert_eq!(decode(&rendered.path).dimensions(), (500, 375));
}

#[test]
fn overlay_changes_pixels_near_anchor() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();
	let source = source_image(input.path(), "plain.png", 400, 400);
	let engine = OverlayEngine::new(isolated_resolver(), output.path());

	let style = StyleRequest { target_width: 400, ..StyleRequest::default() };
	let rendered = engine.render(&source, &Quote::new("HELLO", ""), &style).unwrap();

	let before = decode(&source).to_rgba8();
	let after = decode(&rendered.path).to_rgba8();
	let band = (150..250).flat_map(|y| (100..300).map(move |x| (x, y)));
	let changed = band.filter(|&(x, y)| {
		let (a, b) = (before.get_pixel(x, y), after.get_pixel(x, y));
		(0..3).any(|c| a[c].abs_diff(b[c]) > 64)
	});
	assert!(changed.count() > 100);
}

#[test]
fn empty_body_produces_no_file() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();
	let source = source_image(input.path(), "photo.png", 64, 64);
	let engine = OverlayEngine::new(isolated_resolver(), output.path());

	let err = engine.render(&source, &Quote::new("", "Walt"), &StyleRequest::default()).unwrap_err();
	assert!(matches!(err, OverlayError::EmptyQuote));
	assert_eq!(entries(output.path()), 0);
}

#[test]
fn unknown_font_family_still_renders() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();
	let source = source_image(input.path(), "photo.jpg", 300, 200);
	let engine = OverlayEngine::new(isolated_resolver(), output.path());

	let style = StyleRequest {
		font_family: "Nonexistent-Font-XYZ".into(),
		target_width: 300,
		..StyleRequest::default()
	};
	let rendered = engine.render(&source, &Quote::new("Still here", "Fallback"), &style).unwrap();
	assert!(matches!(rendered.font, FontSource::Builtin { .. }));
	assert!(rendered.path.exists());
	assert_eq!(decode(&rendered.path).dimensions(), (300, 200));
}

#[test]
fn corner_anchor_keeps_lines_on_canvas() {
	let font = isolated_resolver().resolve("Nonexistent-Font-XYZ", 8);
	let lines = wrap::quote_lines(&Quote::new("one two three", "me"), 8);
	assert_eq!(lines.len(), 3);

	let planned = layout::plan(&lines, &font, Anchor::new(0, 0), 100, 100);
	for line in &planned {
		let (width, _) = font.measure(&line.text);
		assert_eq!(line.origin_x, MARGIN);
		assert!(line.origin_y >= MARGIN);
		assert!(line.origin_x + width as i32 <= 100);
		assert!(line.origin_y + font.pixel_size() as i32 <= 100);
	}
}

#[test]
fn missing_source_is_reported() {
	let output = tempfile::tempdir().unwrap();
	let engine = OverlayEngine::new(isolated_resolver(), output.path());
	let err = engine.render(Path::new("/no/such/photo.png"), &Quote::new("Hi", ""), &StyleRequest::default()).unwrap_err();
	assert!(matches!(err, OverlayError::SourceNotFound { .. }));
	assert_eq!(entries(output.path()), 0);
}

#[test]
fn unwritable_output_is_encode_error() {
	let input = tempfile::tempdir().unwrap();
	let source = source_image(input.path(), "photo.png", 64, 64);
	let engine = OverlayEngine::new(isolated_resolver(), input.path().join("missing"));

	let err = engine.render(&source, &Quote::new("Hi", ""), &StyleRequest::default()).unwrap_err();
	assert!(matches!(err, OverlayError::Encode { .. }));
}

#[test]
fn concurrent_renders_get_distinct_files() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();
	let source = source_image(input.path(), "photo.png", 120, 80);
	let engine = OverlayEngine::new(isolated_resolver(), output.path());
	let style = StyleRequest { target_width: 120, ..StyleRequest::default() };

	let paths: Vec<PathBuf> = std::thread::scope(|s| {
		let handles: Vec<_> = (0..8)
			.map(|i| {
				let (engine, source, style) = (&engine, &source, &style);
				s.spawn(move || engine.render(source, &Quote::new(format!("quote {i}"), ""), style).unwrap().path)
			})
			.collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	assert_eq!(entries(output.path()), 8);
	let mut unique = paths.clone();
	unique.sort();
	unique.dedup();
	assert_eq!(unique.len(), paths.len());
}

#[test]
fn bundled_vector_font_inks_around_anchor() {
	let input = tempfile::tempdir().unwrap();
	let output = tempfile::tempdir().unwrap();
	let source = source_image(input.path(), "plain.png", 400, 400);
	let fixture = PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/Tuffy.ttf"));
	let resolver = FontResolver::new(FontConfig { bundled: Some(fixture.clone()), fallbacks: vec![] });
	let engine = OverlayEngine::new(resolver, output.path());

	let style = StyleRequest {
		target_width: 400,
		font_family: "Nonexistent-Font-XYZ".into(),
		..StyleRequest::default()
	};
	let rendered = engine.render(&source, &Quote::new("HELLO", ""), &style).unwrap();
	assert_eq!(rendered.font, FontSource::File { path: fixture });

	let before = decode(&source).to_rgba8();
	let after = decode(&rendered.path).to_rgba8();
	let changed = |rows: std::ops::Range<u32>| {
		rows.flat_map(|y| (100..300).map(move |x| (x, y)))
			.filter(|&(x, y)| {
				let (a, b) = (before.get_pixel(x, y), after.get_pixel(x, y));
				(0..3).any(|c| a[c].abs_diff(b[c]) > 64)
			})
			.count()
	};
	assert!(changed(170..230) > 100);
	assert!(changed(20..120) < changed(170..230) / 10);
}
