use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::{
	Result,
	eyre::{WrapErr as _, eyre},
};
use quote_overlay::{
	OverlayEngine, Quote, StyleRequest,
	config::AppConfig,
	font::FontResolver,
	layout::Anchor,
	quotes,
};
use rand::seq::IndexedRandom;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "quote_overlay")]
#[command(about = "Overlay a quote with attribution onto an image")]
struct Args {
	/// Path of an image file. If not provided, a random one is taken from `images_dir`.
	#[arg(long)]
	path: Option<PathBuf>,
	/// Quote to put on the image. If not provided, a random configured quote is used.
	#[arg(long)]
	body: Option<String>,
	/// Attribution line; omitted when empty.
	#[arg(long, default_value = "")]
	author: String,
	/// Config file to read instead of the XDG locations.
	#[arg(long)]
	config: Option<PathBuf>,
	#[arg(long)]
	width: Option<u32>,
	#[arg(long)]
	font_size: Option<u32>,
	#[arg(long)]
	font: Option<String>,
	/// white, black, red, blue, green, yellow, purple or orange
	#[arg(long)]
	color: Option<String>,
	/// Horizontal anchor, percent of the image width.
	#[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
	x: Option<u8>,
	/// Vertical anchor, percent of the image height.
	#[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
	y: Option<u8>,
	#[arg(long)]
	no_outline: bool,
	/// Print the render report as JSON instead of the bare output path.
	#[arg(long)]
	json: bool,
}

impl Args {
	fn style(&self, base: StyleRequest) -> StyleRequest {
		StyleRequest {
			target_width: self.width.unwrap_or(base.target_width),
			font_size: self.font_size.unwrap_or(base.font_size),
			font_family: self.font.clone().unwrap_or(base.font_family),
			fill_color: self.color.clone().unwrap_or(base.fill_color),
			anchor: Anchor::new(self.x.unwrap_or(base.anchor.x_pct), self.y.unwrap_or(base.anchor.y_pct)),
			outline_enabled: base.outline_enabled && !self.no_outline,
		}
	}
}

fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();
	let config = AppConfig::read(args.config.as_deref())?;

	let image = match &args.path {
		Some(path) => path.clone(),
		None => random_image(config.images_dir.as_deref())?,
	};

	let quote = match &args.body {
		Some(body) => Quote::new(body, &args.author),
		None => random_quote(&config)?,
	};
	info!(%quote, image = %image.display(), "selected");

	std::fs::create_dir_all(&config.output_dir).wrap_err_with(|| format!("cannot create output directory {}", config.output_dir.display()))?;
	let engine = OverlayEngine::new(FontResolver::new(config.fonts.clone()), &config.output_dir).with_wrap_width(config.wrap_width);
	let rendered = engine.render(&image, &quote, &args.style(config.style.clone()))?;

	match args.json {
		true => println!("{}", serde_json::to_string_pretty(&rendered)?),
		false => println!("{}", rendered.path.display()),
	}
	Ok(())
}

fn random_image(images_dir: Option<&Path>) -> Result<PathBuf> {
	let dir = images_dir.ok_or_else(|| eyre!("No --path given and no `images_dir` configured"))?;
	let mut images = Vec::new();
	for entry in std::fs::read_dir(dir).wrap_err_with(|| format!("cannot read images directory {}", dir.display()))? {
		let path = entry?.path();
		if path.is_file() && image::ImageFormat::from_path(&path).is_ok() {
			images.push(path);
		}
	}
	images.choose(&mut rand::rng()).cloned().ok_or_else(|| eyre!("No images found in {}", dir.display()))
}

fn random_quote(config: &AppConfig) -> Result<Quote> {
	let mut candidates = config.quotes.clone();
	for file in &config.quote_files {
		candidates.extend(quotes::ingest(file));
	}
	candidates.retain(|quote| !quote.body.is_empty());
	candidates.choose(&mut rand::rng()).cloned().ok_or_else(|| eyre!("No quotes available: pass --body or configure `quotes`/`quote_files`"))
}
