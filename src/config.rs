use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr as _, eyre};
use serde::Deserialize;

use crate::{engine::StyleRequest, font::FontConfig, quotes::Quote, wrap::DEFAULT_WRAP_WIDTH};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
	/// Inline quotes, each a bare string or `{ body, author }`.
	pub quotes: Vec<Quote>,
	/// Quote files handed to the ingestion dispatcher.
	pub quote_files: Vec<PathBuf>,
	/// Pool a random image is drawn from when none is given.
	pub images_dir: Option<PathBuf>,
	pub output_dir: PathBuf,
	pub wrap_width: usize,
	pub style: StyleRequest,
	pub fonts: FontConfig,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			quotes: Vec::new(),
			quote_files: Vec::new(),
			images_dir: None,
			output_dir: PathBuf::from("./tmp"),
			wrap_width: DEFAULT_WRAP_WIDTH,
			style: StyleRequest::default(),
			fonts: FontConfig::default(),
		}
	}
}

impl AppConfig {
	/// An explicit `path` must exist. Otherwise the XDG config locations are optional and defaults fill the gaps.
	/// `QUOTE_OVERLAY__*` environment variables override either.
	pub fn read(path: Option<&Path>) -> Result<Self> {
		let app_name = env!("CARGO_PKG_NAME");
		let env = config::Environment::with_prefix(&app_name.to_ascii_uppercase()).prefix_separator("__").separator("__").try_parsing(true);
		let mut builder = config::Config::builder();

		match path {
			Some(path) => {
				let path_str = path.to_str().ok_or_else(|| eyre!("config path {} is not valid UTF-8", path.display()))?;
				builder = builder.add_source(config::File::with_name(path_str).required(true));
			}
			None => {
				let xdg_dirs = xdg::BaseDirectories::with_prefix(app_name);
				if let Some(xdg_conf_dir) = xdg_dirs.get_config_home().as_deref().and_then(Path::parent) {
					let xdg_conf_dir = xdg_conf_dir.display();
					let locations = [
						format!("{xdg_conf_dir}/{app_name}"),
						format!("{xdg_conf_dir}/{app_name}/config"), //
					];
					for location in locations.iter() {
						builder = builder.add_source(config::File::with_name(location).required(false));
					}
				}
			}
		}

		let raw: config::Config = builder.add_source(env).build()?;
		raw.try_deserialize().wrap_err("Config file is invalid")
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write as _;

	use super::*;

	#[test]
	fn defaults_without_file() {
		let config = AppConfig::default();
		assert_eq!(config.output_dir, PathBuf::from("./tmp"));
		assert_eq!(config.wrap_width, 40);
		assert_eq!(config.style, StyleRequest::default());
	}

	#[test]
	fn reads_toml_file() {
		let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
		write!(
			file,
			r#"
output_dir = "/srv/overlays"
quotes = ["Just do it", {{ text = "Stay hungry", author = "Steve" }}]

[style]
font_family = "DejaVu Sans"
fill_color = "yellow"

[fonts]
fallbacks = []
"#
		)
		.unwrap();

		let config = AppConfig::read(Some(file.path())).unwrap();
		assert_eq!(config.output_dir, PathBuf::from("/srv/overlays"));
		assert_eq!(config.quotes, [Quote::new("Just do it", ""), Quote::new("Stay hungry", "Steve")]);
		assert_eq!(config.style.font_family, "DejaVu Sans");
		assert_eq!(config.style.fill_color, "yellow");
		assert_eq!(config.style.font_size, 30);
		assert!(config.fonts.fallbacks.is_empty());
		assert_eq!(config.fonts.bundled, FontConfig::default().bundled);
	}

	#[test]
	fn explicit_missing_file_is_an_error() {
		assert!(AppConfig::read(Some(Path::new("/no/such/quote_overlay.toml"))).is_err());
	}
}
