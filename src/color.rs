use image::Rgba;
use serde::{Deserialize, Serialize};

/// The closed set of fill colors a style may name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
	#[default]
	White,
	Black,
	Red,
	Blue,
	Green,
	Yellow,
	Purple,
	Orange,
}

impl NamedColor {
	/// Unknown names resolve to white.
	pub fn from_name(name: &str) -> Self {
		match name.trim().to_ascii_lowercase().as_str() {
			"black" => Self::Black,
			"red" => Self::Red,
			"blue" => Self::Blue,
			"green" => Self::Green,
			"yellow" => Self::Yellow,
			"purple" => Self::Purple,
			"orange" => Self::Orange,
			_ => Self::White,
		}
	}

	pub fn rgba(self) -> Rgba<u8> {
		let [r, g, b] = match self {
			Self::White => [0xff, 0xff, 0xff],
			Self::Black => [0x00, 0x00, 0x00],
			Self::Red => [0xff, 0x00, 0x00],
			Self::Blue => [0x00, 0x00, 0xff],
			Self::Green => [0x00, 0xff, 0x00],
			Self::Yellow => [0xff, 0xff, 0x00],
			Self::Purple => [0x80, 0x00, 0x80],
			Self::Orange => [0xff, 0xa5, 0x00],
		};
		Rgba([r, g, b, 0xff])
	}

	/// Halo color drawn under a fill of `self`: black under white, white under everything else.
	pub fn outline(self) -> Self {
		match self {
			Self::White => Self::Black,
			_ => Self::White,
		}
	}
}
