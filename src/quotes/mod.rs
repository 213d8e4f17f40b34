//! Quote model and the file-ingestion dispatcher that feeds it.
//!
//! Ingestion never fails outward: an unknown extension or a parser error is logged and yields no quotes.

mod document;
mod table;
mod text;

use std::{fmt, fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::error::ParseError;

/// A quotation and its attribution, both trimmed. `author` may be empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quote {
	pub body: String,
	pub author: String,
}

impl Quote {
	pub fn new(body: impl AsRef<str>, author: impl AsRef<str>) -> Self {
		Self {
			body: body.as_ref().trim().to_owned(),
			author: author.as_ref().trim().to_owned(),
		}
	}
}

impl fmt::Display for Quote {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "\"{}\" - {}", self.body, self.author)
	}
}

impl<'de> Deserialize<'de> for Quote {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>, {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum QuoteHelper {
			String(String),
			Structured {
				#[serde(alias = "text")]
				body: String,
				#[serde(default)]
				author: Option<String>,
			},
		}

		let helper = QuoteHelper::deserialize(deserializer)?;
		Ok(match helper {
			QuoteHelper::String(body) => Quote::new(body, ""),
			QuoteHelper::Structured { body, author } => Quote::new(body, author.unwrap_or_default()),
		})
	}
}

/// Quote file formats a parser exists for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuoteFileKind {
	Text,
	Csv,
	Docx,
}

impl QuoteFileKind {
	pub fn from_path(path: &Path) -> Option<Self> {
		let ext = path.extension()?.to_str()?.to_ascii_lowercase();
		match ext.as_str() {
			"txt" => Some(Self::Text),
			"csv" => Some(Self::Csv),
			"docx" => Some(Self::Docx),
			_ => None,
		}
	}

	pub fn parse(self, path: &Path) -> Result<Vec<Quote>, ParseError> {
		match self {
			Self::Text => Ok(text::parse(&std::fs::read_to_string(path)?)),
			Self::Csv => table::parse(BufReader::new(File::open(path)?)),
			Self::Docx => document::parse(BufReader::new(File::open(path)?)),
		}
	}
}

/// Reads every quote in `path`, or nothing if the file cannot be parsed.
pub fn ingest(path: &Path) -> Vec<Quote> {
	let Some(kind) = QuoteFileKind::from_path(path) else {
		warn!(path = %path.display(), "no suitable parser found");
		return Vec::new();
	};
	match kind.parse(path) {
		Ok(quotes) => {
			debug!(path = %path.display(), ?kind, count = quotes.len(), "ingested quotes");
			quotes
		}
		Err(e) => {
			warn!(path = %path.display(), "could not parse quotes: {e}");
			Vec::new()
		}
	}
}
