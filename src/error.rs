use std::{io, path::PathBuf};

/// Terminal failures of a single overlay render.
///
/// A render that returns any of these produced no usable image; callers must not pick up a file
/// from the output directory after an `Encode` failure.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
	#[error("cannot open source image {}", path.display())]
	SourceNotFound {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("cannot decode source image {}", path.display())]
	Decode {
		path: PathBuf,
		#[source]
		source: image::ImageError,
	},

	#[error("cannot save image into {}", path.display())]
	Encode {
		path: PathBuf,
		#[source]
		source: image::ImageError,
	},

	#[error("quote body is empty")]
	EmptyQuote,

	#[error("invalid style: {0}")]
	InvalidStyle(String),
}

/// Failure of a single quote-file parser. Never escapes the ingestion dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
	#[error(transparent)]
	Io(#[from] io::Error),

	#[error(transparent)]
	Csv(#[from] csv::Error),

	#[error(transparent)]
	Archive(#[from] zip::result::ZipError),

	#[error(transparent)]
	Xml(#[from] quick_xml::Error),

	#[error("missing `{0}` column in header")]
	MissingColumn(&'static str),
}
