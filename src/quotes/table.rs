use std::io::Read;

use super::Quote;
use crate::error::ParseError;

/// Delimited table with a header row naming `body` and `author` columns, in any order.
///
/// Quoted fields may contain separators and line breaks. Rows with an empty body are skipped.
pub(super) fn parse<R: Read>(reader: R) -> Result<Vec<Quote>, ParseError> {
	let mut reader = csv::ReaderBuilder::new().has_headers(true).flexible(true).trim(csv::Trim::All).from_reader(reader);

	let headers = reader.headers()?.clone();
	let column = |name: &'static str| headers.iter().position(|h| h.eq_ignore_ascii_case(name)).ok_or(ParseError::MissingColumn(name));
	let body_col = column("body")?;
	let author_col = column("author")?;

	let mut quotes = Vec::new();
	for record in reader.records() {
		let record = record?;
		let quote = Quote::new(record.get(body_col).unwrap_or_default(), record.get(author_col).unwrap_or_default());
		if !quote.body.is_empty() {
			quotes.push(quote);
		}
	}
	Ok(quotes)
}
