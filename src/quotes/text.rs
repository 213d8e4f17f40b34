use super::Quote;

const SEPARATOR: &str = " - ";

/// One quote per non-blank line, `body - author`.
pub(super) fn parse(contents: &str) -> Vec<Quote> {
	contents.lines().filter_map(parse_line).collect()
}

/// The author is whatever follows the last separator. `None` when no body is left.
pub(super) fn parse_line(line: &str) -> Option<Quote> {
	let line = line.trim();
	let (body, author) = line.rsplit_once(SEPARATOR).unwrap_or((line, ""));
	let quote = Quote::new(body.trim().trim_matches('"'), author);
	(!quote.body.is_empty()).then_some(quote)
}
