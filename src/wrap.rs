use crate::quotes::Quote;

pub const DEFAULT_WRAP_WIDTH: usize = 40;

/// Greedy word wrap on whitespace. Words are never split: one longer than `max_chars` gets a line of its own.
pub fn wrap(body: &str, max_chars: usize) -> Vec<String> {
	let mut lines = Vec::new();
	let mut current = String::new();
	let mut current_len = 0;

	for word in body.split_whitespace() {
		let word_len = word.chars().count();
		if current_len > 0 && current_len + 1 + word_len > max_chars {
			lines.push(std::mem::take(&mut current));
			current_len = 0;
		}
		if current_len > 0 {
			current.push(' ');
			current_len += 1;
		}
		current.push_str(word);
		current_len += word_len;
	}
	if current_len > 0 {
		lines.push(current);
	}
	lines
}

/// Wrapped body followed by a `- <author>` line when the quote is attributed.
pub fn quote_lines(quote: &Quote, max_chars: usize) -> Vec<String> {
	let mut lines = wrap(&quote.body, max_chars);
	if !quote.author.is_empty() {
		lines.push(format!("- {}", quote.author));
	}
	lines
}
