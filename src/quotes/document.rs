use std::io::{Read, Seek};

use quick_xml::events::Event;

use super::{Quote, text};
use crate::error::ParseError;

const DOCUMENT_XML: &str = "word/document.xml";

/// Word-processor document: every non-empty paragraph is read like a line of a text quote file.
pub(super) fn parse<R: Read + Seek>(reader: R) -> Result<Vec<Quote>, ParseError> {
	let mut archive = zip::ZipArchive::new(reader)?;
	let mut xml = String::new();
	archive.by_name(DOCUMENT_XML)?.read_to_string(&mut xml)?;

	Ok(paragraphs(&xml)?.iter().filter_map(|paragraph| text::parse_line(paragraph)).collect())
}

/// Plain text of each `w:p`, runs joined, tabs and breaks kept as whitespace.
fn paragraphs(xml: &str) -> Result<Vec<String>, ParseError> {
	let mut reader = quick_xml::Reader::from_str(xml);
	let mut paragraphs = Vec::new();
	let mut current = String::new();
	let mut in_text = false;

	loop {
		match reader.read_event()? {
			Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
			Event::End(e) => match e.local_name().as_ref() {
				b"t" => in_text = false,
				b"p" => paragraphs.push(std::mem::take(&mut current)),
				_ => {}
			},
			Event::Empty(e) => match e.local_name().as_ref() {
				b"tab" => current.push('\t'),
				b"br" => current.push(' '),
				_ => {}
			},
			Event::Text(t) if in_text => current.push_str(&t.unescape()?),
			Event::Eof => break,
			_ => {}
		}
	}
	Ok(paragraphs)
}

#[cfg(test)]
pub(super) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
	use std::io::{Cursor, Write as _};

	let body: String = paragraphs
		.iter()
		.map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{p}</w:t></w:r></w:p>"#))
		.collect();
	let xml = format!(
		r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
	);

	let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
	zip.start_file(DOCUMENT_XML, zip::write::SimpleFileOptions::default()).unwrap();
	zip.write_all(xml.as_bytes()).unwrap();
	zip.finish().unwrap().into_inner()
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use super::*;

	#[test]
	fn reads_paragraph_quotes() {
		let bytes = build_docx(&["\"Keep moving forward\" - Walt", "", "Fly &amp; soar - Bird"]);
		let quotes = parse(Cursor::new(bytes)).unwrap();
		assert_eq!(quotes, [Quote::new("Keep moving forward", "Walt"), Quote::new("Fly & soar", "Bird")]);
	}

	#[test]
	fn runs_are_joined_within_a_paragraph() {
		let xml = r#"<w:document xmlns:w="w"><w:body><w:p><w:r><w:t>Left</w:t></w:r><w:r><w:tab/><w:t xml:space="preserve"> - Right</w:t></w:r></w:p><w:p/></w:body></w:document>"#;
		assert_eq!(paragraphs(xml).unwrap(), ["Left\t - Right"]);
	}

	#[test]
	fn archive_without_document_is_an_error() {
		let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
		zip.start_file("content.xml", zip::write::SimpleFileOptions::default()).unwrap();
		let bytes = zip.finish().unwrap().into_inner();
		assert!(matches!(parse(Cursor::new(bytes)), Err(ParseError::Archive(_))));
	}

	#[test]
	fn non_zip_is_an_error() {
		assert!(matches!(parse(Cursor::new(b"plain text".to_vec())), Err(ParseError::Archive(_))));
	}
}
