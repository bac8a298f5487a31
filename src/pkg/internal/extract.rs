use std::io::Cursor;

use lazy_static::lazy_static;
use regex::Regex;
use standard_error::{Interpolate, StandardError};

use crate::{pkg::internal::candidate::UNKNOWN, prelude::Result};

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("invalid email regex");
}

/// Best-effort guess at a candidate's contact details. Absent values degrade
/// to `None`/placeholders; the operator corrects them in the review form.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactGuess {
    pub email: Option<String>,
    pub firstname: String,
    pub lastname: String,
}

pub fn extract_text_from_pdf(data: &[u8]) -> Result<String> {
    use lopdf::Document;
    let cursor = Cursor::new(data);
    let doc = Document::load_from(cursor)
        .map_err(|e| StandardError::new("ERR-EXTRACT-001").interpolate_err(e.to_string()))?;

    let pages = doc.get_pages();
    let mut text = String::new();

    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => {
                tracing::warn!("failed to extract text from page {}: {}", page_num, e);
            }
        }
    }

    Ok(text.trim().to_string())
}

/// Scans the whole text for the first plausible email address, and assumes
/// the first non-blank line is the candidate's name. Both are heuristics:
/// the email pattern accepts syntactically-plausible but non-deliverable
/// addresses, and a resume whose header line is a title or address yields a
/// wrong name guess.
pub fn guess_contact(text: &str) -> ContactGuess {
    let email = EMAIL_RE.find(text).map(|m| m.as_str().to_string());

    let mut firstname = UNKNOWN.to_string();
    let mut lastname = UNKNOWN.to_string();
    if let Some(line) = text.lines().map(str::trim).find(|l| !l.is_empty()) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() >= 2 {
            firstname = tokens[0].to_string();
            lastname = tokens[1..].join(" ");
        }
    }

    ContactGuess {
        email,
        firstname,
        lastname,
    }
}

#[cfg(test)]
mod tests {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use tracing_test::traced_test;

    use super::*;

    #[test]
    #[traced_test]
    fn test_guess_from_resume_header() {
        let guess = guess_contact("Jane Doe\nSenior Engineer\ncontact: jane.doe@example.com");
        assert_eq!(guess.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(guess.firstname, "Jane");
        assert_eq!(guess.lastname, "Doe");
    }

    #[test]
    #[traced_test]
    fn test_no_email_yields_none() {
        let guess = guess_contact("John Smith\nNo contact details here");
        assert_eq!(guess.email, None);
        assert_eq!(guess.firstname, "John");
        assert_eq!(guess.lastname, "Smith");
    }

    #[test]
    #[traced_test]
    fn test_first_match_wins() {
        let guess = guess_contact("a@b.example\nsecond@example.com");
        assert_eq!(guess.email.as_deref(), Some("a@b.example"));
    }

    #[test]
    #[traced_test]
    fn test_plus_and_percent_in_local_part() {
        let guess = guess_contact("reach me at jane+cv%tag@mail.example.co today");
        assert_eq!(guess.email.as_deref(), Some("jane+cv%tag@mail.example.co"));
    }

    #[test]
    #[traced_test]
    fn test_single_token_header_falls_back() {
        let guess = guess_contact("Resume\njohn@example.com");
        assert_eq!(guess.firstname, UNKNOWN);
        assert_eq!(guess.lastname, UNKNOWN);
        assert_eq!(guess.email.as_deref(), Some("john@example.com"));
    }

    #[test]
    #[traced_test]
    fn test_blank_lines_and_padding_skipped() {
        let guess = guess_contact("\n   \n\t  Marie  Anne Curie  \nPhysicist");
        assert_eq!(guess.firstname, "Marie");
        assert_eq!(guess.lastname, "Anne Curie");
    }

    #[test]
    #[traced_test]
    fn test_empty_text_degrades_to_placeholders() {
        let guess = guess_contact("");
        assert_eq!(guess.email, None);
        assert_eq!(guess.firstname, UNKNOWN);
        assert_eq!(guess.lastname, UNKNOWN);
    }

    #[test]
    #[traced_test]
    fn test_garbage_bytes_are_an_error() {
        let err = extract_text_from_pdf(b"not a pdf at all").unwrap_err();
        // the coded message must render, not panic
        assert!(!err.to_string().is_empty());
    }

    fn one_page_pdf(line: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 36.into()]),
                Operation::new("Td", vec![100.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialize pdf");
        bytes
    }

    #[test]
    #[traced_test]
    fn test_pdf_text_roundtrip() {
        let bytes = one_page_pdf("Jane Doe");
        let text = extract_text_from_pdf(&bytes).expect("readable pdf");
        assert!(text.contains("Jane Doe"), "got: {}", text);
    }
}
