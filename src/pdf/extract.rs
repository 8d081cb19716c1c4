//! Page-range text extraction built on `lopdf`.

use std::path::Path;

use lopdf::Document;

use crate::pdf::{PageRange, PdfError};

/// Extract the text of every page in `range`, joined with newlines and
/// trimmed.
///
/// A page-level extraction failure (image-only or damaged page) is logged
/// and contributes an empty string instead of aborting the request.  An
/// all-empty result is therefore `Ok("")`, not an error — the caller is
/// expected to warn the user that the source may be a scanned document.
///
/// # Errors
///
/// - [`PdfError::Open`] when the file cannot be parsed as a PDF at all.
/// - [`PdfError::InvalidRange`] when `range` normalizes to an empty or
///   out-of-bounds selection.
pub fn extract_text(path: impl AsRef<Path>, range: PageRange) -> Result<String, PdfError> {
    let path = path.as_ref();
    let doc = Document::load(path)?;
    let page_count = doc.get_pages().len();
    let (start, end) = range.normalize(page_count)?;

    log::debug!(
        "extracting pages {start}..={end} of {page_count} from {}",
        path.display()
    );

    let mut pages = Vec::with_capacity(end - start + 1);
    for page in start..=end {
        let text = match doc.extract_text(&[page as u32]) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("page {page}: no text extracted ({e})");
                String::new()
            }
        };
        pages.push(text);
    }

    Ok(pages.join("\n").trim().to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::write_text;
    use tempfile::tempdir;

    /// Strip whitespace so the lossy wrapper's line breaks don't matter.
    fn squash(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = extract_text("/nonexistent/input.pdf", PageRange::default()).unwrap_err();
        assert!(matches!(err, PdfError::Open(_) | PdfError::Io(_)));
    }

    #[test]
    fn full_range_and_default_range_agree() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("doc.pdf");
        write_text("alpha beta gamma", &path, "Test").expect("write");

        let all = extract_text(&path, PageRange::default()).expect("extract default");
        let explicit =
            extract_text(&path, PageRange::new(Some(1), None)).expect("extract explicit");
        assert_eq!(all, explicit);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("doc.pdf");
        write_text("some text", &path, "Test").expect("write");

        let err = extract_text(&path, PageRange::new(Some(5), Some(2))).unwrap_err();
        assert!(matches!(err, PdfError::InvalidRange { .. }));
    }

    /// Round trip: text written with the document writer comes back out of
    /// the extractor, equal up to whitespace (the naive wrapper may insert
    /// line breaks mid-word).
    #[test]
    fn write_then_extract_round_trip() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("roundtrip.pdf");
        let text = "The quick brown fox jumps over the lazy dog.";
        write_text(text, &path, "Round Trip").expect("write");

        let extracted = extract_text(&path, PageRange::default()).expect("extract");
        assert_eq!(squash(&extracted), squash(text));
    }
}
