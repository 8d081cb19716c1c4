//! Fixed-layout document writer built on `printpdf`.
//!
//! Layout is deliberately simple: A4 pages, 50 pt margins, Times-Roman 12
//! at a 14 pt line height, lines pre-wrapped to the printable width by
//! [`crate::text::wrap_lines`].  The cursor walks down from the top margin
//! and a new page starts whenever it would fall below the bottom margin.
//! Identical input always produces an identical layout.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};

use crate::pdf::PdfError;
use crate::text::{wrap_lines, DEFAULT_AVG_CHAR_WIDTH};

// A4 in points.
const PAGE_WIDTH: f32 = 595.276;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 50.0;
const LINE_HEIGHT: f32 = 14.0;
const FONT_SIZE: f32 = 12.0;

/// Lay `text` out on fixed-size pages and save it to `path`.
///
/// Parent directories are created as needed and `title` is stored as the
/// document title metadata.  Returns the output path on success.
///
/// # Errors
///
/// - [`PdfError::Io`] when the output file or its parents cannot be created.
/// - [`PdfError::Write`] when `printpdf` fails to serialize the document.
pub fn write_text(
    text: &str,
    path: impl AsRef<Path>,
    title: &str,
) -> Result<PathBuf, PdfError> {
    let out = path.as_ref().to_path_buf();
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let page_width = Mm::from(Pt(PAGE_WIDTH));
    let page_height = Mm::from(Pt(PAGE_HEIGHT));

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, page_width, page_height, "text");
    let font = doc
        .add_builtin_font(BuiltinFont::TimesRoman)
        .map_err(|e| PdfError::Write(e.to_string()))?;

    let printable_width = PAGE_WIDTH - 2.0 * MARGIN;
    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in wrap_lines(text.split('\n'), printable_width, DEFAULT_AVG_CHAR_WIDTH) {
        if y < MARGIN {
            let (page, layer_idx) = doc.add_page(page_width, page_height, "text");
            layer = doc.get_page(page).get_layer(layer_idx);
            y = PAGE_HEIGHT - MARGIN;
        }
        layer.use_text(line, FONT_SIZE, Mm::from(Pt(MARGIN)), Mm::from(Pt(y)), &font);
        y -= LINE_HEIGHT;
    }

    let file = File::create(&out)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| PdfError::Write(e.to_string()))?;

    log::debug!("wrote PDF → {}", out.display());
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{extract_text, PageRange};
    use tempfile::tempdir;

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested/deeper/out.pdf");
        let saved = write_text("hello", &path, "Transcription").expect("write");
        assert_eq!(saved, path);
        assert!(path.exists());
    }

    #[test]
    fn empty_text_still_produces_a_document() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("empty.pdf");
        write_text("", &path, "Empty").expect("write");
        assert!(path.exists());
        let text = extract_text(&path, PageRange::default()).expect("extract");
        assert_eq!(text, "");
    }

    #[test]
    fn long_text_spills_onto_multiple_pages() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("long.pdf");

        // One A4 page holds floor((841.89 - 100) / 14) ≈ 53 lines; 120
        // source lines must therefore span at least 3 pages.
        let text = (0..120)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        write_text(&text, &path, "Long").expect("write");

        let doc = lopdf::Document::load(&path).expect("load");
        assert!(doc.get_pages().len() >= 3, "got {} pages", doc.get_pages().len());
    }

    #[test]
    fn deterministic_output() {
        let dir = tempdir().expect("temp dir");
        let a = dir.path().join("a.pdf");
        let b = dir.path().join("b.pdf");
        write_text("same input", &a, "T").expect("write a");
        write_text("same input", &b, "T").expect("write b");

        let text_a = extract_text(&a, PageRange::default()).expect("extract a");
        let text_b = extract_text(&b, PageRange::default()).expect("extract b");
        assert_eq!(text_a, text_b);
    }
}
