//! PDF text extraction and document writing.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │  PageRange ──normalize──▶ (start, end)                │
//! │       │                                               │
//! │       ▼                                               │
//! │  extract_text (lopdf)      write_text (printpdf)      │
//! │  per-page, lenient         fixed A4 layout via        │
//! │  join + trim               text::wrap_lines           │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Binary PDF parsing and serialization are owned entirely by `lopdf` and
//! `printpdf`; this module only decides *which* pages to read and *where*
//! each line lands.

pub mod extract;
pub mod range;
pub mod write;

use thiserror::Error;

pub use extract::extract_text;
pub use range::PageRange;
pub use write::write_text;

// ---------------------------------------------------------------------------
// PdfError
// ---------------------------------------------------------------------------

/// Errors surfaced by the PDF subsystem.
///
/// Per-page extraction failures are *not* represented here — they are
/// swallowed by [`extract_text`] and contribute empty text, so one bad page
/// never blocks the rest of the document.
#[derive(Debug, Error)]
pub enum PdfError {
    /// The requested page range is empty or out of bounds after
    /// normalization.  Terminates the request.
    #[error("invalid page range {start}..={end} for a {page_count}-page document")]
    InvalidRange {
        start: usize,
        end: usize,
        page_count: usize,
    },

    /// The document could not be opened or parsed at all.
    #[error("failed to open PDF: {0}")]
    Open(#[from] lopdf::Error),

    /// The output document could not be serialized.
    #[error("failed to write PDF: {0}")]
    Write(String),

    /// Filesystem error while creating the output file or its parents.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
