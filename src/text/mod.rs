//! Pure text helpers shared by the TTS and PDF pipelines.
//!
//! * [`chunks`] — split a long string into engine-sized pieces before it is
//!   fed to the speech synthesizer.
//! * [`wrap_lines`] — pre-wrap source lines to a page's printable width
//!   before the document writer places them.
//!
//! Both are stateless; every call produces a fresh, finite sequence.

pub mod chunk;
pub mod wrap;

pub use chunk::{chunks, Chunks};
pub use wrap::{max_chars_for, wrap_lines, DEFAULT_AVG_CHAR_WIDTH};
