//! pdfvoice — convert PDF text to spoken audio, and speech back into PDF or
//! text documents.
//!
//! # Pipelines
//!
//! ```text
//! PDF → Audio:   pdf::extract_text → text::chunks → tts::SpeechOutputSession
//! Audio → PDF:   stt::SpeechInputSession → pdf::write_text / plain TXT
//! ```
//!
//! Every substantive operation is delegated: `lopdf`/`printpdf` own the PDF
//! format, `espeak-ng` owns synthesis, and a remote web API owns
//! recognition.  This crate contributes the glue — range normalization,
//! chunking, naive page layout, session/cancellation plumbing and two
//! frontends (a clap CLI and an egui window).

pub mod app;
pub mod audio;
pub mod config;
pub mod pdf;
pub mod stt;
pub mod text;
pub mod tts;
