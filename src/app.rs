//! egui/eframe graphical interface.
//!
//! # Architecture
//!
//! [`PdfVoiceApp`] owns the widget state and two channel endpoints:
//!
//! * `command_tx` — sends [`UiCommand`]s to the background worker.
//! * `event_rx`   — receives [`UiEvent`]s back (status lines, transcripts).
//!
//! The worker thread owns its own tokio runtime plus the speech sessions,
//! so extraction, synthesis and recognition never block the UI.  Only one
//! worker exists; starting a new read cancels the previous playback
//! (last-writer-wins, same rule as the CLI sessions).
//!
//! Two tabs mirror the two pipelines:
//!
//! | Tab | Contents |
//! |-----|----------|
//! | PDF → Audio | PDF path, page range, rate/volume/voice, Read / Stop |
//! | Audio → PDF | audio path, language, mic limit, transcript editor, exports |

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use crate::config::AppConfig;
use crate::pdf::{self, PageRange};
use crate::stt::{SpeechInputSession, SpeechRecognizer, WebSpeechRecognizer};
use crate::text;
use crate::tts::{EspeakBackend, PlaybackSettings, SpeechOutputSession, SynthBackend};

// ---------------------------------------------------------------------------
// Worker messages
// ---------------------------------------------------------------------------

/// Commands sent from the UI thread to the background worker.
#[derive(Debug, Clone)]
pub enum UiCommand {
    /// Extract a page range and start reading it aloud.
    ReadPdf {
        path: PathBuf,
        range: PageRange,
        settings: PlaybackSettings,
    },
    /// Cancel the in-flight playback, if any.
    StopSpeaking,
    /// Transcribe an audio file.
    TranscribeFile { path: PathBuf, language: String },
    /// Record one phrase from the microphone and transcribe it.
    ListenMicrophone {
        language: String,
        limit: Option<Duration>,
    },
}

/// Events delivered from the worker back to the UI.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A status line for the log pane.
    Status(String),
    /// A finished transcription for the transcript editor.
    Transcript(String),
}

// ---------------------------------------------------------------------------
// Background worker
// ---------------------------------------------------------------------------

/// Worker loop: one command at a time, results pushed back as events.
fn run_worker(config: AppConfig, command_rx: Receiver<UiCommand>, event_tx: Sender<UiEvent>) {
    let status = |msg: String| {
        let _ = event_tx.send(UiEvent::Status(msg));
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            status(format!("worker failed to start: {e}"));
            return;
        }
    };

    let backend: Arc<dyn SynthBackend> = Arc::new(EspeakBackend::new());
    let recognizer: Arc<dyn SpeechRecognizer> =
        Arc::new(WebSpeechRecognizer::from_config(&config.stt));

    // Single playback slot: the session of the most recent ReadPdf.
    let mut playback: Option<SpeechOutputSession> = None;

    while let Ok(command) = command_rx.recv() {
        match command {
            UiCommand::ReadPdf {
                path,
                range,
                settings,
            } => match pdf::extract_text(&path, range) {
                Ok(text) if text.is_empty() => {
                    status("No text found; PDF might be scanned.".into());
                }
                Ok(extracted) => {
                    if let Some(previous) = &playback {
                        previous.stop();
                    }
                    let mut session =
                        SpeechOutputSession::new(Arc::clone(&backend), settings);
                    let chunks: Vec<String> =
                        text::chunks(&extracted, config.tts.chunk_chars).collect();
                    session.speak_async(chunks);
                    playback = Some(session);

                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    status(format!("Reading: {name}"));
                }
                Err(e) => status(format!("Error: {e}")),
            },

            UiCommand::StopSpeaking => {
                if let Some(session) = &playback {
                    session.stop();
                    status("Stopped.".into());
                }
            }

            UiCommand::TranscribeFile { path, language } => {
                let session = SpeechInputSession::new(Arc::clone(&recognizer), language);
                match rt.block_on(session.transcribe_file(&path)) {
                    Ok(transcription) => {
                        if transcription.is_empty() {
                            status("Nothing transcribed.".into());
                        }
                        let _ = event_tx
                            .send(UiEvent::Transcript(transcription.text().to_string()));
                    }
                    Err(e) => status(format!("Transcription failed: {e}")),
                }
            }

            UiCommand::ListenMicrophone { language, limit } => {
                status("Listening…".into());
                let session = SpeechInputSession::new(Arc::clone(&recognizer), language);
                let transcription = rt.block_on(
                    session.transcribe_microphone(config.audio.endpoint_config(), limit),
                );
                if transcription.is_empty() {
                    status("Nothing transcribed.".into());
                }
                let _ = event_tx.send(UiEvent::Transcript(transcription.text().to_string()));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PdfVoiceApp
// ---------------------------------------------------------------------------

/// Which tab is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    PdfToAudio,
    AudioToPdf,
}

/// eframe application — the PDF ↔ Audio converter window.
pub struct PdfVoiceApp {
    tab: Tab,

    // ── PDF → Audio fields ───────────────────────────────────────────────
    pdf_path: String,
    start_page: String,
    end_page: String,
    rate: u32,
    volume: f32,
    voice: String,

    // ── Audio → PDF fields ───────────────────────────────────────────────
    audio_path: String,
    language: String,
    mic_limit: String,
    transcript: String,
    export_path: String,

    // ── Status log ───────────────────────────────────────────────────────
    status_lines: Vec<String>,

    // ── Channels ─────────────────────────────────────────────────────────
    command_tx: Sender<UiCommand>,
    event_rx: Receiver<UiEvent>,
}

impl PdfVoiceApp {
    fn new(config: &AppConfig, command_tx: Sender<UiCommand>, event_rx: Receiver<UiEvent>) -> Self {
        Self {
            tab: Tab::PdfToAudio,
            pdf_path: String::new(),
            start_page: String::new(),
            end_page: String::new(),
            rate: config.tts.rate,
            volume: config.tts.volume,
            voice: config.tts.voice.clone().unwrap_or_default(),
            audio_path: String::new(),
            language: config.stt.language.clone(),
            mic_limit: String::new(),
            transcript: String::new(),
            export_path: String::new(),
            status_lines: Vec::new(),
            command_tx,
            event_rx,
        }
    }

    fn status(&mut self, line: impl Into<String>) {
        self.status_lines.push(line.into());
    }

    /// Drain all pending worker events (non-blocking).
    fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                UiEvent::Status(line) => self.status_lines.push(line),
                UiEvent::Transcript(text) => self.transcript = text,
            }
        }
    }

    // ── Actions ──────────────────────────────────────────────────────────

    fn start_reading(&mut self) {
        let path = self.pdf_path.trim();
        if path.is_empty() {
            self.status("Please enter a PDF path.");
            return;
        }
        let range = PageRange::new(
            self.start_page.trim().parse().ok(),
            self.end_page.trim().parse().ok(),
        );
        let settings = PlaybackSettings {
            rate: self.rate,
            volume: self.volume,
            voice: {
                let v = self.voice.trim();
                (!v.is_empty()).then(|| v.to_string())
            },
        };
        let _ = self.command_tx.send(UiCommand::ReadPdf {
            path: PathBuf::from(path),
            range,
            settings,
        });
    }

    fn transcribe_file(&mut self) {
        let path = self.audio_path.trim();
        if path.is_empty() {
            self.status("Choose an audio file or use Listen (Mic).");
            return;
        }
        let _ = self.command_tx.send(UiCommand::TranscribeFile {
            path: PathBuf::from(path),
            language: self.language.trim().to_string(),
        });
    }

    fn listen_microphone(&mut self) {
        let limit = self
            .mic_limit
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs);
        let _ = self.command_tx.send(UiCommand::ListenMicrophone {
            language: self.language.trim().to_string(),
            limit,
        });
    }

    fn export_pdf(&mut self) {
        let text = self.transcript.trim().to_string();
        if text.is_empty() {
            self.status("There is nothing to export.");
            return;
        }
        let path = self.export_path.trim().to_string();
        if path.is_empty() {
            self.status("Enter an output path first.");
            return;
        }
        match pdf::write_text(&text, &path, "Transcription") {
            Ok(saved) => self.status(format!("Saved PDF → {}", saved.display())),
            Err(e) => self.status(format!("Export failed: {e}")),
        }
    }

    fn export_txt(&mut self) {
        let text = self.transcript.trim().to_string();
        if text.is_empty() {
            self.status("There is nothing to save.");
            return;
        }
        let path = self.export_path.trim().to_string();
        if path.is_empty() {
            self.status("Enter an output path first.");
            return;
        }
        match std::fs::write(&path, &text) {
            Ok(()) => self.status(format!("Saved TXT → {path}")),
            Err(e) => self.status(format!("Save failed: {e}")),
        }
    }

    // ── Tab rendering ────────────────────────────────────────────────────

    fn tts_tab(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("PDF file:");
            ui.add(
                egui::TextEdit::singleline(&mut self.pdf_path)
                    .desired_width(f32::INFINITY)
                    .hint_text("/path/to/input.pdf"),
            );
        });

        ui.horizontal(|ui| {
            ui.label("Page range (1-based):");
            ui.add(egui::TextEdit::singleline(&mut self.start_page).desired_width(48.0));
            ui.label("to");
            ui.add(egui::TextEdit::singleline(&mut self.end_page).desired_width(48.0));
        });

        ui.horizontal(|ui| {
            ui.label("Rate:");
            ui.add(egui::DragValue::new(&mut self.rate).range(80..=400));
            ui.label("Volume:");
            ui.add(egui::DragValue::new(&mut self.volume).range(0.0..=1.0).speed(0.05));
            ui.label("Voice contains:");
            ui.add(egui::TextEdit::singleline(&mut self.voice).desired_width(120.0));
        });

        ui.horizontal(|ui| {
            if ui.button("Read PDF").clicked() {
                self.start_reading();
            }
            if ui.button("Stop").clicked() {
                let _ = self.command_tx.send(UiCommand::StopSpeaking);
            }
        });
    }

    fn stt_tab(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Audio file (optional):");
            ui.add(
                egui::TextEdit::singleline(&mut self.audio_path)
                    .desired_width(f32::INFINITY)
                    .hint_text("/path/to/input.wav"),
            );
        });

        ui.horizontal(|ui| {
            ui.label("Language:");
            ui.add(egui::TextEdit::singleline(&mut self.language).desired_width(80.0));
            ui.label("Time limit (s, mic):");
            ui.add(egui::TextEdit::singleline(&mut self.mic_limit).desired_width(48.0));
        });

        ui.horizontal(|ui| {
            if ui.button("Transcribe File").clicked() {
                self.transcribe_file();
            }
            if ui.button("Listen (Mic)").clicked() {
                self.listen_microphone();
            }
        });

        ui.horizontal(|ui| {
            ui.label("Output path:");
            ui.add(
                egui::TextEdit::singleline(&mut self.export_path)
                    .desired_width(f32::INFINITY)
                    .hint_text("/path/to/output.pdf"),
            );
            if ui.button("Export to PDF").clicked() {
                self.export_pdf();
            }
            if ui.button("Save TXT").clicked() {
                self.export_txt();
            }
        });

        ui.add_space(4.0);
        ui.label("Transcript:");
        egui::ScrollArea::vertical()
            .id_salt("transcript")
            .max_height(180.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.transcript)
                        .desired_width(f32::INFINITY)
                        .desired_rows(8),
                );
            });
    }
}

impl eframe::App for PdfVoiceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::PdfToAudio, "PDF → Audio");
                ui.selectable_value(&mut self.tab, Tab::AudioToPdf, "Audio/Speech → PDF");
            });
            ui.separator();

            match self.tab {
                Tab::PdfToAudio => self.tts_tab(ui),
                Tab::AudioToPdf => self.stt_tab(ui),
            }

            ui.separator();
            ui.label("Log:");
            egui::ScrollArea::vertical()
                .id_salt("status")
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.status_lines {
                        ui.label(line);
                    }
                });
        });

        // Poll for worker events even while the user is idle.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Launch the GUI.  Blocks the calling thread until the window closes.
pub fn run(config: AppConfig) -> eframe::Result<()> {
    let (command_tx, command_rx) = std::sync::mpsc::channel::<UiCommand>();
    let (event_tx, event_rx) = std::sync::mpsc::channel::<UiEvent>();

    let worker_config = config.clone();
    std::thread::spawn(move || run_worker(worker_config, command_rx, event_tx));

    let app = PdfVoiceApp::new(&config, command_tx, event_rx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 520.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "PDF ↔ Audio Converter",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_app() -> (PdfVoiceApp, Receiver<UiCommand>, Sender<UiEvent>) {
        let (command_tx, command_rx) = std::sync::mpsc::channel();
        let (event_tx, event_rx) = std::sync::mpsc::channel();
        let app = PdfVoiceApp::new(&AppConfig::default(), command_tx, event_rx);
        (app, command_rx, event_tx)
    }

    #[test]
    fn defaults_come_from_config() {
        let (app, _rx, _tx) = make_app();
        assert_eq!(app.rate, 180);
        assert_eq!(app.language, "en-US");
        assert!(app.voice.is_empty());
    }

    #[test]
    fn read_without_path_logs_instead_of_sending() {
        let (mut app, command_rx, _tx) = make_app();
        app.start_reading();
        assert!(command_rx.try_recv().is_err());
        assert!(!app.status_lines.is_empty());
    }

    #[test]
    fn read_sends_parsed_range_and_settings() {
        let (mut app, command_rx, _tx) = make_app();
        app.pdf_path = "doc.pdf".into();
        app.start_page = "2".into();
        app.end_page = "".into();
        app.voice = " Zira ".into();
        app.start_reading();

        let UiCommand::ReadPdf {
            path,
            range,
            settings,
        } = command_rx.try_recv().expect("command")
        else {
            panic!("expected ReadPdf");
        };
        assert_eq!(path, PathBuf::from("doc.pdf"));
        assert_eq!(range, PageRange::new(Some(2), None));
        assert_eq!(settings.voice.as_deref(), Some("Zira"));
    }

    #[test]
    fn mic_limit_zero_means_unbounded() {
        let (mut app, command_rx, _tx) = make_app();
        app.mic_limit = "0".into();
        app.listen_microphone();

        let UiCommand::ListenMicrophone { limit, .. } =
            command_rx.try_recv().expect("command")
        else {
            panic!("expected ListenMicrophone");
        };
        assert!(limit.is_none());
    }

    #[test]
    fn transcript_events_replace_editor_contents() {
        let (mut app, _rx, event_tx) = make_app();
        event_tx
            .send(UiEvent::Transcript("hello there".into()))
            .expect("send");
        app.poll_events();
        assert_eq!(app.transcript, "hello there");
    }

    #[test]
    fn export_with_empty_transcript_only_logs() {
        let (mut app, _rx, _tx) = make_app();
        app.export_pdf();
        app.export_txt();
        assert_eq!(app.status_lines.len(), 2);
    }
}
