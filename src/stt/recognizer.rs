//! Remote speech-recognition client.
//!
//! [`WebSpeechRecognizer`] posts a 16 kHz mono WAV payload to a
//! Google-Web-Speech-style HTTP endpoint and parses its JSON-lines reply.
//! All connection details come from [`SttConfig`]; nothing is hardcoded.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SttConfig;

// ---------------------------------------------------------------------------
// RecognizerError
// ---------------------------------------------------------------------------

/// Errors from the recognition backend or its transport.
#[derive(Debug, Error)]
pub enum RecognizerError {
    /// HTTP transport or connection error.
    #[error("recognition request failed: {0}")]
    Request(String),

    /// The request did not complete within the client's timeout.
    #[error("recognition request timed out")]
    Timeout,

    /// The backend replied with something that is not the expected JSON.
    #[error("failed to parse recognizer response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for RecognizerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RecognizerError::Timeout
        } else {
            RecognizerError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechRecognizer trait
// ---------------------------------------------------------------------------

/// Async interface to a recognition backend.
///
/// Implementors must be `Send + Sync` so they can be shared as an
/// `Arc<dyn SpeechRecognizer>` across worker threads.
///
/// Returns `Ok(None)` for the *normal* "could not understand the audio"
/// outcome (silence, noise); `Err` is reserved for transport and protocol
/// failures.  Each call is one attempt — no retries.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Recognize `wav` (16 kHz mono 16-bit PCM WAV) tagged with `language`
    /// (a BCP-47-style code, passed through unvalidated).
    async fn recognize(
        &self,
        wav: &[u8],
        language: &str,
    ) -> Result<Option<String>, RecognizerError>;
}

// ---------------------------------------------------------------------------
// WebSpeechRecognizer
// ---------------------------------------------------------------------------

/// Production recognizer speaking the Google Web Speech v2 wire format.
///
/// The endpoint replies with one JSON object per line; the first line whose
/// `result` array is non-empty carries the transcript.  An all-empty reply
/// means the service understood the request but heard nothing usable.
pub struct WebSpeechRecognizer {
    client: reqwest::Client,
    config: SttConfig,
}

impl WebSpeechRecognizer {
    /// Build a recognizer from application config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; a default client is the last-resort fallback
    /// if the builder fails.
    pub fn from_config(config: &SttConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for WebSpeechRecognizer {
    async fn recognize(
        &self,
        wav: &[u8],
        language: &str,
    ) -> Result<Option<String>, RecognizerError> {
        let mut url = format!(
            "{}/speech-api/v2/recognize?client=chromium&lang={}",
            self.config.base_url.trim_end_matches('/'),
            language
        );

        // The key parameter is attached only when configured — mirrors how
        // local/self-hosted endpoints run without authentication.
        let key = self.config.api_key.as_deref().unwrap_or("");
        if !key.is_empty() {
            url.push_str("&key=");
            url.push_str(key);
        }

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "audio/wav; rate=16000")
            .body(wav.to_vec())
            .send()
            .await?;

        let body = response.text().await?;
        parse_transcript(&body)
    }
}

/// Extract the first transcript from a JSON-lines recognizer reply.
///
/// `Ok(None)` when every line's `result` array is empty — the "nothing
/// understood" outcome.
fn parse_transcript(body: &str) -> Result<Option<String>, RecognizerError> {
    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        let json: serde_json::Value =
            serde_json::from_str(line).map_err(|e| RecognizerError::Parse(e.to_string()))?;

        let Some(results) = json["result"].as_array() else {
            return Err(RecognizerError::Parse(
                "missing `result` array".to_string(),
            ));
        };

        for result in results {
            if let Some(transcript) = result["alternative"][0]["transcript"].as_str() {
                return Ok(Some(transcript.trim().to_string()));
            }
        }
    }
    Ok(None)
}

// ---------------------------------------------------------------------------
// MockRecognizer  (test-only)
// ---------------------------------------------------------------------------

/// Test double with a pre-configured response.
#[cfg(test)]
pub struct MockRecognizer {
    response: Result<Option<String>, String>,
}

#[cfg(test)]
impl MockRecognizer {
    pub fn recognizing(text: impl Into<String>) -> Self {
        Self {
            response: Ok(Some(text.into())),
        }
    }

    pub fn hearing_nothing() -> Self {
        Self { response: Ok(None) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    async fn recognize(
        &self,
        _wav: &[u8],
        _language: &str,
    ) -> Result<Option<String>, RecognizerError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(RecognizerError::Request(message.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- parse_transcript ---

    #[test]
    fn parses_a_final_transcript() {
        let body = concat!(
            "{\"result\":[]}\n",
            "{\"result\":[{\"alternative\":[{\"transcript\":\"hello world\",",
            "\"confidence\":0.92}],\"final\":true}],\"result_index\":0}\n",
        );
        assert_eq!(
            parse_transcript(body).unwrap(),
            Some("hello world".to_string())
        );
    }

    #[test]
    fn empty_results_mean_nothing_understood() {
        assert_eq!(parse_transcript("{\"result\":[]}\n").unwrap(), None);
    }

    #[test]
    fn blank_body_means_nothing_understood() {
        assert_eq!(parse_transcript("").unwrap(), None);
        assert_eq!(parse_transcript("\n\n").unwrap(), None);
    }

    #[test]
    fn transcript_is_trimmed() {
        let body =
            "{\"result\":[{\"alternative\":[{\"transcript\":\"  padded  \"}]}]}\n";
        assert_eq!(parse_transcript(body).unwrap(), Some("padded".to_string()));
    }

    #[test]
    fn first_alternative_wins() {
        let body = "{\"result\":[{\"alternative\":[\
            {\"transcript\":\"first\"},{\"transcript\":\"second\"}]}]}\n";
        assert_eq!(parse_transcript(body).unwrap(), Some("first".to_string()));
    }

    #[test]
    fn garbage_body_is_a_parse_error() {
        let err = parse_transcript("not json at all").unwrap_err();
        assert!(matches!(err, RecognizerError::Parse(_)));
    }

    #[test]
    fn missing_result_field_is_a_parse_error() {
        let err = parse_transcript("{\"status\":\"ok\"}").unwrap_err();
        assert!(matches!(err, RecognizerError::Parse(_)));
    }

    // --- construction ---

    #[test]
    fn from_config_builds_without_panic() {
        let _ = WebSpeechRecognizer::from_config(&SttConfig::default());
    }

    #[test]
    fn recognizer_is_object_safe() {
        let recognizer: Box<dyn SpeechRecognizer> =
            Box::new(WebSpeechRecognizer::from_config(&SttConfig::default()));
        drop(recognizer);
    }
}
