use crate::errors::ServiceError;
use crate::services::{endpoint, LazyClient};
use bytes::{Bytes, BytesMut};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SPEECH_URL: &str = "https://translate.google.com";
/// Longest text the endpoint accepts per request.
pub const MAX_CHUNK_CHARS: usize = 100;

pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "english"),
    ("es", "spanish"),
    ("fr", "french"),
    ("de", "german"),
    ("hi", "hindi"),
    ("te", "telugu"),
];

pub trait SpeechSynthesizer: Send + Sync {
    /// MP3 audio for `text` spoken in `language`.
    fn synthesize(&self, text: &str, language: &str) -> Result<Bytes, ServiceError>;
}

pub fn resolve_language(language: &str) -> Result<&'static str, ServiceError> {
    let wanted = language.trim().to_lowercase();
    LANGUAGES
        .iter()
        .find(|(code, name)| *code == wanted || *name == wanted)
        .map(|(code, _)| *code)
        .ok_or_else(|| ServiceError::UnsupportedLanguage(language.to_string()))
}

pub struct GoogleSpeech {
    base_url: String,
    http: LazyClient,
}

impl GoogleSpeech {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            http: LazyClient::new(timeout),
        }
    }
}

impl SpeechSynthesizer for GoogleSpeech {
    fn synthesize(&self, text: &str, language: &str) -> Result<Bytes, ServiceError> {
        let code = resolve_language(language)?;
        let chunks = chunk_words(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(ServiceError::EmptyInput);
        }
        let total = chunks.len().to_string();
        let mut audio = BytesMut::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            let url = endpoint(
                &self.base_url,
                "translate_tts",
                &[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", code),
                    ("client", "tw-ob"),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ],
            )?;
            let part = self
                .http
                .get(url)?
                .bytes()
                .map_err(|e| ServiceError::Decode(format!("speech response: {e}")))?;
            audio.extend_from_slice(&part);
        }
        tracing::info!(
            language = code,
            chunks = chunks.len(),
            bytes = audio.len(),
            "speech synthesized"
        );
        Ok(audio.freeze())
    }
}

/// Split on whitespace into chunks of at most `max_chars` characters.
pub fn chunk_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let split = word
                .char_indices()
                .nth(max_chars)
                .map_or(word.len(), |(i, _)| i);
            chunks.push(word[..split].to_string());
            word = &word[split..];
        }
        if word.is_empty() {
            continue;
        }
        let len = current.chars().count();
        if len > 0 && len + 1 + word.chars().count() > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Where to write synthesized audio: the requested path, or a fresh
/// `speech-<uuid>.mp3` in `dir`.
pub fn output_path(dir: &Path, requested: Option<&str>) -> PathBuf {
    match requested {
        Some(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => dir.join(format!("speech-{}.mp3", uuid::Uuid::new_v4())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_server::serve;

    #[test]
    fn chunks_never_exceed_limit() {
        let text = "word ".repeat(60);
        let chunks = chunk_words(&text, MAX_CHUNK_CHARS);
        assert!(chunks.len() >= 3);
        assert!(chunks.iter().all(|c| c.chars().count() <= MAX_CHUNK_CHARS));
        assert_eq!(chunks.join(" "), text.trim());

        let long = "a".repeat(250);
        let chunks = chunk_words(&long, MAX_CHUNK_CHARS);
        assert_eq!(chunks.iter().map(|c| c.len()).collect::<Vec<_>>(), vec![100, 100, 50]);
    }

    #[test]
    fn rejects_unknown_language_and_empty_text() {
        let s = GoogleSpeech::new("http://127.0.0.1:9", Duration::from_millis(200));
        assert!(matches!(
            s.synthesize("hello", "jp"),
            Err(ServiceError::UnsupportedLanguage(_))
        ));
        assert!(matches!(s.synthesize("  ", "en"), Err(ServiceError::EmptyInput)));
        assert_eq!(resolve_language("Telugu").unwrap(), "te");
    }

    #[test]
    fn output_path_defaults_to_uuid_file() {
        let dir = Path::new("/tmp/out");
        let p = output_path(dir, None);
        assert_eq!(p.parent(), Some(dir));
        let name = p.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("speech-") && name.ends_with(".mp3"));
        assert_eq!(output_path(dir, Some("x.mp3")), PathBuf::from("x.mp3"));
    }

    #[cfg_attr(windows, ignore)]
    #[test]
    fn concatenates_chunk_audio() {
        let (base, handle) = serve(vec![
            ("200 OK", "audio/mpeg", b"ID3-one".to_vec()),
            ("200 OK", "audio/mpeg", b"-two".to_vec()),
        ]);
        let s = GoogleSpeech::new(base, Duration::from_secs(5));
        let text = format!("{} {}", "alpha ".repeat(18).trim(), "omega");
        let audio = s.synthesize(&text, "en").expect("synthesize ok");
        assert_eq!(&audio[..], b"ID3-one-two");
        let seen = handle.join().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].starts_with("GET /translate_tts?ie=UTF-8&q=alpha"));
        assert!(seen[1].contains("idx=1"));
    }
}
