use crate::errors::ServiceError;
use crate::nlp::tokenizer::{split_sentences, truncate_chars};
use crate::services::{endpoint, LazyClient};
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com";
/// Longest text sent in a single request.
pub const MAX_CHUNK_CHARS: usize = 5000;

/// Target languages accepted by the translation endpoint, `(code, name)`.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("af", "afrikaans"), ("sq", "albanian"), ("am", "amharic"), ("ar", "arabic"),
    ("hy", "armenian"), ("az", "azerbaijani"), ("eu", "basque"), ("be", "belarusian"),
    ("bn", "bengali"), ("bs", "bosnian"), ("bg", "bulgarian"), ("ca", "catalan"),
    ("ceb", "cebuano"), ("ny", "chichewa"), ("zh-cn", "chinese (simplified)"),
    ("zh-tw", "chinese (traditional)"), ("co", "corsican"), ("hr", "croatian"),
    ("cs", "czech"), ("da", "danish"), ("nl", "dutch"), ("en", "english"),
    ("eo", "esperanto"), ("et", "estonian"), ("tl", "filipino"), ("fi", "finnish"),
    ("fr", "french"), ("fy", "frisian"), ("gl", "galician"), ("ka", "georgian"),
    ("de", "german"), ("el", "greek"), ("gu", "gujarati"), ("ht", "haitian creole"),
    ("ha", "hausa"), ("haw", "hawaiian"), ("iw", "hebrew"), ("hi", "hindi"),
    ("hmn", "hmong"), ("hu", "hungarian"), ("is", "icelandic"), ("ig", "igbo"),
    ("id", "indonesian"), ("ga", "irish"), ("it", "italian"), ("ja", "japanese"),
    ("jw", "javanese"), ("kn", "kannada"), ("kk", "kazakh"), ("km", "khmer"),
    ("ko", "korean"), ("ku", "kurdish (kurmanji)"), ("ky", "kyrgyz"), ("lo", "lao"),
    ("la", "latin"), ("lv", "latvian"), ("lt", "lithuanian"), ("lb", "luxembourgish"),
    ("mk", "macedonian"), ("mg", "malagasy"), ("ms", "malay"), ("ml", "malayalam"),
    ("mt", "maltese"), ("mi", "maori"), ("mr", "marathi"), ("mn", "mongolian"),
    ("my", "myanmar (burmese)"), ("ne", "nepali"), ("no", "norwegian"), ("or", "odia"),
    ("ps", "pashto"), ("fa", "persian"), ("pl", "polish"), ("pt", "portuguese"),
    ("pa", "punjabi"), ("ro", "romanian"), ("ru", "russian"), ("sm", "samoan"),
    ("gd", "scots gaelic"), ("sr", "serbian"), ("st", "sesotho"), ("sn", "shona"),
    ("sd", "sindhi"), ("si", "sinhala"), ("sk", "slovak"), ("sl", "slovenian"),
    ("so", "somali"), ("es", "spanish"), ("su", "sundanese"), ("sw", "swahili"),
    ("sv", "swedish"), ("tg", "tajik"), ("ta", "tamil"), ("te", "telugu"), ("th", "thai"),
    ("tr", "turkish"), ("uk", "ukrainian"), ("ur", "urdu"), ("ug", "uyghur"),
    ("uz", "uzbek"), ("vi", "vietnamese"), ("cy", "welsh"), ("xh", "xhosa"),
    ("yi", "yiddish"), ("yo", "yoruba"), ("zu", "zulu"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub text: String,
    /// Detected source language of the first chunk.
    pub source: String,
    pub target: String,
}

pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, target: &str) -> Result<Translation, ServiceError>;
}

/// Resolve a language code or English name to its code.
pub fn resolve_language(target: &str) -> Result<&'static str, ServiceError> {
    let wanted = target.trim().to_lowercase();
    LANGUAGES
        .iter()
        .find(|(code, name)| *code == wanted || *name == wanted)
        .map(|(code, _)| *code)
        .ok_or_else(|| ServiceError::UnsupportedLanguage(target.to_string()))
}

pub struct GoogleTranslator {
    base_url: String,
    http: LazyClient,
}

impl GoogleTranslator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            http: LazyClient::new(timeout),
        }
    }

    fn translate_chunk(&self, chunk: &str, code: &str) -> Result<(String, String), ServiceError> {
        let url = endpoint(
            &self.base_url,
            "translate_a/single",
            &[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", code),
                ("dt", "t"),
                ("q", chunk),
            ],
        )?;
        let body: serde_json::Value = self
            .http
            .get(url)?
            .json()
            .map_err(|e| ServiceError::Decode(format!("translation response: {e}")))?;
        parse_response(&body)
    }
}

impl Translator for GoogleTranslator {
    fn translate(&self, text: &str, target: &str) -> Result<Translation, ServiceError> {
        let code = resolve_language(target)?;
        if text.trim().is_empty() {
            return Err(ServiceError::EmptyInput);
        }
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        let mut parts = Vec::with_capacity(chunks.len());
        let mut source = String::new();
        for chunk in &chunks {
            if chunk.trim().is_empty() {
                parts.push(chunk.clone());
                continue;
            }
            let (translated, detected) = self.translate_chunk(chunk, code)?;
            if source.is_empty() {
                source = detected;
            }
            parts.push(translated);
        }
        tracing::info!(target = code, chunks = chunks.len(), "text translated");
        Ok(Translation {
            text: parts.concat(),
            source,
            target: code.to_string(),
        })
    }
}

/// The endpoint answers `[[["translated", "original", ...], ...], null, "src", ...]`.
fn parse_response(body: &serde_json::Value) -> Result<(String, String), ServiceError> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| ServiceError::Decode("missing translation segments".into()))?;
    let text: String = segments
        .iter()
        .filter_map(|seg| seg.get(0).and_then(|s| s.as_str()))
        .collect();
    let source = body
        .get(2)
        .and_then(|v| v.as_str())
        .unwrap_or("auto")
        .to_string();
    Ok((text, source))
}

/// Split `text` into chunks of at most `max_chars` characters. Text within
/// the limit is returned unchanged. Longer text is cut after sentence ends,
/// with the separators kept, so the chunks concatenate back to `text`. A
/// sentence longer than the limit is cut into pieces.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut pieces: Vec<&str> = Vec::new();
    let mut start = 0;
    for sentence in split_sentences(text) {
        let Some(pos) = text[start..].find(sentence.text.as_str()) else {
            continue;
        };
        let end = start + pos + sentence.text.len();
        pieces.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;
    for piece in pieces {
        let mut rest = piece;
        while rest.chars().count() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            let head = truncate_chars(rest, max_chars);
            chunks.push(head.to_string());
            rest = &rest[head.len()..];
        }
        let n = rest.chars().count();
        if current_chars + n > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        current.push_str(rest);
        current_chars += n;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
