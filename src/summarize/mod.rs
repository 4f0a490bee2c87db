use crate::errors::SummarizeError;
use crate::nlp::tokenizer::{truncate_chars, word_count};
use crate::nlp::NlpContext;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Documents with fewer sentences than this are returned as a prefix.
const MIN_SENTENCES: usize = 2;
const SHORT_DOCUMENT_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize)]
pub struct SelectedSentence {
    pub index: usize,
    pub score: f64,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeResult {
    pub summary: String,
    pub word_count: usize,
    pub selected: Vec<SelectedSentence>,
    /// True when the document was too short to rank and was returned as a prefix.
    pub fallback: bool,
    pub backend: String,
}

/// Order in which selected sentences are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceOrder {
    /// Highest score first, i.e. the order of selection.
    #[default]
    Score,
    /// Original position in the document.
    Document,
}

/// What happens when the next ranked sentence does not fit the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Leave it out and keep scanning lower-ranked sentences.
    #[default]
    Skip,
    /// End the scan.
    Stop,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryOptions {
    pub order: SentenceOrder,
    pub overflow: OverflowPolicy,
}

pub trait Summarizer: Send + Sync {
    fn summarize(
        &self,
        document: &str,
        word_budget: usize,
        options: SummaryOptions,
    ) -> Result<SummarizeResult, SummarizeError>;
}

mod extractive;
mod lead;

pub use extractive::ExtractiveSummarizer;
pub use lead::LeadSummarizer;

pub fn build_summarizer(backend: &str, nlp: Arc<NlpContext>) -> Arc<dyn Summarizer> {
    match backend {
        "lead" => Arc::new(LeadSummarizer),
        _ => Arc::new(ExtractiveSummarizer::new(nlp)),
    }
}

/// Prefix result for documents too short to rank: the first
/// `SHORT_DOCUMENT_CHARS` characters, untouched.
fn short_document(document: &str, backend: &str) -> SummarizeResult {
    let summary = truncate_chars(document, SHORT_DOCUMENT_CHARS).to_string();
    SummarizeResult {
        word_count: word_count(&summary),
        summary,
        selected: Vec::new(),
        fallback: true,
        backend: backend.into(),
    }
}

impl FromStr for SentenceOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "score" => Ok(Self::Score),
            "document" => Ok(Self::Document),
            other => Err(format!("unknown sentence order: {other} (expected score|document)")),
        }
    }
}

impl fmt::Display for SentenceOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Score => "score",
            Self::Document => "document",
        })
    }
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "stop" => Ok(Self::Stop),
            other => Err(format!("unknown overflow policy: {other} (expected skip|stop)")),
        }
    }
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Skip => "skip",
            Self::Stop => "stop",
        })
    }
}
