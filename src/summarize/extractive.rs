use crate::errors::SummarizeError;
use crate::nlp::keywords::extract_keywords;
use crate::nlp::tokenizer::{split_sentences, split_words};
use crate::nlp::NlpContext;
use crate::summarize::{
    short_document, OverflowPolicy, SelectedSentence, SentenceOrder, SummarizeResult, Summarizer,
    SummaryOptions, MIN_SENTENCES,
};
use std::cmp::Ordering;
use std::sync::Arc;

/// Size of the keyword vocabulary sentences are scored against.
const SALIENCE_VOCABULARY: usize = 15;
/// Positional bonus of the first sentence; decays linearly towards 0.
const LEAD_BONUS: f64 = 0.5;

/// Keyword-overlap sentence ranking with a lead bias, greedy selection under
/// a word budget.
pub struct ExtractiveSummarizer {
    nlp: Arc<NlpContext>,
}

impl ExtractiveSummarizer {
    pub fn new(nlp: Arc<NlpContext>) -> Self {
        Self { nlp }
    }
}

impl Summarizer for ExtractiveSummarizer {
    fn summarize(
        &self,
        document: &str,
        word_budget: usize,
        options: SummaryOptions,
    ) -> Result<SummarizeResult, SummarizeError> {
        if word_budget == 0 {
            return Err(SummarizeError::ZeroBudget);
        }
        let sentences = split_sentences(document);
        if sentences.len() < MIN_SENTENCES {
            return Ok(short_document(document, "extractive"));
        }

        let keywords = extract_keywords(&self.nlp, document, SALIENCE_VOCABULARY)?;
        let total = sentences.len() as f64;
        let mut ranked: Vec<SelectedSentence> = sentences
            .iter()
            .map(|s| {
                let lowered = s.text.to_lowercase();
                let hits = split_words(&lowered)
                    .into_iter()
                    .filter(|w| keywords.contains(w))
                    .count();
                SelectedSentence {
                    index: s.index,
                    score: hits as f64 + LEAD_BONUS * (1.0 - s.index as f64 / total),
                    word_count: s.word_count(),
                }
            })
            .collect();
        // Stable: equal scores keep document order.
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let mut selected = Vec::new();
        let mut used = 0usize;
        for candidate in ranked {
            if used + candidate.word_count > word_budget {
                match options.overflow {
                    OverflowPolicy::Skip => continue,
                    OverflowPolicy::Stop => break,
                }
            }
            used += candidate.word_count;
            selected.push(candidate);
        }
        if options.order == SentenceOrder::Document {
            selected.sort_by_key(|s| s.index);
        }

        let summary = selected
            .iter()
            .map(|s| sentences[s.index].text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(
            sentences = sentences.len(),
            selected = selected.len(),
            word_budget,
            word_count = used,
            "extractive summary built"
        );
        Ok(SummarizeResult {
            summary,
            word_count: used,
            selected,
            fallback: false,
            backend: "extractive".into(),
        })
    }
}
