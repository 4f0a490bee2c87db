use crate::errors::SummarizeError;
use crate::nlp::tokenizer::{split_sentences, word_count};
use crate::summarize::{
    short_document, SelectedSentence, SummarizeResult, Summarizer, SummaryOptions, MIN_SENTENCES,
};
use unicode_segmentation::UnicodeSegmentation;

/// Baseline: the leading sentences of the document, in order, up to the budget.
#[derive(Default)]
pub struct LeadSummarizer;

impl Summarizer for LeadSummarizer {
    fn summarize(
        &self,
        document: &str,
        word_budget: usize,
        _options: SummaryOptions,
    ) -> Result<SummarizeResult, SummarizeError> {
        if word_budget == 0 {
            return Err(SummarizeError::ZeroBudget);
        }
        let sentences = split_sentences(document);
        if sentences.len() < MIN_SENTENCES {
            return Ok(short_document(document, "lead"));
        }

        let mut out = String::new();
        let mut selected = Vec::new();
        let mut used = 0usize;
        for sentence in &sentences {
            let words = sentence.word_count();
            if used + words > word_budget {
                break;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&sentence.text);
            used += words;
            selected.push(SelectedSentence {
                index: sentence.index,
                score: 0.0,
                word_count: words,
            });
        }
        if out.is_empty() {
            // Even the first sentence is over budget: cut it at a word boundary.
            let head = document.trim_start();
            let cut = head
                .unicode_word_indices()
                .nth(word_budget - 1)
                .map(|(start, word)| start + word.len());
            out = match cut {
                Some(end) => head[..end].to_string(),
                None => head.to_string(),
            };
            used = word_count(&out);
        }
        Ok(SummarizeResult {
            summary: out,
            word_count: used,
            selected,
            fallback: false,
            backend: "lead".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETS_DOC: &str =
        "Nothing happened. The cat ate a fish. The cat and the dog shared the fish.";

    #[test]
    fn takes_leading_sentences_up_to_budget() {
        let res = LeadSummarizer
            .summarize(PETS_DOC, 7, SummaryOptions::default())
            .unwrap();
        assert_eq!(res.summary, "Nothing happened. The cat ate a fish.");
        assert_eq!(res.word_count, 7);
        assert_eq!(res.selected.len(), 2);
    }

    #[test]
    fn falls_back_to_word_truncation_when_nothing_fits() {
        let res = LeadSummarizer
            .summarize(PETS_DOC, 1, SummaryOptions::default())
            .unwrap();
        assert_eq!(res.summary, "Nothing");
        assert_eq!(res.word_count, 1);
        assert!(res.selected.is_empty());
    }
}
