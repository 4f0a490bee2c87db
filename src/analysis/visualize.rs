//! Term statistics for word clouds, frequency charts and text metrics.

use crate::nlp::tagger::PosClass;
use crate::nlp::tokenizer::{split_sentences, split_words};
use crate::nlp::NlpContext;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

pub const DEFAULT_CLOUD_TERMS: usize = 50;
pub const DEFAULT_FREQUENCY_TERMS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMetrics {
    pub characters: usize,
    pub words: usize,
    pub sentences: usize,
    pub unique_words: usize,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
    pub vocabulary_richness: f64,
    pub stopwords: usize,
}

/// Lowercase lemma counts of content words, most frequent first.
pub fn unique_keywords(ctx: &NlpContext, text: &str, top_n: usize) -> Vec<TermCount> {
    let lemmas = ctx.tagger().tag(text).into_iter().filter_map(|t| {
        let content = matches!(
            t.pos,
            PosClass::Noun | PosClass::ProperNoun | PosClass::Adjective | PosClass::Verb
        );
        (t.is_alpha
            && content
            && t.text.chars().count() > 2
            && !ctx.stopwords().is_stopword(&t.lower))
            .then(|| t.lemma.to_lowercase())
    });
    let mut ranked = count_in_order(lemmas);
    ranked.truncate(top_n);
    ranked
}

pub fn word_cloud(ctx: &NlpContext, text: &str, max_terms: usize) -> Vec<WeightedTerm> {
    let terms = unique_keywords(ctx, text, max_terms);
    let Some(max) = terms.first().map(|t| t.count as f64) else {
        return Vec::new();
    };
    terms
        .into_iter()
        .map(|t| WeightedTerm {
            weight: t.count as f64 / max,
            term: t.term,
        })
        .collect()
}

/// Frequency of each top keyword's lemma across every alphabetic,
/// non-stop-word token.
pub fn keyword_frequencies(ctx: &NlpContext, text: &str, top_n: usize) -> Vec<TermCount> {
    let keywords = unique_keywords(ctx, text, top_n);
    let mut freq: FxHashMap<String, usize> = FxHashMap::default();
    for token in ctx.tagger().tag(text) {
        if token.is_alpha && !ctx.stopwords().is_stopword(&token.lower) {
            *freq.entry(token.lemma.to_lowercase()).or_insert(0) += 1;
        }
    }
    let mut out: Vec<TermCount> = keywords
        .into_iter()
        .map(|k| TermCount {
            count: freq.get(&k.term).copied().unwrap_or(k.count),
            term: k.term,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

pub fn text_metrics(ctx: &NlpContext, text: &str) -> TextMetrics {
    let words = split_words(text);
    let sentences = split_sentences(text).len();
    let unique: FxHashSet<String> = ctx
        .tagger()
        .tag(text)
        .into_iter()
        .filter(|t| {
            t.is_alpha && t.text.chars().count() > 2 && !ctx.stopwords().is_stopword(&t.lower)
        })
        .map(|t| t.lemma.to_lowercase())
        .collect();
    let word_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let stopwords = words
        .iter()
        .filter(|w| ctx.stopwords().is_stopword(w))
        .count();

    let ratio = |num: f64, den: usize| {
        if den == 0 {
            0.0
        } else {
            round2(num / den as f64)
        }
    };
    TextMetrics {
        characters: text.chars().count(),
        words: words.len(),
        sentences,
        unique_words: unique.len(),
        avg_word_length: ratio(word_chars as f64, words.len()),
        avg_sentence_length: ratio(words.len() as f64, sentences),
        vocabulary_richness: ratio(unique.len() as f64, words.len()),
        stopwords,
    }
}

/// Counts with ties kept in first-seen order.
fn count_in_order(items: impl Iterator<Item = String>) -> Vec<TermCount> {
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut out: Vec<TermCount> = Vec::new();
    for item in items {
        match index.get(&item) {
            Some(&i) => out[i].count += 1,
            None => {
                index.insert(item.clone(), out.len());
                out.push(TermCount {
                    term: item,
                    count: 1,
                });
            }
        }
    }
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT_DOC: &str = "The cat sat on the mat. The cats ate a fish. Fish are food.";

    #[test]
    fn unique_keywords_merge_inflections() {
        let ctx = NlpContext::english();
        let terms = unique_keywords(&ctx, CAT_DOC, 10);
        assert_eq!(terms[0].count, 2);
        let cat = terms.iter().find(|t| t.term == "cat").expect("cat counted");
        assert_eq!(cat.count, 2);
        assert!(terms.iter().all(|t| t.term != "the" && t.term != "on"));
        assert!(unique_keywords(&ctx, CAT_DOC, 1).len() == 1);
    }

    #[test]
    fn word_cloud_weights_are_relative_to_the_top_term() {
        let ctx = NlpContext::english();
        let cloud = word_cloud(&ctx, CAT_DOC, DEFAULT_CLOUD_TERMS);
        assert_eq!(cloud[0].weight, 1.0);
        assert!(cloud.iter().all(|t| t.weight > 0.0 && t.weight <= 1.0));
        assert!(cloud.iter().any(|t| t.weight == 0.5));
        assert!(word_cloud(&ctx, "", DEFAULT_CLOUD_TERMS).is_empty());
    }

    #[test]
    fn keyword_frequencies_are_sorted() {
        let ctx = NlpContext::english();
        let freq = keyword_frequencies(&ctx, CAT_DOC, DEFAULT_FREQUENCY_TERMS);
        assert!(!freq.is_empty());
        assert!(freq.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn text_metrics_counts() {
        let ctx = NlpContext::english();
        let m = text_metrics(&ctx, "The cat sat. The dog ran.");
        assert_eq!(m.characters, 25);
        assert_eq!(m.words, 6);
        assert_eq!(m.sentences, 2);
        assert_eq!(m.avg_sentence_length, 3.0);
        assert_eq!(m.avg_word_length, 3.0);
        assert_eq!(m.stopwords, 2);
        assert_eq!(m.unique_words, 4);
        assert_eq!(m.vocabulary_richness, 0.67);
    }

    #[test]
    fn empty_text_metrics_are_zero() {
        let ctx = NlpContext::english();
        let m = text_metrics(&ctx, "");
        assert_eq!(m.words, 0);
        assert_eq!(m.avg_word_length, 0.0);
        assert_eq!(m.vocabulary_richness, 0.0);
    }
}
