//! Frequency-ranked keyword extraction with lemma deduplication.
//!
//! Candidates are lowercase nouns/proper nouns plus verb lemmas. They are
//! ranked by how often the candidate form itself occurs (not by the total
//! frequency of its lemma), then the ranked list is walked and every
//! candidate whose lemma was already taken is dropped.

use crate::errors::NlpError;
use crate::nlp::tagger::PosClass;
use crate::nlp::NlpContext;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// How many ranked candidates are inspected per requested keyword, to make
/// up for candidates lost to lemma deduplication.
const OVERFETCH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub term: String,
    pub lemma: String,
    pub count: usize,
}

/// Keywords of one document, ordered by descending candidate frequency.
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    entries: Vec<Keyword>,
    terms: FxHashSet<String>,
}

impl KeywordSet {
    fn push(&mut self, keyword: Keyword) {
        self.terms.insert(keyword.term.clone());
        self.entries.push(keyword);
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn entries(&self) -> &[Keyword] {
        &self.entries
    }

    pub fn terms(&self) -> Vec<String> {
        self.entries.iter().map(|k| k.term.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn extract_keywords(
    ctx: &NlpContext,
    document: &str,
    top_n: usize,
) -> Result<KeywordSet, NlpError> {
    if top_n == 0 {
        return Err(NlpError::ZeroTopN);
    }
    if document.trim().is_empty() {
        return Err(NlpError::EmptyInput);
    }

    let tokens = ctx.tagger().tag(document);
    let nouns = tokens
        .iter()
        .filter(|t| t.is_alpha && matches!(t.pos, PosClass::Noun | PosClass::ProperNoun))
        .map(|t| t.lower.as_str());
    let verbs = tokens
        .iter()
        .filter(|t| t.is_alpha && t.pos == PosClass::Verb)
        .map(|t| t.lemma.as_str());

    // Nouns precede verbs in the pool, so equal counts rank nouns first.
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    let mut first_seen: Vec<&str> = Vec::new();
    for candidate in nouns.chain(verbs) {
        if candidate.chars().count() <= 2 || ctx.stopwords().is_stopword(candidate) {
            continue;
        }
        let count = counts.entry(candidate).or_insert(0);
        if *count == 0 {
            first_seen.push(candidate);
        }
        *count += 1;
    }

    let mut ranked = first_seen;
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));

    let mut out = KeywordSet::default();
    let mut seen_lemmas: FxHashSet<String> = FxHashSet::default();
    for candidate in ranked.into_iter().take(top_n.saturating_mul(OVERFETCH)) {
        let lemma = ctx.tagger().lemmatize(candidate);
        if !seen_lemmas.insert(lemma.clone()) {
            continue;
        }
        out.push(Keyword {
            term: candidate.to_string(),
            lemma,
            count: counts[candidate],
        });
        if out.len() >= top_n {
            break;
        }
    }
    tracing::debug!(
        candidates = counts.len(),
        keywords = out.len(),
        top_n,
        "keywords extracted"
    );
    Ok(out)
}
