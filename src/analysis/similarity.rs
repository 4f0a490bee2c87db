use crate::errors::NlpError;
use crate::nlp::stopwords::StopwordFilter;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde::Serialize;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityBand {
    VeryHigh,
    High,
    Moderate,
    Low,
    VeryDifferent,
}

impl SimilarityBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent > 80.0 {
            Self::VeryHigh
        } else if percent > 60.0 {
            Self::High
        } else if percent > 40.0 {
            Self::Moderate
        } else if percent > 20.0 {
            Self::Low
        } else {
            Self::VeryDifferent
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::VeryHigh => "very high similarity",
            Self::High => "high similarity",
            Self::Moderate => "moderate similarity",
            Self::Low => "low similarity",
            Self::VeryDifferent => "very different texts",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarityReport {
    pub percent: f64,
    pub band: SimilarityBand,
    pub description: &'static str,
}

type SparseVector = FxHashMap<String, f64>;

/// Cosine similarity of the TF-IDF vectors of two texts, as a percentage.
pub fn compare(
    stopwords: &StopwordFilter,
    text_a: &str,
    text_b: &str,
) -> Result<SimilarityReport, NlpError> {
    let docs = [terms(stopwords, text_a), terms(stopwords, text_b)];
    if docs.iter().all(Vec::is_empty) {
        return Err(NlpError::EmptyVocabulary);
    }
    let vectors = tfidf(&docs);
    let cosine = dot(&vectors[0], &vectors[1]);
    let percent = (cosine * 100.0 * 100.0).round() / 100.0;
    let band = SimilarityBand::from_percent(percent);
    Ok(SimilarityReport {
        percent,
        band,
        description: band.description(),
    })
}

fn terms(stopwords: &StopwordFilter, text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !stopwords.is_stopword(t))
        .map(str::to_string)
        .collect()
}

/// Raw counts weighted by smooth idf, each row L2-normalised.
fn tfidf(docs: &[Vec<String>]) -> Vec<SparseVector> {
    let n = docs.len() as f64;
    let counts: Vec<FxHashMap<&str, f64>> = docs
        .iter()
        .map(|doc| {
            let mut tf: FxHashMap<&str, f64> = FxHashMap::default();
            for term in doc {
                *tf.entry(term.as_str()).or_insert(0.0) += 1.0;
            }
            tf
        })
        .collect();
    let mut df: FxHashMap<&str, f64> = FxHashMap::default();
    for tf in &counts {
        for term in tf.keys() {
            *df.entry(*term).or_insert(0.0) += 1.0;
        }
    }

    counts
        .iter()
        .map(|tf| {
            let mut row: SparseVector = tf
                .iter()
                .map(|(term, count)| {
                    let idf = ((1.0 + n) / (1.0 + df[term])).ln() + 1.0;
                    (term.to_string(), count * idf)
                })
                .collect();
            let norm = row.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.values_mut().for_each(|w| *w /= norm);
            }
            row
        })
        .collect()
}

fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum()
}
