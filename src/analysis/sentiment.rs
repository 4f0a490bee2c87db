//! Sentence-level sentiment using the VADER lexicon and rules.
//!
//! Each sentence gets VADER polarity scores; the document label comes from
//! the average compound score.

use crate::nlp::tokenizer::split_sentences;
use once_cell::sync::Lazy;
use serde::Serialize;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Compound scores at or beyond this magnitude are polar.
const POLARITY_THRESHOLD: f64 = 0.05;

static ANALYZER: Lazy<SentimentIntensityAnalyzer<'static>> =
    Lazy::new(|| SentimentIntensityAnalyzer::new());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    fn from_compound(compound: f64) -> Self {
        if compound >= POLARITY_THRESHOLD {
            Self::Positive
        } else if compound <= -POLARITY_THRESHOLD {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PolarityScores {
    pub compound: f64,
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentReport {
    pub label: SentimentLabel,
    pub scores: PolarityScores,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
}

/// Scores every sentence and averages the results.
pub fn analyze_sentiment(text: &str) -> SentimentReport {
    let mut report = SentimentReport {
        label: SentimentLabel::Neutral,
        scores: PolarityScores::default(),
        positive: Vec::new(),
        negative: Vec::new(),
        neutral: Vec::new(),
    };
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return report;
    }

    let mut sum = PolarityScores::default();
    for sentence in &sentences {
        let scores = polarity_scores(&sentence.text);
        sum.compound += scores.compound;
        sum.pos += scores.pos;
        sum.neg += scores.neg;
        sum.neu += scores.neu;
        let bucket = match SentimentLabel::from_compound(scores.compound) {
            SentimentLabel::Positive => &mut report.positive,
            SentimentLabel::Negative => &mut report.negative,
            SentimentLabel::Neutral => &mut report.neutral,
        };
        bucket.push(sentence.text.clone());
    }
    let n = sentences.len() as f64;
    report.scores = PolarityScores {
        compound: round_to(sum.compound / n, 2),
        pos: round_to(sum.pos / n, 2),
        neg: round_to(sum.neg / n, 2),
        neu: round_to(sum.neu / n, 2),
    };
    report.label = SentimentLabel::from_compound(report.scores.compound);
    tracing::debug!(
        sentences = sentences.len(),
        compound = report.scores.compound,
        "sentiment analysed"
    );
    report
}

/// Valence scores of a single sentence.
pub fn polarity_scores(text: &str) -> PolarityScores {
    if text.trim().is_empty() {
        return PolarityScores::default();
    }
    let scores = ANALYZER.polarity_scores(text);
    let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);
    PolarityScores {
        compound: get("compound"),
        pos: get("pos"),
        neg: get("neg"),
        neu: get("neu"),
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
