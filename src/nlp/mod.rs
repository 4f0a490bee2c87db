//! Natural language processing components: segmentation, tagging,
//! stop words and keyword extraction.

pub mod keywords;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;

use crate::nlp::stopwords::StopwordFilter;
use crate::nlp::tagger::{RuleTagger, Tagger};

/// Long-lived handle to the tagger and stop-word tables.
///
/// Built once at startup and shared by reference (usually behind an `Arc`)
/// with every operation that needs tagging.
pub struct NlpContext {
    tagger: Box<dyn Tagger>,
    stopwords: StopwordFilter,
}

impl NlpContext {
    pub fn new(tagger: Box<dyn Tagger>, stopwords: StopwordFilter) -> Self {
        Self { tagger, stopwords }
    }

    pub fn english() -> Self {
        Self::new(Box::new(RuleTagger::new()), StopwordFilter::english())
    }

    pub fn tagger(&self) -> &dyn Tagger {
        self.tagger.as_ref()
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }
}
