//! Sentence and word segmentation.
//!
//! Words follow UAX #29 word boundaries (`unicode-segmentation`). Sentences are
//! split on terminal punctuation followed by whitespace, with guards for
//! common abbreviations, single-letter initials and lowercase continuations.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use unicode_segmentation::UnicodeSegmentation;

static ABBREVIATIONS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co",
        "corp", "dept", "univ", "no", "fig", "approx", "est", "gen", "gov", "sen", "rep", "mt",
        "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
        "e.g", "i.e", "u.s", "u.k", "a.m", "p.m",
    ]
    .into_iter()
    .collect()
});

/// A sentence of a document with its 0-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
}

impl Sentence {
    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }
}

/// Split `text` into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        current.push(ch);
        i += 1;

        if !matches!(ch, '.' | '!' | '?' | '…') {
            continue;
        }
        // Runs like "?!" or "..." stay with the sentence, as do closing quotes.
        while i < chars.len() && is_trailing_mark(chars[i]) {
            current.push(chars[i]);
            i += 1;
        }
        if i < chars.len() && !chars[i].is_whitespace() {
            continue;
        }
        if ch == '.' && ends_with_abbreviation(&current) {
            continue;
        }
        let next = chars[i..].iter().find(|c| !c.is_whitespace());
        if matches!(next, Some(c) if c.is_lowercase()) {
            continue;
        }
        push_sentence(&mut out, &mut current);
    }
    push_sentence(&mut out, &mut current);
    out
}

fn is_trailing_mark(c: char) -> bool {
    matches!(
        c,
        '.' | '!' | '?' | '…' | '"' | '\'' | ')' | ']' | '}' | '\u{201D}' | '\u{2019}' | '\u{00BB}'
    )
}

fn ends_with_abbreviation(fragment: &str) -> bool {
    let last = fragment
        .trim_end_matches('.')
        .rsplit(|c: char| c.is_whitespace() || c == '(' || c == '"')
        .next()
        .unwrap_or("");
    if last.is_empty() {
        return false;
    }
    let lower = last.to_lowercase();
    if ABBREVIATIONS.contains(lower.as_str()) {
        return true;
    }
    // Single-letter initials such as "J. R. Tolkien".
    let mut letters = last.chars();
    matches!((letters.next(), letters.next()), (Some(c), None) if c.is_alphabetic() && c.is_uppercase())
}

fn push_sentence(out: &mut Vec<Sentence>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        out.push(Sentence {
            index: out.len(),
            text: trimmed.to_string(),
        });
    }
    current.clear();
}

/// Word and punctuation tokens, whitespace removed.
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split_word_bounds()
        .filter(|t| !t.trim().is_empty())
        .collect()
}

/// Word tokens only (segments containing at least one alphanumeric char).
pub fn split_words(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

pub fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(sentences: &[Sentence]) -> Vec<&str> {
        sentences.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn splits_basic_sentences() {
        let s = split_sentences("The cat sat on the mat. The cat ate a fish. Fish are food.");
        assert_eq!(
            texts(&s),
            vec!["The cat sat on the mat.", "The cat ate a fish.", "Fish are food."]
        );
        assert_eq!(s[2].index, 2);
    }

    #[test]
    fn keeps_abbreviations_and_initials_together() {
        let s = split_sentences("Dr. Smith met J. R. Tolkien at 5 p.m. yesterday. It went well!");
        assert_eq!(s.len(), 2);
        assert!(s[0].text.starts_with("Dr. Smith"));
        assert_eq!(s[1].text, "It went well!");
    }

    #[test]
    fn handles_questions_quotes_and_missing_terminal() {
        let s = split_sentences("Is this working?! \"Yes,\" she said. No ending here");
        assert_eq!(
            texts(&s),
            vec!["Is this working?!", "\"Yes,\" she said.", "No ending here"]
        );
    }

    #[test]
    fn does_not_split_inside_numbers_or_before_lowercase() {
        let s = split_sentences("Pi is 3.14 roughly. see the notes... then stop.");
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn empty_and_whitespace_input_yield_nothing() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n ").is_empty());
    }

    #[test]
    fn word_count_ignores_punctuation() {
        assert_eq!(word_count("Hello."), 1);
        assert_eq!(word_count("The cat ate a fish."), 5);
        assert_eq!(split_tokens("Hello, world!"), vec!["Hello", ",", "world", "!"]);
        assert_eq!(split_words("Hello, world!"), vec!["Hello", "world"]);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
