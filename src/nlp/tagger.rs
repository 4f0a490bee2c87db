//! Part-of-speech tagging and lemmatization.
//!
//! [`RuleTagger`] is a lexicon + suffix rule tagger for English. It resolves
//! closed-class words from fixed tables, irregular verb and noun forms from
//! lookup tables, and everything else from capitalisation, the previous
//! token and the word's suffix. It is deliberately coarse: the keyword and
//! summarization code only distinguishes nouns, proper nouns, verbs and
//! adjectives.

use crate::nlp::tokenizer::{split_sentences, split_tokens};
use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PosClass {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Other,
}

/// A tagged word occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lower: String,
    pub pos: PosClass,
    pub lemma: String,
    pub is_alpha: bool,
}

pub trait Tagger: Send + Sync {
    /// Tag every token of `text` in order.
    fn tag(&self, text: &str) -> Vec<Token>;

    /// Canonical form of a single word taken out of context.
    fn lemmatize(&self, word: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        Self
    }

    fn classify(
        &self,
        word: &str,
        prev: Option<&str>,
        sentence_initial: bool,
        known_proper: &FxHashSet<String>,
    ) -> Token {
        let lower = word.to_lowercase();
        let is_alpha = !word.is_empty() && word.chars().all(char::is_alphabetic);
        let make = |pos: PosClass, lemma: String| Token {
            text: word.to_string(),
            lower: lower.clone(),
            pos,
            lemma,
            is_alpha,
        };

        if !is_alpha || CLOSED_CLASS.contains(lower.as_str()) {
            return make(PosClass::Other, lower.clone());
        }
        if ADJECTIVES.contains(lower.as_str()) {
            return make(PosClass::Adjective, lower.clone());
        }
        if is_capitalized(word) && (!sentence_initial || known_proper.contains(&lower) || is_acronym(word)) {
            return make(PosClass::ProperNoun, word.to_string());
        }
        if let Some(p) = prev {
            if DETERMINERS.contains(p) {
                return if has_adjective_suffix(&lower) {
                    make(PosClass::Adjective, lower.clone())
                } else {
                    make(PosClass::Noun, noun_lemma(&lower))
                };
            }
        }
        if let Some(lemma) = IRREGULAR_VERBS.get(lower.as_str()) {
            return make(PosClass::Verb, (*lemma).to_string());
        }
        if has_noun_suffix(&lower) {
            return make(PosClass::Noun, noun_lemma(&lower));
        }
        if matches!(prev, Some(p) if VERB_CONTEXT.contains(p)) {
            return make(PosClass::Verb, verb_lemma(&lower));
        }
        if lower.len() > 4 && lower.ends_with("ly") && !LY_NOUNS.contains(lower.as_str()) {
            return make(PosClass::Other, lower.clone());
        }
        if is_verb_by_suffix(&lower) {
            return make(PosClass::Verb, verb_lemma(&lower));
        }
        if has_adjective_suffix(&lower) {
            return make(PosClass::Adjective, lower.clone());
        }
        make(PosClass::Noun, noun_lemma(&lower))
    }
}

impl Tagger for RuleTagger {
    fn tag(&self, text: &str) -> Vec<Token> {
        let sentences = split_sentences(text);

        // Words seen capitalised mid-sentence are treated as names everywhere.
        let mut known_proper = FxHashSet::default();
        for sentence in &sentences {
            let mut initial = true;
            for tok in split_tokens(&sentence.text) {
                if !tok.chars().any(char::is_alphanumeric) {
                    continue;
                }
                if !initial && is_capitalized(tok) {
                    let lower = tok.to_lowercase();
                    if !CLOSED_CLASS.contains(lower.as_str()) {
                        known_proper.insert(lower);
                    }
                }
                initial = false;
            }
        }

        let mut out = Vec::new();
        for sentence in &sentences {
            let mut prev: Option<String> = None;
            let mut initial = true;
            for tok in split_tokens(&sentence.text) {
                let is_word = tok.chars().any(char::is_alphanumeric);
                let token = self.classify(tok, prev.as_deref(), initial && is_word, &known_proper);
                if is_word {
                    initial = false;
                    prev = Some(token.lower.clone());
                }
                out.push(token);
            }
        }
        out
    }

    fn lemmatize(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if CLOSED_CLASS.contains(lower.as_str()) || ADJECTIVES.contains(lower.as_str()) {
            return lower;
        }
        if let Some(lemma) = IRREGULAR_VERBS.get(lower.as_str()) {
            return (*lemma).to_string();
        }
        if !has_noun_suffix(&lower) && is_verb_by_suffix(&lower) {
            return verb_lemma(&lower);
        }
        noun_lemma(&lower)
    }
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn is_acronym(word: &str) -> bool {
    word.chars().count() >= 2 && word.chars().all(char::is_uppercase)
}

fn is_verb_by_suffix(lower: &str) -> bool {
    if lower.len() > 4 && lower.ends_with("ing") {
        let stem = &lower[..lower.len() - 3];
        return !ING_NOUNS.contains(lower) && stem.chars().any(is_vowel);
    }
    if lower.len() > 4 && lower.ends_with("ed") {
        return !ED_WORDS.contains(lower);
    }
    false
}

fn has_noun_suffix(lower: &str) -> bool {
    const SUFFIXES: [&str; 12] = [
        "tion", "sion", "ment", "ness", "ity", "ship", "ism", "ance", "ence", "hood", "dom", "ist",
    ];
    lower.len() > 5 && SUFFIXES.iter().any(|s| lower.ends_with(s))
}

fn has_adjective_suffix(lower: &str) -> bool {
    const SUFFIXES: [&str; 8] = ["ous", "ful", "ive", "able", "ible", "less", "ical", "ish"];
    lower.len() > 5 && SUFFIXES.iter().any(|s| lower.ends_with(s))
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Consonant/vowel pattern where `y` is a vowel after a consonant.
fn cv_pattern(word: &str) -> Vec<bool> {
    let mut out: Vec<bool> = Vec::with_capacity(word.len());
    for (i, c) in word.chars().enumerate() {
        let vowel = is_vowel(c) || (c == 'y' && i > 0 && !out[i - 1]);
        out.push(vowel);
    }
    out
}

/// Number of vowel-consonant sequences.
fn measure(word: &str) -> usize {
    let pattern = cv_pattern(word);
    pattern.windows(2).filter(|w| w[0] && !w[1]).count()
}

/// Ends consonant-vowel-consonant with the final consonant not w, x or y.
fn ends_cvc(word: &str) -> bool {
    let pattern = cv_pattern(word);
    let n = pattern.len();
    if n < 3 {
        return false;
    }
    let last = word.chars().last().unwrap_or('w');
    !pattern[n - 3] && pattern[n - 2] && !pattern[n - 1] && !matches!(last, 'w' | 'x' | 'y')
}

/// Rebuild a base form from a stem left after removing -ing/-ed.
fn restore_stem(stem: &str) -> String {
    if let Some(base) = STEM_OVERRIDES.get(stem) {
        return (*base).to_string();
    }
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n == 0 {
        return String::new();
    }
    if n <= 2 {
        return format!("{stem}e");
    }
    let last = chars[n - 1];
    let before = chars[n - 2];

    if last == before && !is_vowel(last) {
        let keep_double = match last {
            's' | 'z' => true,
            'l' => n <= 5,
            'd' => n <= 3,
            'f' => true,
            _ => false,
        };
        return if keep_double {
            stem.to_string()
        } else {
            chars[..n - 1].iter().collect()
        };
    }

    let needs_e = match last {
        'v' | 'c' => true,
        'z' => true,
        'g' => matches!(before, 'r' | 'l' | 'd') || (before == 'n' && n >= 3 && matches!(chars[n - 3], 'a' | 'e')),
        'l' => !is_vowel(before) && !matches!(before, 'l' | 'r' | 'w'),
        't' => before == 'a' && n >= 3 && !matches!(chars[n - 3], 'e' | 'o' | 'a'),
        's' => is_vowel(before) && n >= 3 && is_vowel(chars[n - 3]),
        _ => false,
    };
    if needs_e || (measure(stem) == 1 && ends_cvc(stem)) {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn verb_lemma(lower: &str) -> String {
    if let Some(lemma) = IRREGULAR_VERBS.get(lower) {
        return (*lemma).to_string();
    }
    if lower.len() > 4 && lower.ends_with("ing") {
        let stem = &lower[..lower.len() - 3];
        if !stem.chars().any(is_vowel) {
            return lower.to_string();
        }
        return restore_stem(stem);
    }
    if lower.len() > 3 && lower.ends_with("ied") {
        return format!("{}y", &lower[..lower.len() - 3]);
    }
    if lower.len() > 4 && lower.ends_with("eed") {
        return lower[..lower.len() - 1].to_string();
    }
    if lower.len() > 3 && lower.ends_with("ed") {
        return restore_stem(&lower[..lower.len() - 2]);
    }
    if lower.len() > 3 && lower.ends_with("ies") {
        return format!("{}y", &lower[..lower.len() - 3]);
    }
    if ["sses", "xes", "zes", "ches", "shes", "oes"]
        .iter()
        .any(|s| lower.ends_with(s))
    {
        return lower[..lower.len() - 2].to_string();
    }
    if lower.len() > 2 && lower.ends_with('s') && !["ss", "us", "is"].iter().any(|s| lower.ends_with(s)) {
        return lower[..lower.len() - 1].to_string();
    }
    lower.to_string()
}

fn noun_lemma(lower: &str) -> String {
    if let Some(lemma) = IRREGULAR_NOUNS.get(lower) {
        return (*lemma).to_string();
    }
    if lower.len() <= 3 || INVARIANT_NOUNS.contains(lower) {
        return lower.to_string();
    }
    if lower.ends_with("ies") && lower.len() > 4 {
        return format!("{}y", &lower[..lower.len() - 3]);
    }
    if ["sses", "xes", "zes", "ches", "shes"]
        .iter()
        .any(|s| lower.ends_with(s))
    {
        return lower[..lower.len() - 2].to_string();
    }
    if ["ss", "us", "is", "ous"].iter().any(|s| lower.ends_with(s)) {
        return lower.to_string();
    }
    if let Some(stripped) = lower.strip_suffix('s') {
        return stripped.to_string();
    }
    lower.to_string()
}

static CLOSED_CLASS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        // determiners and quantifiers
        "a", "an", "the", "this", "that", "these", "those", "some", "any", "each", "every", "no",
        "all", "both", "either", "neither", "much", "many", "more", "most", "few", "fewer",
        "less", "least", "several", "such", "own", "other", "another", "same",
        // pronouns
        "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves",
        "he", "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself",
        "we", "us", "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves",
        "who", "whom", "whose", "which", "what", "whatever", "whoever", "someone", "somebody",
        "something", "anyone", "anybody", "anything", "everyone", "everybody", "everything",
        "nobody", "nothing", "none", "one", "ones",
        // prepositions and conjunctions
        "about", "above", "across", "after", "against", "along", "among", "around", "as", "at",
        "before", "behind", "below", "beneath", "beside", "besides", "between", "beyond", "by",
        "despite", "down", "during", "except", "for", "from", "in", "inside", "into", "like",
        "near", "of", "off", "on", "onto", "out", "outside", "over", "past", "per", "since",
        "through", "throughout", "till", "to", "toward", "towards", "under", "underneath",
        "until", "unto", "up", "upon", "via", "with", "within", "without", "and", "or", "but",
        "nor", "so", "yet", "if", "because", "although", "though", "while", "whereas", "unless",
        "whether", "than", "once", "when", "where", "why", "how", "whenever", "wherever",
        // auxiliaries and modals
        "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had",
        "having", "do", "does", "did", "doing", "done", "will", "would", "shall", "should",
        "can", "could", "may", "might", "must", "ought",
        // adverbs and particles
        "not", "very", "too", "also", "just", "only", "even", "still", "already", "always",
        "never", "ever", "often", "sometimes", "usually", "again", "then", "there", "here",
        "now", "soon", "later", "quite", "rather", "almost", "perhaps", "maybe", "however",
        "therefore", "thus", "instead", "indeed", "else", "away", "back", "together", "ago",
        "yes", "oh", "hello", "hi", "okay", "ok", "please", "well",
        // numerals
        "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "hundred",
        "thousand", "million", "billion", "first", "second", "third", "last", "next",
    ]
    .into_iter()
    .collect()
});

static DETERMINERS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its",
        "our", "their", "some", "any", "each", "every", "no", "many", "several", "few", "whose",
    ]
    .into_iter()
    .collect()
});

static VERB_CONTEXT: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "you", "we", "they", "he", "she", "it", "who", "to", "will", "would", "shall",
        "should", "can", "could", "may", "might", "must", "do", "does", "did", "don't",
        "doesn't", "didn't", "won't", "can't", "cannot", "wouldn't", "couldn't", "shouldn't",
    ]
    .into_iter()
    .collect()
});

static ADJECTIVES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "bad", "new", "old", "big", "small", "great", "little", "long", "short", "high",
        "low", "large", "young", "important", "different", "early", "late", "hard", "easy",
        "real", "best", "better", "worse", "worst", "free", "full", "sure", "clear", "whole",
        "true", "false", "strong", "weak", "happy", "sad", "able", "possible", "public",
        "private", "major", "minor", "human", "local", "social", "national", "political",
        "economic", "general", "special", "common", "recent", "simple", "certain", "similar",
        "various", "main", "open", "close", "hot", "cold", "warm", "cool", "dark", "light",
        "black", "white", "red", "green", "blue", "yellow", "quick", "slow", "fast", "rich",
        "poor", "nice", "fine", "huge", "tiny", "bright", "quiet", "loud", "safe", "ready",
        "likely", "only", "final", "current", "key", "difficult", "available", "popular",
        "serious", "wonderful", "terrible", "horrible", "awful", "amazing", "excellent",
        "beautiful", "ugly", "angry", "afraid", "alone", "alive", "aware", "deep", "wide",
        "heavy", "empty", "hungry", "tired", "busy", "lucky", "wrong", "right", "correct",
    ]
    .into_iter()
    .collect()
});

static IRREGULAR_VERBS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("arose", "arise"), ("arisen", "arise"), ("awoke", "awake"), ("bore", "bear"),
        ("borne", "bear"), ("became", "become"), ("began", "begin"), ("begun", "begin"),
        ("bent", "bend"), ("bit", "bite"), ("bitten", "bite"), ("bled", "bleed"),
        ("blew", "blow"), ("blown", "blow"), ("broke", "break"), ("broken", "break"),
        ("brought", "bring"), ("built", "build"), ("burnt", "burn"), ("bought", "buy"),
        ("caught", "catch"), ("chose", "choose"), ("chosen", "choose"), ("came", "come"),
        ("crept", "creep"), ("dealt", "deal"), ("dug", "dig"), ("drew", "draw"),
        ("drawn", "draw"), ("dreamt", "dream"), ("drank", "drink"), ("drunk", "drink"),
        ("drove", "drive"), ("driven", "drive"), ("ate", "eat"), ("eaten", "eat"),
        ("fell", "fall"), ("fallen", "fall"), ("fed", "feed"), ("felt", "feel"),
        ("fought", "fight"), ("found", "find"), ("fled", "flee"), ("flew", "fly"),
        ("flown", "fly"), ("forbade", "forbid"), ("forgot", "forget"),
        ("forgotten", "forget"), ("forgave", "forgive"), ("forgiven", "forgive"),
        ("froze", "freeze"), ("frozen", "freeze"), ("got", "get"), ("gotten", "get"),
        ("gave", "give"), ("given", "give"), ("went", "go"), ("gone", "go"), ("goes", "go"),
        ("grew", "grow"), ("grown", "grow"), ("hung", "hang"), ("heard", "hear"),
        ("hid", "hide"), ("hidden", "hide"), ("held", "hold"), ("kept", "keep"),
        ("knew", "know"), ("known", "know"), ("laid", "lay"), ("led", "lead"),
        ("left", "leave"), ("lent", "lend"), ("lost", "lose"), ("made", "make"),
        ("meant", "mean"), ("met", "meet"), ("paid", "pay"), ("ran", "run"), ("rang", "ring"),
        ("risen", "rise"), ("rode", "ride"), ("ridden", "ride"), ("said", "say"),
        ("says", "say"), ("sat", "sit"), ("saw", "see"), ("seen", "see"), ("sought", "seek"),
        ("sold", "sell"), ("sent", "send"), ("shook", "shake"), ("shaken", "shake"),
        ("shone", "shine"), ("shot", "shoot"), ("shown", "show"), ("sang", "sing"),
        ("sung", "sing"), ("sank", "sink"), ("sunk", "sink"), ("slept", "sleep"),
        ("slid", "slide"), ("spoke", "speak"), ("spoken", "speak"), ("spent", "spend"),
        ("spun", "spin"), ("sprang", "spring"), ("stood", "stand"), ("stole", "steal"),
        ("stolen", "steal"), ("stuck", "stick"), ("stung", "sting"), ("struck", "strike"),
        ("swore", "swear"), ("sworn", "swear"), ("swept", "sweep"), ("swam", "swim"),
        ("swum", "swim"), ("swung", "swing"), ("took", "take"), ("taken", "take"),
        ("taught", "teach"), ("tore", "tear"), ("torn", "tear"), ("told", "tell"),
        ("thought", "think"), ("threw", "throw"), ("thrown", "throw"),
        ("understood", "understand"), ("woke", "wake"), ("woken", "wake"), ("wore", "wear"),
        ("worn", "wear"), ("won", "win"), ("wrote", "write"), ("written", "write"),
        ("withdrew", "withdraw"), ("undertook", "undertake"), ("overcame", "overcome"),
        ("died", "die"), ("lied", "lie"), ("tied", "tie"), ("dying", "die"), ("lying", "lie"),
    ]
    .into_iter()
    .collect()
});

static IRREGULAR_NOUNS: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("children", "child"), ("men", "man"), ("women", "woman"), ("people", "person"),
        ("mice", "mouse"), ("feet", "foot"), ("teeth", "tooth"), ("geese", "goose"),
        ("wolves", "wolf"), ("knives", "knife"), ("lives", "life"), ("leaves", "leaf"),
        ("wives", "wife"), ("halves", "half"), ("shelves", "shelf"), ("thieves", "thief"),
        ("potatoes", "potato"), ("tomatoes", "tomato"), ("heroes", "hero"),
        ("echoes", "echo"), ("analyses", "analysis"), ("crises", "crisis"),
        ("theses", "thesis"), ("criteria", "criterion"), ("phenomena", "phenomenon"),
        ("indices", "index"), ("matrices", "matrix"), ("oxen", "ox"),
    ]
    .into_iter()
    .collect()
});

static INVARIANT_NOUNS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "news", "series", "species", "physics", "mathematics", "economics", "politics",
        "ethics", "lens", "means", "sheep", "fish", "deer", "aircraft", "data", "always",
    ]
    .into_iter()
    .collect()
});

static ING_NOUNS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "thing", "things", "string", "spring", "morning", "evening", "building", "ceiling",
        "wedding", "pudding", "clothing", "painting", "feeling", "meeting", "beginning",
        "ending", "nothing", "something", "anything", "everything", "during", "sibling",
        "darling", "herring", "shilling", "viking", "lightning", "earring", "offspring",
        "stuffing", "housing", "funding", "training", "setting", "understanding",
    ]
    .into_iter()
    .collect()
});

static ED_WORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "speed", "breed", "greed", "hundred", "sacred", "naked", "wicked", "kindred", "shred",
        "embed", "steed", "creed", "tweed", "indeed", "wretched", "rugged", "ragged",
        "beloved", "crooked", "learned", "aged", "blessed",
    ]
    .into_iter()
    .collect()
});

static LY_NOUNS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    ["family", "supply", "reply", "butterfly", "assembly", "italy", "jelly", "belly", "anomaly"]
        .into_iter()
        .collect()
});

static STEM_OVERRIDES: Lazy<FxHashMap<&'static str, &'static str>> = Lazy::new(|| {
    [("creat", "create"), ("us", "use"), ("focus", "focus"), ("bias", "bias")]
        .into_iter()
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(text: &str) -> Vec<(String, PosClass, String)> {
        RuleTagger::new()
            .tag(text)
            .into_iter()
            .map(|t| (t.text, t.pos, t.lemma))
            .collect()
    }

    fn pos_of(tokens: &[(String, PosClass, String)], word: &str) -> (PosClass, String) {
        let (_, pos, lemma) = tokens
            .iter()
            .find(|(t, _, _)| t == word)
            .unwrap_or_else(|| panic!("token {word} missing"));
        (*pos, lemma.clone())
    }

    #[test]
    fn tags_simple_sentences() {
        let tokens = tag("The cat sat on the mat. The cat ate a fish. Fish are food.");
        assert_eq!(pos_of(&tokens, "cat"), (PosClass::Noun, "cat".into()));
        assert_eq!(pos_of(&tokens, "sat"), (PosClass::Verb, "sit".into()));
        assert_eq!(pos_of(&tokens, "ate"), (PosClass::Verb, "eat".into()));
        assert_eq!(pos_of(&tokens, "Fish"), (PosClass::Noun, "fish".into()));
        assert_eq!(pos_of(&tokens, "are").0, PosClass::Other);
        assert_eq!(pos_of(&tokens, ".").0, PosClass::Other);
        assert!(!tokens.iter().any(|(t, _, _)| t.trim().is_empty()));
    }

    #[test]
    fn mid_sentence_capitals_are_proper_nouns() {
        let tokens = tag("Yesterday we visited Paris. Paris was lovely.");
        assert_eq!(pos_of(&tokens, "Paris"), (PosClass::ProperNoun, "Paris".into()));
        let parises: Vec<_> = tokens.iter().filter(|(t, _, _)| t == "Paris").collect();
        assert!(parises.iter().all(|(_, p, _)| *p == PosClass::ProperNoun));
    }

    #[test]
    fn verb_context_and_suffixes() {
        let tokens = tag("They run daily. The dogs were running and jumped.");
        assert_eq!(pos_of(&tokens, "run"), (PosClass::Verb, "run".into()));
        assert_eq!(pos_of(&tokens, "running"), (PosClass::Verb, "run".into()));
        assert_eq!(pos_of(&tokens, "jumped"), (PosClass::Verb, "jump".into()));
        assert_eq!(pos_of(&tokens, "dogs"), (PosClass::Noun, "dog".into()));
        assert_eq!(pos_of(&tokens, "daily").0, PosClass::Other);
    }

    #[test]
    fn verb_lemmas_restore_stems() {
        assert_eq!(verb_lemma("making"), "make");
        assert_eq!(verb_lemma("created"), "create");
        assert_eq!(verb_lemma("stopped"), "stop");
        assert_eq!(verb_lemma("called"), "call");
        assert_eq!(verb_lemma("studied"), "study");
        assert_eq!(verb_lemma("visited"), "visit");
        assert_eq!(verb_lemma("opened"), "open");
        assert_eq!(verb_lemma("loved"), "love");
        assert_eq!(verb_lemma("shared"), "share");
        assert_eq!(verb_lemma("agreed"), "agree");
        assert_eq!(verb_lemma("watches"), "watch");
        assert_eq!(verb_lemma("bring"), "bring");
    }

    #[test]
    fn noun_lemmas_singularize() {
        assert_eq!(noun_lemma("cats"), "cat");
        assert_eq!(noun_lemma("stories"), "story");
        assert_eq!(noun_lemma("boxes"), "box");
        assert_eq!(noun_lemma("classes"), "class");
        assert_eq!(noun_lemma("children"), "child");
        assert_eq!(noun_lemma("glass"), "glass");
        assert_eq!(noun_lemma("news"), "news");
        assert_eq!(noun_lemma("bus"), "bus");
    }

    #[test]
    fn lemmatize_isolated_words() {
        let tagger = RuleTagger::new();
        assert_eq!(tagger.lemmatize("cats"), "cat");
        assert_eq!(tagger.lemmatize("Cat"), "cat");
        assert_eq!(tagger.lemmatize("running"), "run");
        assert_eq!(tagger.lemmatize("went"), "go");
        assert_eq!(tagger.lemmatize("meeting"), "meeting");
        assert_eq!(tagger.lemmatize("information"), "information");
    }
}
