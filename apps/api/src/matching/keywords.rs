//! Word-level overlap between a job description and a resume.
//!
//! Words are whitespace-separated, lowercased, with surrounding punctuation trimmed.
//! English stopwords are dropped so "missing keywords" lists real terms, not "the"/"and".

use std::collections::{BTreeSet, HashSet};
use std::sync::OnceLock;

/// Matched and missing job keywords, each sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordOverlap {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// `matched = job ∩ resume`, `missing = job − resume`.
pub fn keyword_overlap(job_description: &str, resume_text: &str) -> KeywordOverlap {
    let job_words = keyword_set(job_description);
    let resume_words = keyword_set(resume_text);

    KeywordOverlap {
        matched: job_words.intersection(&resume_words).cloned().collect(),
        missing: job_words.difference(&resume_words).cloned().collect(),
    }
}

fn keyword_set(text: &str) -> BTreeSet<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty() && !is_stopword(w))
        .collect()
}

fn is_stopword(word: &str) -> bool {
    static STOPWORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOPWORDS
        .get_or_init(|| ENGLISH_STOPWORDS.iter().copied().collect())
        .contains(word)
}

const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "again", "against", "all", "almost", "also",
    "am", "among", "an", "and", "any", "are", "as", "at", "be", "because", "been", "before",
    "being", "below", "between", "both", "but", "by", "can", "could", "did", "do", "does",
    "doing", "down", "during", "each", "either", "else", "etc", "ever", "every", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "least", "less", "may", "me", "might", "more", "most", "much", "must",
    "my", "myself", "neither", "no", "nor", "not", "of", "off", "often", "on", "once", "one",
    "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "per", "rather",
    "same", "she", "should", "since", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "through", "thus", "to", "too", "under", "until", "up", "upon", "us", "very", "via", "was",
    "we", "well", "were", "what", "when", "where", "whether", "which", "while", "who", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];
