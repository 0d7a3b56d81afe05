//! Technology-term comparison between a resume and a job description.
//!
//! Tokens are compared against a fixed vocabulary with an exact, case-sensitive match:
//! "python" or "Node" alone will not count.

use std::collections::BTreeSet;

pub const TECH_KEYWORDS: &[&str] = &[
    "Python",
    "TensorFlow",
    "SQL",
    "Docker",
    "AWS",
    "NLP",
    "Pandas",
    "Java",
    "C++",
    "React",
    "Node.js",
];

const PREFIX_PUNCT: &[char] = &['(', '[', '{', '"', '\'', '`', '\u{2018}', '\u{201c}'];
const SUFFIX_PUNCT: &[char] = &[
    ')', ']', '}', '"', '\'', '`', ',', ';', ':', '!', '?', '\u{2019}', '\u{201d}',
];
const POSSESSIVE_SUFFIXES: &[&str] = &["'s", "\u{2019}s"];

/// Skills present in both texts and skills the job asks for that the resume lacks. Sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityComparison {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

pub fn compare_entities(resume_text: &str, jd_text: &str) -> EntityComparison {
    let resume_entities = extract_entities(resume_text);
    let jd_entities = extract_entities(jd_text);

    EntityComparison {
        matched: resume_entities
            .intersection(&jd_entities)
            .map(|s| s.to_string())
            .collect(),
        missing: jd_entities
            .difference(&resume_entities)
            .map(|s| s.to_string())
            .collect(),
    }
}

/// Vocabulary terms appearing as whole tokens in `text`.
pub fn extract_entities(text: &str) -> BTreeSet<&'static str> {
    tokenize(text)
        .filter_map(|token| TECH_KEYWORDS.iter().copied().find(|kw| *kw == token))
        .collect()
}

/// Whitespace split, then infix split on `/` and on a hyphen between two letters,
/// then prefix/suffix punctuation and a possessive `'s` peeled off each piece.
/// Inner characters otherwise survive, so `Node.js` and `C++` stay whole; a
/// sentence-final period is treated as punctuation.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .flat_map(split_infixes)
        .filter_map(|piece| {
            let mut token = piece.trim_start_matches(PREFIX_PUNCT);
            loop {
                let trimmed = token.trim_end_matches(SUFFIX_PUNCT);
                let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
                let trimmed = POSSESSIVE_SUFFIXES
                    .iter()
                    .find_map(|s| trimmed.strip_suffix(*s))
                    .unwrap_or(trimmed);
                if trimmed.len() == token.len() {
                    break;
                }
                token = trimmed;
            }
            (!token.is_empty()).then_some(token)
        })
}

fn split_infixes(chunk: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = chunk.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let is_infix = c == '/'
            || (c == '-'
                && prev.is_some_and(char::is_alphabetic)
                && next.is_some_and(char::is_alphabetic));
        if is_infix {
            pieces.push(&chunk[start..i]);
            start = i + c.len_utf8();
        }
        prev = Some(c);
    }
    pieces.push(&chunk[start..]);
    pieces
}
