//! Lexical matching: TF-IDF cosine similarity between a resume and a stored role description.
//!
//! The vector space is fit on exactly the two documents being compared, so scores are only
//! meaningful within a pair: different resumes against the same role get different idf weights.
//!
//! Weighting (smoothed idf, L2-normalised rows):
//!   idf(t)   = ln((1 + n) / (1 + df(t))) + 1,  n = 2
//!   w(t, d)  = count(t, d) × idf(t)
//!   cos(a,b) = (w_a · w_b) / (|w_a| |w_b|)

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::errors::AppError;
use crate::matching::keywords::{keyword_overlap, KeywordOverlap};
use crate::matching::roles::RoleStore;
use crate::matching::score::MatchScore;

/// Output of the lexical matcher.
#[derive(Debug, Clone)]
pub struct LexicalMatch {
    pub score: MatchScore,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Loads `role` from the store and scores `resume_text` against it.
pub async fn match_resume_with_role(
    roles: &RoleStore,
    resume_text: &str,
    role: &str,
) -> Result<LexicalMatch, AppError> {
    let job_description = roles.load(role).await?;
    Ok(match_resume_with_description(resume_text, &job_description))
}

/// Scores a resume against an already-loaded role description.
pub fn match_resume_with_description(resume_text: &str, job_description: &str) -> LexicalMatch {
    let score = MatchScore::from_fraction(tfidf_cosine(resume_text, job_description));
    let KeywordOverlap { matched, missing } = keyword_overlap(job_description, resume_text);

    debug!(
        score = score.fraction(),
        matched = matched.len(),
        missing = missing.len(),
        "Lexical match computed"
    );

    LexicalMatch {
        score,
        matched,
        missing,
    }
}

/// TF-IDF cosine similarity of two documents, in `[0, 1]`.
/// A document without any token is the zero vector and scores 0.
pub fn tfidf_cosine(a: &str, b: &str) -> f64 {
    let counts_a = term_counts(a);
    let counts_b = term_counts(b);
    if counts_a.is_empty() || counts_b.is_empty() {
        return 0.0;
    }

    let n_docs = 2.0_f64;
    let idf = |term: &str| {
        let df = counts_a.contains_key(term) as u32 + counts_b.contains_key(term) as u32;
        ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0
    };

    let weights_a: HashMap<&str, f64> = counts_a
        .iter()
        .map(|(t, c)| (t.as_str(), *c as f64 * idf(t.as_str())))
        .collect();
    let weights_b: HashMap<&str, f64> = counts_b
        .iter()
        .map(|(t, c)| (t.as_str(), *c as f64 * idf(t.as_str())))
        .collect();

    let norm = |w: &HashMap<&str, f64>| w.values().map(|v| v * v).sum::<f64>().sqrt();
    let (norm_a, norm_b) = (norm(&weights_a), norm(&weights_b));
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let dot: f64 = weights_a
        .iter()
        .filter_map(|(t, wa)| weights_b.get(t).map(|wb| wa * wb))
        .sum();

    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// Lowercased runs of two or more word characters, with counts.
fn term_counts(text: &str) -> HashMap<String, usize> {
    let lowered = text.to_lowercase();
    let mut counts = HashMap::new();
    for m in token_pattern().find_iter(&lowered) {
        *counts.entry(m.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}
