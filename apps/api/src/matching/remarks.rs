//! Human-readable remarks: a three-tier verdict plus a keyword summary.
//! Tiers are picked on the rounded percentage the response reports, and bounds are
//! exclusive (`percent > bound`): a score shown as exactly 75.0 is never "Great".

use crate::matching::entities::EntityComparison;
use crate::matching::score::MatchScore;

const TFIDF_STRONG: f64 = 75.0;
const TFIDF_MODERATE: f64 = 50.0;
const SEMANTIC_STRONG: f64 = 80.0;
const SEMANTIC_MODERATE: f64 = 60.0;

pub fn tfidf_remark(score: MatchScore, matched: &[String], missing: &[String]) -> String {
    let percent = score.percent();
    let base = if percent > TFIDF_STRONG {
        "✅ Great match! Your resume is well-aligned with the job role."
    } else if percent > TFIDF_MODERATE {
        "🟡 Moderate match. Consider improving some areas."
    } else {
        "🔴 Low match. Significant improvements needed to align with the role."
    };

    format!(
        "{base}\n\nMatched Keywords: {}\nMissing Keywords: {}",
        join_or_none(matched),
        join_or_none(missing)
    )
}

pub fn semantic_remark(score: MatchScore, entities: &EntityComparison) -> String {
    let percent = score.percent();
    let base = if percent > SEMANTIC_STRONG {
        "✅ Strong semantic alignment with the job description."
    } else if percent > SEMANTIC_MODERATE {
        "🟡 Moderate alignment. Some important points are missing."
    } else {
        "🔴 Weak alignment. Consider rewriting your resume to match the job description."
    };

    format!(
        "{base}\n\nMatched skills: {}\nMissing skills: {}",
        join_or_none(&entities.matched),
        join_or_none(&entities.missing)
    )
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}
