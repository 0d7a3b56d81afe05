//! Resume analysis: the orchestration between upload, extraction, matcher and remark.
//!
//! Flow per request: method → target (role or free-form description) → role file →
//! PDF text → score → remark. Each step fails with an `AppError`; nothing is kept
//! between requests.

use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::embeddings::Embedder;
use crate::errors::AppError;
use crate::matching::entities::compare_entities;
use crate::matching::lexical::match_resume_with_role;
use crate::matching::remarks::{semantic_remark, tfidf_remark};
use crate::matching::roles::RoleStore;
use crate::matching::semantic::semantic_score;

pub mod handlers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Tfidf,
    Semantic,
}

impl FromStr for MatchMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tfidf" => Ok(MatchMethod::Tfidf),
            "semantic" => Ok(MatchMethod::Semantic),
            _ => Err(AppError::InvalidMethod),
        }
    }
}

/// What the resume is compared against, after validation.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchTarget {
    Role(String),
    Description(String),
}

impl MatchTarget {
    /// Picks the field the method needs; blank or absent is a validation error.
    pub fn for_method(
        method: MatchMethod,
        job_role: Option<&str>,
        job_description: Option<&str>,
    ) -> Result<Self, AppError> {
        match method {
            MatchMethod::Tfidf => non_blank(job_role)
                .map(|r| MatchTarget::Role(r.trim().to_string()))
                .ok_or_else(|| {
                    AppError::Validation("Job role is required for TF-IDF method".to_string())
                }),
            MatchMethod::Semantic => non_blank(job_description)
                .map(|d| MatchTarget::Description(d.to_string()))
                .ok_or_else(|| {
                    AppError::Validation(
                        "Job description is required for semantic analysis".to_string(),
                    )
                }),
        }
    }

    pub fn method(&self) -> MatchMethod {
        match self {
            MatchTarget::Role(_) => MatchMethod::Tfidf,
            MatchTarget::Description(_) => MatchMethod::Semantic,
        }
    }

    /// Fails fast with `RoleNotFound` for role targets that have no file, so an
    /// unknown role is reported before the upload is parsed.
    pub async fn check(&self, roles: &RoleStore) -> Result<(), AppError> {
        match self {
            MatchTarget::Role(role) => roles.ensure_exists(role).await,
            MatchTarget::Description(_) => Ok(()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub method: MatchMethod,
    pub result: AnalysisResult,
}

/// `score` is a percentage with two decimals. For `tfidf`, `matched`/`missing` are job
/// keywords; for `semantic` they are technology skills.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub remark: String,
}

/// Scores already-extracted resume text against a target. Role targets are read
/// from `roles` at this point.
pub async fn analyze_resume_text(
    embedder: &dyn Embedder,
    roles: &RoleStore,
    resume_text: &str,
    target: &MatchTarget,
) -> Result<AnalyzeResponse, AppError> {
    let result = match target {
        MatchTarget::Role(role) => {
            let lexical = match_resume_with_role(roles, resume_text, role).await?;
            let remark = tfidf_remark(lexical.score, &lexical.matched, &lexical.missing);
            info!(role = %role, score = lexical.score.percent(), "TF-IDF analysis complete");
            AnalysisResult {
                score: lexical.score.percent(),
                matched: lexical.matched,
                missing: lexical.missing,
                remark,
            }
        }
        MatchTarget::Description(jd_text) => {
            let score = semantic_score(embedder, resume_text, jd_text).await?;
            let entities = compare_entities(resume_text, jd_text);
            let remark = semantic_remark(score, &entities);
            info!(score = score.percent(), "Semantic analysis complete");
            AnalysisResult {
                score: score.percent(),
                matched: entities.matched,
                missing: entities.missing,
                remark,
            }
        }
    };

    Ok(AnalyzeResponse {
        method: target.method(),
        result,
    })
}
