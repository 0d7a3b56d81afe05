//! Axum route handlers for resume analysis and the job role listing.

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{debug, info};

use crate::analyze::{analyze_resume_text, AnalyzeResponse, MatchMethod, MatchTarget};
use crate::errors::AppError;
use crate::extract::extract_text_from_pdf;
use crate::state::AppState;

/// Raw multipart fields of an analyze request. Unknown fields are ignored.
#[derive(Debug, Default)]
struct AnalyzeForm {
    file: Option<Bytes>,
    method: Option<String>,
    job_role: Option<String>,
    job_description: Option<String>,
}

impl AnalyzeForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = AnalyzeForm::default();

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            match name.as_str() {
                "file" => form.file = Some(field.bytes().await.map_err(malformed)?),
                "method" => form.method = Some(text(field).await?),
                "job_role" => form.job_role = Some(text(field).await?),
                "job_description" => form.job_description = Some(text(field).await?),
                other => debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }
}

async fn text(field: Field<'_>) -> Result<String, AppError> {
    field.text().await.map_err(malformed)
}

fn malformed(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::Validation(format!("Malformed multipart body: {e}"))
}

/// POST /analyze/
///
/// Multipart form: `file` (PDF, required), `method` (`tfidf` | `semantic`),
/// `job_role` (required for tfidf), `job_description` (required for semantic).
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = AnalyzeForm::read(&mut multipart).await?;

    let method: MatchMethod = form.method.as_deref().unwrap_or_default().parse()?;

    let file = form
        .file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::Validation("File is empty or not provided".to_string()))?;

    let target = MatchTarget::for_method(
        method,
        form.job_role.as_deref(),
        form.job_description.as_deref(),
    )?;
    target.check(&state.roles).await?;

    info!(?method, upload_bytes = file.len(), "Analyzing resume");

    let resume_text = extract_text_from_pdf(file).await?;
    let response = analyze_resume_text(
        state.embedder.as_ref(),
        &state.roles,
        &resume_text,
        &target,
    )
    .await?;

    Ok(Json(response))
}

/// GET /job_roles/
///
/// Role ids available for the tfidf method, read from disk on every call.
pub async fn handle_job_roles(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let roles = state.roles.list().await?;
    debug!(count = roles.len(), "Listed job roles");
    Ok(Json(roles))
}
