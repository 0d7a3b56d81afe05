//! PDF → plain text.
//!
//! No layout preservation and no OCR: scanned documents come back empty, which is
//! indistinguishable from an empty PDF.

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Extracts the text content of an in-memory PDF.
/// Parsing is CPU-bound, so it runs on the blocking pool. A parser panic on a
/// malformed document is reported as an extraction failure.
pub async fn extract_text_from_pdf(content: Bytes) -> Result<String, AppError> {
    let size = content.len();
    let text = tokio::task::spawn_blocking(move || extract_text_blocking(&content))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::Extraction("PDF parser aborted on malformed input".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
            }
        })??;

    debug!(bytes = size, chars = text.len(), "Extracted resume text");
    Ok(text)
}

fn extract_text_blocking(content: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(content).map_err(|e| AppError::Extraction(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::RESUME_PDF;

    #[tokio::test]
    async fn test_extracts_text_from_pdf() {
        let text = extract_text_from_pdf(Bytes::from_static(RESUME_PDF)).await.unwrap();
        for expected in ["Jane", "Backend", "Python", "SQL", "Docker", "AWS", "pipelines"] {
            assert!(text.contains(expected), "missing {expected:?} in {text:?}");
        }
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_fail_extraction() {
        let result = extract_text_from_pdf(Bytes::from_static(b"plain text, not a pdf")).await;
        assert!(
            matches!(result, Err(AppError::Extraction(_))),
            "Expected extraction error, got {result:?}"
        );
    }
}
