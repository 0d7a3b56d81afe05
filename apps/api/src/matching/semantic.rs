//! Semantic matching: embedding cosine similarity between a resume and free-form job text.

use tracing::debug;

use crate::embeddings::{cosine_similarity, Embedder};
use crate::errors::AppError;
use crate::matching::score::MatchScore;

/// Embeds both texts in one batch and returns their cosine similarity.
pub async fn semantic_score(
    embedder: &dyn Embedder,
    resume_text: &str,
    jd_text: &str,
) -> Result<MatchScore, AppError> {
    let vectors = embedder
        .embed_batch(vec![resume_text.to_string(), jd_text.to_string()])
        .await?;

    let [resume_vec, jd_vec] = vectors.as_slice() else {
        return Err(AppError::Embedding(format!(
            "Expected 2 embeddings from {}, got {}",
            embedder.model_id(),
            vectors.len()
        )));
    };

    let similarity = cosine_similarity(resume_vec, jd_vec);
    debug!(model = embedder.model_id(), similarity, "Semantic score computed");
    Ok(MatchScore::from_fraction(similarity))
}
