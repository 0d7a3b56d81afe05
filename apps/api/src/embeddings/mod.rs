//! Sentence embeddings, the one expensive, process-wide resource of the service.
//!
//! `AppState` holds an `Arc<dyn Embedder>` built once in `main` and never mutated.
//! Default backend: `MiniLmEmbedder` (all-MiniLM-L6-v2 on CPU via candle).

use async_trait::async_trait;

use crate::errors::AppError;

pub mod minilm;

pub use minilm::MiniLmEmbedder;

/// Turns texts into fixed-dimension, L2-normalised vectors.
/// Implementations must be safe to call from many requests at once.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, AppError>;

    /// Identifier reported in logs.
    fn model_id(&self) -> &str;
}

/// Cosine similarity of two vectors. Zero-length or zero-norm input yields 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}
