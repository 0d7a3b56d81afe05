//! Local BERT sentence embeddings via candle.
//!
//! Weights and tokenizer are fetched from the Hugging Face Hub on first start
//! (cached on disk afterwards), inference runs on CPU, mean-pooled and L2-normalised.
//! Inputs are truncated to the checkpoint's `max_seq_length` from
//! `sentence_bert_config.json` (256 for all-MiniLM-L6-v2).

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, HiddenAct, DTYPE};
use hf_hub::{api::sync::Api, Repo, RepoType};
use serde::Deserialize;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};
use tracing::{debug, info, warn};

use crate::embeddings::Embedder;
use crate::errors::AppError;

const DEFAULT_MAX_SEQ_LENGTH: usize = 256;

#[derive(Debug, Deserialize)]
struct SentenceBertConfig {
    max_seq_length: Option<usize>,
}

/// The one `config.json` field candle's `BertConfig` keeps private that we need.
#[derive(Debug, Deserialize)]
struct PositionLimit {
    max_position_embeddings: usize,
}

/// `max_seq_length` from a `sentence_bert_config.json` body, or the default when
/// the body is unparsable or the field is absent.
fn max_seq_length_from(json: &str) -> usize {
    serde_json::from_str::<SentenceBertConfig>(json)
        .ok()
        .and_then(|c| c.max_seq_length)
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_SEQ_LENGTH)
}

struct MiniLmModel {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

/// Shared handle to a loaded sentence-embedding model. Cloning is cheap.
#[derive(Clone)]
pub struct MiniLmEmbedder {
    inner: Arc<MiniLmModel>,
    model_id: String,
}

impl MiniLmEmbedder {
    /// Downloads (or reuses the cached copy of) `model_id` at `revision` and builds the model.
    /// Blocking: call from `spawn_blocking` when inside the runtime.
    pub fn load(model_id: &str, revision: &str) -> Result<Self> {
        let device = Device::Cpu;

        let api = Api::new().context("Failed to create Hugging Face Hub client")?;
        let repo = api.repo(Repo::with_revision(
            model_id.to_string(),
            RepoType::Model,
            revision.to_string(),
        ));

        let config_path = repo.get("config.json").context("Failed to fetch config.json")?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .context("Failed to fetch tokenizer.json")?;
        let weights_path = repo
            .get("model.safetensors")
            .context("Failed to fetch model.safetensors")?;

        let max_seq_length = match repo.get("sentence_bert_config.json") {
            Ok(path) => std::fs::read_to_string(&path)
                .map(|body| max_seq_length_from(&body))
                .unwrap_or(DEFAULT_MAX_SEQ_LENGTH),
            Err(e) => {
                warn!(
                    "No sentence_bert_config.json for {model_id} ({e}), \
                     truncating at {DEFAULT_MAX_SEQ_LENGTH}"
                );
                DEFAULT_MAX_SEQ_LENGTH
            }
        };

        let config_str = std::fs::read_to_string(&config_path)?;
        let mut config: BertConfig =
            serde_json::from_str(&config_str).context("Failed to parse model config")?;
        // MiniLM checkpoints use gelu
        config.hidden_act = HiddenAct::Gelu;
        let max_seq_length = match serde_json::from_str::<PositionLimit>(&config_str) {
            Ok(limit) => max_seq_length.min(limit.max_position_embeddings),
            Err(_) => max_seq_length,
        };

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer: {e}"))?;
        tokenizer.with_padding(Some(PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            ..Default::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_seq_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Failed to set truncation: {e}"))?;

        // SAFETY: the safetensors file lives in the hub cache and is not modified while mapped.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DTYPE, &device)? };
        let model = BertModel::load(vb, &config).context("Failed to build BERT model")?;

        info!("Embedding model loaded: {model_id}@{revision} (max_seq_length={max_seq_length})");

        Ok(Self {
            inner: Arc::new(MiniLmModel {
                model,
                tokenizer,
                device,
            }),
            model_id: model_id.to_string(),
        })
    }
}

impl MiniLmModel {
    fn embed_blocking(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts, true)
            .map_err(|e| anyhow!("Tokenization failed: {e}"))?;

        let batch_size = encodings.len();
        let seq_len = encodings[0].get_ids().len();

        let mut all_ids = Vec::with_capacity(batch_size * seq_len);
        let mut all_mask = Vec::with_capacity(batch_size * seq_len);
        let mut all_type_ids = Vec::with_capacity(batch_size * seq_len);
        for encoding in &encodings {
            all_ids.extend(encoding.get_ids().iter().map(|&x| x as i64));
            all_mask.extend(encoding.get_attention_mask().iter().map(|&x| x as i64));
            all_type_ids.extend(encoding.get_type_ids().iter().map(|&x| x as i64));
        }

        let input_ids = Tensor::from_vec(all_ids, (batch_size, seq_len), &self.device)?;
        let attention_mask = Tensor::from_vec(all_mask, (batch_size, seq_len), &self.device)?;
        let token_type_ids = Tensor::from_vec(all_type_ids, (batch_size, seq_len), &self.device)?;

        let hidden_states = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        // Mean pooling over real (non-padding) tokens
        let mask = attention_mask
            .unsqueeze(2)?
            .to_dtype(DTYPE)?
            .broadcast_as(hidden_states.shape())?;
        let summed = hidden_states.mul(&mask)?.sum(1)?;
        let counts = mask.sum(1)?.clamp(1e-9, f64::MAX)?;
        let pooled = summed.div(&counts)?;

        let norm = pooled
            .sqr()?
            .sum_keepdim(1)?
            .sqrt()?
            .clamp(1e-12, f64::MAX)?;
        let normalized = pooled.broadcast_div(&norm)?;

        let vectors = normalized.to_vec2::<f32>()?;
        debug!(
            batch = batch_size,
            seq_len,
            dims = vectors.first().map(Vec::len).unwrap_or(0),
            "Embedded batch"
        );
        Ok(vectors)
    }
}

#[async_trait]
impl Embedder for MiniLmEmbedder {
    async fn embed_batch(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, AppError> {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || inner.embed_blocking(texts))
            .await
            .map_err(|e| AppError::Embedding(format!("Embedding task aborted: {e}")))?
            .map_err(|e| AppError::Embedding(format!("{e:#}")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
