//! Semantic similarity using Model2Vec static embeddings

use crate::config::SimilarityConfig;
use crate::error::Result;
use crate::similarity::model_manager::local_model_dir;
use crate::similarity::{cosine_similarity, SimilarityProvider};
use anyhow::Context;
use log::info;
use model2vec_rs::model::StaticModel;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct EmbeddingSimilarity {
    model: StaticModel,
    model_name: String,
}

impl EmbeddingSimilarity {
    /// Load a model from a local directory or a HuggingFace repo id
    pub fn load(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .with_context(|| format!("Failed to load embedding model '{}'", model_name))?;

        info!("Model loaded successfully in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_name.to_string(),
        })
    }

    pub fn from_config(config: &SimilarityConfig) -> Result<Self> {
        let model_path = Self::resolve_model_path(config);
        Self::load(&model_path, &config.embedding_model)
    }

    /// A downloaded copy under `models_dir` wins, then an existing path,
    /// otherwise the name is treated as a hub repo id.
    pub fn resolve_model_path(config: &SimilarityConfig) -> PathBuf {
        let model_name = &config.embedding_model;

        let local_path = local_model_dir(&config.models_dir, model_name);
        if local_path.exists() {
            return local_path;
        }

        PathBuf::from(model_name)
    }
}

impl SimilarityProvider for EmbeddingSimilarity {
    fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64> {
        if text_a.is_empty() || text_b.is_empty() {
            return Ok(0.0);
        }

        let embeddings = self.model.encode(&[text_a.to_string(), text_b.to_string()]);
        let (a, b) = match embeddings.as_slice() {
            [a, b] => (a, b),
            other => {
                return Err(crate::error::MatcherError::Provider(format!(
                    "Expected 2 embeddings, model returned {}",
                    other.len()
                )))
            }
        };

        let score = cosine_similarity(a, b)?;
        Ok(score.clamp(0.0, 1.0))
    }

    fn describe(&self) -> String {
        format!("embedding ({})", self.model_name)
    }
}
