//! Semantic similarity providers
//!
//! The scoring pipeline only sees [`SimilarityProvider`]; which backend
//! sits behind it is decided from configuration by [`build_provider`].

pub mod embeddings;
pub mod lexical;
pub mod model_manager;

use crate::config::{ProviderKind, SimilarityConfig};
use crate::error::Result;
use std::sync::Arc;

pub use embeddings::EmbeddingSimilarity;
pub use lexical::LexicalSimilarity;

/// Bounded similarity between two texts.
///
/// Implementations must be deterministic for identical inputs, return a
/// value in `[0, 1]`, and return a defined value (not an error) for empty
/// text. Arguments are passed in caller order; symmetry is not assumed.
pub trait SimilarityProvider: Send + Sync {
    fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64>;

    /// Short human-readable description, e.g. the model name
    fn describe(&self) -> String;
}

/// Construct the provider named by `config`. Model loading failures are
/// returned as errors; there is no fallback provider.
pub fn build_provider(config: &SimilarityConfig) -> Result<Arc<dyn SimilarityProvider>> {
    match config.provider {
        ProviderKind::Embedding => {
            let provider = EmbeddingSimilarity::from_config(config)?;
            Ok(Arc::new(provider))
        }
        ProviderKind::Lexical => Ok(Arc::new(LexicalSimilarity::new())),
    }
}

/// Cosine similarity of two equal-length vectors; 0.0 for empty or zero vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(crate::error::MatcherError::Provider(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f64 = a.iter().zip(b).map(|(x, y)| f64::from(*x) * f64::from(*y)).sum();
    let norm_a: f64 = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_and_orthogonal() {
        let a = [1.0, 2.0, 3.0];
        assert!((cosine_similarity(&a, &a).unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
        assert!(cosine_similarity(&[1.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_lexical_provider_from_config() {
        let mut config = crate::config::Config::default().similarity;
        config.provider = ProviderKind::Lexical;

        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.describe(), "lexical (term-frequency cosine)");
    }
}
