//! Model-free similarity over term frequencies

use crate::error::Result;
use crate::similarity::SimilarityProvider;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Cosine similarity of lowercase word-frequency vectors.
///
/// Useful offline or in CI where no embedding model is available.
#[derive(Debug, Clone, Default)]
pub struct LexicalSimilarity;

impl LexicalSimilarity {
    pub fn new() -> Self {
        Self
    }

    fn term_frequencies(text: &str) -> HashMap<String, f64> {
        let mut freq = HashMap::new();
        for word in text.unicode_words() {
            *freq.entry(word.to_lowercase()).or_insert(0.0) += 1.0;
        }
        freq
    }
}

impl SimilarityProvider for LexicalSimilarity {
    fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64> {
        let tf_a = Self::term_frequencies(text_a);
        let tf_b = Self::term_frequencies(text_b);

        if tf_a.is_empty() || tf_b.is_empty() {
            return Ok(0.0);
        }

        let dot: f64 = tf_a
            .iter()
            .filter_map(|(term, a)| tf_b.get(term).map(|b| a * b))
            .sum();
        let norm_a = tf_a.values().map(|v| v * v).sum::<f64>().sqrt();
        let norm_b = tf_b.values().map(|v| v * v).sum::<f64>().sqrt();

        Ok((dot / (norm_a * norm_b)).clamp(0.0, 1.0))
    }

    fn describe(&self) -> String {
        "lexical (term-frequency cosine)".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_text_scores_one() {
        let provider = LexicalSimilarity::new();
        let score = provider.similarity("Rust systems engineer", "rust Systems engineer").unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_text_scores_zero() {
        let provider = LexicalSimilarity::new();
        assert_eq!(provider.similarity("python django", "welding forklift").unwrap(), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_bounded() {
        let provider = LexicalSimilarity::new();
        let score = provider
            .similarity("Experienced python developer with sql skills", "Looking for python and django engineer")
            .unwrap();
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_empty_input_defaults_to_zero() {
        let provider = LexicalSimilarity::new();
        assert_eq!(provider.similarity("", "python").unwrap(), 0.0);
        assert_eq!(provider.similarity("python", "").unwrap(), 0.0);
        assert_eq!(provider.similarity("", "").unwrap(), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let provider = LexicalSimilarity::new();
        let a = provider.similarity("go rust go", "rust go").unwrap();
        let b = provider.similarity("go rust go", "rust go").unwrap();
        assert_eq!(a, b);
    }
}
