//! Resume matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod similarity;

pub use config::Config;
pub use error::{MatcherError, Result};
pub use processing::{normalize, MatchResult, NormalizedText, ScoreAggregator, SkillExtractor, SkillSet};
pub use similarity::SimilarityProvider;
