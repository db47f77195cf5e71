//! Scoring pipeline: normalization, skill extraction and score aggregation

pub mod text_normalizer;
pub mod skill_extractor;
pub mod vocabulary;
pub mod result;
pub mod scoring;

pub use result::MatchResult;
pub use scoring::{ScoreAggregator, ScoreBreakdown};
pub use skill_extractor::{extract_skills, SkillExtractor, SkillSet};
pub use text_normalizer::{normalize, NormalizedText};
