//! Scoring output record

use serde::{Deserialize, Serialize};

/// Result of matching one resume against one job description.
///
/// Serializes as a flat record with exactly `skill_score`,
/// `semantic_score` and `matched_skills`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchResult {
    skill_score: f64,
    semantic_score: f64,
    matched_skills: Vec<String>,
}

impl MatchResult {
    pub fn new(skill_score: f64, semantic_score: f64, matched_skills: Vec<String>) -> Self {
        Self {
            skill_score,
            semantic_score,
            matched_skills,
        }
    }

    /// Fraction of job-description skills also found in the resume (2 decimals)
    pub fn skill_score(&self) -> f64 {
        self.skill_score
    }

    /// Semantic similarity of the two documents (4 decimals)
    pub fn semantic_score(&self) -> f64 {
        self.semantic_score
    }

    pub fn matched_skills(&self) -> &[String] {
        &self.matched_skills
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Round to `decimals` places, ties to even
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}
