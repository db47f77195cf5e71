//! Report data wrapped around a scoring result

use crate::processing::scoring::ScoreBreakdown;
use crate::processing::MatchResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What the console and markdown views show. JSON output uses only
/// `result`, which is the stable flat contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub result: MatchResult,
    pub resume_skills: Vec<String>,
    pub job_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub resume_path: String,
    pub job_path: String,
    pub provider: String,
    pub vocabulary_size: usize,
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
}

impl ScoreReport {
    pub fn from_breakdown(breakdown: ScoreBreakdown, metadata: ReportMetadata) -> Self {
        let missing_skills = breakdown.missing_skills().into_vec();
        Self {
            result: breakdown.result,
            resume_skills: breakdown.resume_skills.into_vec(),
            job_skills: breakdown.job_skills.into_vec(),
            missing_skills,
            metadata,
        }
    }

    pub fn skill_percentage(&self) -> u8 {
        (self.result.skill_score() * 100.0).round().clamp(0.0, 100.0) as u8
    }

    pub fn semantic_percentage(&self) -> u8 {
        (self.result.semantic_score() * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::SkillExtractor;
    use crate::processing::ScoreAggregator;
    use crate::similarity::LexicalSimilarity;
    use std::sync::Arc;

    #[test]
    fn test_report_from_breakdown() {
        let extractor = SkillExtractor::new(&["python", "sql", "django"]).unwrap();
        let aggregator = ScoreAggregator::new(Arc::new(LexicalSimilarity::new()));
        let breakdown = aggregator
            .breakdown("python and sql", "python, django", &extractor)
            .unwrap();

        let report = ScoreReport::from_breakdown(
            breakdown,
            ReportMetadata {
                resume_path: "resume.txt".to_string(),
                job_path: "job.txt".to_string(),
                provider: "lexical".to_string(),
                vocabulary_size: 3,
                generated_at: Utc::now(),
                processing_time_ms: 1,
            },
        );

        assert_eq!(report.resume_skills, vec!["python", "sql"]);
        assert_eq!(report.job_skills, vec!["python", "django"]);
        assert_eq!(report.missing_skills, vec!["django"]);
        assert_eq!(report.skill_percentage(), 50);
    }
}
