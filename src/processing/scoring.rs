//! Blends skill overlap and semantic similarity into a [`MatchResult`]

use crate::error::{MatcherError, Result};
use crate::processing::result::{round_to, MatchResult};
use crate::processing::skill_extractor::{SkillExtractor, SkillSet};
use crate::processing::text_normalizer::{normalize, NormalizedText};
use crate::similarity::SimilarityProvider;
use log::debug;
use std::sync::Arc;

const SKILL_SCORE_DECIMALS: i32 = 2;
const SEMANTIC_SCORE_DECIMALS: i32 = 4;

/// Intermediate data from one scoring run, for reports that need more
/// than the flat result.
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub result: MatchResult,
    pub resume_skills: SkillSet,
    pub job_skills: SkillSet,
}

impl ScoreBreakdown {
    /// Job-description skills the resume does not show
    pub fn missing_skills(&self) -> SkillSet {
        self.job_skills.difference(&self.resume_skills)
    }
}

/// Scores resume/job-description pairs.
///
/// Holds only the injected provider; every call works on its own inputs,
/// so one aggregator can be shared across threads.
pub struct ScoreAggregator {
    provider: Arc<dyn SimilarityProvider>,
}

impl ScoreAggregator {
    pub fn new(provider: Arc<dyn SimilarityProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn SimilarityProvider {
        self.provider.as_ref()
    }

    /// Score raw resume and job text against a vocabulary
    pub fn compute_scores<S: AsRef<str>>(
        &self,
        resume_text: &str,
        jd_text: &str,
        vocabulary: &[S],
    ) -> Result<MatchResult> {
        let extractor = SkillExtractor::new(vocabulary)?;
        self.compute_with_extractor(resume_text, jd_text, &extractor)
    }

    /// Same as [`compute_scores`](Self::compute_scores) with a vocabulary
    /// compiled once by the caller
    pub fn compute_with_extractor(
        &self,
        resume_text: &str,
        jd_text: &str,
        extractor: &SkillExtractor,
    ) -> Result<MatchResult> {
        Ok(self.breakdown(resume_text, jd_text, extractor)?.result)
    }

    pub fn breakdown(
        &self,
        resume_text: &str,
        jd_text: &str,
        extractor: &SkillExtractor,
    ) -> Result<ScoreBreakdown> {
        let resume = normalize(resume_text);
        let job = normalize(jd_text);

        let resume_skills = extractor.extract(&resume);
        let job_skills = extractor.extract(&job);
        let overlap = resume_skills.intersection(&job_skills);

        let skill_score = skill_score(overlap.len(), job_skills.len());
        let semantic_score = self.semantic_score(&resume, &job)?;

        debug!(
            "Matched {}/{} job skills (skill_score={}, semantic_score={})",
            overlap.len(),
            job_skills.len(),
            skill_score,
            semantic_score
        );

        Ok(ScoreBreakdown {
            result: MatchResult::new(skill_score, semantic_score, overlap.into_vec()),
            resume_skills,
            job_skills,
        })
    }

    fn semantic_score(&self, resume: &NormalizedText, job: &NormalizedText) -> Result<f64> {
        if resume.is_empty() || job.is_empty() {
            debug!("Empty document text, semantic score defaults to 0.0");
            return Ok(0.0);
        }

        let raw = self.provider.similarity(resume.as_str(), job.as_str())?;
        if !raw.is_finite() {
            return Err(MatcherError::Provider(format!(
                "{} returned a non-finite score: {}",
                self.provider.describe(),
                raw
            )));
        }

        Ok(round_to(raw.clamp(0.0, 1.0), SEMANTIC_SCORE_DECIMALS))
    }
}

/// `matched / required`, or 0.0 when the job lists no known skills
fn skill_score(matched: usize, required: usize) -> f64 {
    if required == 0 {
        return 0.0;
    }
    round_to(matched as f64 / required as f64, SKILL_SCORE_DECIMALS)
}
