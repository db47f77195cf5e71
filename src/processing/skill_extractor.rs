//! Whole-word skill extraction against a vocabulary

use crate::error::{MatcherError, Result};
use crate::processing::text_normalizer::{normalize, NormalizedText};
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashSet;

/// Skills found in one document, in vocabulary order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.as_str())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s.eq_ignore_ascii_case(skill))
    }

    /// Skills present in both sets, keeping `self`'s order
    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        let theirs: HashSet<String> = other.skills.iter().map(|s| s.to_ascii_lowercase()).collect();
        SkillSet {
            skills: self
                .skills
                .iter()
                .filter(|s| theirs.contains(&s.to_ascii_lowercase()))
                .cloned()
                .collect(),
        }
    }

    /// Skills in `self` that `other` lacks
    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        SkillSet {
            skills: self
                .skills
                .iter()
                .filter(|s| !other.contains(s))
                .cloned()
                .collect(),
        }
    }

    pub fn is_subset(&self, other: &SkillSet) -> bool {
        self.skills.iter().all(|s| other.contains(s))
    }

    pub fn into_vec(self) -> Vec<String> {
        self.skills
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.skills.iter()
    }
}

/// Vocabulary compiled into one case-insensitive automaton.
///
/// Each entry is reported at most once per text, and only when an
/// occurrence is bounded by non-word characters (or text edges) on both
/// sides, so `java` never matches inside `javascript`.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    matcher: Option<AhoCorasick>,
    vocabulary: Vec<String>,
}

impl SkillExtractor {
    /// Compile a vocabulary. Entries are normalized first; entries that end
    /// up empty and later case-insensitive duplicates are skipped.
    pub fn new<S: AsRef<str>>(vocabulary: &[S]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(vocabulary.len());

        for raw in vocabulary {
            let entry = normalize(raw.as_ref()).into_string();
            if entry.is_empty() {
                log::warn!("Skipping blank vocabulary entry {:?}", raw.as_ref());
                continue;
            }
            if !seen.insert(entry.to_ascii_lowercase()) {
                log::debug!("Skipping duplicate vocabulary entry: {}", entry);
                continue;
            }
            entries.push(entry);
        }

        let matcher = if entries.is_empty() {
            None
        } else {
            // Standard semantics so overlapping entries ("java", "java ee") are all seen
            let automaton = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .match_kind(MatchKind::Standard)
                .build(&entries)
                .map_err(|e| {
                    MatcherError::InvalidInput(format!("Failed to build skill matcher: {}", e))
                })?;
            Some(automaton)
        };

        Ok(Self {
            matcher,
            vocabulary: entries,
        })
    }

    /// Skills with at least one whole-word occurrence in `text`
    pub fn extract(&self, text: &NormalizedText) -> SkillSet {
        let matcher = match &self.matcher {
            Some(matcher) if !text.is_empty() => matcher,
            _ => return SkillSet::default(),
        };

        let haystack = text.as_str().as_bytes();
        let mut found = vec![false; self.vocabulary.len()];

        for mat in matcher.find_overlapping_iter(haystack) {
            let id = mat.pattern().as_usize();
            if found[id] {
                continue;
            }
            if is_word_bounded(haystack, mat.start(), mat.end()) {
                found[id] = true;
            }
        }

        SkillSet {
            skills: self
                .vocabulary
                .iter()
                .zip(found)
                .filter_map(|(skill, hit)| hit.then(|| skill.clone()))
                .collect(),
        }
    }

    /// Normalize `raw` and extract from it
    pub fn extract_raw(&self, raw: &str) -> SkillSet {
        self.extract(&normalize(raw))
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn skill_count(&self) -> usize {
        self.vocabulary.len()
    }
}

/// One-shot extraction for callers without a compiled vocabulary
pub fn extract_skills<S: AsRef<str>>(text: &NormalizedText, vocabulary: &[S]) -> Result<SkillSet> {
    Ok(SkillExtractor::new(vocabulary)?.extract(text))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_word_bounded(haystack: &[u8], start: usize, end: usize) -> bool {
    let before_ok = start == 0 || !is_word_byte(haystack[start - 1]);
    let after_ok = end == haystack.len() || !is_word_byte(haystack[end]);
    before_ok && after_ok
}
