// src/analysis/comparator.rs
//! Candidate vs job skill comparison

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;

/// Both ranked lists are cut to this many entries after sorting.
pub const MAX_RANKED_SKILLS: usize = 5;

const HELD_SKILL_LEVEL: u8 = 65;
const EXTRA_SKILL_LEVEL: u8 = 75;
const REQUIRED_SKILL_LEVEL: u8 = 70;

/// One skill's comparative standing between a candidate and a job.
/// Immutable once produced; field names are part of the API contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLevel {
    pub name: String,
    pub candidate_level: u8,
    pub required_level: u8,
}

impl SkillLevel {
    /// How far the candidate falls short of the requirement. Negative when
    /// the candidate exceeds it.
    pub fn deficit(&self) -> i16 {
        self.required_level as i16 - self.candidate_level as i16
    }
}

/// Source of proficiency levels for the comparison.
///
/// The default implementation returns fixed constants. That is a stand-in
/// for a real skill-scoring model; swapping it out must not require touching
/// the partition or sort logic.
pub trait ScoringStrategy {
    /// Assumed proficiency for a skill the candidate lists. `job_requires`
    /// tells the strategy whether the job asks for this skill.
    fn level_for(&self, skill: &str, job_requires: bool) -> u8;

    /// Threshold a job-required skill is measured against.
    fn required_level(&self, skill: &str) -> u8;
}

/// Constant-based placeholder scoring: 65 for a held required skill, 75 for
/// a skill the job does not ask for, 70 required across the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderScoring;

impl ScoringStrategy for PlaceholderScoring {
    fn level_for(&self, _skill: &str, job_requires: bool) -> u8 {
        if job_requires {
            HELD_SKILL_LEVEL
        } else {
            EXTRA_SKILL_LEVEL
        }
    }

    fn required_level(&self, _skill: &str) -> u8 {
        REQUIRED_SKILL_LEVEL
    }
}

/// Partition the union of job-required and candidate-held skills into gaps
/// and strengths.
///
/// Names are matched case-insensitively; the display name comes from the
/// job's spelling for job-required skills, from the candidate's otherwise.
/// Duplicate case-insensitive names within one collection: first occurrence
/// wins. Gaps come back sorted by largest deficit first, strengths by
/// highest candidate level first, both truncated to [`MAX_RANKED_SKILLS`].
pub fn compare<'a>(
    candidate_skills: impl IntoIterator<Item = &'a str>,
    job_skills: impl IntoIterator<Item = &'a str>,
    scoring: &dyn ScoringStrategy,
) -> (Vec<SkillLevel>, Vec<SkillLevel>) {
    let candidate = dedup_keyed(candidate_skills);
    let job = dedup_keyed(job_skills);

    let candidate_keys: HashSet<&str> = candidate.iter().map(|(key, _)| key.as_str()).collect();
    let job_keys: HashSet<&str> = job.iter().map(|(key, _)| key.as_str()).collect();

    let mut gaps = Vec::new();
    let mut strengths = Vec::new();

    for (key, display) in &job {
        let required_level = scoring.required_level(display);
        if candidate_keys.contains(key.as_str()) {
            let candidate_level = scoring.level_for(display, true);
            let entry = SkillLevel {
                name: display.to_string(),
                candidate_level,
                required_level,
            };
            if candidate_level >= required_level {
                strengths.push(entry);
            } else {
                gaps.push(entry);
            }
        } else {
            gaps.push(SkillLevel {
                name: display.to_string(),
                candidate_level: 0,
                required_level,
            });
        }
    }

    for (key, display) in &candidate {
        if !job_keys.contains(key.as_str()) {
            strengths.push(SkillLevel {
                name: display.to_string(),
                candidate_level: scoring.level_for(display, false),
                required_level: 0,
            });
        }
    }

    // Stable sorts keep provider order among ties.
    gaps.sort_by_key(|skill| Reverse(skill.deficit()));
    strengths.sort_by_key(|skill| Reverse(skill.candidate_level));
    gaps.truncate(MAX_RANKED_SKILLS);
    strengths.truncate(MAX_RANKED_SKILLS);

    (gaps, strengths)
}

/// Lowercased key plus original display name, first occurrence wins.
fn dedup_keyed<'a>(skills: impl IntoIterator<Item = &'a str>) -> Vec<(String, &'a str)> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for name in skills {
        let key = name.to_lowercase();
        if seen.insert(key.clone()) {
            out.push((key, name));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(skills: &[SkillLevel]) -> Vec<&str> {
        skills.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_held_required_skill_below_threshold_is_gap() {
        let (gaps, strengths) = compare(["Python"], ["Python", "Kubernetes"], &PlaceholderScoring);

        assert_eq!(names(&gaps), vec!["Kubernetes", "Python"]);
        assert_eq!(gaps[0].candidate_level, 0);
        assert_eq!(gaps[0].required_level, 70);
        assert_eq!(gaps[1].candidate_level, 65);
        assert!(strengths.is_empty());
    }

    #[test]
    fn test_extra_candidate_skill_is_strength() {
        let (gaps, strengths) = compare(["Rust"], ["Go"], &PlaceholderScoring);

        assert_eq!(names(&gaps), vec!["Go"]);
        assert_eq!(names(&strengths), vec!["Rust"]);
        assert_eq!(strengths[0].candidate_level, 75);
        assert_eq!(strengths[0].required_level, 0);
    }

    #[test]
    fn test_case_insensitive_match_displays_job_casing() {
        let (gaps, strengths) = compare(["python"], ["Python"], &PlaceholderScoring);

        assert!(strengths.is_empty());
        assert_eq!(names(&gaps), vec!["Python"]);
        assert_eq!(gaps[0].candidate_level, 65);
    }

    #[test]
    fn test_every_skill_lands_in_exactly_one_list() {
        let candidate = ["Rust", "SQL", "Docker"];
        let job = ["sql", "Kubernetes", "Terraform"];
        let (gaps, strengths) = compare(candidate, job, &PlaceholderScoring);

        let mut keys: Vec<String> = gaps
            .iter()
            .chain(&strengths)
            .map(|s| s.name.to_lowercase())
            .collect();
        keys.sort();
        let deduped: HashSet<&String> = keys.iter().collect();
        assert_eq!(deduped.len(), keys.len(), "no key may appear in both lists");
        assert_eq!(keys.len(), 5, "union of both inputs, matched keys merged");
    }

    #[test]
    fn test_gaps_sorted_by_deficit_and_truncated() {
        let job = ["A", "B", "C", "D", "E", "F", "G"];
        let (gaps, strengths) = compare(["a", "b"], job, &PlaceholderScoring);

        assert_eq!(gaps.len(), MAX_RANKED_SKILLS);
        assert!(strengths.is_empty());
        // Missing skills (deficit 70) outrank held-but-short ones (deficit 5).
        assert_eq!(names(&gaps), vec!["C", "D", "E", "F", "G"]);
        for pair in gaps.windows(2) {
            assert!(pair[0].deficit() >= pair[1].deficit());
        }
    }

    #[test]
    fn test_strengths_sorted_and_truncated() {
        struct Tiered;
        impl ScoringStrategy for Tiered {
            fn level_for(&self, skill: &str, _job_requires: bool) -> u8 {
                70 + skill.len() as u8
            }
            fn required_level(&self, _skill: &str) -> u8 {
                70
            }
        }

        let candidate = ["a", "ab", "abc", "abcd", "abcde", "abcdef"];
        let no_skills: [&str; 0] = [];
        let (gaps, strengths) = compare(candidate, no_skills, &Tiered);

        assert!(gaps.is_empty());
        assert_eq!(strengths.len(), MAX_RANKED_SKILLS);
        assert_eq!(names(&strengths), vec!["abcdef", "abcde", "abcd", "abc", "ab"]);
    }

    #[test]
    fn test_duplicate_names_first_occurrence_wins() {
        let no_skills: [&str; 0] = [];
        let (gaps, _) = compare(no_skills, ["Python", "PYTHON", "python"], &PlaceholderScoring);

        assert_eq!(names(&gaps), vec!["Python"]);
    }

    #[test]
    fn test_empty_inputs_yield_empty_lists() {
        let no_skills: [&str; 0] = [];
        let (gaps, strengths) = compare(no_skills, no_skills, &PlaceholderScoring);

        assert!(gaps.is_empty());
        assert!(strengths.is_empty());
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let skill = SkillLevel {
            name: "Rust".to_string(),
            candidate_level: 65,
            required_level: 70,
        };
        let json = serde_json::to_value(&skill).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Rust", "candidateLevel": 65, "requiredLevel": 70})
        );
    }
}
