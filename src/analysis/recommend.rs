// src/analysis/recommend.rs
//! Improvement suggestions derived from ranked skill gaps

use crate::analysis::comparator::SkillLevel;

const MAX_RECOMMENDATIONS: usize = 3;

const FALLBACK_RECOMMENDATION: &str =
    "Continue building your portfolio with projects relevant to this role.";

/// Turn the severity-ranked gap list into 1 to 3 actionable suggestions.
///
/// Only the first three gaps are considered. The message tier depends on the
/// deficit: above 50 points the candidate needs foundations, above 25
/// hands-on work, otherwise polish. No gaps yields a single generic
/// suggestion, never an empty list.
pub fn recommend(gaps: &[SkillLevel]) -> Vec<String> {
    let mut recommendations: Vec<String> = gaps
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|gap| {
            let deficit = gap.deficit();
            if deficit > 50 {
                format!(
                    "Build foundational knowledge in {} through courses or certifications.",
                    gap.name
                )
            } else if deficit > 25 {
                format!("Strengthen {} through hands-on projects.", gap.name)
            } else {
                format!("Polish your {} expertise with real-world practice.", gap.name)
            }
        })
        .collect();

    if recommendations.is_empty() {
        recommendations.push(FALLBACK_RECOMMENDATION.to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap(name: &str, candidate_level: u8, required_level: u8) -> SkillLevel {
        SkillLevel {
            name: name.to_string(),
            candidate_level,
            required_level,
        }
    }

    #[test]
    fn test_tier_selection_by_deficit() {
        let recs = recommend(&[
            gap("Kubernetes", 0, 70),
            gap("Terraform", 30, 70),
            gap("Python", 65, 70),
        ]);

        assert_eq!(recs.len(), 3);
        assert_eq!(
            recs[0],
            "Build foundational knowledge in Kubernetes through courses or certifications."
        );
        assert_eq!(recs[1], "Strengthen Terraform through hands-on projects.");
        assert_eq!(recs[2], "Polish your Python expertise with real-world practice.");
    }

    #[test]
    fn test_boundary_deficits() {
        // Deficit of exactly 50 is the hands-on tier, exactly 25 the polish tier.
        let recs = recommend(&[gap("A", 20, 70), gap("B", 45, 70)]);
        assert!(recs[0].starts_with("Strengthen A"));
        assert!(recs[1].starts_with("Polish your B"));
    }

    #[test]
    fn test_only_first_three_gaps_considered() {
        let gaps: Vec<SkillLevel> = (0..5).map(|i| gap(&format!("S{i}"), 0, 70)).collect();
        let recs = recommend(&gaps);

        assert_eq!(recs.len(), 3);
        assert!(recs[2].contains("S2"));
    }

    #[test]
    fn test_empty_gaps_yield_generic_fallback() {
        let recs = recommend(&[]);
        assert_eq!(recs, vec![FALLBACK_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn test_deterministic() {
        let gaps = vec![gap("Go", 0, 70)];
        assert_eq!(recommend(&gaps), recommend(&gaps));
    }
}
