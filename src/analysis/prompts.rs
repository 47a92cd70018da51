// src/analysis/prompts.rs
//! Prompt templating for the two downstream model calls

use crate::analysis::comparator::SkillLevel;
use crate::analysis::feedback::{ChatContext, FeedbackResult};

const NO_GAPS_FALLBACK: &str = "No significant gaps identified.";
const NO_STRENGTHS_FALLBACK: &str = "Analysis pending.";
const NO_RECOMMENDATIONS_FALLBACK: &str = "No specific recommendations yet.";

fn gap_lines(gaps: &[SkillLevel]) -> String {
    if gaps.is_empty() {
        return NO_GAPS_FALLBACK.to_string();
    }
    gaps.iter()
        .map(|gap| {
            format!(
                "- {}: Candidate level {}%, Required {}%",
                gap.name, gap.candidate_level, gap.required_level
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn strength_lines(strengths: &[SkillLevel]) -> String {
    if strengths.is_empty() {
        return NO_STRENGTHS_FALLBACK.to_string();
    }
    strengths
        .iter()
        .map(|s| {
            format!(
                "- {}: Candidate level {}% (exceeds required {}%)",
                s.name, s.candidate_level, s.required_level
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn recommendation_lines(recommendations: &[String]) -> String {
    if recommendations.is_empty() {
        return NO_RECOMMENDATIONS_FALLBACK.to_string();
    }
    recommendations
        .iter()
        .map(|r| format!("- {r}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the instruction prompt for the rejection email. Deterministic
/// templating only; the model does the actual writing.
pub fn render_email_prompt(feedback: &FeedbackResult) -> String {
    format!(
        r#"Generate a warm, constructive rejection email.

CANDIDATE: {candidate}
JOB: {job}
LANGUAGE: Write in {language}

STRENGTHS TO PRAISE:
{strengths}

SKILL GAPS (be constructive):
{gaps}

Requirements:
- Warm, human tone
- Praise their strengths genuinely
- Frame gaps as growth opportunities
- Mention they'll receive personalized recommendations via chat
- Keep it concise (150 words max)
- Include a line inviting them to chat for feedback and career advice
"#,
        candidate = feedback.candidate_name,
        job = feedback.job_title,
        language = feedback.detected_language,
        strengths = strength_lines(&feedback.strengths),
        gaps = gap_lines(&feedback.gaps),
    )
}

/// Render the system prompt that frames the coaching chat for this specific
/// candidate and job.
pub fn render_chat_system_prompt(context: &ChatContext) -> String {
    let candidate_name = if context.candidate_name.trim().is_empty() {
        "the candidate"
    } else {
        &context.candidate_name
    };
    let job_title = if context.job_title.trim().is_empty() {
        "the position"
    } else {
        &context.job_title
    };

    format!(
        r#"You are a helpful, empathetic career coach assistant for {candidate_name} who recently applied for the {job_title} position.

Your role is to:
1. Provide constructive feedback about their application
2. Help them understand skill gaps without being discouraging
3. Suggest actionable steps to improve
4. Answer questions about the role and requirements
5. Collect any feedback they have about the application process

CANDIDATE CONTEXT:
Name: {candidate_name}
Applied for: {job_title}

SKILL GAPS (areas to improve):
{gaps}

STRENGTHS (exceeds requirements):
{strengths}

RECOMMENDATIONS:
{recommendations}

GUIDELINES:
- Be warm, supportive, and constructive
- Focus on growth opportunities, not failures
- Provide specific, actionable advice
- If they ask about other roles, suggest ones that match their strengths
- If they seem frustrated, acknowledge their feelings and offer encouragement
- Keep responses concise but helpful (2-3 paragraphs max)
- Match the language of the user (if they write in French, respond in French)

Remember: The goal is to help candidates improve, not to make them feel bad about not getting the job."#,
        gaps = gap_lines(&context.skill_gaps),
        strengths = strength_lines(&context.strengths),
        recommendations = recommendation_lines(&context.recommendations),
    )
}
