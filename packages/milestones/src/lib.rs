// ABOUTME: Pure milestone derivation over AI feedback objects
// ABOUTME: Computes six fixed achievement flags and the summary bit vector

use std::collections::HashSet;

pub mod types;

pub use types::{Feedback, GeneratedQuest, MatchCandidate, Milestone};

/// Minimum summary length that counts as rich feedback.
const RICH_FEEDBACK_CHARS: usize = 120;

/// Minimum distinct quest-title tokens that count as diverse.
const DIVERSITY_TOKENS: usize = 4;

/// Classification labels that do not count as a real classification.
const CLASS_SENTINELS: &[&str] = &["", "unknown", "error"];

/// Derive the six fixed milestones from a feedback object.
///
/// Always returns exactly six records in the same order; no I/O, no hidden
/// state.
pub fn compute_milestones(feedback: &Feedback) -> Vec<Milestone> {
    let summary = &feedback.feedback_summary;
    let agent_class = feedback
        .agent_class
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    let quests = &feedback.generated_quests;
    let matches = &feedback.top_matches;

    let mut milestones = Vec::with_capacity(6);
    let mut add = |code: &str, title: &str, achieved: bool, description: String| {
        milestones.push(Milestone {
            code: code.to_string(),
            title: title.to_string(),
            achieved,
            description,
        });
    };

    add(
        "M1",
        "Initial Analysis Generated",
        !summary.trim().is_empty(),
        "Feedback summary present indicates first pass analysis.".to_string(),
    );

    let class_label = if agent_class.is_empty() {
        "n/a"
    } else {
        agent_class.as_str()
    };
    add(
        "M2",
        "Agent Classified",
        !CLASS_SENTINELS.contains(&agent_class.as_str()),
        format!("Agent class is '{}'.", class_label),
    );

    add(
        "M3",
        "Quests Proposed",
        !quests.is_empty(),
        format!("{} quest(s) generated.", quests.len()),
    );

    add(
        "M4",
        "Matches Identified",
        matches.len() >= 2,
        format!("{} match candidates available.", matches.len()),
    );

    let summary_chars = summary.chars().count();
    add(
        "M5",
        "Rich Feedback",
        summary_chars >= RICH_FEEDBACK_CHARS,
        format!(
            "Feedback length {} chars (>={} signals depth).",
            summary_chars, RICH_FEEDBACK_CHARS
        ),
    );

    let distinct_tokens: HashSet<String> = quests
        .iter()
        .flat_map(|q| q.title.split_whitespace())
        .map(|token| token.to_lowercase())
        .collect();
    add(
        "M6",
        "Quest Diversity",
        distinct_tokens.len() >= DIVERSITY_TOKENS,
        format!(
            "Extracted {} distinct tokens from quest titles.",
            distinct_tokens.len()
        ),
    );

    milestones
}

/// Render the achieved flags of a milestone slice as a 0/1 string.
pub fn bit_vector(milestones: &[Milestone]) -> String {
    milestones
        .iter()
        .map(|m| if m.achieved { '1' } else { '0' })
        .collect()
}
