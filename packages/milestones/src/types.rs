// ABOUTME: Types for AI feedback objects and derived milestones
// ABOUTME: Mirrors the feedback JSON schema produced by the companion analysis

use serde::{Deserialize, Serialize};

/// Feedback object produced by a prior analysis pass.
///
/// Every field is optional on the wire; absent fields deserialize to their
/// empty defaults so derivation never rejects a payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default)]
    pub feedback_summary: String,
    #[serde(default)]
    pub agent_class: Option<String>,
    #[serde(default)]
    pub generated_quests: Vec<GeneratedQuest>,
    #[serde(default)]
    pub top_matches: Vec<MatchCandidate>,
}

/// A quest descriptor inside feedback; only the title participates in
/// milestone derivation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedQuest {
    #[serde(default)]
    pub title: String,
}

/// A match candidate inside feedback; only its presence is counted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchCandidate {
    #[serde(default)]
    pub username: Option<String>,
}

/// A derived milestone record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub code: String,
    pub title: String,
    pub achieved: bool,
    pub description: String,
}
