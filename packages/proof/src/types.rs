// ABOUTME: Task and judgment types for proof-of-completion evaluation
// ABOUTME: Judgment parsing is strict; both fields must be present

use serde::{Deserialize, Serialize};

/// The task a user claims to have completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofTask {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The model's verdict on a completion claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    pub is_completed: bool,
    pub reason: String,
}

impl Judgment {
    /// A negative judgment carrying a failure explanation.
    pub fn not_completed(reason: String) -> Self {
        Self {
            is_completed: false,
            reason,
        }
    }
}
