// ABOUTME: Proof-of-completion evaluation for the provement service
// ABOUTME: Rubric prompt, judgment parsing and the memoizing TTL cache

pub mod evaluator;
pub mod types;

pub use evaluator::ProofEvaluator;
pub use types::{Judgment, ProofTask};
