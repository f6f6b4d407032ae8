// ABOUTME: Shared application state for the two services
// ABOUTME: Dataset replaced wholesale on upload; gateway client shared read-only

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use hivemind_ai::GroqService;
use hivemind_dataset::DatasetState;
use hivemind_proof::ProofEvaluator;

/// State owned by the companion (feedback) service process.
///
/// Created at startup, passed to handlers via axum `State`. The dataset is
/// the only mutable piece and is swapped as a whole on upload.
#[derive(Clone)]
pub struct CompanionState {
    pub dataset: Arc<RwLock<DatasetState>>,
    pub dataset_path: PathBuf,
    pub ai: Arc<GroqService>,
}

impl CompanionState {
    /// Load the dataset from `dataset_path` and wrap the gateway client.
    pub fn new(dataset_path: PathBuf, ai: GroqService) -> Self {
        let dataset = DatasetState::load(&dataset_path);
        Self {
            dataset: Arc::new(RwLock::new(dataset)),
            dataset_path,
            ai: Arc::new(ai),
        }
    }
}

/// State owned by the provement (proof evaluation) service process.
#[derive(Clone)]
pub struct ProvementState {
    pub evaluator: Arc<ProofEvaluator>,
}

impl ProvementState {
    pub fn new(evaluator: ProofEvaluator) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
        }
    }
}
