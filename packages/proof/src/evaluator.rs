// ABOUTME: Proof evaluator calling the gateway with a fixed judging rubric
// ABOUTME: Judgments are memoized by (task, comment, image URLs) with a TTL

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use hivemind_ai::{ContentPart, GroqService};

use crate::types::{Judgment, ProofTask};

/// Cache expiry window for identical evaluation requests.
const CACHE_TTL: Duration = Duration::from_secs(20 * 60);

/// Token budget for evaluation calls.
const EVALUATION_MAX_TOKENS: u32 = 256;

const JUDGING_RULES: &str = "Judging rules:\n\
1. Take the USER COMMENT very seriously. Use it to understand what the user actually did, \
clarify ambiguous details in the images, and decide how well the evidence matches the task.\n\
2. Be LENIENT about the quality of the evidence: if the images and user comment are reasonably \
connected to the task and look like a genuine attempt, do not penalize small imperfections.\n\
3. Be STRICT about the task itself: the action, object, or goal must match the task title/description.\n\
   - If the task is to read a specific book (e.g. 'Harry Potter 2') and the evidence clearly shows \
a different book (e.g. 'Harry Potter 1'), then the task is NOT completed, even if the user comment \
describes reading.\n\
   - If the task is to run 10km and the evidence shows some other workout that is clearly not a 10km run, \
then the task is NOT completed.\n\
4. When the images are ambiguous, use the user comment as the deciding factor: if the comment is consistent \
with the task and the images, lean toward is_completed = true; if it conflicts with the task, use \
is_completed = false.\n\
5. Only mark is_completed = true when the combined evidence from images AND user comment supports that THIS \
exact task was done. If you are unsure whether the exact task was completed, prefer is_completed = false.\n\n\
Now analyze the images and user comment following these rules.\n\
Respond in JSON format with fields: is_completed (boolean) and reason (string). \
Only output JSON.";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    task_id: i64,
    user_comment: String,
    image_urls: Vec<String>,
}

/// Evaluates completion claims against image evidence.
///
/// Successful judgments are cached per exact input key; entries expire after
/// the TTL and are evicted lazily on the next lookup for the same key.
pub struct ProofEvaluator {
    service: GroqService,
    ttl: Duration,
    cache: Mutex<HashMap<CacheKey, (Instant, Judgment)>>,
}

impl ProofEvaluator {
    pub fn new(service: GroqService) -> Self {
        Self::with_ttl(service, CACHE_TTL)
    }

    /// Construct with a custom cache TTL.
    pub fn with_ttl(service: GroqService, ttl: Duration) -> Self {
        Self {
            service,
            ttl,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Judge whether a task was completed.
    ///
    /// Never returns an error: gateway and parse failures become negative
    /// judgments with an explanatory reason.
    pub async fn evaluate(
        &self,
        task: &ProofTask,
        image_urls: &[String],
        user_text: Option<&str>,
    ) -> Judgment {
        let user_comment = user_text.unwrap_or("").to_string();
        let key = CacheKey {
            task_id: task.id,
            user_comment: user_comment.clone(),
            image_urls: image_urls.to_vec(),
        };

        let now = Instant::now();
        if let Some(judgment) = self.cached(&key, now) {
            info!("Using cached judgment for task {}", task.id);
            return judgment;
        }

        let mut parts = vec![ContentPart::text(build_prompt(task, &user_comment))];
        for url in image_urls {
            parts.push(ContentPart::image_url(url.clone()));
        }

        let text = match self.service.chat_json(parts, EVALUATION_MAX_TOKENS).await {
            Ok(text) => text,
            Err(err) => {
                warn!("Proof evaluation call failed: {}", err);
                return Judgment::not_completed(format!("AI API call failed. Error: {}", err));
            }
        };

        match serde_json::from_str::<Judgment>(&text) {
            Ok(judgment) => {
                self.store(key, now, judgment.clone());
                judgment
            }
            Err(err) => {
                warn!("Unparseable judgment from gateway: {}", err);
                Judgment::not_completed(format!(
                    "AI evaluation failed. Could not parse model response. Error: {}. Raw response: {}",
                    err, text
                ))
            }
        }
    }

    /// Non-expired cached judgment for a key; expired entries are evicted.
    fn cached(&self, key: &CacheKey, now: Instant) -> Option<Judgment> {
        let mut cache = self.lock_cache();
        match cache.get(key) {
            Some((stored_at, judgment)) if now.duration_since(*stored_at) < self.ttl => {
                Some(judgment.clone())
            }
            Some(_) => {
                cache.remove(key);
                None
            }
            None => None,
        }
    }

    fn store(&self, key: CacheKey, stored_at: Instant, judgment: Judgment) {
        self.lock_cache().insert(key, (stored_at, judgment));
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, (Instant, Judgment)>> {
        self.cache.lock().unwrap_or_else(|poisoned| {
            warn!("Judgment cache mutex poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

/// Build the rubric prompt for one evaluation.
fn build_prompt(task: &ProofTask, user_comment: &str) -> String {
    format!(
        "You are an AI judge for a productivity app. Your role is to determine \
         if a user has completed a SPECIFIC task based on the evidence they provide.\n\n\
         Task Title: {}\n\
         Task Description: {}\n\
         User comment (very important): {}\n\n\
         {}",
        task.title,
        task.description.as_deref().unwrap_or("No description provided."),
        user_comment,
        JUDGING_RULES
    )
}
