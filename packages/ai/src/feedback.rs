// ABOUTME: Feedback prompt assembly for agent analysis
// ABOUTME: Embeds dataset stats, the profile, the roadmap and the output schema

use hivemind_profiles::AgentProfile;

/// Token budget for feedback generation calls.
pub const FEEDBACK_MAX_TOKENS: u32 = 5000;

/// Fixed chunk size for streamed feedback text, in characters.
pub const CHUNK_CHARS: usize = 200;

const OUTPUT_INSTRUCTIONS: &str = r#"TASK:
1. Analyze the profile and roadmap against the dataset stats.
2. Produce a natural language "message" with your analysis and specific recommendations.
3. Create/Update the roadmap in a NESTED JSON format.
   - If the user asks for a specific goal, generate a Milestone -> Quests -> Tasks tree for it.
   - IMPORTANT: Only include items that are being CREATED, UPDATED, or DELETED. Do NOT include existing items that are unchanged.
   - If modifying existing items, keep their IDs.
   - For NEW items, use temporary IDs (e.g., "new-m-1", "new-q-1").
   - Operations: "create", "update", "delete".

OUTPUT FORMAT:
Return a SINGLE valid JSON object.

JSON Schema:
{
    "message": "String (Markdown supported)",
    "milestones": [
        {
            "milestoneId": "String (Real ID or 'new-m-X')",
            "operation": "create | update | delete",
            "title": "String",
            "desc": "String",
            "quests": [
                {
                    "questId": "String (Real ID or 'new-q-X')",
                    "operation": "create | update | delete",
                    "title": "String",
                    "desc": "String",
                    "difficulty": "EASY | MEDIUM | HARD | EPIC",
                    "tasks": [
                        {
                            "taskId": "String (Real ID or 'new-t-X')",
                            "operation": "create | update | delete",
                            "title": "String",
                            "desc": "String"
                        }
                    ]
                }
            ]
        }
    ]
}"#;

/// Build the single feedback prompt for a (pre-normalized) agent profile.
///
/// The roadmap is serialized separately from the rest of the profile, and an
/// explicit user request, when present, becomes a distinguished block the
/// model is told to prioritize.
pub fn build_feedback_prompt(profile: &AgentProfile, dataset_summary: &str) -> String {
    let profile_json = serde_json::to_string(&profile.json_without_roadmap())
        .unwrap_or_else(|_| "{}".to_string());
    let roadmap_json =
        serde_json::to_string(&profile.current_roadmap).unwrap_or_else(|_| "[]".to_string());

    let query_context = match profile.user_input.as_deref().filter(|q| !q.is_empty()) {
        Some(query) => format!(
            "\nUSER'S CURRENT REQUEST/MESSAGE:\n\"{}\"\n(Please prioritize answering this specific request in your message.)\n",
            query
        ),
        None => String::new(),
    };

    format!(
        "You are an AI Analyst for the 'Hivemind' system.\n\n\
         GLOBAL DATASET STATS (EasyShare Data):\n\
         {dataset_summary}\n\
         {query_context}\n\
         AGENT PROFILE:\n\
         {profile_json}\n\n\
         CURRENT ROADMAP (Existing Milestones/Quests/Tasks):\n\
         {roadmap_json}\n\n\
         {OUTPUT_INSTRUCTIONS}"
    )
}

/// Split text into fixed-size character chunks.
///
/// Purely length-based; JSON token boundaries are ignored and the receiver
/// reassembles the concatenation.
pub fn chunk_text(text: &str, size: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
