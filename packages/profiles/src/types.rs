// ABOUTME: Agent profile and roadmap node types shared by the companion service
// ABOUTME: Wire field names follow the gamification frontend (camelCase node IDs)

use serde::{Deserialize, Serialize};

use crate::normalize::string_or_list;

/// A leaf task inside a quest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapTask {
    #[serde(rename = "taskId")]
    pub task_id: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

/// A quest grouping tasks under a milestone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapQuest {
    #[serde(rename = "questId")]
    pub quest_id: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub tasks: Vec<RoadmapTask>,
}

/// A top-level roadmap milestone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapMilestone {
    #[serde(rename = "milestoneId")]
    pub milestone_id: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub quests: Vec<RoadmapQuest>,
}

/// The user/player record driving feedback generation.
///
/// List-typed fields accept either a native JSON list or a delimited/JSON
/// encoded string; both normalize to `Vec<String>` at deserialization time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    pub username: String,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(rename = "dateOfBirth", default)]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub interests: Vec<String>,
    pub location: String,
    #[serde(default = "default_bio")]
    pub bio: Option<String>,
    #[serde(default)]
    pub user_input: Option<String>,
    #[serde(default)]
    pub current_roadmap: Vec<RoadmapMilestone>,
    #[serde(default)]
    pub points: i64,
    #[serde(default = "default_experience_level")]
    pub experience_level: i64,
    #[serde(default, deserialize_with = "string_or_list")]
    pub wants: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub achievements: Vec<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub problems: Vec<String>,
}

fn default_bio() -> Option<String> {
    Some("New agent".to_string())
}

fn default_experience_level() -> i64 {
    1
}

impl AgentProfile {
    /// Profile as JSON with the roadmap removed, for prompt embedding.
    pub fn json_without_roadmap(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(map) = value.as_object_mut() {
            map.remove("current_roadmap");
        }
        value
    }
}
