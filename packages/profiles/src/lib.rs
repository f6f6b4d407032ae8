// ABOUTME: Agent profile and roadmap types with boundary normalization
// ABOUTME: Coerces string-typed list fields and derives age from date of birth

pub mod normalize;
pub mod types;

pub use types::{AgentProfile, RoadmapMilestone, RoadmapQuest, RoadmapTask};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn minimal_profile(extra: &str) -> AgentProfile {
        let json = format!(r#"{{"username": "ada", "location": "Berlin"{}}}"#, extra);
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let profile = minimal_profile("");
        assert_eq!(profile.bio.as_deref(), Some("New agent"));
        assert_eq!(profile.experience_level, 1);
        assert_eq!(profile.points, 0);
        assert!(profile.interests.is_empty());
        assert!(profile.current_roadmap.is_empty());
    }

    #[test]
    fn test_list_fields_accept_native_lists() {
        let profile = minimal_profile(r#", "interests": ["running", "chess"]"#);
        assert_eq!(profile.interests, vec!["running", "chess"]);
    }

    #[test]
    fn test_list_fields_accept_comma_strings() {
        let profile = minimal_profile(r#", "wants": "a, b, c""#);
        assert_eq!(profile.wants, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_list_fields_accept_json_strings() {
        let profile = minimal_profile(r#", "achievements": "[\"a\",\"b\"]""#);
        assert_eq!(profile.achievements, vec!["a", "b"]);
    }

    #[test]
    fn test_list_fields_accept_null() {
        let profile = minimal_profile(r#", "problems": null"#);
        assert!(profile.problems.is_empty());
    }

    #[test]
    fn test_resolve_age_prefers_existing_age() {
        let mut profile = minimal_profile(r#", "age": 30, "dateOfBirth": "2000-06-15""#);
        profile.resolve_age_at(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert_eq!(profile.age, Some(30));
    }

    #[test]
    fn test_resolve_age_from_dob() {
        let mut profile = minimal_profile(r#", "dateOfBirth": "2000-06-15""#);
        profile.resolve_age_at(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert_eq!(profile.age, Some(23));
    }

    #[test]
    fn test_resolve_age_bad_dob_left_unset() {
        let mut profile = minimal_profile(r#", "dateOfBirth": "15/06/2000""#);
        profile.resolve_age_at(NaiveDate::from_ymd_opt(2024, 6, 14).unwrap());
        assert_eq!(profile.age, None);
    }

    #[test]
    fn test_roadmap_nodes_use_camel_case_ids() {
        let profile = minimal_profile(
            r#", "current_roadmap": [{
                "milestoneId": "m1", "title": "Get fit", "quests": [{
                    "questId": "q1", "title": "Run weekly", "tasks": [{
                        "taskId": "t1", "title": "Run 5k"
                    }]
                }]
            }]"#,
        );
        assert_eq!(profile.current_roadmap[0].milestone_id, "m1");
        assert_eq!(profile.current_roadmap[0].quests[0].quest_id, "q1");
        assert_eq!(profile.current_roadmap[0].quests[0].tasks[0].task_id, "t1");
    }

    #[test]
    fn test_json_without_roadmap_strips_only_roadmap() {
        let profile = minimal_profile(
            r#", "current_roadmap": [{"milestoneId": "m1", "title": "Get fit"}]"#,
        );
        let value = profile.json_without_roadmap();
        assert!(value.get("current_roadmap").is_none());
        assert_eq!(value["username"], "ada");
    }
}
