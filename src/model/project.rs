use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project as the backend serializes it.
///
/// `task_count` and `completion_percentage` are server-computed aggregates;
/// the client never writes them back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Member user ids; the creator is implicitly a member
    #[serde(default)]
    pub members: Vec<i64>,
    pub created_by: i64,
    #[serde(default)]
    pub task_count: u64,
    #[serde(default)]
    pub completion_percentage: f64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Whether the user belongs to this project (creator counts)
    pub fn has_member(&self, user_id: i64) -> bool {
        self.created_by == user_id || self.members.contains(&user_id)
    }
}

/// Create/full-update payload for a project
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWrite {
    pub title: String,
    pub description: Option<String>,
    pub members: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Project {
        serde_json::from_str(
            r#"{
                "id": 4,
                "title": "Website Redesign",
                "members": [2, 3],
                "created_by": 1,
                "task_count": 12,
                "completion_percentage": 41.7
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn creator_is_implicit_member() {
        let project = sample();
        assert!(project.has_member(1));
        assert!(project.has_member(3));
        assert!(!project.has_member(9));
    }

    #[test]
    fn aggregates_default_to_zero() {
        let project: Project =
            serde_json::from_str(r#"{"id": 1, "title": "Empty", "created_by": 1}"#).unwrap();
        assert_eq!(project.task_count, 0);
        assert_eq!(project.completion_percentage, 0.0);
        assert!(project.members.is_empty());
    }
}
