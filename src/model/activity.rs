use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserBrief;

/// What kind of change an activity entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Created,
    Updated,
    Deleted,
    Commented,
    StatusChanged,
    MemberAdded,
    MemberRemoved,
    #[serde(other)]
    Other,
}

/// One row of the audit trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: i64,
    pub actor: UserBrief,
    #[serde(rename = "action")]
    pub kind: ActivityKind,
    /// Human-readable description of the change target
    pub description: String,
    #[serde(default)]
    pub project: Option<i64>,
    #[serde(default)]
    pub task: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
