use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a notification is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    TaskAssigned,
    TaskUpdated,
    CommentAdded,
    ProjectAdded,
    Mention,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub message: String,
    #[serde(default = "default_kind", rename = "notification_type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub task: Option<i64>,
    #[serde(default)]
    pub project: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_kind() -> NotificationKind {
    NotificationKind::Other
}
