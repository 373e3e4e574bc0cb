use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserBrief;

/// Workflow status — doubles as the kanban column set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Todo,
    InProgress,
    Completed,
}

impl Status {
    /// Board column order (also the ascending sort order)
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Completed];

    /// Ordinal rank used by the sort engine: todo=1, in_progress=2, completed=3
    pub fn rank(self) -> u8 {
        match self {
            Status::Todo => 1,
            Status::InProgress => 2,
            Status::Completed => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// Wire value, as the backend serializes it
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "todo" => Some(Status::Todo),
            "in_progress" => Some(Status::InProgress),
            "completed" => Some(Status::Completed),
            _ => None,
        }
    }

    /// Next status in column order, wrapping (for the select control)
    pub fn next(self) -> Status {
        match self {
            Status::Todo => Status::InProgress,
            Status::InProgress => Status::Completed,
            Status::Completed => Status::Todo,
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Display order for grouped views: high first
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Ordinal rank used by the sort engine: high=3, medium=2, low=1
    pub fn rank(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Next priority, wrapping low → medium → high (for the select control)
    pub fn next(self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

/// A task as the backend serializes it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub project: i64,
    /// Assignee user id; `None` means unassigned
    #[serde(default)]
    pub assigned_to: Option<i64>,
    /// Server-expanded assignee details (read-only)
    #[serde(default)]
    pub assignee: Option<UserBrief>,
    pub priority: Priority,
    pub status: Status,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Display name of the assignee, or "Unassigned"
    pub fn assignee_name(&self) -> String {
        match (&self.assignee, self.assigned_to) {
            (Some(brief), _) => brief.display_name(),
            (None, Some(id)) => format!("User #{}", id),
            (None, None) => "Unassigned".to_string(),
        }
    }
}

/// Full-update payload: every field the server accepts on PUT.
///
/// Mutations always send the complete object with one field changed,
/// never a sparse patch — the reload after the call reconciles the rest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskWrite {
    pub title: String,
    pub description: Option<String>,
    pub project: i64,
    pub assigned_to: Option<i64>,
    pub priority: Priority,
    pub status: Status,
    pub due_date: Option<NaiveDate>,
}

impl TaskWrite {
    /// Snapshot every writable field of a task
    pub fn from_task(task: &Task) -> Self {
        TaskWrite {
            title: task.title.clone(),
            description: task.description.clone(),
            project: task.project,
            assigned_to: task.assigned_to,
            priority: task.priority,
            status: task.status,
            due_date: task.due_date,
        }
    }
}
