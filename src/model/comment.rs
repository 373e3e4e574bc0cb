use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserBrief;

/// A comment on a task. Threading is one level deep: a comment either has
/// no parent (top-level) or points at a top-level comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub task: i64,
    pub author: UserBrief,
    pub content: String,
    #[serde(default)]
    pub parent: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent.is_some()
    }
}

/// Order comments for display: top-level comments in input order, each
/// followed by its replies in input order.
pub fn thread_order(comments: &[Comment]) -> Vec<Comment> {
    let mut ordered = Vec::with_capacity(comments.len());
    for c in comments.iter().filter(|c| c.parent.is_none()) {
        ordered.push(c.clone());
        for reply in comments.iter().filter(|r| r.parent == Some(c.id)) {
            ordered.push(reply.clone());
        }
    }
    // Orphaned replies (parent deleted server-side) still get shown, at the end
    for c in comments.iter().filter(|c| {
        c.parent
            .is_some_and(|p| !comments.iter().any(|other| other.id == p))
    }) {
        ordered.push(c.clone());
    }
    ordered
}
