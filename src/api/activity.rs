use crate::model::activity::ActivityEntry;

use super::client::ApiClient;
use super::error::ApiError;

/// Optional scope for the activity feed
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityQuery {
    pub project: Option<i64>,
    pub task: Option<i64>,
}

pub fn list(client: &ApiClient, query: &ActivityQuery) -> Result<Vec<ActivityEntry>, ApiError> {
    let mut params = Vec::new();
    if let Some(project) = query.project {
        params.push(("project", project.to_string()));
    }
    if let Some(task) = query.task {
        params.push(("task", task.to_string()));
    }
    client.get_list("/api/activity/", &params)
}
