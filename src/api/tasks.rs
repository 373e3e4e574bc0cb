use reqwest::Method;

use crate::model::task::{Priority, Status, Task, TaskWrite};

use super::client::ApiClient;
use super::error::ApiError;

/// Server-side list filters. All optional; the view-model applies its own
/// filtering on top of whatever subset comes back.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub project: Option<i64>,
    pub assignee: Option<i64>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl TaskQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(project) = self.project {
            params.push(("project", project.to_string()));
        }
        if let Some(assignee) = self.assignee {
            params.push(("assigned_to", assignee.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            params.push(("priority", priority.as_str().to_string()));
        }
        params
    }
}

pub fn list(client: &ApiClient, query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
    client.get_list("/api/tasks/", &query.to_params())
}

pub fn get(client: &ApiClient, id: i64) -> Result<Task, ApiError> {
    client.get_json(&format!("/api/tasks/{}/", id), &[])
}

pub fn create(client: &ApiClient, write: &TaskWrite) -> Result<Task, ApiError> {
    client.send_json(Method::POST, "/api/tasks/", write)
}

/// Full update: the payload replaces every writable field.
pub fn update(client: &ApiClient, id: i64, write: &TaskWrite) -> Result<Task, ApiError> {
    client.send_json(Method::PUT, &format!("/api/tasks/{}/", id), write)
}

pub fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.send_empty(Method::DELETE, &format!("/api/tasks/{}/", id))
}

/// Tasks assigned to the current user
pub fn mine(client: &ApiClient) -> Result<Vec<Task>, ApiError> {
    client.get_list("/api/tasks/my_tasks/", &[])
}

pub fn by_project(client: &ApiClient, project_id: i64) -> Result<Vec<Task>, ApiError> {
    client.get_list(&format!("/api/projects/{}/tasks/", project_id), &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_has_no_params() {
        assert!(TaskQuery::default().to_params().is_empty());
    }

    #[test]
    fn query_params_use_wire_names() {
        let query = TaskQuery {
            project: Some(2),
            assignee: Some(5),
            status: Some(Status::InProgress),
            priority: Some(Priority::High),
        };
        let params = query.to_params();
        assert_eq!(
            params,
            vec![
                ("project", "2".to_string()),
                ("assigned_to", "5".to_string()),
                ("status", "in_progress".to_string()),
                ("priority", "high".to_string()),
            ]
        );
    }
}
