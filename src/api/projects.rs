use reqwest::Method;
use serde::Serialize;

use crate::model::project::{Project, ProjectWrite};

use super::client::ApiClient;
use super::error::ApiError;

pub fn list(client: &ApiClient) -> Result<Vec<Project>, ApiError> {
    client.get_list("/api/projects/", &[])
}

pub fn get(client: &ApiClient, id: i64) -> Result<Project, ApiError> {
    client.get_json(&format!("/api/projects/{}/", id), &[])
}

pub fn create(client: &ApiClient, write: &ProjectWrite) -> Result<Project, ApiError> {
    client.send_json(Method::POST, "/api/projects/", write)
}

pub fn update(client: &ApiClient, id: i64, write: &ProjectWrite) -> Result<Project, ApiError> {
    client.send_json(Method::PUT, &format!("/api/projects/{}/", id), write)
}

pub fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.send_empty(Method::DELETE, &format!("/api/projects/{}/", id))
}

#[derive(Serialize)]
struct MemberBody {
    user_id: i64,
}

pub fn add_member(client: &ApiClient, project_id: i64, user_id: i64) -> Result<(), ApiError> {
    client.send_json_no_content(
        Method::POST,
        &format!("/api/projects/{}/members/", project_id),
        &MemberBody { user_id },
    )
}

pub fn remove_member(client: &ApiClient, project_id: i64, user_id: i64) -> Result<(), ApiError> {
    client.send_empty(
        Method::DELETE,
        &format!("/api/projects/{}/members/{}/", project_id, user_id),
    )
}
