use reqwest::Method;
use serde::Serialize;

use crate::model::comment::Comment;

use super::client::ApiClient;
use super::error::ApiError;

#[derive(Serialize)]
struct CommentBody<'a> {
    task: i64,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<i64>,
}

pub fn list_by_task(client: &ApiClient, task_id: i64) -> Result<Vec<Comment>, ApiError> {
    client.get_list("/api/comments/", &[("task", task_id.to_string())])
}

/// Create a comment; `parent` makes it a reply (one level deep).
pub fn create(
    client: &ApiClient,
    task_id: i64,
    content: &str,
    parent: Option<i64>,
) -> Result<Comment, ApiError> {
    client.send_json(
        Method::POST,
        "/api/comments/",
        &CommentBody {
            task: task_id,
            content,
            parent,
        },
    )
}

pub fn update(client: &ApiClient, id: i64, content: &str) -> Result<Comment, ApiError> {
    #[derive(Serialize)]
    struct Body<'a> {
        content: &'a str,
    }
    client.send_json(
        Method::PATCH,
        &format!("/api/comments/{}/", id),
        &Body { content },
    )
}

pub fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.send_empty(Method::DELETE, &format!("/api/comments/{}/", id))
}
