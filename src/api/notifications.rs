use reqwest::Method;
use serde::Deserialize;

use crate::model::notification::Notification;

use super::client::ApiClient;
use super::error::ApiError;

#[derive(Debug, Deserialize)]
struct UnreadCount {
    count: u64,
}

pub fn list(client: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    client.get_list("/api/notifications/", &[])
}

/// Read-only badge refresh; polled on a fixed interval by the TUI.
pub fn unread_count(client: &ApiClient) -> Result<u64, ApiError> {
    let body: UnreadCount = client.get_json("/api/notifications/unread_count/", &[])?;
    Ok(body.count)
}

pub fn mark_read(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.send_empty(Method::POST, &format!("/api/notifications/{}/read/", id))
}

pub fn mark_all_read(client: &ApiClient) -> Result<(), ApiError> {
    client.send_empty(Method::POST, "/api/notifications/mark_all_read/")
}

pub fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.send_empty(Method::DELETE, &format!("/api/notifications/{}/", id))
}
