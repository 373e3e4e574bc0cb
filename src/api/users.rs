use std::path::Path;

use reqwest::Method;
use reqwest::blocking::multipart::Form;
use serde::Serialize;

use crate::model::user::{Role, User};

use super::client::ApiClient;
use super::error::ApiError;

/// Fields of the admin user create/update form
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<Role>,
}

impl UserForm {
    fn into_multipart(self) -> Form {
        let mut form = Form::new()
            .text("username", self.username)
            .text("email", self.email)
            .text("first_name", self.first_name)
            .text("last_name", self.last_name);
        if let Some(password) = self.password {
            form = form.text("password", password);
        }
        if let Some(role) = self.role {
            let value = match role {
                Role::Admin => "admin",
                Role::User => "user",
            };
            form = form.text("role", value);
        }
        form
    }
}

/// Sparse update; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

pub fn list(client: &ApiClient) -> Result<Vec<User>, ApiError> {
    client.get_list("/api/users/", &[])
}

pub fn get(client: &ApiClient, id: i64) -> Result<User, ApiError> {
    client.get_json(&format!("/api/users/{}/", id), &[])
}

/// Create a user; multipart because the form may carry an avatar.
pub fn create(client: &ApiClient, form: UserForm, avatar: Option<&Path>) -> Result<User, ApiError> {
    let mut multipart = form.into_multipart();
    if let Some(path) = avatar {
        multipart = multipart.file("avatar", path).map_err(|e| ApiError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    client.send_multipart(Method::POST, "/api/users/", multipart)
}

/// Full update of a user record
pub fn update(client: &ApiClient, id: i64, form: UserForm) -> Result<User, ApiError> {
    client.send_multipart(Method::PUT, &format!("/api/users/{}/", id), form.into_multipart())
}

/// Partial update of a user record
pub fn patch(client: &ApiClient, id: i64, patch: &UserPatch) -> Result<User, ApiError> {
    client.send_json(Method::PATCH, &format!("/api/users/{}/", id), patch)
}

pub fn delete(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    client.send_empty(Method::DELETE, &format!("/api/users/{}/", id))
}

/// Flip the account's active flag
pub fn toggle_active(client: &ApiClient, id: i64) -> Result<User, ApiError> {
    client.send_json(
        Method::POST,
        &format!("/api/users/{}/toggle_active/", id),
        &serde_json::json!({}),
    )
}

/// Users eligible to be added as project members
pub fn available(client: &ApiClient, project_id: i64) -> Result<Vec<User>, ApiError> {
    client.get_list("/api/users/available/", &[("project", project_id.to_string())])
}
