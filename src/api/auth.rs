use std::path::Path;

use reqwest::Method;
use reqwest::blocking::multipart::Form;
use serde::{Deserialize, Serialize};

use crate::model::user::User;

use super::client::ApiClient;
use super::error::ApiError;
use super::session::Session;

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// What the backend returns from login/register
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub csrf_token: Option<String>,
    pub user: User,
}

impl AuthResponse {
    pub fn into_session(self) -> Session {
        Session {
            token: self.token,
            csrf: self.csrf_token,
            user: self.user,
        }
    }
}

/// Fields of the profile-update form; the avatar travels as a file part.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

pub fn register(client: &ApiClient, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
    client.send_json(Method::POST, "/api/auth/register/", request)
}

pub fn login(client: &ApiClient, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
    client.send_json(
        Method::POST,
        "/api/auth/login/",
        &LoginRequest { username, password },
    )
}

/// Invalidate the token server-side. The caller clears the local session
/// regardless of the outcome.
pub fn logout(client: &ApiClient) -> Result<(), ApiError> {
    client.send_empty(Method::POST, "/api/auth/logout/")
}

pub fn profile(client: &ApiClient) -> Result<User, ApiError> {
    client.get_json("/api/auth/profile/", &[])
}

/// Update the profile; multipart because the form may carry an avatar.
pub fn update_profile(
    client: &ApiClient,
    update: &ProfileUpdate,
    avatar: Option<&Path>,
) -> Result<User, ApiError> {
    let mut form = Form::new();
    if let Some(email) = &update.email {
        form = form.text("email", email.clone());
    }
    if let Some(first) = &update.first_name {
        form = form.text("first_name", first.clone());
    }
    if let Some(last) = &update.last_name {
        form = form.text("last_name", last.clone());
    }
    if let Some(path) = avatar {
        form = form.file("avatar", path).map_err(|e| ApiError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    client.send_multipart(Method::PATCH, "/api/auth/profile/", form)
}

pub fn change_password(
    client: &ApiClient,
    old_password: &str,
    new_password: &str,
) -> Result<(), ApiError> {
    #[derive(Serialize)]
    struct Body<'a> {
        old_password: &'a str,
        new_password: &'a str,
    }
    client.send_json_no_content(
        Method::POST,
        "/api/auth/change-password/",
        &Body {
            old_password,
            new_password,
        },
    )
}

pub fn delete_account(client: &ApiClient) -> Result<(), ApiError> {
    client.send_empty(Method::DELETE, "/api/auth/account/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_becomes_session() {
        let response: AuthResponse = serde_json::from_str(
            r#"{
                "token": "tok",
                "csrf_token": "csrf",
                "user": {"id": 1, "username": "abaker"}
            }"#,
        )
        .unwrap();
        let session = response.into_session();
        assert_eq!(session.token, "tok");
        assert_eq!(session.csrf.as_deref(), Some("csrf"));
        assert_eq!(session.user.username, "abaker");
    }

    #[test]
    fn csrf_token_is_optional() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"token": "tok", "user": {"id": 1, "username": "x"}}"#,
        )
        .unwrap();
        assert!(response.csrf_token.is_none());
    }
}
