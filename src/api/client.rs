use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::config::ServerConfig;

use super::error::ApiError;

/// List endpoints may answer with a bare array or a paginated envelope;
/// both normalize to a plain vector.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Paginated { results: Vec<T>, count: u64 },
    Plain(Vec<T>),
}

impl<T> ListEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Paginated { results, .. } => results,
            ListEnvelope::Plain(items) => items,
        }
    }
}

/// The one HTTP client every resource module forwards through.
///
/// Carries the base URL, the session token, and the CSRF token the server
/// handed out at login; the CSRF header is attached only to unsafe methods.
pub struct ApiClient {
    http: Client,
    base: String,
    token: Option<String>,
    csrf: Option<String>,
}

impl ApiClient {
    pub fn new(server: &ServerConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(server.timeout_secs))
            .user_agent(concat!("taskdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(ApiClient {
            http,
            base: server.url.trim_end_matches('/').to_string(),
            token: None,
            csrf: None,
        })
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn set_csrf(&mut self, csrf: Option<String>) {
        self.csrf = csrf;
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base, path);
        let mut builder = self.http.request(method.clone(), url);
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Token {}", token));
        }
        // CSRF protection applies to unsafe methods only
        let safe = method == Method::GET || method == Method::HEAD || method == Method::OPTIONS;
        if !safe && let Some(csrf) = &self.csrf {
            builder = builder.header("X-CSRFToken", csrf.clone());
        }
        builder
    }

    fn handle(&self, method: &Method, path: &str, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "api response");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(ApiError::from_response(status.as_u16(), &body))
    }

    /// GET returning a single JSON object
    pub(crate) fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).query(query).send()?;
        Ok(self.handle(&Method::GET, path, response)?.json()?)
    }

    /// GET returning a list, normalizing the pagination envelope
    pub(crate) fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, ApiError> {
        let envelope: ListEnvelope<T> = self.get_json(path, query)?;
        Ok(envelope.into_vec())
    }

    /// Send a JSON body and decode a JSON response
    pub(crate) fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let response = self.request(method.clone(), path).json(body).send()?;
        Ok(self.handle(&method, path, response)?.json()?)
    }

    /// Send a JSON body, ignoring the response body
    pub(crate) fn send_json_no_content(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<(), ApiError> {
        let response = self.request(method.clone(), path).json(body).send()?;
        self.handle(&method, path, response)?;
        Ok(())
    }

    /// Bodyless request, ignoring the response body (DELETE, POST actions)
    pub(crate) fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        let response = self.request(method.clone(), path).send()?;
        self.handle(&method, path, response)?;
        Ok(())
    }

    /// Multipart request (profile/user forms with file uploads)
    pub(crate) fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let response = self.request(method.clone(), path).multipart(form).send()?;
        Ok(self.handle(&method, path, response)?.json()?)
    }
}
