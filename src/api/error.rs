use std::collections::BTreeMap;

/// Error taxonomy for backend requests.
///
/// Validation errors keep the server's field-keyed messages so callers can
/// surface them one per field. Everything else collapses to a category the
/// UI maps to a single transient message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", format_validation(.0))]
    Validation(BTreeMap<String, Vec<String>>),
    #[error("authentication required")]
    Unauthorized,
    #[error("permission denied")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("could not read {path}: {source}")]
    FileRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("unexpected response ({status}): {body}")]
    Unexpected { status: u16, body: String },
}

impl ApiError {
    /// Map an error response to the taxonomy. 400 bodies are parsed for
    /// field-keyed validation messages; anything unparseable falls back to
    /// the generic bucket.
    pub fn from_response(status: u16, body: &str) -> ApiError {
        match status {
            400 => match parse_validation_body(body) {
                Some(fields) if !fields.is_empty() => ApiError::Validation(fields),
                _ => ApiError::Unexpected {
                    status,
                    body: body.to_string(),
                },
            },
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            _ => ApiError::Unexpected {
                status,
                body: truncate_body(body),
            },
        }
    }

    /// The field-keyed messages, if this is a validation error.
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            ApiError::Validation(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// Parse a DRF-style validation body: an object mapping field names to a
/// message list (or a single message, or a `detail` string).
fn parse_validation_body(body: &str) -> Option<BTreeMap<String, Vec<String>>> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    let mut fields = BTreeMap::new();
    for (key, val) in object {
        let messages: Vec<String> = match val {
            serde_json::Value::String(s) => vec![s.clone()],
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => continue,
        };
        if !messages.is_empty() {
            fields.insert(key.clone(), messages);
        }
    }
    Some(fields)
}

fn format_validation(fields: &BTreeMap<String, Vec<String>>) -> String {
    let parts: Vec<String> = fields
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect();
    format!("validation failed — {}", parts.join("; "))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…", &body[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_categories() {
        assert!(matches!(
            ApiError::from_response(401, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(ApiError::from_response(403, ""), ApiError::Forbidden));
        assert!(matches!(ApiError::from_response(404, ""), ApiError::NotFound));
        assert!(matches!(
            ApiError::from_response(500, "boom"),
            ApiError::Unexpected { status: 500, .. }
        ));
    }

    #[test]
    fn validation_body_keeps_field_messages() {
        let err = ApiError::from_response(
            400,
            r#"{"title": ["This field may not be blank."], "due_date": "Invalid date."}"#,
        );
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["title"], vec!["This field may not be blank."]);
        assert_eq!(fields["due_date"], vec!["Invalid date."]);
        let shown = err.to_string();
        assert!(shown.contains("title"), "{}", shown);
    }

    #[test]
    fn unparseable_400_falls_back() {
        let err = ApiError::from_response(400, "<html>nope</html>");
        assert!(matches!(err, ApiError::Unexpected { status: 400, .. }));
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        match ApiError::from_response(502, &body) {
            ApiError::Unexpected { body, .. } => assert!(body.len() < 250),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
