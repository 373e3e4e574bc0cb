use crate::model::report::ReportSummary;

use super::client::ApiClient;
use super::error::ApiError;

/// Summary across everything visible to the current user, or scoped to
/// one project.
pub fn summary(client: &ApiClient, project: Option<i64>) -> Result<ReportSummary, ApiError> {
    let mut params = Vec::new();
    if let Some(project) = project {
        params.push(("project", project.to_string()));
    }
    client.get_json("/api/reports/summary/", &params)
}
