use serde::{Deserialize, Serialize};

/// Task totals broken down by status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    #[serde(default)]
    pub todo: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub completed: u64,
}

/// Task totals broken down by priority
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorityCounts {
    #[serde(default)]
    pub low: u64,
    #[serde(default)]
    pub medium: u64,
    #[serde(default)]
    pub high: u64,
}

/// Server-computed report summary, for one project or the whole account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(default)]
    pub total_tasks: u64,
    #[serde(default)]
    pub by_status: StatusCounts,
    #[serde(default)]
    pub by_priority: PriorityCounts,
    #[serde(default)]
    pub completion_percentage: f64,
    #[serde(default)]
    pub overdue: u64,
}
