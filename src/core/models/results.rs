use serde::Serialize;

use crate::core::models::log_entry::LogEntry;

/// Result of `add_log`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddLogResult {
    pub message: String,
    pub log_id: i64,
    pub timestamp: String,
}

/// Result of every read operation returning a list of entries.
///
/// Zero matches is a successful result with an empty list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchLogsResult {
    pub message: String,
    pub logs: Vec<LogEntry>,
}

/// Result of `update_log` and `delete_log`.
///
/// A missing target id is reported with `success: false`, not as an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationResult {
    pub message: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_id: Option<i64>,
}

/// Number of entries in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Result of `stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResult {
    pub message: String,
    pub total: u64,
    pub categories: Vec<CategoryCount>,
}
